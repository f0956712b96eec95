// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Callsheet CLI entrypoint.
//!
//! By default this runs the interactive TUI against the staffing services at
//! `http://localhost:8000`. Use `--demo` for an offline session answered from
//! built-in fixtures.

use std::error::Error;
use std::sync::Arc;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--base-url <url>] [--record-cmd <cmd>]\n  {program} --demo\n\nTUI mode (default) talks to the staffing services at <url> (default {default_url}).\n--record-cmd overrides the audio capture command used for voice queries\n(default `{default_record}`; the output WAV path is appended as the final argument).\n\n--demo runs offline against built-in fixtures and accepts no other flags.",
        default_url = callsheet::client::DEFAULT_BASE_URL,
        default_record = callsheet::audio::DEFAULT_RECORD_COMMAND,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    base_url: Option<String>,
    record_cmd: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--base-url" => {
                if options.base_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.base_url = Some(url);
            }
            "--record-cmd" => {
                if options.record_cmd.is_some() {
                    return Err(());
                }
                let command = args.next().ok_or(())?;
                options.record_cmd = Some(command);
            }
            _ => return Err(()),
        }
    }

    if options.demo && (options.base_url.is_some() || options.record_cmd.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "callsheet".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        // Logging stays off unless asked for; the subscriber writes to stderr
        // and would otherwise bleed into the alternate screen.
        if std::env::var_os("RUST_LOG").is_some() {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
        }

        if options.demo {
            callsheet::tui::run_demo()?;
            return Ok(());
        }

        let base_url = options
            .base_url
            .unwrap_or_else(|| callsheet::client::DEFAULT_BASE_URL.to_owned());
        let record_cmd = options
            .record_cmd
            .unwrap_or_else(|| callsheet::audio::DEFAULT_RECORD_COMMAND.to_owned());
        let client = Arc::new(callsheet::client::ServiceClient::new(base_url));
        let recorder = callsheet::audio::Recorder::new(record_cmd);

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let services =
            callsheet::tui::TuiServices::new(runtime.handle().clone(), client, recorder);
        let session = callsheet::model::Session::new("");

        runtime.block_on(async move {
            let tui_join = tokio::task::spawn_blocking(move || {
                callsheet::tui::run_with_session(session, Some(services))
                    .map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("callsheet: {err}");
        std::process::exit(1);
    }
}
