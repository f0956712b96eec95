// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scoped audio capture.
//!
//! Recording runs as an external capture process writing a WAV file to the
//! temp directory; the session owns the process handle and the file, and both
//! are released on `stop` or on drop. The capture command is whitespace-split
//! (no shell involved) and receives the output path as its final argument.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

/// Mono 16 kHz capture via ALSA, the format the transcription service expects.
pub const DEFAULT_RECORD_COMMAND: &str = "arecord -q -f S16_LE -r 16000 -c 1";

#[derive(Debug)]
pub enum AudioError {
    EmptyCommand,
    Spawn { command: String, source: io::Error },
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => f.write_str("record command is empty"),
            Self::Spawn { command, source } => {
                write!(f, "failed to start record command '{command}': {source}")
            }
            Self::Read { path, source } => {
                write!(f, "failed to read recording {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyCommand => None,
            Self::Spawn { source, .. } | Self::Read { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorder {
    command: String,
}

impl Recorder {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Starts a capture process; the returned session must be stopped to
    /// collect the audio bytes.
    pub fn start(&self) -> Result<RecordingSession, AudioError> {
        let parts = split_command(&self.command);
        let Some((program, args)) = parts.split_first() else {
            return Err(AudioError::EmptyCommand);
        };

        let path = temp_wav_path();
        debug!(command = %self.command, path = %path.display(), "starting capture");
        let child = Command::new(program)
            .args(args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn { command: self.command.clone(), source })?;

        Ok(RecordingSession { child: Some(child), path })
    }
}

/// A live capture. Dropping it without `stop` kills the process and discards
/// the file.
#[derive(Debug)]
pub struct RecordingSession {
    child: Option<Child>,
    path: PathBuf,
}

impl RecordingSession {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stops the capture process and returns the recorded WAV bytes. The
    /// temp file is removed either way.
    pub fn stop(mut self) -> Result<Vec<u8>, AudioError> {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        debug!(path = %self.path.display(), "capture stopped");

        let bytes = fs::read(&self.path)
            .map_err(|source| AudioError::Read { path: self.path.clone(), source })?;
        let _ = fs::remove_file(&self.path);
        Ok(bytes)
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_owned).collect()
}

fn temp_wav_path() -> PathBuf {
    let now_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    std::env::temp_dir().join(format!(
        "callsheet-voice-{}-{now_millis}.wav",
        std::process::id()
    ))
}
