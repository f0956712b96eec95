// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Callsheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Callsheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP client for the staffing query, detail, and voice services.
//!
//! Errors fold into the three-way taxonomy the UI reports: transport
//! failures, service-signaled errors, and empty result sets. No retries, no
//! backoff.

pub mod types;

use std::fmt;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::model::{service_error, RawRecord};
pub use types::{QueryReply, QueryRequest, VoiceReply};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Service { message: String },
    Empty,
}

impl FetchError {
    /// The text shown to the user when this error surfaces.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Error fetching data.".to_owned(),
            Self::Service { message } => message.clone(),
            Self::Empty => "No positions found for the given search term.".to_owned(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Service { message } => write!(f, "service error: {message}"),
            Self::Empty => f.write_str("empty result set"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http: reqwest::Client::new(), base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Free-text query; the reply is either a structured response or prose.
    pub async fn query(&self, query: &str) -> Result<QueryReply, FetchError> {
        let url = format!("{}/query", self.base_url);
        debug!(%url, query, "dispatching query");
        let body: JsonValue = self
            .http
            .post(&url)
            .json(&QueryRequest { query })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(types::parse_query_reply(&body))
    }

    /// Position records related to a search term, for the table/card views.
    pub async fn event_details(&self, term: &str) -> Result<Vec<RawRecord>, FetchError> {
        let url = format!("{}/get_event_details", self.base_url);
        let detail_query = format!("Fetch all positions related to \"{term}\"");
        debug!(%url, term, "dispatching detail query");
        let body: JsonValue = self
            .http
            .post(&url)
            .json(&QueryRequest { query: &detail_query })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let records = types::parse_detail_records(&body);
        if let Some(message) = service_error(&records) {
            return Err(FetchError::Service { message: message.to_owned() });
        }
        if records.is_empty() {
            return Err(FetchError::Empty);
        }
        debug!(records = records.len(), "detail query resolved");
        Ok(records)
    }

    /// Uploads recorded audio; the reply carries the transcription and,
    /// usually, a pre-formed structured response.
    pub async fn transcribe(&self, audio_wav: Vec<u8>) -> Result<VoiceReply, FetchError> {
        let url = format!("{}/voice_query", self.base_url);
        debug!(%url, bytes = audio_wav.len(), "uploading voice recording");
        let part = reqwest::multipart::Part::bytes(audio_wav)
            .file_name("voice_input.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let body: JsonValue = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(types::parse_voice_reply(&body))
    }
}

/// A monotonically numbered search generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Hands out generations and recognizes replies from superseded searches.
///
/// Every dispatched search calls `begin`; a reply is applied only when its
/// generation `is_current`, so a slow earlier request can never overwrite the
/// results of a newer one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    current: u64,
}

impl RequestSequencer {
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}
