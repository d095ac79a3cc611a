//! Contact form relay client.
//!
//! One outbound POST: the serialized form fields go to the form's
//! configured endpoint with an `Accept: application/json` header.
//! Rejections carry a JSON body shaped `{ "errors": [ { "message":
//! ... } ] }`; parsing it is best-effort and tolerant of absence or
//! malformance. Transport failures collapse to a single outcome.
//!
//! The client sits behind a trait so the form controller is tested
//! with scripted fakes; only `HttpRelay` touches the network.

use std::time::Duration;

use serde::Deserialize;

use crate::types::{ContactFields, SubmitOutcome};

/// Request timeout for the relay POST.
const RELAY_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can deliver a contact form submission.
pub trait FormRelay {
    /// Post `fields` to `endpoint`. Never fails; every path maps to
    /// a `SubmitOutcome`.
    fn post(&self, endpoint: &str, fields: &ContactFields) -> SubmitOutcome;
}

/// The real relay client.
#[derive(Debug, Clone, Default)]
pub struct HttpRelay;

impl HttpRelay {
    pub fn new() -> Self {
        HttpRelay
    }
}

impl FormRelay for HttpRelay {
    fn post(&self, endpoint: &str, fields: &ContactFields) -> SubmitOutcome {
        // Builder failure (TLS backend) maps to the transport outcome.
        let Ok(client) = reqwest::blocking::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
        else {
            return SubmitOutcome::NetworkFailed;
        };

        let response = client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(fields)
            .send();

        match response {
            Ok(resp) if resp.status().is_success() => SubmitOutcome::Sent,
            Ok(resp) => {
                let body = resp.text().unwrap_or_default();
                SubmitOutcome::Rejected(join_error_messages(&body))
            }
            Err(_) => SubmitOutcome::NetworkFailed,
        }
    }
}

// ============================================================================
// ERROR BODY PARSING
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: Option<String>,
}

/// Join the `message` fields of a relay error body with ", ".
///
/// Returns None when the body does not parse, has no error list, or
/// the list carries no messages; callers fall back to a generic
/// failure string.
pub fn join_error_messages(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let messages: Vec<&str> = parsed
        .errors
        .iter()
        .filter_map(|e| e.message.as_deref())
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

// ============================================================================
// TESTS
// ============================================================================
