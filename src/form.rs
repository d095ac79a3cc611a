//! Contact form controller.
//!
//! Submission is a two-step lifecycle split around the network call:
//! `begin_submit` snapshots the payload and puts the form into its
//! loading state; `finish` renders the outcome. Re-enabling the
//! submit control and clearing the loading marker happen on every
//! terminal path, success or not. While a submission is in flight
//! further submits are refused; there is no retry logic.

use crate::page::{ElementId, Page};
use crate::types::{ContactFields, SubmitOutcome};

/// Status message for a delivered submission.
pub const MSG_SENT: &str = "Thanks! Your message has been sent.";

/// Status message when the relay rejects without usable details.
pub const MSG_REJECTED: &str = "Submission failed. Try again.";

/// Status message when the request never completes.
pub const MSG_NETWORK: &str = "Network error. Try again.";

/// Class marking the status region as an error.
pub const ERROR_CLASS: &str = "error";

/// Class marking the submit control while a request is in flight.
pub const LOADING_CLASS: &str = "loading";

/// Element handles the controller operates on.
#[derive(Debug, Clone, Copy)]
pub struct FormBinding {
    pub form: ElementId,
    pub status: ElementId,
    pub submit: ElementId,
    pub name: ElementId,
    pub email: ElementId,
    pub message: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Debug)]
pub struct ContactFormController {
    binding: Option<FormBinding>,
    phase: FormPhase,
}

impl ContactFormController {
    /// Bind to the form elements. An absent form disables the
    /// feature; every operation becomes a no-op.
    pub fn new(binding: Option<FormBinding>) -> Self {
        ContactFormController {
            binding,
            phase: FormPhase::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn binding(&self) -> Option<&FormBinding> {
        self.binding.as_ref()
    }

    /// Snapshot the current field values.
    pub fn fields(&self, page: &Page) -> Option<ContactFields> {
        let b = self.binding.as_ref()?;
        Some(ContactFields {
            name: page.text(b.name).to_owned(),
            email: page.text(b.email).to_owned(),
            message: page.text(b.message).to_owned(),
        })
    }

    /// Start a submission: clear any prior status and error styling,
    /// disable the submit control, apply the loading marker, and
    /// hand back the endpoint and payload for the caller to post.
    ///
    /// Returns None when the form is absent, the endpoint is
    /// unconfigured, or a submission is already in flight.
    pub fn begin_submit(&mut self, page: &mut Page) -> Option<(String, ContactFields)> {
        let b = *self.binding.as_ref()?;
        if self.phase == FormPhase::Submitting {
            return None;
        }
        let endpoint = page.attr(b.form, "action")?.to_owned();

        page.set_text(b.status, "");
        page.remove_class(b.status, ERROR_CLASS);
        page.set_attr(b.submit, "disabled", "true");
        page.add_class(b.submit, LOADING_CLASS);
        self.phase = FormPhase::Submitting;

        let fields = ContactFields {
            name: page.text(b.name).to_owned(),
            email: page.text(b.email).to_owned(),
            message: page.text(b.message).to_owned(),
        };
        Some((endpoint, fields))
    }

    /// Render a terminal outcome into the status region.
    ///
    /// The cleanup tail runs regardless of which arm matched: the
    /// submit control is re-enabled and the loading marker removed
    /// on success, rejection and network failure alike.
    pub fn finish(&mut self, page: &mut Page, outcome: &SubmitOutcome) {
        let Some(b) = self.binding.as_ref().copied() else {
            return;
        };

        match outcome {
            SubmitOutcome::Sent => {
                page.set_text(b.status, MSG_SENT);
                for field in [b.name, b.email, b.message] {
                    page.set_text(field, "");
                }
            }
            SubmitOutcome::Rejected(Some(details)) => {
                page.set_text(b.status, details);
                page.add_class(b.status, ERROR_CLASS);
            }
            SubmitOutcome::Rejected(None) => {
                page.set_text(b.status, MSG_REJECTED);
                page.add_class(b.status, ERROR_CLASS);
            }
            SubmitOutcome::NetworkFailed => {
                page.set_text(b.status, MSG_NETWORK);
                page.add_class(b.status, ERROR_CLASS);
            }
        }

        page.remove_attr(b.submit, "disabled");
        page.remove_class(b.submit, LOADING_CLASS);
        self.phase = FormPhase::Idle;
    }
}

// ============================================================================
// TESTS
// ============================================================================
