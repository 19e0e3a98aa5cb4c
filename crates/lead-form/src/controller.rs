//! Lead form state machine
//!
//! ```text
//!   Idle ──submit──▶ Submitting ──2xx──▶ Submitted
//!    ▲                   │
//!    └──── fallback ─────┘   (native POST, page navigates away)
//!
//!   Idle ──mount with ?success=true──▶ Submitted
//! ```
//!
//! The controller owns no DOM. Everything page-specific goes through
//! [`FormHost`] and the network goes through [`LeadTransport`], so the
//! protocol runs the same in the browser and under test.

use std::cell::Cell;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{HostError, LeadFormError, TransportError};
use crate::fields::{query_flag, strip_query_param, FormFields};
use crate::SUCCESS_PARAM;

/// UI state of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Submitted,
}

impl FormState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormState::Idle => "idle",
            FormState::Submitting => "submitting",
            FormState::Submitted => "submitted",
        }
    }
}

/// What a call to [`LeadFormController::submit`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The background request got a 2xx
    Delivered,
    /// The background request failed and the native form was submitted
    FellBack,
    /// A submission was already in flight or done
    Ignored,
}

/// The page the form lives on
pub trait FormHost {
    /// Path of the current page, e.g. `/cities/oakville`
    fn current_path(&self) -> Result<String, HostError>;

    /// Query string of the current page including the leading `?`, or `""`
    fn current_search(&self) -> Result<String, HostError>;

    /// Change the visible URL without navigating
    fn replace_url(&self, url: &str) -> Result<(), HostError>;

    /// Every named field of the form in document order
    fn collect_fields(&self) -> Result<FormFields, HostError>;

    fn reset_fields(&self);

    /// Disable or re-enable the submit control
    fn set_busy(&self, busy: bool);

    fn show_confirmation(&self, message: &str);

    /// Build a hidden form with one hidden input per field, attach it to the
    /// document and submit it natively to `action`
    fn submit_fallback(&self, action: &str, fields: &FormFields) -> Result<(), HostError>;
}

/// Sends the urlencoded body in the background
#[async_trait(?Send)]
pub trait LeadTransport {
    /// POST `body` to `path`, returning the HTTP status
    async fn post_form(&self, path: &str, body: String) -> Result<u16, TransportError>;
}

pub struct LeadFormController<H, T> {
    host: H,
    transport: T,
    city: String,
    state: String,
    ui_state: Cell<FormState>,
}

impl<H: FormHost, T: LeadTransport> LeadFormController<H, T> {
    pub fn new(host: H, transport: T, city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            host,
            transport,
            city: city.into(),
            state: state.into(),
            ui_state: Cell::new(FormState::Idle),
        }
    }

    pub fn state(&self) -> FormState {
        self.ui_state.get()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn region(&self) -> &str {
        &self.state
    }

    /// Copy shown once a lead is received
    pub fn confirmation_message(&self) -> String {
        format!(
            "Our team will contact you within 2 hours with free quotes from top-rated professionals in {}.",
            self.city
        )
    }

    fn transition(&self, next: FormState) {
        debug!("Lead form: {} -> {}", self.state().as_str(), next.as_str());
        self.ui_state.set(next);
    }

    /// Run once when the form is first displayed.
    ///
    /// A `success=true` query parameter means the backend redirected back
    /// after a native submission: show the confirmation and drop the flag
    /// from the address bar so a reload does not show it again.
    pub fn mount(&self) -> Result<FormState, LeadFormError> {
        let search = self.host.current_search()?;
        if query_flag(&search, SUCCESS_PARAM) {
            let path = self.host.current_path()?;
            let cleaned = format!("{}{}", path, strip_query_param(&search, SUCCESS_PARAM));
            self.host.replace_url(&cleaned)?;
            self.transition(FormState::Submitted);
            self.host.show_confirmation(&self.confirmation_message());
        }
        Ok(self.state())
    }

    /// Fields as collected, with the city/state context filled in if the
    /// page did not carry them
    fn collect(&self) -> Result<FormFields, HostError> {
        let mut fields = self.host.collect_fields()?;
        if fields.get("city").is_none() {
            fields.push("city", self.city.as_str());
        }
        if fields.get("state").is_none() {
            fields.push("state", self.state.as_str());
        }
        Ok(fields)
    }

    /// Handle a submit event. The caller has already prevented the
    /// browser's default navigation.
    pub async fn submit(&self) -> Result<SubmitOutcome, LeadFormError> {
        if self.state() != FormState::Idle {
            debug!("Ignoring submit while {}", self.state().as_str());
            return Ok(SubmitOutcome::Ignored);
        }

        self.transition(FormState::Submitting);
        self.host.set_busy(true);

        let prepared = self
            .host
            .current_path()
            .and_then(|path| self.collect().map(|fields| (path, fields)));
        let (path, collected) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.host.set_busy(false);
                self.transition(FormState::Idle);
                return Err(e.into());
            }
        };

        let body = collected.with_form_name().to_urlencoded();
        match self.transport.post_form(&path, body).await {
            Ok(status) if (200..300).contains(&status) => {
                info!("Lead delivered for {}", self.city);
                self.transition(FormState::Submitted);
                self.host.reset_fields();
                self.host.set_busy(false);
                self.host.show_confirmation(&self.confirmation_message());
                Ok(SubmitOutcome::Delivered)
            }
            Ok(status) => {
                warn!("Lead submission answered HTTP {}, falling back", status);
                self.fall_back(&path, &collected)
            }
            Err(e) => {
                warn!("Lead submission error: {}, falling back", e);
                self.fall_back(&path, &collected)
            }
        }
    }

    /// The page navigates away after this, so the submit control stays
    /// disabled.
    fn fall_back(&self, path: &str, collected: &FormFields) -> Result<SubmitOutcome, LeadFormError> {
        self.transition(FormState::Idle);
        self.host
            .submit_fallback(path, collected)
            .map_err(LeadFormError::Fallback)?;
        Ok(SubmitOutcome::FellBack)
    }
}
