//! Lead capture form
//!
//! Target-independent half of the quote request form: field handling, the
//! urlencoded wire format and the `Idle → Submitting → Submitted` state
//! machine with its native-submit fallback. The browser bindings live in
//! `leads-wasm`; the dev form sink in `site-server` reuses the parsing side.

pub mod controller;
pub mod error;
pub mod fields;
pub mod submission;

pub use controller::{FormHost, FormState, LeadFormController, LeadTransport, SubmitOutcome};
pub use error::{HostError, LeadFormError, TransportError};
pub use fields::{query_flag, strip_query_param, FormFields};
pub use submission::{LeadSubmission, LEAD_FIELDS};

/// Name the static-form backend knows this form by
pub const FORM_NAME: &str = "junk-removal-leads";

/// Field carrying [`FORM_NAME`]
pub const FORM_NAME_FIELD: &str = "form-name";

/// Honeypot field, hidden from people
pub const HONEYPOT_FIELD: &str = "bot-field";

/// Query parameter the backend appends after a native submission
pub const SUCCESS_PARAM: &str = "success";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
