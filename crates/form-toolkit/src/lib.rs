//! # form-toolkit
//!
//! Helpers for building forms, wiring validation and submit handlers,
//! posting form data and formatting user input.
//!
//! Nothing here reaches for a global document or network stack. Operations
//! take capability handles instead:
//!
//! - [`ElementFactory`] / [`EventSource`]: the document tree and its events
//! - [`HttpClient`]: the POST used by [`submit_form`]
//! - [`Notifier`]: the modal used by [`handle_form_response`]
//!
//! [`MemoryDocument`], [`StaticHttpClient`] and [`RecordingNotifier`] are
//! in-memory implementations; the browser ones live in `form-toolkit-wasm`.
//!
//! ## Modules
//!
//! - **`builder`**: forms, labelled inputs, dropdowns, add/remove fields
//! - **`events`**: submit capture and real-time validation
//! - **`annotation`**: one error message per field
//! - **`submit`**: POST + JSON decode, response reporting
//! - **`format`**: phone numbers, names, dates
//! - **`validation`**: re-export of `form-toolkit-validation`

pub mod annotation;
pub mod builder;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod format;
pub mod http;
pub mod notify;
pub mod snapshot;
pub mod submit;
pub mod toolkit;

pub use form_toolkit_validation as validation;

pub use annotation::Annotations;
pub use builder::{add_form_field, create_dropdown, create_form, toggle_form_field, ToggleAction};
pub use config::{AnnotationConfig, MessagesConfig, SubmissionConfig, ToolkitConfig};
pub use dom::{ElementFactory, EventSource, InputEvent, MemoryDocument, NodeId, SubmitEvent};
pub use error::{DomError, FormatError, SubmitError};
pub use events::{add_real_time_validation, handle_submit};
pub use format::{capitalize_name, format_date, format_naive_date, format_phone_number};
pub use http::{HttpClient, HttpResponse, StaticHttpClient};
pub use notify::{Notifier, RecordingNotifier};
pub use snapshot::FormSnapshot;
pub use submit::{
    decode_response, handle_form_response, is_truthy, report_outcome, submission_body, submit_form, try_submit_form,
    ResponseOutcome,
};
pub use toolkit::FormToolkit;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
