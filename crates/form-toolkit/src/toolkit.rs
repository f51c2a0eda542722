// File: crates/form-toolkit/src/toolkit.rs
// Purpose: Facade bundling a document handle with configuration

use crate::annotation::Annotations;
use crate::builder;
use crate::config::ToolkitConfig;
use crate::dom::{ElementFactory, EventSource};
use crate::error::DomError;
use crate::events;
use crate::notify::Notifier;
use crate::snapshot::FormSnapshot;
use crate::submit::{self, ResponseOutcome};

/// Every toolkit operation bound to one document and one configuration
///
/// # Example
///
/// ```
/// use form_toolkit::{FormToolkit, MemoryDocument};
/// use form_toolkit::validation::validate_email;
///
/// let toolkit = FormToolkit::new(MemoryDocument::new());
/// let form = toolkit.create_form("signup").unwrap();
/// let email = toolkit.add_form_field(&form, "email", "email", "Email").unwrap();
/// toolkit
///     .add_real_time_validation(&email, validate_email, "Invalid email address")
///     .unwrap();
///
/// toolkit.dom().dispatch_input(email, "nope").unwrap();
/// assert_eq!(
///     toolkit.annotations().message(&email).as_deref(),
///     Some("Invalid email address")
/// );
/// ```
#[derive(Clone)]
pub struct FormToolkit<D: ElementFactory> {
    dom: D,
    config: ToolkitConfig,
    annotations: Annotations<D>,
}

impl<D: ElementFactory> FormToolkit<D> {
    pub fn new(dom: D) -> Self {
        Self::with_config(dom, ToolkitConfig::default())
    }

    pub fn with_config(dom: D, config: ToolkitConfig) -> Self {
        let annotations = Annotations::with_config(dom.clone(), config.annotation.clone());
        Self {
            dom,
            config,
            annotations,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn annotations(&self) -> &Annotations<D> {
        &self.annotations
    }

    pub fn create_form(&self, id: &str) -> Result<D::Node, DomError> {
        builder::create_form(&self.dom, id)
    }

    pub fn add_form_field(&self, form: &D::Node, kind: &str, name: &str, label: &str) -> Result<D::Node, DomError> {
        builder::add_form_field(&self.dom, form, kind, name, label)
    }

    pub fn create_dropdown<I, V, T>(&self, form: &D::Node, name: &str, options: I) -> Result<D::Node, DomError>
    where
        I: IntoIterator<Item = (V, T)>,
        V: AsRef<str>,
        T: AsRef<str>,
    {
        builder::create_dropdown(&self.dom, form, name, options)
    }

    pub fn toggle_form_field(&self, form: &D::Node, action: &str, field: &D::Node) -> Result<(), DomError> {
        builder::toggle_form_field(&self.dom, form, action, field)
    }

    pub fn display_error(&self, field: &D::Node, message: &str) -> Result<D::Node, DomError> {
        self.annotations.set(field, message)
    }

    pub fn show_error(&self, field: &D::Node, message: &str) -> Result<D::Node, DomError> {
        self.annotations.show(field, message)
    }

    pub fn clear_error(&self, field: &D::Node) -> Result<bool, DomError> {
        self.annotations.clear(field)
    }

    /// Reports `response` with the configured success / error messages
    pub fn respond<N: Notifier + ?Sized>(&self, notifier: &N, response: Option<&serde_json::Value>) -> ResponseOutcome {
        submit::handle_form_response(
            notifier,
            response,
            &self.config.messages.success,
            &self.config.messages.error,
        )
    }
}

impl<D: EventSource> FormToolkit<D> {
    pub fn handle_submit<F>(&self, form: &D::Node, callback: F) -> Result<(), DomError>
    where
        F: FnMut(FormSnapshot) + 'static,
    {
        events::handle_submit(&self.dom, form, callback)
    }

    pub fn add_real_time_validation<V>(
        &self,
        input: &D::Node,
        validation_fn: V,
        error_msg: impl Into<String>,
    ) -> Result<(), DomError>
    where
        V: Fn(&str) -> bool + 'static,
    {
        events::add_real_time_validation(&self.annotations, input, validation_fn, error_msg)
    }
}
