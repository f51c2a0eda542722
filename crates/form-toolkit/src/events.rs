// File: crates/form-toolkit/src/events.rs
// Purpose: Submit and real-time validation listeners

use crate::annotation::Annotations;
use crate::dom::{EventSource, InputEvent, SubmitEvent};
use crate::error::DomError;
use crate::snapshot::FormSnapshot;

/// Registers a submit listener on `form`
///
/// The listener suppresses the default navigation, captures the form's
/// current values and hands them to `callback`. It stays registered for the
/// lifetime of `form`.
pub fn handle_submit<D, F>(dom: &D, form: &D::Node, mut callback: F) -> Result<(), DomError>
where
    D: EventSource,
    F: FnMut(FormSnapshot) + 'static,
{
    let target = dom.listener_handle();
    let form_node = form.clone();

    dom.add_submit_listener(
        form,
        Box::new(move |event: &SubmitEvent| {
            event.prevent_default();
            match target.form_data(&form_node) {
                Ok(snapshot) => callback(snapshot),
                Err(err) => tracing::error!(error = %err, "failed to capture form data"),
            }
        }),
    )?;

    tracing::debug!("submit handler registered");
    Ok(())
}

/// Validates `input` on every change
///
/// A failing value shows `error_msg` in the field's annotation; a passing
/// value blanks an existing annotation without removing it.
pub fn add_real_time_validation<D, V>(
    annotations: &Annotations<D>,
    input: &D::Node,
    validation_fn: V,
    error_msg: impl Into<String>,
) -> Result<(), DomError>
where
    D: EventSource,
    V: Fn(&str) -> bool + 'static,
{
    let dom = annotations.dom().clone();
    let annotations = Annotations::with_config(dom.listener_handle(), annotations.config().clone());
    let field = input.clone();
    let error_msg = error_msg.into();

    dom.add_input_listener(
        input,
        Box::new(move |event: &InputEvent| {
            if validation_fn(event.value()) {
                annotations.blank(&field);
            } else if let Err(err) = annotations.set(&field, &error_msg) {
                tracing::error!(error = %err, "failed to display validation error");
            }
        }),
    )
}
