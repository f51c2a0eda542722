// File: crates/form-toolkit/src/builder.rs
// Purpose: Form and field construction over an ElementFactory

use crate::dom::ElementFactory;
use crate::error::DomError;

/// Action accepted by [`toggle_form_field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
}

impl ToggleAction {
    /// Maps the literals `"add"` and `"remove"`; anything else is `None`
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "add" => Some(ToggleAction::Add),
            "remove" => Some(ToggleAction::Remove),
            _ => None,
        }
    }
}

/// Creates an empty `<form>` carrying `id`
///
/// Uniqueness of `id` is not checked.
pub fn create_form<D: ElementFactory>(dom: &D, id: &str) -> Result<D::Node, DomError> {
    let form = dom.create_element("form")?;
    dom.set_attribute(&form, "id", id)?;
    tracing::debug!(id, "created form");
    Ok(form)
}

/// Appends a `<label>` followed by an `<input>` to `form`
///
/// Returns the input so callers can wire validation on it.
pub fn add_form_field<D: ElementFactory>(
    dom: &D,
    form: &D::Node,
    kind: &str,
    name: &str,
    label: &str,
) -> Result<D::Node, DomError> {
    let label_node = dom.create_element("label")?;
    dom.set_text_content(&label_node, label);

    let input = dom.create_element("input")?;
    dom.set_attribute(&input, "type", kind)?;
    dom.set_attribute(&input, "name", name)?;

    dom.append_child(form, &label_node)?;
    dom.append_child(form, &input)?;

    tracing::debug!(kind, name, "added form field");
    Ok(input)
}

/// Builds a `<select name=name>` with one `<option>` per `(value, text)`
/// pair, in order, and appends it to `form`
pub fn create_dropdown<D, I, V, T>(dom: &D, form: &D::Node, name: &str, options: I) -> Result<D::Node, DomError>
where
    D: ElementFactory,
    I: IntoIterator<Item = (V, T)>,
    V: AsRef<str>,
    T: AsRef<str>,
{
    let select = dom.create_element("select")?;
    dom.set_attribute(&select, "name", name)?;

    let mut count = 0usize;
    for (value, text) in options {
        let option = dom.create_element("option")?;
        dom.set_attribute(&option, "value", value.as_ref())?;
        dom.set_text_content(&option, text.as_ref());
        dom.append_child(&select, &option)?;
        count += 1;
    }

    dom.append_child(form, &select)?;
    tracing::debug!(name, options = count, "created dropdown");
    Ok(select)
}

/// Adds or removes `field` under `form`
///
/// `"add"` appends `field` as the last child; `"remove"` detaches it and
/// fails with [`DomError::NotAChild`] when it is not a child of `form`.
/// Any other action is ignored.
pub fn toggle_form_field<D: ElementFactory>(
    dom: &D,
    form: &D::Node,
    action: &str,
    field: &D::Node,
) -> Result<(), DomError> {
    match ToggleAction::parse(action) {
        Some(ToggleAction::Add) => dom.append_child(form, field),
        Some(ToggleAction::Remove) => dom.remove_child(form, field),
        None => {
            tracing::trace!(action, "ignoring unknown toggle action");
            Ok(())
        }
    }
}
