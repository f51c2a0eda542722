//! Form Toolkit WASM
//!
//! Browser bindings for form-toolkit: a `web_sys` document, a `fetch`
//! submission client, an `alert` notifier, and JavaScript exports of the
//! validators and formatters.

use form_toolkit::format;
use form_toolkit::validation;
use form_toolkit::{decode_response, report_outcome, submission_body, FormToolkit};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod document;
pub mod fetch;
pub mod logging;

pub use document::WebDocument;
pub use fetch::{AlertNotifier, FetchClient};
pub use logging::init_logging;

/// Set panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_logging();
}

/// Toolkit bound to the page's document
pub fn page_toolkit() -> Result<FormToolkit<WebDocument>, JsValue> {
    WebDocument::global()
        .map(FormToolkit::new)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email_js(email: &str) -> bool {
    validation::validate_email(email)
}

#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password_js(password: &str) -> bool {
    validation::validate_password(password)
}

#[wasm_bindgen(js_name = validateRequired)]
pub fn validate_required_js(value: &str) -> bool {
    validation::validate_required(value)
}

#[wasm_bindgen(js_name = validateWithRegex)]
pub fn validate_with_regex_js(value: &str, pattern: &str) -> bool {
    validation::validate_with_regex(value, pattern)
}

#[wasm_bindgen(js_name = validateDateFormat)]
pub fn validate_date_format_js(date: &str) -> bool {
    validation::validate_date_format(date)
}

/// Validate a single field value
///
/// # Example (JavaScript)
/// ```javascript
/// const errors = validateField('email', 'user@example.com', {
///     required: true,
///     email: true,
/// });
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(field_name: &str, value: &str, rules: JsValue) -> Result<JsValue, JsValue> {
    let rules: validation::FieldRules = serde_wasm_bindgen::from_value(rules)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?;

    let errors = validation::validate_field(field_name, value, &rules);
    Ok(serde_wasm_bindgen::to_value(&errors)?)
}

#[wasm_bindgen(js_name = formatPhoneNumber)]
pub fn format_phone_number_js(input: &str) -> String {
    format::format_phone_number(input)
}

#[wasm_bindgen(js_name = capitalizeName)]
pub fn capitalize_name_js(name: &str) -> String {
    format::capitalize_name(name)
}

/// Throws on unparsable input
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date_js(date: &str) -> Result<String, JsValue> {
    format::format_date(date).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// POSTs every entry of `form` to `url`; resolves to the JSON body or `null`
///
/// Failures are logged to the console.
#[wasm_bindgen(js_name = submitForm)]
pub async fn submit_form_js(url: String, form: web_sys::HtmlFormElement) -> Result<JsValue, JsValue> {
    let client = FetchClient::default();
    let result = client
        .post_form_element(&url, &form)
        .await
        .and_then(|response| decode_response(&response));

    match submission_body(&url, result) {
        Some(body) => Ok(body.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?),
        None => Ok(JsValue::NULL),
    }
}

/// `response && response.success`, under JavaScript truthiness
fn response_succeeded(response: &JsValue) -> bool {
    response.is_truthy()
        && js_sys::Reflect::get(response, &JsValue::from_str("success"))
            .map(|success| success.is_truthy())
            .unwrap_or(false)
}

/// Alerts `success_message` when `response.success` is truthy,
/// `error_message` otherwise
#[wasm_bindgen(js_name = handleFormResponse)]
pub fn handle_form_response_js(response: JsValue, success_message: &str, error_message: &str) {
    report_outcome(
        &AlertNotifier,
        response_succeeded(&response),
        success_message,
        error_message,
    );
}
