// File: crates/form-toolkit/src/submit.rs
// Purpose: Form submission and response reporting

use serde_json::Value;

use crate::error::SubmitError;
use crate::http::{HttpClient, HttpResponse};
use crate::notify::Notifier;
use crate::snapshot::FormSnapshot;

/// Which message [`handle_form_response`] reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success,
    Failure,
}

/// POSTs `data` and parses the JSON body, keeping the failure category
///
/// The HTTP status is not inspected: any JSON body counts as a response.
pub async fn try_submit_form<C>(client: &C, url: &str, data: &FormSnapshot) -> Result<Value, SubmitError>
where
    C: HttpClient + ?Sized,
{
    let response = client.post_form(url, data).await?;
    tracing::debug!(url, status = response.status, "form submitted");
    decode_response(&response)
}

/// Parses a response body as JSON, whatever the status
pub fn decode_response(response: &HttpResponse) -> Result<Value, SubmitError> {
    Ok(serde_json::from_str(&response.body)?)
}

/// Logs a failed submission and keeps only the body of a successful one
pub fn submission_body(url: &str, result: Result<Value, SubmitError>) -> Option<Value> {
    match result {
        Ok(body) => Some(body),
        Err(err) => {
            tracing::error!(url, error = %err, "Error submitting form");
            None
        }
    }
}

/// POSTs `data` and resolves to the parsed JSON body
///
/// Any failure (transport error, non-JSON body) is logged and turned into
/// `None`; this never returns an error.
pub async fn submit_form<C>(client: &C, url: &str, data: &FormSnapshot) -> Option<Value>
where
    C: HttpClient + ?Sized,
{
    submission_body(url, try_submit_form(client, url, data).await)
}

/// Notifies `success_message` when `response` carries a truthy `success`
/// key, `error_message` otherwise (including a missing response)
pub fn handle_form_response<N>(
    notifier: &N,
    response: Option<&Value>,
    success_message: &str,
    error_message: &str,
) -> ResponseOutcome
where
    N: Notifier + ?Sized,
{
    let succeeded = response
        .filter(|body| is_truthy(body))
        .and_then(|body| body.get("success"))
        .map(is_truthy)
        .unwrap_or(false);

    report_outcome(notifier, succeeded, success_message, error_message)
}

/// Notifies the message matching an already decided outcome
pub fn report_outcome<N>(notifier: &N, succeeded: bool, success_message: &str, error_message: &str) -> ResponseOutcome
where
    N: Notifier + ?Sized,
{
    if succeeded {
        notifier.notify(success_message);
        ResponseOutcome::Success
    } else {
        notifier.notify(error_message);
        ResponseOutcome::Failure
    }
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StaticHttpClient;
    use crate::notify::RecordingNotifier;
    use futures::executor::block_on;
    use rstest::rstest;
    use serde_json::json;

    fn snapshot() -> FormSnapshot {
        vec![("email", "a@b.co")].into_iter().collect()
    }

    #[test]
    fn test_submit_returns_parsed_body() {
        let client = StaticHttpClient::ok(200, r#"{"success":true,"id":7}"#);
        let body = block_on(submit_form(&client, "/api/signup", &snapshot()));
        assert_eq!(body, Some(json!({"success": true, "id": 7})));
        assert_eq!(client.requests(), vec![("/api/signup".to_string(), snapshot())]);
    }

    #[test]
    fn test_error_status_with_json_body_is_still_a_response() {
        let client = StaticHttpClient::ok(422, r#"{"success":false}"#);
        let body = block_on(submit_form(&client, "/x", &snapshot()));
        assert_eq!(body, Some(json!({"success": false})));
    }

    #[test]
    fn test_transport_failure_is_none() {
        let client = StaticHttpClient::failing("connection refused");
        assert_eq!(block_on(submit_form(&client, "/x", &snapshot())), None);
    }

    #[test]
    fn test_non_json_body_is_none() {
        let client = StaticHttpClient::ok(500, "<html>oops</html>");
        assert_eq!(block_on(submit_form(&client, "/x", &snapshot())), None);
    }

    #[test]
    fn test_try_submit_keeps_category() {
        let failing = StaticHttpClient::failing("dns");
        assert!(matches!(
            block_on(try_submit_form(&failing, "/x", &snapshot())),
            Err(SubmitError::Transport(_))
        ));

        let garbage = StaticHttpClient::ok(200, "not json");
        assert!(matches!(
            block_on(try_submit_form(&garbage, "/x", &snapshot())),
            Err(SubmitError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_response_ignores_status() {
        let response = HttpResponse {
            status: 503,
            body: r#"{"success":false,"retry":true}"#.to_string(),
        };
        assert_eq!(decode_response(&response).unwrap(), json!({"success": false, "retry": true}));
        assert_eq!(
            submission_body("/x", Err(SubmitError::Transport("offline".to_string()))),
            None
        );
    }

    #[rstest]
    #[case(Some(json!({"success": true})), ResponseOutcome::Success)]
    #[case(Some(json!({"success": 1})), ResponseOutcome::Success)]
    #[case(Some(json!({"success": "yes"})), ResponseOutcome::Success)]
    #[case(Some(json!({"success": false})), ResponseOutcome::Failure)]
    #[case(Some(json!({"success": 0})), ResponseOutcome::Failure)]
    #[case(Some(json!({"success": ""})), ResponseOutcome::Failure)]
    #[case(Some(json!({"ok": true})), ResponseOutcome::Failure)]
    #[case(Some(json!([1, 2])), ResponseOutcome::Failure)]
    #[case(Some(Value::Null), ResponseOutcome::Failure)]
    #[case(None, ResponseOutcome::Failure)]
    fn test_handle_form_response(#[case] response: Option<Value>, #[case] expected: ResponseOutcome) {
        let notifier = RecordingNotifier::new();
        let outcome = handle_form_response(&notifier, response.as_ref(), "Saved", "Failed");

        assert_eq!(outcome, expected);
        let expected_message = match expected {
            ResponseOutcome::Success => "Saved",
            ResponseOutcome::Failure => "Failed",
        };
        assert_eq!(notifier.messages(), vec![expected_message.to_string()]);
    }
}
