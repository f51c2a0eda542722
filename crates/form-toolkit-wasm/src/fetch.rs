//! `window.fetch` client and `window.alert` notifier

use async_trait::async_trait;
use form_toolkit::{FormSnapshot, HttpClient, HttpResponse, Notifier, SubmissionConfig, SubmitError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, Request, RequestInit, Response};

fn transport(err: JsValue) -> SubmitError {
    SubmitError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Posts form data through `fetch` as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct FetchClient {
    accept: String,
}

impl FetchClient {
    pub fn new(config: &SubmissionConfig) -> Self {
        Self {
            accept: config.accept.clone(),
        }
    }

    /// POSTs every entry of `form`, file inputs included
    pub async fn post_form_element(&self, url: &str, form: &HtmlFormElement) -> Result<HttpResponse, SubmitError> {
        let body = FormData::new_with_form(form).map_err(transport)?;
        self.send(url, &body).await
    }

    async fn send(&self, url: &str, body: &FormData) -> Result<HttpResponse, SubmitError> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(body);

        let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
        request.headers().set("Accept", &self.accept).map_err(transport)?;

        let window = web_sys::window().ok_or_else(|| SubmitError::Transport("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;

        let text = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new(&SubmissionConfig::default())
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn post_form(&self, url: &str, data: &FormSnapshot) -> Result<HttpResponse, SubmitError> {
        let body = FormData::new().map_err(transport)?;
        for (name, value) in data.iter() {
            body.append_with_str(name, value).map_err(transport)?;
        }
        self.send(url, &body).await
    }
}

/// Shows messages with the blocking `window.alert` modal
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        let shown = web_sys::window()
            .map(|window| window.alert_with_message(message).is_ok())
            .unwrap_or(false);
        if !shown {
            web_sys::console::warn_1(&format!("alert unavailable: {}", message).into());
        }
    }
}
