//! `reqwest`-backed client for native callers

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;

use super::{HttpClient, HttpResponse};
use crate::config::SubmissionConfig;
use crate::error::SubmitError;
use crate::snapshot::FormSnapshot;

/// Posts form data as `multipart/form-data` with `reqwest`
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    accept: String,
}

impl ReqwestClient {
    pub fn new(config: &SubmissionConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &SubmissionConfig) -> Self {
        Self {
            client,
            accept: config.accept.clone(),
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(&SubmissionConfig::default())
    }
}

fn transport(err: reqwest::Error) -> SubmitError {
    SubmitError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn post_form(&self, url: &str, data: &FormSnapshot) -> Result<HttpResponse, SubmitError> {
        let form = data
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name.to_string(), value.to_string()));

        let response = self
            .client
            .post(url)
            .header(ACCEPT, self.accept.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        Ok(HttpResponse { status, body })
    }
}
