//! HTTP client capability used by form submission

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::SubmitError;
use crate::snapshot::FormSnapshot;

#[cfg(feature = "reqwest")]
pub mod native;

#[cfg(feature = "reqwest")]
pub use native::ReqwestClient;

/// Raw response as received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for POSTing form data
///
/// Futures are not `Send`: the browser implementation holds JS values
/// across await points.
#[async_trait(?Send)]
pub trait HttpClient {
    /// POST `data` to `url` as `multipart/form-data`
    async fn post_form(&self, url: &str, data: &FormSnapshot) -> Result<HttpResponse, SubmitError>;
}

/// Client that answers every request with a canned result and records
/// what was sent
#[derive(Clone)]
pub struct StaticHttpClient {
    reply: Rc<dyn Fn() -> Result<HttpResponse, SubmitError>>,
    requests: Rc<RefCell<Vec<(String, FormSnapshot)>>>,
}

impl StaticHttpClient {
    /// Always answers with `status` and `body`
    pub fn ok(status: u16, body: impl Into<String>) -> Self {
        let response = HttpResponse {
            status,
            body: body.into(),
        };
        Self::from_fn(move || Ok(response.clone()))
    }

    /// Always fails at the transport level
    pub fn failing(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::from_fn(move || Err(SubmitError::Transport(reason.clone())))
    }

    pub fn from_fn(reply: impl Fn() -> Result<HttpResponse, SubmitError> + 'static) -> Self {
        Self {
            reply: Rc::new(reply),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Every `(url, data)` posted so far
    pub fn requests(&self) -> Vec<(String, FormSnapshot)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpClient for StaticHttpClient {
    async fn post_form(&self, url: &str, data: &FormSnapshot) -> Result<HttpResponse, SubmitError> {
        self.requests.borrow_mut().push((url.to_string(), data.clone()));
        (self.reply)()
    }
}
