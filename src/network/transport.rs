use futures::future::LocalBoxFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request configuration bundle carrying the bearer token and the
/// credentials flag.  Attached to every call against the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOptions {
    authorization: String,
    with_credentials: bool,
}

impl AuthOptions {
    pub fn bearer(token: &str) -> Self {
        Self {
            authorization: format!("Bearer {}", token),
            with_credentials: true,
        }
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn with_credentials(&self) -> bool {
        self.with_credentials
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            with_credentials: false,
        }
    }

    pub fn with_auth(mut self, auth: &AuthOptions) -> Self {
        self.headers
            .push(("Authorization".to_string(), auth.authorization().to_string()));
        self.with_credentials = auth.with_credentials();
        self
    }

    pub fn with_json_body(mut self, body: String) -> Self {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    /// First header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: body.into(),
        }
    }
}

pub type TransportFuture = LocalBoxFuture<'static, Result<HttpResponse, ApiError>>;

/// Sends one HTTP request.  Implemented by `FetchTransport` in the browser
/// and by recording mocks in tests.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture;
}

/// `window.fetch` based transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture {
        Box::pin(fetch(request))
    }
}

async fn fetch(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use web_sys::{Headers, Request, RequestCredentials, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);
    if request.with_credentials {
        opts.set_credentials(RequestCredentials::Include);
    }

    let headers = Headers::new().map_err(ApiError::transport)?;
    for (name, value) in &request.headers {
        headers.append(name, value).map_err(ApiError::transport)?;
    }
    opts.set_headers(&headers);

    if let Some(data) = &request.body {
        opts.set_body(&JsValue::from_str(data));
    }

    let js_request =
        Request::new_with_str_and_init(&request.url, &opts).map_err(ApiError::transport)?;

    let window = web_sys::window()
        .ok_or_else(|| ApiError::Transport("no global window exists".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(ApiError::transport)?;
    let resp: Response = resp_value.dyn_into().map_err(ApiError::transport)?;

    // Body is read as text for every status so failures can be logged whole.
    let text = JsFuture::from(resp.text().map_err(ApiError::transport)?)
        .await
        .map_err(ApiError::transport)?;

    Ok(HttpResponse {
        status: resp.status(),
        status_text: resp.status_text(),
        body: text.as_string().unwrap_or_default(),
    })
}
