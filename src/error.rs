use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a single request against the news feed service.
///
/// `Clone` so the shared identity lookup can hand the same outcome to every
/// awaiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// `fetch` rejected or the request could not be built.
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API request failed: {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
    /// The GraphQL endpoint answered 200 with a non-empty `errors` list.
    #[error("graphql error: {0}")]
    GraphQl(String),
}

impl ApiError {
    pub(crate) fn transport(err: JsValue) -> Self {
        ApiError::Transport(format!("{:?}", err))
    }

    /// HTTP status of a rejected response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for JsValue {
    fn from(err: ApiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
