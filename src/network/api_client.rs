use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::ApiConfig;
use super::transport::{AuthOptions, HttpRequest, HttpResponse, HttpTransport, Method};
use crate::error::ApiError;
use crate::models::GraphQlEnvelope;
use crate::{debug_log, error_log};

/// REST + GraphQL client for the news feed service.  Cheap to clone; clones
/// share the transport.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ApiConfig>,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET <path>` and decode the JSON body.  Only a 200 counts as success.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthOptions,
    ) -> Result<T, ApiError> {
        let request = HttpRequest::new(Method::Get, self.config.url(path)).with_auth(auth);
        let response = self.execute(request, |status| status == 200).await?;
        decode(&response.body)
    }

    /// Run a GraphQL query and unwrap its `data` member.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        auth: &AuthOptions,
    ) -> Result<T, ApiError> {
        let request = HttpRequest::new(Method::Get, self.config.graphql_url(query)).with_auth(auth);
        let response = self.execute(request, |status| status == 200).await?;
        decode::<GraphQlEnvelope<T>>(&response.body)?.into_data()
    }

    /// `POST <path>` with `body` as JSON.  The response body is not part of
    /// the contract; any 2xx is accepted.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: &AuthOptions,
    ) -> Result<(), ApiError> {
        let payload = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let request = HttpRequest::new(Method::Post, self.config.url(path))
            .with_auth(auth)
            .with_json_body(payload);
        self.execute(request, |status| (200..300).contains(&status)).await?;
        Ok(())
    }

    async fn execute(
        &self,
        request: HttpRequest,
        accept: fn(u16) -> bool,
    ) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                error_log!("{} {} failed: {}", method, url, e);
                return Err(e);
            }
        };

        if !accept(response.status) {
            // Log the whole response so failures can be diagnosed from the
            // console alone.
            error_log!(
                "{} {} failed with status {} {}: {}",
                method,
                url,
                response.status,
                response.status_text,
                response.body
            );
            return Err(ApiError::Status {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            });
        }

        debug_log!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
