use std::rc::Rc;

use crate::constants::{OUTBOUND_PATH, OUTBOUND_QUERY};
use crate::error::ApiError;
use crate::identity::IdentityResolver;
use crate::models::{OutboundData, OutboundModel};

/// Stories the signed-in participant has posted.
pub struct OutboundApi {
    identity: Rc<IdentityResolver>,
}

impl OutboundApi {
    pub fn new(identity: Rc<IdentityResolver>) -> Self {
        Self { identity }
    }

    pub async fn get(&self) -> Result<Vec<OutboundModel>, ApiError> {
        let options = self.identity.auth_options();
        let data: OutboundData = self.identity.client().graphql(OUTBOUND_QUERY, &options).await?;
        Ok(data.outbound)
    }

    /// Like [`get`](Self::get) but a failure logs and yields `[]`.
    pub async fn get_or_empty(&self) -> Vec<OutboundModel> {
        self.get().await.unwrap_or_else(|e| {
            super::log_fallback("outbound", &e);
            Vec::new()
        })
    }

    /// Post a new story.
    pub async fn add(&self, outbound: &OutboundModel) -> Result<(), ApiError> {
        let options = self.identity.auth_options();
        self.identity
            .client()
            .post_json(OUTBOUND_PATH, outbound, &options)
            .await
    }
}
