use std::rc::Rc;

use crate::constants::INBOUND_QUERY;
use crate::error::ApiError;
use crate::identity::IdentityResolver;
use crate::models::{InboundData, InboundModel};

/// Stories friends have sent to the signed-in participant.
pub struct InboundApi {
    identity: Rc<IdentityResolver>,
}

impl InboundApi {
    pub fn new(identity: Rc<IdentityResolver>) -> Self {
        Self { identity }
    }

    pub async fn get(&self) -> Result<Vec<InboundModel>, ApiError> {
        let options = self.identity.auth_options();
        let data: InboundData = self.identity.client().graphql(INBOUND_QUERY, &options).await?;
        Ok(data.inbound)
    }

    pub async fn get_or_empty(&self) -> Vec<InboundModel> {
        self.get().await.unwrap_or_else(|e| {
            super::log_fallback("inbound", &e);
            Vec::new()
        })
    }
}
