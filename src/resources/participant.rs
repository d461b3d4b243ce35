use std::rc::Rc;

use crate::constants::ME_QUERY;
use crate::error::ApiError;
use crate::identity::IdentityResolver;
use crate::models::{ParticipantData, ParticipantModel};

/// The signed-in participant's own profile.
pub struct ParticipantApi {
    identity: Rc<IdentityResolver>,
}

impl ParticipantApi {
    pub fn new(identity: Rc<IdentityResolver>) -> Self {
        Self { identity }
    }

    pub async fn get(&self) -> Result<ParticipantModel, ApiError> {
        let options = self.identity.auth_options();
        let data: ParticipantData = self.identity.client().graphql(ME_QUERY, &options).await?;
        Ok(data.me)
    }

    /// Like [`get`](Self::get) but a failure logs and yields
    /// [`ParticipantModel::error_sentinel`].
    pub async fn get_or_sentinel(&self) -> ParticipantModel {
        self.get().await.unwrap_or_else(|e| {
            super::log_fallback("participant", &e);
            ParticipantModel::error_sentinel()
        })
    }
}
