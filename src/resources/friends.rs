use std::rc::Rc;

use crate::constants::{FRIENDS_PATH, FRIENDS_QUERY};
use crate::debug_log;
use crate::error::ApiError;
use crate::identity::IdentityResolver;
use crate::models::{FriendsData, FriendsModel, ParticipantModel};

/// The signed-in participant's friend list.
pub struct FriendsApi {
    identity: Rc<IdentityResolver>,
}

impl FriendsApi {
    pub fn new(identity: Rc<IdentityResolver>) -> Self {
        Self { identity }
    }

    pub async fn get(&self) -> Result<Vec<ParticipantModel>, ApiError> {
        let options = self.identity.auth_options();
        let data: FriendsData = self.identity.client().graphql(FRIENDS_QUERY, &options).await?;
        Ok(data.friends)
    }

    pub async fn get_or_empty(&self) -> Vec<ParticipantModel> {
        self.get().await.unwrap_or_else(|e| {
            super::log_fallback("friends", &e);
            Vec::new()
        })
    }

    /// Link the signed-in participant to `participant`.
    ///
    /// The link runs from the caller's own id, which is awaited first so the
    /// request never goes out with an unresolved id of 0.
    pub async fn add(&self, participant: &ParticipantModel) -> Result<(), ApiError> {
        let from = self.identity.resolve_self_id().await?;
        let link = FriendsModel::unsaved(from, participant.id());
        debug_log!("Adding friend link {} -> {}", link.from(), link.to());

        let options = self.identity.auth_options();
        self.identity
            .client()
            .post_json(FRIENDS_PATH, &link, &options)
            .await
    }
}
