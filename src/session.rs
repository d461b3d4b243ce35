use std::rc::Rc;

use crate::error::ApiError;
use crate::identity::{IdentityResolver, PageLocation, Spawner};
use crate::models::ParticipantState;
use crate::network::{ApiClient, ApiConfig, FetchTransport, HttpTransport};
use crate::resources::{FriendsApi, InboundApi, OutboundApi, ParticipantApi};

/// Builds the identity resolver and the resource clients once and hands out
/// references.  Create one per page and pass it to whatever needs data.
pub struct FeedSession {
    identity: Rc<IdentityResolver>,
    outbound: OutboundApi,
    inbound: InboundApi,
    friends: FriendsApi,
    participant: ParticipantApi,
}

impl FeedSession {
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn HttpTransport>,
        location: Rc<dyn PageLocation>,
        spawner: Spawner,
    ) -> Self {
        let client = ApiClient::new(config, transport);
        Self::with_identity(Rc::new(IdentityResolver::new(client, location, spawner)))
    }

    /// Session using `fetch`, `window.location` and the browser event loop.
    pub fn browser(config: ApiConfig) -> Self {
        let client = ApiClient::new(config, Rc::new(FetchTransport));
        Self::with_identity(Rc::new(IdentityResolver::browser(client)))
    }

    fn with_identity(identity: Rc<IdentityResolver>) -> Self {
        Self {
            outbound: OutboundApi::new(Rc::clone(&identity)),
            inbound: InboundApi::new(Rc::clone(&identity)),
            friends: FriendsApi::new(Rc::clone(&identity)),
            participant: ParticipantApi::new(Rc::clone(&identity)),
            identity,
        }
    }

    /// Resolve the caller's identity.  Awaiting this before the first
    /// authenticated call guarantees `self_id()` is populated.
    pub async fn connect(&self) -> Result<i64, ApiError> {
        self.identity.resolve_self_id().await
    }

    /// Fetch profile, friends, inbound and outbound stories concurrently.
    pub async fn load_state(&self) -> Result<ParticipantState, ApiError> {
        let (participant, friends, inbound, outbound) = futures::try_join!(
            self.participant.get(),
            self.friends.get(),
            self.inbound.get(),
            self.outbound.get(),
        )?;
        Ok(ParticipantState {
            participant,
            friends,
            inbound,
            outbound,
        })
    }

    pub fn identity(&self) -> &Rc<IdentityResolver> {
        &self.identity
    }

    pub fn outbound(&self) -> &OutboundApi {
        &self.outbound
    }

    pub fn inbound(&self) -> &InboundApi {
        &self.inbound
    }

    pub fn friends(&self) -> &FriendsApi {
        &self.friends
    }

    pub fn participant(&self) -> &ParticipantApi {
        &self.participant
    }
}
