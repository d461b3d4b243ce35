//! One client per remote resource.  Every client is built once around the
//! shared [`IdentityResolver`](crate::identity::IdentityResolver) and sends
//! its auth options with each request.

pub mod friends;
pub mod inbound;
pub mod outbound;
pub mod participant;

pub use friends::FriendsApi;
pub use inbound::InboundApi;
pub use outbound::OutboundApi;
pub use participant::ParticipantApi;

use crate::error::ApiError;
use crate::error_log;

// Legacy fallbacks swallow the error after logging it.
fn log_fallback(resource: &str, err: &ApiError) {
    error_log!("Failed to load {}: {}", resource, err);
}
