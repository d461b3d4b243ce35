//! End-to-end flow over the public API with an in-memory backend.
//!
//! Run with: cargo test --test feed_session

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use newsfeed_frontend::identity::{FixedLocation, Spawner};
use newsfeed_frontend::models::{FriendsModel, OutboundModel, ParticipantModel};
use newsfeed_frontend::network::{ApiConfig, HttpRequest, HttpResponse, HttpTransport, Method, TransportFuture};
use newsfeed_frontend::FeedSession;

/// Minimal stand-in for the feed backend: answers by path and keeps every
/// request it saw.
#[derive(Default)]
struct FakeBackend {
    seen: RefCell<Vec<HttpRequest>>,
}

impl HttpTransport for FakeBackend {
    fn send(&self, request: HttpRequest) -> TransportFuture {
        let authorized = request.header("Authorization") == Some("Bearer s3cret");
        let response = if !authorized {
            HttpResponse::new(401, "missing token")
        } else if request.url.ends_with("/test") {
            HttpResponse::new(200, r#"{"user_id": "21", "client_id": "feed", "expires_in": 3600}"#)
        } else if request.url.contains("outbound") && request.method == Method::Get {
            HttpResponse::new(200, r#"{"data":{"outbound":[{"occurred":"2019-03-01T10:00:00Z","subject":"s","story":"x"}]}}"#)
        } else if request.method == Method::Post {
            HttpResponse::new(200, "")
        } else {
            HttpResponse::new(404, "not found")
        };
        self.seen.borrow_mut().push(request);
        Box::pin(futures::future::ready(Ok(response)))
    }
}

// Background work is dropped; `connect()` drives the identity lookup instead.
fn idle_spawner() -> Spawner {
    Rc::new(|_: LocalBoxFuture<'static, ()>| {})
}

fn session(backend: &Rc<FakeBackend>, fragment: &str) -> FeedSession {
    FeedSession::new(
        ApiConfig::from_url("http://feed.test/"),
        backend.clone(),
        Rc::new(FixedLocation::new(Some(fragment))),
        idle_spawner(),
    )
}

#[test]
fn connect_then_befriend_and_post() {
    let backend = Rc::new(FakeBackend::default());
    let feed = session(&backend, "#access_token=s3cret&token_type=bearer");

    assert_eq!(feed.identity().self_id(), 0);
    assert_eq!(block_on(feed.connect()), Ok(21));
    assert_eq!(feed.identity().self_id(), 21);
    assert_eq!(
        feed.identity().token_info().and_then(|info| info.expires_in()),
        Some(3600)
    );

    block_on(feed.friends().add(&ParticipantModel::new(8, "Ada"))).unwrap();
    block_on(feed.outbound().add(&OutboundModel::new("2019-03-01T10:00:00Z", "s", "x"))).unwrap();
    let stories = block_on(feed.outbound().get()).unwrap();
    assert_eq!(stories[0].subject(), "s");

    let seen = backend.seen.borrow();
    assert_eq!(seen.iter().filter(|r| r.url.ends_with("/test")).count(), 1);

    let friend_post = seen
        .iter()
        .find(|r| r.url == "http://feed.test/participant/friends")
        .expect("friend link was posted");
    let link: FriendsModel = serde_json::from_str(friend_post.body.as_deref().unwrap()).unwrap();
    assert_eq!((link.from(), link.to()), (21, 8));
    assert!(seen.iter().all(|r| r.with_credentials));
}

#[test]
fn missing_token_is_rejected_not_swallowed() {
    let backend = Rc::new(FakeBackend::default());
    let feed = session(&backend, "#state=xyz");

    assert_eq!(feed.identity().token(), "");
    let err = block_on(feed.outbound().get()).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(block_on(feed.outbound().get_or_empty()).is_empty());
}
