//! Shared fixtures for the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::LocalPool;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::error::ApiError;
use crate::identity::{FixedLocation, IdentityResolver, Spawner};
use crate::network::{ApiClient, ApiConfig, HttpRequest, HttpResponse, HttpTransport, TransportFuture};

/// Recording transport.  Each route is matched by substring against the
/// request URL; unmatched requests get a 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: RefCell<Vec<(String, Result<HttpResponse, ApiError>)>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn respond(&self, url_part: &str, status: u16, body: &str) {
        self.routes
            .borrow_mut()
            .push((url_part.to_string(), Ok(HttpResponse::new(status, body))));
    }

    pub(crate) fn fail(&self, url_part: &str, message: &str) {
        self.routes
            .borrow_mut()
            .push((url_part.to_string(), Err(ApiError::Transport(message.to_string()))));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn requests_to(&self, url_part: &str) -> Vec<HttpRequest> {
        self.sent
            .borrow()
            .iter()
            .filter(|req| req.url.contains(url_part))
            .cloned()
            .collect()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture {
        let outcome = self
            .routes
            .borrow()
            .iter()
            .find(|(part, _)| request.url.contains(part.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "not found")));
        self.sent.borrow_mut().push(request);
        Box::pin(futures::future::ready(outcome))
    }
}

/// Spawner that queues background futures on `pool`; they only run when the
/// test drives the pool.
pub(crate) fn pool_spawner(pool: &LocalPool) -> Spawner {
    let spawner = pool.spawner();
    Rc::new(move |fut: LocalBoxFuture<'static, ()>| {
        spawner
            .spawn_local(fut)
            .expect("local pool accepts spawned futures");
    })
}

pub(crate) fn resolver(
    mock: &Rc<MockTransport>,
    fragment: Option<&str>,
    pool: &LocalPool,
) -> Rc<IdentityResolver> {
    let client = ApiClient::new(ApiConfig::default(), mock.clone());
    Rc::new(IdentityResolver::new(
        client,
        Rc::new(FixedLocation::new(fragment)),
        pool_spawner(pool),
    ))
}
