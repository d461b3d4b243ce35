//! Caller identity: participant id parsing, the access token from the page
//! URL fragment, and the caller's own id resolved through `GET /test`.
//!
//! Token and id are looked up at most once per session and never
//! invalidated.  A token that expires stays cached until the page reloads.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{LocalBoxFuture, Shared};
use futures::FutureExt;

use crate::constants::{ACCESS_TOKEN_KEY, IDENTITY_PATH, PARTICIPANT_PATH_PREFIX};
use crate::error::ApiError;
use crate::models::TokenInfo;
use crate::network::{ApiClient, AuthOptions};
use crate::{debug_log, error_log};

/// Where the URL fragment (`#access_token=...`) comes from.
pub trait PageLocation {
    /// The fragment including its leading `#`, or `None` when the URL has
    /// none.
    fn fragment(&self) -> Option<String>;
}

/// Reads `window.location.hash`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl PageLocation for BrowserLocation {
    fn fragment(&self) -> Option<String> {
        let hash = web_sys::window()?.location().hash().ok()?;
        if hash.is_empty() {
            None
        } else {
            Some(hash)
        }
    }
}

/// A fragment supplied by the host instead of the browser.  Can be replaced
/// later, e.g. after an in-page OAuth redirect.
#[derive(Debug, Default)]
pub struct FixedLocation {
    fragment: RefCell<Option<String>>,
}

impl FixedLocation {
    pub fn new(fragment: Option<&str>) -> Self {
        Self {
            fragment: RefCell::new(fragment.map(str::to_string)),
        }
    }

    pub fn set(&self, fragment: Option<&str>) {
        *self.fragment.borrow_mut() = fragment.map(str::to_string);
    }
}

impl PageLocation for FixedLocation {
    fn fragment(&self) -> Option<String> {
        self.fragment.borrow().clone()
    }
}

/// Runs a background future to completion on the current thread.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Spawner backed by the browser's microtask queue.
pub fn browser_spawner() -> Spawner {
    Rc::new(|fut: LocalBoxFuture<'static, ()>| wasm_bindgen_futures::spawn_local(fut))
}

type IdentityFuture = Shared<LocalBoxFuture<'static, Result<TokenInfo, ApiError>>>;

// Built on the first `auth_options()` call.
#[derive(Clone)]
struct Started {
    options: Rc<AuthOptions>,
    identity: IdentityFuture,
}

pub struct IdentityResolver {
    client: ApiClient,
    location: Rc<dyn PageLocation>,
    spawner: Spawner,
    token: RefCell<String>,
    id: Rc<Cell<i64>>,
    token_info: Rc<RefCell<Option<TokenInfo>>>,
    started: RefCell<Option<Started>>,
}

impl IdentityResolver {
    pub fn new(client: ApiClient, location: Rc<dyn PageLocation>, spawner: Spawner) -> Self {
        Self {
            client,
            location,
            spawner,
            token: RefCell::new(String::new()),
            id: Rc::new(Cell::new(0)),
            token_info: Rc::new(RefCell::new(None)),
            started: RefCell::new(None),
        }
    }

    /// Resolver reading `window.location` and spawning on the browser event
    /// loop.
    pub fn browser(client: ApiClient) -> Self {
        Self::new(client, Rc::new(BrowserLocation), browser_spawner())
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// See [`extract_id`].
    pub fn extract_id(&self, path_or_id: &str) -> Option<i64> {
        extract_id(path_or_id)
    }

    /// Access token from the URL fragment, `""` when absent.  Only a
    /// non-empty token is cached, so a missing one is looked up again on the
    /// next call.
    pub fn token(&self) -> String {
        if self.token.borrow().is_empty() {
            if let Some(found) = self
                .location
                .fragment()
                .and_then(|fragment| parse_access_token(&fragment))
            {
                *self.token.borrow_mut() = found;
            }
        }
        self.token.borrow().clone()
    }

    /// Request options for every authenticated call.
    ///
    /// The first call also starts the `/test` identity lookup in the
    /// background and returns without waiting for it.  Later calls return
    /// the same `Rc`.
    pub fn auth_options(&self) -> Rc<AuthOptions> {
        Rc::clone(&self.start().options)
    }

    /// The caller's own id as cached right now.  An unresolved id is 0; the
    /// call then starts the lookup but does not wait for it.
    pub fn self_id(&self) -> i64 {
        if self.id.get() == 0 {
            self.auth_options();
        }
        self.id.get()
    }

    /// Wait for the caller's own id.  Every caller shares one `/test`
    /// request; its outcome, success or failure, is kept for the session.
    pub async fn resolve_self_id(&self) -> Result<i64, ApiError> {
        let cached = self.id.get();
        if cached != 0 {
            return Ok(cached);
        }
        let identity = self.start_identity();
        identity.await.map(|info| info.user_id())
    }

    /// What `/test` reported about the token, once resolved.
    pub fn token_info(&self) -> Option<TokenInfo> {
        self.token_info.borrow().clone()
    }

    fn start_identity(&self) -> IdentityFuture {
        self.start().identity
    }

    fn start(&self) -> Started {
        if let Some(started) = self.started.borrow().clone() {
            return started;
        }

        let options = Rc::new(AuthOptions::bearer(&self.token()));
        let started = Started {
            identity: self.lookup_identity((*options).clone()),
            options,
        };
        *self.started.borrow_mut() = Some(started.clone());

        (self.spawner)(started.identity.clone().map(|_| ()).boxed_local());
        started
    }

    fn lookup_identity(&self, options: AuthOptions) -> IdentityFuture {
        let client = self.client.clone();
        let id = Rc::clone(&self.id);
        let token_info = Rc::clone(&self.token_info);

        async move {
            let result = client.get_json::<TokenInfo>(IDENTITY_PATH, &options).await;
            match &result {
                Ok(info) => {
                    debug_log!("Resolved participant id {}", info.user_id());
                    id.set(info.user_id());
                    *token_info.borrow_mut() = Some(info.clone());
                }
                Err(e) => error_log!("Identity lookup failed: {}", e),
            }
            result
        }
        .boxed_local()
        .shared()
    }
}

/// Participant id from a reference such as `/participant/42` (found anywhere
/// in the input), otherwise from the whole input read the way JavaScript's
/// `parseInt` reads it: leading whitespace, an optional sign, then the
/// longest run of digits (`0x` switches to hex).
///
/// Returns `None` when no digits are found or the number does not fit in an
/// `i64`.
pub fn extract_id(path_or_id: &str) -> Option<i64> {
    let mut rest = path_or_id;
    while let Some(pos) = rest.find(PARTICIPANT_PATH_PREFIX) {
        let digits = leading_digits(&rest[pos + PARTICIPANT_PATH_PREFIX.len()..], 10);
        if !digits.is_empty() {
            return digits.parse().ok();
        }
        // Resume one byte in: the prefix's trailing '/' may open the next
        // match.
        rest = &rest[pos + 1..];
    }
    parse_int(path_or_id)
}

fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let digits = leading_digits(s, radix);
    if digits.is_empty() {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn leading_digits(s: &str, radix: u32) -> &str {
    let end = s
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(s.len());
    &s[..end]
}

/// Value of `access_token` in a fragment such as `#access_token=XYZ&other=1`.
/// Empty values count as missing.
pub fn parse_access_token(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == ACCESS_TOKEN_KEY && !value.is_empty())
        .map(|(_, value)| value.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn browser_location_reads_window_hash() {
        let location = web_sys::window().unwrap().location();
        location.set_hash("access_token=abc&x=1").unwrap();
        assert_eq!(BrowserLocation.fragment().as_deref(), Some("#access_token=abc&x=1"));
        assert_eq!(
            BrowserLocation.fragment().and_then(|f| parse_access_token(&f)),
            Some("abc".to_string())
        );
    }
}
