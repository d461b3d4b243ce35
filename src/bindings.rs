//! JS-facing surface.  UI code creates one `NewsFeed` per page; reads return
//! promises that reject with the error message on failure.

use std::rc::Rc;

use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::error_log;
use crate::models::{OutboundModel, ParticipantModel};
use crate::network::ApiConfig;
use crate::session::FeedSession;

#[wasm_bindgen]
pub struct NewsFeed {
    session: Rc<FeedSession>,
}

#[wasm_bindgen]
impl NewsFeed {
    /// `api_base_url` overrides the build-time `API_BASE_URL`.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base_url: Option<String>) -> NewsFeed {
        let config = api_base_url
            .as_deref()
            .map(ApiConfig::from_url)
            .unwrap_or_else(ApiConfig::new);
        NewsFeed {
            session: Rc::new(FeedSession::browser(config)),
        }
    }

    #[wasm_bindgen(js_name = extractId)]
    pub fn extract_id(&self, path_or_id: &str) -> Option<f64> {
        self.session.identity().extract_id(path_or_id).map(|id| id as f64)
    }

    #[wasm_bindgen(js_name = getToken)]
    pub fn token(&self) -> String {
        self.session.identity().token()
    }

    #[wasm_bindgen(js_name = getSelfId)]
    pub fn self_id(&self) -> f64 {
        self.session.identity().self_id() as f64
    }

    /// Resolves with the caller's own id.
    pub fn connect(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let id = session.connect().await?;
            Ok(JsValue::from_f64(id as f64))
        })
    }

    #[wasm_bindgen(js_name = getOutbound)]
    pub fn outbound(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move { to_js(&session.outbound().get().await?) })
    }

    #[wasm_bindgen(js_name = getInbound)]
    pub fn inbound(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move { to_js(&session.inbound().get().await?) })
    }

    #[wasm_bindgen(js_name = getFriends)]
    pub fn friends(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move { to_js(&session.friends().get().await?) })
    }

    #[wasm_bindgen(js_name = getMe)]
    pub fn me(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move { to_js(&session.participant().get().await?) })
    }

    #[wasm_bindgen(js_name = loadState)]
    pub fn load_state(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move { to_js(&session.load_state().await?) })
    }

    /// Post a story without waiting for the result; failures are logged.
    #[wasm_bindgen(js_name = addOutbound)]
    pub fn add_outbound(&self, outbound: JsValue) -> Result<(), JsValue> {
        let model: OutboundModel = serde_wasm_bindgen::from_value(outbound)?;
        let session = Rc::clone(&self.session);
        spawn_local(async move {
            if let Err(e) = session.outbound().add(&model).await {
                error_log!("Failed to add outbound story: {}", e);
            }
        });
        Ok(())
    }

    /// Befriend `participant` without waiting for the result; failures are
    /// logged.
    #[wasm_bindgen(js_name = addFriend)]
    pub fn add_friend(&self, participant: JsValue) -> Result<(), JsValue> {
        let model: ParticipantModel = serde_wasm_bindgen::from_value(participant)?;
        let session = Rc::clone(&self.session);
        spawn_local(async move {
            if let Err(e) = session.friends().add(&model).await {
                error_log!("Failed to add friend {}: {}", model.id(), e);
            }
        });
        Ok(())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
