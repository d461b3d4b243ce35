use wasm_bindgen::prelude::*;

pub mod macros;

pub mod constants;
pub mod error;
pub mod identity;
pub mod models;
pub mod network;
pub mod resources;
pub mod session;

mod bindings;

#[cfg(test)]
mod test_support;

pub use bindings::NewsFeed;
pub use error::ApiError;
pub use identity::{extract_id, IdentityResolver};
pub use session::FeedSession;

// Entry point run when the WASM module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
}
