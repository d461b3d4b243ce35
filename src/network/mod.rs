// Re-export network modules
pub mod api_client;
pub mod config;
pub mod transport;

// Re-export commonly used items
pub use api_client::ApiClient;
pub use config::ApiConfig;
pub use transport::{
    AuthOptions, FetchTransport, HttpRequest, HttpResponse, HttpTransport, Method, TransportFuture,
};
