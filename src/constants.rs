// Remote service defaults - the single source of truth for routes and queries
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

pub const IDENTITY_PATH: &str = "/test";
pub const GRAPHQL_PATH: &str = "/graphql";
pub const OUTBOUND_PATH: &str = "/participant/outbound";
pub const FRIENDS_PATH: &str = "/participant/friends";

// Participant references look like "/participant/42"
pub const PARTICIPANT_PATH_PREFIX: &str = "/participant/";

// URL fragment key written by the OAuth implicit-grant redirect
pub const ACCESS_TOKEN_KEY: &str = "access_token";

// The backend resolves `id:"0"` to the caller identified by the bearer token
pub const OUTBOUND_QUERY: &str = r#"{outbound(id:"0"){occurred,subject,story}}"#;
pub const INBOUND_QUERY: &str = r#"{inbound(id:"0"){from{name},occurred,subject,story}}"#;
pub const FRIENDS_QUERY: &str = r#"{friends(id:"0"){name}}"#;
pub const ME_QUERY: &str = r#"{me(id:"0"){name}}"#;

// Placeholder participant returned when the `me` lookup fails
pub const ERROR_PARTICIPANT_NAME: &str = "error";
