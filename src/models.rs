use chrono::{DateTime, FixedOffset};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::ERROR_PARTICIPANT_NAME;
use crate::error::ApiError;

// Models mirror the backend schema.  Fields are private so a value cannot
// change after it has been built or decoded.

/// A person taking part in the feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantModel {
    // GraphQL `ID` values arrive as strings; queries that don't select the
    // id leave it at 0.
    #[serde(default, deserialize_with = "lenient_id")]
    id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

impl ParticipantModel {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: None,
        }
    }

    pub fn with_link(id: i64, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link: Some(link.into()),
        }
    }

    /// Stand-in returned by `ParticipantApi::get_or_sentinel` on failure.
    pub fn error_sentinel() -> Self {
        Self::new(0, ERROR_PARTICIPANT_NAME)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// A story posted by the current participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundModel {
    #[serde(default, deserialize_with = "null_as_default")]
    occurred: String,
    #[serde(default, deserialize_with = "null_as_default")]
    subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    story: String,
}

impl OutboundModel {
    pub fn new(
        occurred: impl Into<String>,
        subject: impl Into<String>,
        story: impl Into<String>,
    ) -> Self {
        Self {
            occurred: occurred.into(),
            subject: subject.into(),
            story: story.into(),
        }
    }

    pub fn occurred(&self) -> &str {
        &self.occurred
    }

    /// `occurred` parsed as an RFC 3339 timestamp (the GraphQL `DateTime`
    /// scalar).  `None` when the server sent something else.
    pub fn occurred_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.occurred).ok()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn story(&self) -> &str {
        &self.story
    }
}

/// A story received from another participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundModel {
    #[serde(default)]
    from: ParticipantModel,
    #[serde(flatten)]
    message: OutboundModel,
}

impl InboundModel {
    pub fn new(from: ParticipantModel, message: OutboundModel) -> Self {
        Self { from, message }
    }

    pub fn from(&self) -> &ParticipantModel {
        &self.from
    }

    pub fn message(&self) -> &OutboundModel {
        &self.message
    }

    pub fn occurred(&self) -> &str {
        self.message.occurred()
    }

    pub fn subject(&self) -> &str {
        self.message.subject()
    }

    pub fn story(&self) -> &str {
        self.message.story()
    }
}

impl Default for ParticipantModel {
    fn default() -> Self {
        Self::new(0, "")
    }
}

/// Directed friend link between two participant ids.  `id` stays 0 until the
/// backend has persisted the link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsModel {
    #[serde(default, deserialize_with = "lenient_id")]
    id: i64,
    #[serde(deserialize_with = "lenient_id")]
    from: i64,
    #[serde(deserialize_with = "lenient_id")]
    to: i64,
}

impl FriendsModel {
    pub fn new(id: i64, from: i64, to: i64) -> Self {
        Self { id, from, to }
    }

    /// A link that has not been stored yet.
    pub fn unsaved(from: i64, to: i64) -> Self {
        Self::new(0, from, to)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }
}

/// Body of `GET /test`: what the OAuth server knows about the bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(deserialize_with = "lenient_id")]
    user_id: i64,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenInfo {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            client_id: None,
            expires_in: None,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Seconds left before the token expires, as reported by the server.
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }
}

/// Everything the feed page shows for the signed-in participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParticipantState {
    pub participant: ParticipantModel,
    pub friends: Vec<ParticipantModel>,
    pub inbound: Vec<InboundModel>,
    pub outbound: Vec<OutboundModel>,
}

// ---------------------------------------------------------------------------
// GraphQL response envelopes: `{data: {<field>: T}, errors: [...]}`
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GraphQlEnvelope<T> {
    data: Option<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlEnvelope<T> {
    /// Unwrap the `data` member, turning reported errors into `ApiError`.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response has no data member".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct OutboundData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub outbound: Vec<OutboundModel>,
}

#[derive(Debug, Deserialize)]
pub struct InboundData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub inbound: Vec<InboundModel>,
}

#[derive(Debug, Deserialize)]
pub struct FriendsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub friends: Vec<ParticipantModel>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantData {
    pub me: ParticipantModel,
}

// ---------------------------------------------------------------------------
// serde helpers
// ---------------------------------------------------------------------------

/// Accept an integer id sent either as a JSON number or as a numeric string.
/// `null` maps to 0.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawId::Number(n)) => Ok(n),
        Some(RawId::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("id is not an integer: {:?}", s))),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn participant_id_accepts_graphql_id_strings() {
        let p: ParticipantModel = serde_json::from_value(json!({"id": "42", "name": "Ada"})).unwrap();
        assert_eq!(p.id(), 42);
        assert_eq!(p.name(), "Ada");

        let p: ParticipantModel = serde_json::from_value(json!({"id": 7, "name": "Bo"})).unwrap();
        assert_eq!(p.id(), 7);

        let bad = serde_json::from_value::<ParticipantModel>(json!({"id": "x1", "name": "C"}));
        assert!(bad.is_err());
    }

    #[test]
    fn participant_without_selected_id_defaults_to_zero() {
        let p: ParticipantModel = serde_json::from_value(json!({"name": "Dee"})).unwrap();
        assert_eq!(p, ParticipantModel::new(0, "Dee"));
        assert_eq!(p.link(), None);
    }

    #[test]
    fn inbound_is_flat_on_the_wire() {
        let inbound: InboundModel = serde_json::from_value(json!({
            "from": {"name": "Eve"},
            "occurred": "2019-03-01T10:00:00Z",
            "subject": "hi",
            "story": "long story"
        }))
        .unwrap();
        assert_eq!(inbound.from().name(), "Eve");
        assert_eq!(inbound.subject(), "hi");
        assert_eq!(inbound.story(), "long story");

        let back = serde_json::to_value(&inbound).unwrap();
        assert_eq!(back["subject"], "hi");
        assert_eq!(back["from"]["name"], "Eve");
        assert!(back.get("message").is_none());
    }

    #[test]
    fn occurred_at_parses_rfc3339_only() {
        let ok = OutboundModel::new("2019-03-01T10:00:00+02:00", "s", "x");
        assert_eq!(ok.occurred_at().map(|t| t.timestamp()), Some(1_551_427_200));
        assert!(OutboundModel::new("t1", "s", "x").occurred_at().is_none());
    }

    #[test]
    fn null_strings_decode_as_empty() {
        let ob: OutboundModel =
            serde_json::from_value(json!({"occurred": null, "subject": "s", "story": null})).unwrap();
        assert_eq!(ob, OutboundModel::new("", "s", ""));
    }

    #[test]
    fn friends_model_serializes_plain_ids() {
        let link = FriendsModel::unsaved(3, 9);
        assert_eq!(serde_json::to_value(link).unwrap(), json!({"id": 0, "from": 3, "to": 9}));
    }

    #[test]
    fn token_info_accepts_string_user_id() {
        let info: TokenInfo = serde_json::from_value(json!({
            "expires_in": 7100,
            "client_id": "feed",
            "user_id": "17"
        }))
        .unwrap();
        assert_eq!(info.user_id(), 17);
        assert_eq!(info.client_id(), Some("feed"));
        assert_eq!(info.expires_in(), Some(7100));
    }

    #[test]
    fn envelope_surfaces_graphql_errors() {
        let env: GraphQlEnvelope<OutboundData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "not authorized"}, {"message": "bad id"}]
        }))
        .unwrap();
        assert_eq!(
            env.into_data().unwrap_err(),
            ApiError::GraphQl("not authorized; bad id".into())
        );
    }

    #[test]
    fn envelope_null_list_is_empty() {
        let env: GraphQlEnvelope<FriendsData> =
            serde_json::from_value(json!({"data": {"friends": null}})).unwrap();
        assert!(env.into_data().unwrap().friends.is_empty());
    }
}
