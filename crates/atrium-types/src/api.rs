use serde::{Deserialize, Deserializer, Serialize};

// Request fields are optional on purpose: a field the client leaves out is
// bound as NULL and the column constraints decide what happens.

/// Role assigned at registration when the client does not send one.
pub const DEFAULT_ROLE: &str = "user";

// -- Auth --

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `None` when the key is absent, `Some(None)` for an explicit null.
    /// Only an absent role falls back to [`DEFAULT_ROLE`].
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Option<String>>,
}

impl RegisterRequest {
    /// Role to store: the default when absent, NULL when sent as null.
    pub fn role_or_default(&self) -> Option<String> {
        match &self.role {
            None => Some(DEFAULT_ROLE.to_string()),
            Some(role) => role.clone(),
        }
    }
}

// Only called when the key is present, so null maps to Some(None).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// -- Users --

/// Public view of a user. The password never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

// -- Ideas --

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateIdeaRequest {
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaResponse {
    pub id: i64,
    pub content: String,
    pub author: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

// -- Rooms --

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: i64,
    pub name: String,
    pub timestamp: i64,
}

// -- Generic --

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.c"));
        assert!(req.name.is_none());
        assert!(req.role.is_none());
        assert_eq!(req.role_or_default().as_deref(), Some("user"));
    }

    #[test]
    fn explicit_null_role_is_kept_as_null() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.c","role":null}"#).unwrap();
        assert_eq!(req.role, Some(None));
        assert_eq!(req.role_or_default(), None);
    }

    #[test]
    fn explicit_role_is_used() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.c","role":"admin"}"#).unwrap();
        assert_eq!(req.role_or_default().as_deref(), Some("admin"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: CreateRoomRequest =
            serde_json::from_str(r#"{"name":"lobby","capacity":12}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("lobby"));
    }

    #[test]
    fn idea_serializes_with_flat_fields() {
        let idea = IdeaResponse {
            id: 7,
            content: "buy milk".into(),
            author: "alice".into(),
            timestamp: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&idea).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "content": "buy milk",
                "author": "alice",
                "timestamp": 1_700_000_000_000_i64,
            })
        );
    }
}
