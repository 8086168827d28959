use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    /// Identity key used as message sender and thread participant
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserInfo {
    /// Viewer identity, or `None` when the email is blank.
    pub fn viewer_identity(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}

/// Source of the current user.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<UserInfo>;
}

/// Provider that always returns the same user (or nobody).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<UserInfo>);

impl StaticIdentity {
    pub fn signed_in(user: UserInfo) -> Self {
        Self(Some(user))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }

    /// User whose id and name are derived from the email.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self::signed_in(UserInfo {
            id: format!("user-{name}"),
            name,
            email: email.to_string(),
            profile_image: None,
        })
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserInfo> {
        self.0.clone()
    }
}
