#![allow(dead_code)]

use hookbus::BoxError;

// ============================================================================
// Test Topics
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}

hookbus::topics! {
    /// A user's profile changed.
    pub UserUpdated = "userUpdated" => User;
    /// The session ended.
    pub Logout = "logout" => ();
    /// A numeric check used by the gating tests.
    pub Score = "score" => u32;
}

// ============================================================================
// Registration Flow Types
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthInput {
    pub user_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
}

impl AuthInput {
    pub fn new(user_name: &str, password: &str, password2: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            password: Some(password.to_string()),
            password2: Some(password2.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthResult {
    pub error: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl AuthResult {
    pub fn failed(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn registered(user_name: &str) -> Self {
        Self {
            user_name: Some(user_name.to_string()),
            ..Self::default()
        }
    }
}

/// Stand-in for a remote username availability lookup.
pub async fn check_user_name(user_name: String) -> Result<AuthResult, BoxError> {
    tokio::task::yield_now().await;
    match user_name.as_str() {
        "taken" => Ok(AuthResult::failed("user name already taken")),
        "offline" => Err("lookup service unavailable".into()),
        _ => Ok(AuthResult::registered(&user_name)),
    }
}
