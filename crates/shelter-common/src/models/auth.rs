use serde::{Deserialize, Serialize};

/// JWT claims.
///
/// Login-issued tokens carry `email`; refreshed tokens only carry `uid`,
/// so `email` is left out of the payload entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated subject of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: i64,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: i64) -> Self {
        Self { uid, email: None }
    }

    pub fn with_email(uid: i64, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: Some(email.into()),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.uid,
            email: claims.email,
        }
    }
}
