//! User profile and lightweight user references

use serde::{Deserialize, Serialize};

/// Reference to a user embedded in another entity (e.g. a task assignee)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn named(id: u64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: Some(full_name.into()),
            email: None,
        }
    }
}

/// Profile of the signed-in user (`/user/profile`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
