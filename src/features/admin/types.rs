use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Filter accepted by `/admin/users/{status}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Verified,
    Unverified,
}

impl UserStatusFilter {
    pub const VALUES: [&'static str; 5] = ["all", "active", "inactive", "verified", "unverified"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UserStatusFilter::All => "all",
            UserStatusFilter::Active => "active",
            UserStatusFilter::Inactive => "inactive",
            UserStatusFilter::Verified => "verified",
            UserStatusFilter::Unverified => "unverified",
        }
    }
}

impl fmt::Display for UserStatusFilter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for UserStatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(UserStatusFilter::All),
            "active" => Ok(UserStatusFilter::Active),
            "inactive" => Ok(UserStatusFilter::Inactive),
            "verified" => Ok(UserStatusFilter::Verified),
            "unverified" => Ok(UserStatusFilter::Unverified),
            other => Err(format!("unknown user status: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AdminUser {
    /// Case-insensitive match of `query` against the name and email. A blank query
    /// matches everyone.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || format!("{} {}", self.name, self.email)
                .to_lowercase()
                .contains(&query)
    }
}

/// A broadcast email, sent to every user or to one address as a test.
#[derive(Clone, Debug, Default)]
pub struct Broadcast {
    pub subject: String,
    pub message_content: String,
}

#[derive(Serialize)]
pub(super) struct BroadcastRequest<'a> {
    pub subject: &'a str,
    pub message_content: &'a str,
}

#[derive(Serialize)]
pub(super) struct TestBroadcastRequest<'a> {
    pub email: &'a str,
    pub subject: &'a str,
    pub message_content: &'a str,
}
