use serde::{Deserialize, Serialize};

/// The signed-in contributor, as returned by the Gerrit user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub lf_username: Option<String>,
    #[serde(default)]
    pub user_emails: Vec<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.lf_username.as_deref())
            .unwrap_or(&self.user_id)
    }
}
