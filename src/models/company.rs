use serde::{Deserialize, Serialize};

/// A company as listed by the CLA backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    #[serde(default)]
    pub company_name: String,
}

impl Company {
    pub fn new(company_id: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            company_name: company_name.into(),
        }
    }

    /// Blank placeholder shown while the company lookup is pending or failed.
    pub fn blank(company_id: &str) -> Self {
        Self::new(company_id, "")
    }
}
