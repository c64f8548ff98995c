use serde::{Deserialize, Serialize};

/// Project (CLA group) metadata, cached in the session as the current project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default, rename = "logoUrl", alias = "logo_url")]
    pub logo_url: String,
}

impl Project {
    pub fn blank(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            project_name: String::new(),
            logo_url: String::new(),
        }
    }
}
