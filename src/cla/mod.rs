//! Client side of the CLA backend: project, company, user and signature lookups.

pub mod client;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Company, Project, ProjectSignatures, SignatureOutcome, SigningRequest, User};

pub use client::ClaClient;

/// Bearer token issued by the identity provider, passed explicitly to every call.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug)]
pub enum ClaError {
    /// The request never produced a response (connect, timeout, TLS).
    Transport(String),
    /// The backend answered with a non-success status.
    Status { status: u16, body: String },
    /// The backend answered with a body we could not decode.
    Decode(String),
    /// The caller gave up before the response arrived.
    Cancelled,
}

impl ClaError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaError::Status { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClaError::Status { status: 401 | 403, .. })
    }
}

impl fmt::Display for ClaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaError::Transport(e) => write!(f, "transport failure: {e}"),
            ClaError::Status { status, body } => write!(f, "backend returned {status}: {body}"),
            ClaError::Decode(e) => write!(f, "undecodable response: {e}"),
            ClaError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ClaError {}

impl From<reqwest::Error> for ClaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClaError::Decode(e.to_string())
        } else {
            ClaError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClaError {
    fn from(e: serde_json::Error) -> Self {
        ClaError::Decode(e.to_string())
    }
}

/// Operations the portal needs from the CLA backend.
#[async_trait]
pub trait ClaService: Send + Sync {
    async fn get_project(&self, token: &AuthToken, project_id: &str) -> Result<Project, ClaError>;

    /// Look up the Gerrit user for the token's identity, creating it on first use.
    async fn post_or_get_user_for_gerrit(&self, token: &AuthToken) -> Result<User, ClaError>;

    async fn list_companies(&self, token: &AuthToken) -> Result<Vec<Company>, ClaError>;

    async fn get_company(&self, token: &AuthToken, company_id: &str) -> Result<Company, ClaError>;

    async fn get_company_project_signatures(
        &self,
        token: &AuthToken,
        company_id: &str,
        project_id: &str,
    ) -> Result<ProjectSignatures, ClaError>;

    async fn check_and_prepare_employee_signature(
        &self,
        token: &AuthToken,
        request: &SigningRequest,
    ) -> Result<SignatureOutcome, ClaError>;
}
