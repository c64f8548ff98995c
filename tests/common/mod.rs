//! Shared test infrastructure.
//!
//! - `FakeClaService` - in-memory `ClaService` with canned responses
//! - `MemoryStore` - `SignatureStore` that keeps the last stored signature
//! - `sample_companies()` - a small company directory

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use cla_portal::cla::{AuthToken, ClaError, ClaService};
use cla_portal::errors::AppError;
use cla_portal::models::{
    Company, Project, ProjectSignatures, SignatureOutcome, SignatureRecord, SigningRequest, User,
};
use cla_portal::signing::SignatureStore;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const PROJECT_ID: &str = "a092M00001IV4RGQA1";
pub const COMPANY_ID: &str = "c-acme";
pub const USER_ID: &str = "u-jane";
pub const TOKEN: &str = "test-token";

pub fn token() -> AuthToken {
    AuthToken::new(TOKEN)
}

pub fn request() -> SigningRequest {
    SigningRequest::new(PROJECT_ID, COMPANY_ID, USER_ID)
}

pub fn sample_companies() -> Vec<Company> {
    vec![
        Company::new("c-acme", "Acme Corp"),
        Company::new("c-globex", "Globex Corporation"),
        Company::new("c-initech", "Initech"),
        Company::new("c-acme-labs", "ACME Labs"),
    ]
}

pub fn sample_project() -> Project {
    Project {
        project_id: PROJECT_ID.to_string(),
        project_name: "OpenWidget".to_string(),
        logo_url: String::new(),
    }
}

pub fn sample_user() -> User {
    User {
        user_id: USER_ID.to_string(),
        user_name: Some("Jane Doe".to_string()),
        lf_username: Some("jdoe".to_string()),
        user_emails: vec!["jane@acme.example".to_string()],
    }
}

// ============================================================================
// FAKE CLA SERVICE
// ============================================================================

/// What the fake answers for the check-and-prepare call.
#[derive(Clone)]
pub enum CheckReply {
    Body(Value),
    Unreachable,
}

pub struct FakeClaService {
    pub project_ok: bool,
    pub user_ok: bool,
    pub companies_ok: bool,
    pub companies: Vec<Company>,
    pub signatures: Option<ProjectSignatures>,
    pub check_reply: Mutex<CheckReply>,
    pub check_delay: Option<Duration>,
    pub check_calls: AtomicUsize,
    pub last_request: Mutex<Option<SigningRequest>>,
}

impl FakeClaService {
    pub fn new() -> Self {
        Self {
            project_ok: true,
            user_ok: true,
            companies_ok: true,
            companies: sample_companies(),
            signatures: None,
            check_reply: Mutex::new(CheckReply::Body(serde_json::json!({"signature_id": "sig-1"}))),
            check_delay: None,
            check_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(body: Value) -> Self {
        let fake = Self::new();
        *fake.check_reply.lock().unwrap() = CheckReply::Body(body);
        fake
    }

    pub fn unreachable() -> Self {
        let fake = Self::new();
        *fake.check_reply.lock().unwrap() = CheckReply::Unreachable;
        fake
    }

    pub fn calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }
}

fn not_found() -> ClaError {
    ClaError::Status { status: 404, body: "not found".to_string() }
}

#[async_trait]
impl ClaService for FakeClaService {
    async fn get_project(&self, _token: &AuthToken, project_id: &str) -> Result<Project, ClaError> {
        if self.project_ok && project_id == PROJECT_ID {
            Ok(sample_project())
        } else {
            Err(not_found())
        }
    }

    async fn post_or_get_user_for_gerrit(&self, _token: &AuthToken) -> Result<User, ClaError> {
        if self.user_ok {
            Ok(sample_user())
        } else {
            Err(ClaError::Status { status: 401, body: "unauthorized".to_string() })
        }
    }

    async fn list_companies(&self, _token: &AuthToken) -> Result<Vec<Company>, ClaError> {
        if self.companies_ok {
            Ok(self.companies.clone())
        } else {
            Err(ClaError::Status { status: 503, body: "unavailable".to_string() })
        }
    }

    async fn get_company(&self, _token: &AuthToken, company_id: &str) -> Result<Company, ClaError> {
        self.companies
            .iter()
            .find(|c| c.company_id == company_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn get_company_project_signatures(
        &self,
        _token: &AuthToken,
        _company_id: &str,
        _project_id: &str,
    ) -> Result<ProjectSignatures, ClaError> {
        self.signatures.clone().ok_or_else(not_found)
    }

    async fn check_and_prepare_employee_signature(
        &self,
        _token: &AuthToken,
        request: &SigningRequest,
    ) -> Result<SignatureOutcome, ClaError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.check_delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.check_reply.lock().unwrap().clone();
        match reply {
            CheckReply::Body(body) => Ok(SignatureOutcome::from_response(body)),
            CheckReply::Unreachable => Err(ClaError::Transport("connection refused".to_string())),
        }
    }
}

// ============================================================================
// SIGNATURE STORE
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    pub signature: Mutex<Option<SignatureRecord>>,
    pub writes: AtomicUsize,
}

impl MemoryStore {
    pub fn stored(&self) -> Option<SignatureRecord> {
        self.signature.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SignatureStore for MemoryStore {
    fn store_signature(&self, record: &SignatureRecord) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.signature.lock().unwrap() = Some(record.clone());
        Ok(())
    }
}
