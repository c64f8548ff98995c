use actix_session::Session;
use serde::{Serialize, de::DeserializeOwned};

use crate::cla::AuthToken;
use crate::errors::AppError;
use crate::models::signature::MAX_STORED_SIGNATURE_BYTES;
use crate::models::{Project, SignatureRecord, User};
use crate::signing::SignatureStore;

pub const ACCESS_TOKEN: &str = "access_token";
pub const PROJECT_ID: &str = "projectId";
pub const GERRIT_CLA_TYPE: &str = "gerritClaType";
pub const PROJECT_MODEL: &str = "project";
pub const USER_MODEL: &str = "user";
pub const SIGNATURE: &str = "signature";
pub const FLASH: &str = "flash";

/// The only CLA type the Gerrit corporate flow signs.
pub const CCLA: &str = "CCLA";

pub fn get_access_token(session: &Session) -> Option<AuthToken> {
    session
        .get::<String>(ACCESS_TOKEN)
        .unwrap_or(None)
        .filter(|t| !t.is_empty())
        .map(AuthToken::new)
}

pub fn set_access_token(session: &Session, token: &str) -> Result<(), AppError> {
    session
        .insert(ACCESS_TOKEN, token)
        .map_err(|e| AppError::Session(format!("Failed to store access token: {e}")))
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH, message) {
        log::warn!("Could not store flash message '{}': {}", message, e);
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}

/// Typed cache over the browser session.
///
/// Values are JSON-serialized, last writer wins. Pages read them only as a
/// cache; identifiers always come from the request itself.
pub struct PortalStore<'a> {
    session: &'a Session,
}

impl<'a> PortalStore<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        self.session
            .insert(key, value)
            .map_err(|e| AppError::Session(format!("Failed to store '{key}': {e}")))
    }

    /// Missing and undecodable entries both read as `None`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.session.get::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Discarding unreadable session entry '{}': {}", key, e);
                self.session.remove(key);
                None
            }
        }
    }

    pub fn set_project_id(&self, project_id: &str) -> Result<(), AppError> {
        self.put(PROJECT_ID, &project_id)
    }

    pub fn project_id(&self) -> Option<String> {
        self.get(PROJECT_ID)
    }

    pub fn set_gerrit_cla_type(&self) -> Result<(), AppError> {
        self.put(GERRIT_CLA_TYPE, &CCLA)
    }

    pub fn gerrit_cla_type(&self) -> Option<String> {
        self.get(GERRIT_CLA_TYPE)
    }

    pub fn set_project(&self, project: &Project) -> Result<(), AppError> {
        self.put(PROJECT_MODEL, project)
    }

    /// Cached project, only if it is the one asked for.
    pub fn project(&self, project_id: &str) -> Option<Project> {
        self.get::<Project>(PROJECT_MODEL)
            .filter(|p| p.project_id == project_id)
    }

    pub fn set_user(&self, user: &User) -> Result<(), AppError> {
        self.put(USER_MODEL, user)
    }

    pub fn user(&self) -> Option<User> {
        self.get(USER_MODEL)
    }

    pub fn signature(&self) -> Option<SignatureRecord> {
        self.get(SIGNATURE)
    }

    pub fn clear_signature(&self) {
        self.session.remove(SIGNATURE);
    }
}

impl SignatureStore for PortalStore<'_> {
    /// Keeps only the scalar summary; the session lives in a size-limited cookie.
    fn store_signature(&self, record: &SignatureRecord) -> Result<(), AppError> {
        let summary = record.summary();
        let size = summary.encoded_len();
        if size > MAX_STORED_SIGNATURE_BYTES {
            return Err(AppError::Session(format!(
                "Prepared signature too large for the session ({size} bytes)"
            )));
        }
        self.put(SIGNATURE, &summary)
    }
}
