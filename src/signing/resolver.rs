use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::destination::{Destination, GitService};
use crate::cla::{AuthToken, ClaError, ClaService};
use crate::errors::AppError;
use crate::models::{SignatureOutcome, SignatureRecord, SigningRequest};

/// Where a prepared signature is kept until the confirmation page reads it.
pub trait SignatureStore {
    fn store_signature(&self, record: &SignatureRecord) -> Result<(), AppError>;
}

/// The single action the flow takes after a company is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Present the "send CLA manager email" page.
    MissingCcla(Destination),
    /// Push the troubleshoot page.
    NotOnApprovalList(Destination),
    /// Signature stored; push the confirmation page.
    SignaturePrepared(Destination),
    /// The backend reported errors we do not know how to route.
    Unexpected(Value),
}

impl Resolution {
    pub fn destination(&self) -> Option<&Destination> {
        match self {
            Resolution::MissingCcla(d)
            | Resolution::NotOnApprovalList(d)
            | Resolution::SignaturePrepared(d) => Some(d),
            Resolution::Unexpected(_) => None,
        }
    }
}

pub struct SigningStatusResolver<'a> {
    service: &'a dyn ClaService,
    token: &'a AuthToken,
}

impl<'a> SigningStatusResolver<'a> {
    pub fn new(service: &'a dyn ClaService, token: &'a AuthToken) -> Self {
        Self { service, token }
    }

    /// Look up the employee signature for `request` and pick the next step.
    ///
    /// One backend round trip, no retry. A cancelled call returns
    /// `ClaError::Cancelled` and stores nothing.
    pub async fn resolve(
        &self,
        request: &SigningRequest,
        store: &dyn SignatureStore,
        cancel: &CancellationToken,
    ) -> Result<Resolution, AppError> {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClaError::Cancelled.into()),
            res = self.service.check_and_prepare_employee_signature(self.token, request) => res?,
        };

        log::info!(
            "Signing status for project={} company={} user={}: {}",
            request.project_id,
            request.company_id,
            request.user_id,
            outcome.label()
        );

        let resolution = match outcome {
            SignatureOutcome::MissingCcla => Resolution::MissingCcla(Destination::SendClaManagerEmail {
                project_id: request.project_id.clone(),
                company_id: request.company_id.clone(),
                user_id: request.user_id.clone(),
                authenticated: true,
            }),
            SignatureOutcome::NotOnApprovalList => {
                Resolution::NotOnApprovalList(Destination::EmployeeCompanyTroubleshoot {
                    project_id: request.project_id.clone(),
                    repository_id: String::new(),
                    user_id: request.user_id.clone(),
                    company_id: request.company_id.clone(),
                    git_service: GitService::Gerrit,
                })
            }
            SignatureOutcome::SignaturePrepared(record) => {
                store.store_signature(&record)?;
                Resolution::SignaturePrepared(Destination::EmployeeCompanyConfirm {
                    project_id: request.project_id.clone(),
                    signing_type: GitService::Gerrit,
                    user_id: request.user_id.clone(),
                    company_id: request.company_id.clone(),
                })
            }
            SignatureOutcome::UnrecognizedErrors(errors) => {
                log::warn!("Unrecognized signature errors for project={}: {}", request.project_id, errors);
                Resolution::Unexpected(errors)
            }
        };
        Ok(resolution)
    }
}
