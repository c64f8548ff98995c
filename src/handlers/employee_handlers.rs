use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{CCLA, PortalStore, get_access_token};
use crate::cla::ClaService;
use crate::config::{AppConfig, GITHUB_EMAIL_URL, TICKET_URL};
use crate::errors::{AppError, render, see_other};
use crate::models::{Company, Project};
use crate::signing::{Destination, GitService};
use crate::templates_structs::{ConfirmTemplate, Link, NoticeTemplate, PageContext, TroubleshootTemplate};

use super::gerrit_handlers::corporate_path;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TroubleshootQuery {
    #[serde(default)]
    pub repository_id: String,
    #[serde(default)]
    pub git_service: Option<String>,
    #[serde(default)]
    pub authenticated: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmQuery {
    #[serde(default)]
    pub signing_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalQuery {
    #[serde(default)]
    pub repository_id: String,
    #[serde(default)]
    pub authenticated: Option<bool>,
}

/// Where "back" goes: the Gerrit company list when that is where the user came from.
fn back_link(store: &PortalStore, project_id: &str) -> Link {
    if store.gerrit_cla_type().as_deref() == Some(CCLA) {
        Link::new("Back to company list", corporate_path(project_id))
    } else {
        Link::new("Back to start", "/")
    }
}

/// Company name for display; lookup failures fall back to a blank company.
async fn company_or_blank(
    service: &dyn ClaService,
    session: &Session,
    company_id: &str,
) -> Company {
    let Some(token) = get_access_token(session) else {
        return Company::blank(company_id);
    };
    match service.get_company(&token, company_id).await {
        Ok(company) => company,
        Err(e) => {
            log::warn!("Company lookup failed for {}: {}", company_id, e);
            Company::blank(company_id)
        }
    }
}

fn company_label(company: &Company) -> &str {
    if company.company_name.is_empty() {
        "Your company"
    } else {
        &company.company_name
    }
}

/// GET /cla/project/{project_id}/user/{user_id}/employee/company/{company_id}/troubleshoot
pub async fn troubleshoot(
    path: web::Path<(String, String, String)>,
    query: web::Query<TroubleshootQuery>,
    session: Session,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let (project_id, user_id, company_id) = path.into_inner();
    let Some(token) = get_access_token(&session) else {
        return Ok(see_other("/login"));
    };
    let store = PortalStore::new(&session);
    let project = store
        .project(&project_id)
        .unwrap_or_else(|| Project::blank(&project_id));
    let company = company_or_blank(service.get_ref(), &session, &company_id).await;

    // Should be at most one CCLA signature for the company and project.
    let signature = match service
        .get_company_project_signatures(&token, &company_id, &project_id)
        .await
    {
        Ok(signatures) => signatures.into_ccla().map(|mut sig| {
            sig.normalize_approval_lists();
            sig
        }),
        Err(e) => {
            log::warn!(
                "Signature lookup failed for company={} project={}: {}",
                company_id,
                project_id,
                e
            );
            None
        }
    };

    let query = query.into_inner();
    let git_service = query
        .git_service
        .as_deref()
        .and_then(GitService::parse)
        .unwrap_or(GitService::GitHub);
    let request_access_url = Destination::EmployeeRequestAccess {
        project_id: project_id.clone(),
        repository_id: query.repository_id,
        user_id,
        company_id,
        authenticated: query.authenticated.unwrap_or(true),
    }
    .path();

    let ctx = PageContext::build(&session, &config);
    render(TroubleshootTemplate {
        ctx,
        project,
        company,
        signature,
        git_service: git_service.to_string(),
        email_settings_url: GITHUB_EMAIL_URL.to_string(),
        request_access_url,
    })
}

/// GET /cla/project/{project_id}/user/{user_id}/employee/company/{company_id}/confirm
pub async fn confirm(
    path: web::Path<(String, String, String)>,
    query: web::Query<ConfirmQuery>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let (project_id, _user_id, _company_id) = path.into_inner();
    let store = PortalStore::new(&session);
    let signing_type = query
        .signing_type
        .as_deref()
        .and_then(GitService::parse)
        .unwrap_or(GitService::Gerrit);
    let restart_url = match signing_type {
        GitService::Gerrit => corporate_path(&project_id),
        GitService::GitHub => "/".to_string(),
    };

    let ctx = PageContext::build(&session, &config);
    render(ConfirmTemplate {
        ctx,
        project: store.project(&project_id),
        signing_type: signing_type.to_string(),
        signature: store.signature(),
        restart_url,
    })
}

/// GET /cla/project/{project_id}/user/{user_id}/company/{company_id}/manager-email
pub async fn manager_email(
    path: web::Path<(String, String, String)>,
    session: Session,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let (project_id, _user_id, company_id) = path.into_inner();
    let store = PortalStore::new(&session);
    let company = company_or_blank(service.get_ref(), &session, &company_id).await;
    let project_name = store
        .project(&project_id)
        .map(|p| p.project_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "this project".to_string());

    let message = format!(
        "{} does not have a Corporate CLA with {}. Ask your company's CLA manager to sign it; \
         once it is signed and you are on the approval list you can contribute.",
        company_label(&company),
        project_name
    );
    let ctx = PageContext::build(&session, &config);
    render(NoticeTemplate {
        ctx,
        title: "Contact your CLA manager".to_string(),
        message,
        links: vec![back_link(&store, &project_id), Link::new("Open a support ticket", TICKET_URL)],
    })
}

/// GET /cla/project/{project_id}/user/{user_id}/company/{company_id}/request-access
pub async fn request_access(
    path: web::Path<(String, String, String)>,
    query: web::Query<ModalQuery>,
    session: Session,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let (project_id, user_id, company_id) = path.into_inner();
    let store = PortalStore::new(&session);
    let company = company_or_blank(service.get_ref(), &session, &company_id).await;
    let query = query.into_inner();

    let message = format!(
        "Ask a CLA manager at {} to add you to the approval list for this project.",
        company_label(&company)
    );
    let troubleshoot = Destination::EmployeeCompanyTroubleshoot {
        project_id: project_id.clone(),
        repository_id: query.repository_id,
        user_id,
        company_id,
        git_service: GitService::Gerrit,
    };
    let ctx = PageContext::build(&session, &config);
    render(NoticeTemplate {
        ctx,
        title: "Request access".to_string(),
        message,
        links: vec![
            Link::new("Back to troubleshooting", troubleshoot.path()),
            back_link(&store, &project_id),
        ],
    })
}

/// GET /cla/project/{project_id}/company/new
pub async fn new_company(
    path: web::Path<String>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let store = PortalStore::new(&session);
    let ctx = PageContext::build(&session, &config);
    render(NoticeTemplate {
        ctx,
        title: "Company not listed".to_string(),
        message: "Your company has not registered with EasyCLA yet. A CLA manager at your \
                  company can sign up through the corporate console."
            .to_string(),
        links: vec![
            Link::new("Corporate console", config.corporate_login_url.clone()),
            back_link(&store, &project_id),
        ],
    })
}

/// GET /cla/project/{project_id}/user/{user_id}/company-admin
pub async fn company_admin(
    path: web::Path<(String, String)>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let (project_id, _user_id) = path.into_inner();
    let store = PortalStore::new(&session);
    let ctx = PageContext::build(&session, &config);
    render(NoticeTemplate {
        ctx,
        title: "Are you a CLA manager?".to_string(),
        message: "CLA managers sign the Corporate CLA and maintain the approval list \
                  for their company."
            .to_string(),
        links: vec![
            Link::new("Yes, open the corporate console", config.corporate_login_url.clone()),
            Link::new(
                "No, find my CLA manager",
                Destination::NewCompany { project_id: project_id.clone() }.path(),
            ),
            back_link(&store, &project_id),
        ],
    })
}
