use actix_session::Session;
use askama::Template;

use crate::auth::csrf;
use crate::auth::session::{get_access_token, take_flash};
use crate::config::AppConfig;
use crate::models::{Company, Project, Signature, SignatureRecord};

pub const APP_NAME: &str = "EasyCLA Contributor Console";

/// A header or footer link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub url: String,
}

impl Link {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }
}

/// Common context shared by every page; templates read it as `ctx.*`.
pub struct PageContext {
    pub app_name: String,
    pub signed_in: bool,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub lfx_header_enabled: bool,
    pub lfx_header_url: String,
    pub help_url: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            signed_in: get_access_token(session).is_some(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            lfx_header_enabled: config.lfx_header_enabled && !config.lfx_header_url.is_empty(),
            lfx_header_url: config.lfx_header_url.clone(),
            help_url: crate::config::TICKET_URL.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub ctx: PageContext,
    pub links: Vec<Link>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub identity_url: String,
}

#[derive(Template)]
#[template(path = "gerrit/corporate.html")]
pub struct GerritCorporateTemplate {
    pub ctx: PageContext,
    pub project_id: String,
    pub project: Option<Project>,
    pub error_message: Option<String>,
    pub companies: Vec<Company>,
    pub search_query: String,
    pub select_action: String,
    pub search_ws_path: String,
    pub debounce_ms: u128,
    pub new_company_url: String,
    pub company_admin_url: Option<String>,
}

#[derive(Template)]
#[template(path = "employee/troubleshoot.html")]
pub struct TroubleshootTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub company: Company,
    pub signature: Option<Signature>,
    pub git_service: String,
    pub email_settings_url: String,
    pub request_access_url: String,
}

#[derive(Template)]
#[template(path = "employee/confirm.html")]
pub struct ConfirmTemplate {
    pub ctx: PageContext,
    pub project: Option<Project>,
    pub signing_type: String,
    pub signature: Option<SignatureRecord>,
    pub restart_url: String,
}

/// Informational page used by the simpler destinations.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    pub ctx: PageContext,
    pub title: String,
    pub message: String,
    pub links: Vec<Link>,
}
