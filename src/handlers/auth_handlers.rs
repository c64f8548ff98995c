use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, session};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::paths::is_local_path;
use crate::templates_structs::{LoginTemplate, PageContext};

#[derive(Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Deserialize)]
pub struct AuthCallbackQuery {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// Identity provider URL, carrying the page to come back to as `state`.
fn identity_url(config: &AppConfig, target: Option<&str>) -> String {
    match target.filter(|t| is_local_path(t)) {
        Some(target) => {
            let query = serde_urlencoded::to_string([("state", target)]).unwrap_or_default();
            let sep = if config.identity_url.contains('?') { '&' } else { '?' };
            format!("{}{}{}", config.identity_url, sep, query)
        }
        None => config.identity_url.clone(),
    }
}

/// Where to land after a successful sign-in.
pub fn post_login_target(config: &AppConfig, target: Option<&str>) -> String {
    if config.lfx_header_enabled {
        // The LFX header keeps its own return state; always restart from the root.
        return "/".to_string();
    }
    match target {
        Some(t) if is_local_path(t) => t.to_string(),
        _ => "/".to_string(),
    }
}

pub async fn login_page(
    session: Session,
    query: web::Query<LoginQuery>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config);
    render(LoginTemplate {
        ctx,
        identity_url: identity_url(&config, query.target.as_deref()),
    })
}

/// GET /auth: the identity provider hands back a token here.
pub async fn auth_callback(
    session: Session,
    query: web::Query<AuthCallbackQuery>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    if query.token.trim().is_empty() {
        log::warn!("Auth callback without a token");
        return Ok(see_other("/login"));
    }
    session.renew();
    session::set_access_token(&session, query.token.trim())?;

    let target = post_login_target(&config, query.target.as_deref());
    log::info!("Signed in, redirecting to {}", target);
    Ok(see_other(&target))
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/"))
}
