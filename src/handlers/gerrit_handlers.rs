use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::auth::csrf;
use crate::auth::session::{ACCESS_TOKEN, PortalStore, get_access_token, set_flash};
use crate::cla::ClaService;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::{Company, Project, SigningRequest, User};
use crate::paths::segment;
use crate::signing::{
    DebouncedSearchFilter, Destination, SigningStatusResolver, filter_companies,
};
use crate::templates_structs::{GerritCorporateTemplate, PageContext};

pub const INVALID_PROJECT_MESSAGE: &str = "Invalid project id.";
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while checking your company's CLA. Please try again or contact support.";
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "We could not reach the CLA service. Please try again in a moment.";
pub const SIGNATURE_NOT_KEPT_MESSAGE: &str =
    "Your signature was prepared but could not be kept in your session. Please contact support.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session expired. Please select your company again.";

/// Longest search text accepted from the live search socket.
const MAX_QUERY_CHARS: usize = 100;

pub fn corporate_path(project_id: &str) -> String {
    format!("/cla/gerrit/project/{}/corporate", segment(project_id))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct SelectCompanyForm {
    pub company_id: String,
    pub csrf_token: String,
}

/// What varies between renderings of the corporate page.
#[derive(Default)]
struct CorporateView<'a> {
    project: Option<Project>,
    user: Option<&'a User>,
    companies: Vec<Company>,
    search_query: String,
    error_message: Option<String>,
}

fn corporate_template(
    ctx: PageContext,
    config: &AppConfig,
    project_id: &str,
    view: CorporateView<'_>,
) -> GerritCorporateTemplate {
    let page = corporate_path(project_id);
    GerritCorporateTemplate {
        ctx,
        project_id: project_id.to_string(),
        project: view.project,
        error_message: view.error_message,
        companies: view.companies,
        search_query: view.search_query,
        select_action: format!("{page}/select"),
        search_ws_path: format!("{page}/search"),
        debounce_ms: config.search_debounce.as_millis(),
        new_company_url: Destination::NewCompany { project_id: project_id.to_string() }.path(),
        company_admin_url: view.user.map(|u| {
            Destination::CompanyAdminYesNo {
                project_id: project_id.to_string(),
                user_id: u.user_id.clone(),
                authenticated: true,
            }
            .path()
        }),
    }
}

/// GET /cla/gerrit/project/{project_id}/corporate
pub async fn corporate_page(
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
    session: Session,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let store = PortalStore::new(&session);
    store.set_project_id(&project_id)?;
    store.set_gerrit_cla_type()?;

    let Some(token) = get_access_token(&session) else {
        return Ok(see_other("/login"));
    };

    let project = match service.get_project(&token, &project_id).await {
        Ok(project) => project,
        Err(e) => {
            log::warn!("Project lookup failed for {}: {}", project_id, e);
            let ctx = PageContext::build(&session, &config);
            return render(corporate_template(
                ctx,
                &config,
                &project_id,
                CorporateView {
                    search_query: query.into_inner().q,
                    error_message: Some(INVALID_PROJECT_MESSAGE.to_string()),
                    ..Default::default()
                },
            ));
        }
    };
    store.set_project(&project)?;

    let user = match service.post_or_get_user_for_gerrit(&token).await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("Gerrit user lookup failed, sending to login: {}", e);
            session.remove(ACCESS_TOKEN);
            return Ok(see_other("/login"));
        }
    };
    store.set_user(&user)?;

    let search_query = query.into_inner().q;
    let (companies, error_message) = match service.list_companies(&token).await {
        Ok(companies) => (filter_companies(&companies, search_query.trim()), None),
        Err(e) => {
            log::error!("Company list failed for project {}: {}", project_id, e);
            (Vec::new(), Some(SERVICE_UNAVAILABLE_MESSAGE.to_string()))
        }
    };

    let ctx = PageContext::build(&session, &config);
    render(corporate_template(
        ctx,
        &config,
        &project_id,
        CorporateView {
            project: Some(project),
            user: Some(&user),
            companies,
            search_query,
            error_message,
        },
    ))
}

/// POST /cla/gerrit/project/{project_id}/corporate/select
pub async fn select_company(
    path: web::Path<String>,
    session: Session,
    form: web::Form<SelectCompanyForm>,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let project_id = path.into_inner();
    let page = corporate_path(&project_id);

    let Some(token) = get_access_token(&session) else {
        return Ok(see_other("/login"));
    };
    let store = PortalStore::new(&session);
    let Some(user) = store.user() else {
        set_flash(&session, SESSION_EXPIRED_MESSAGE);
        return Ok(see_other(&page));
    };

    let request = SigningRequest::new(&project_id, &form.company_id, &user.user_id);
    store.clear_signature();

    // Give up on the lookup once the HTTP timeout has passed.
    let cancel = CancellationToken::new();
    let deadline = {
        let cancel = cancel.clone();
        let timeout = config.http_timeout;
        actix_web::rt::spawn(async move {
            tokio::time::sleep(timeout).await;
            cancel.cancel();
        })
    };

    let resolver = SigningStatusResolver::new(service.get_ref(), &token);
    let result = resolver.resolve(&request, &store, &cancel).await;
    deadline.abort();

    match result {
        Ok(resolution) => match resolution.destination() {
            Some(dest) => {
                log::info!("Sending user {} to {}", request.user_id, dest.name());
                Ok(see_other(&dest.path()))
            }
            None => {
                set_flash(&session, UNEXPECTED_ERROR_MESSAGE);
                Ok(see_other(&page))
            }
        },
        Err(AppError::Service(e)) => {
            log::error!("Signature check failed for project={} company={}: {}", project_id, form.company_id, e);
            set_flash(&session, SERVICE_UNAVAILABLE_MESSAGE);
            Ok(see_other(&page))
        }
        Err(AppError::Session(e)) => {
            log::error!("Could not keep signature for user {}: {}", request.user_id, e);
            set_flash(&session, SIGNATURE_NOT_KEPT_MESSAGE);
            Ok(see_other(&page))
        }
        Err(e) => Err(e),
    }
}

/// WebSocket upgrade for live company search.
///
/// Each text frame is a new query; results are pushed once typing pauses.
pub async fn search_ws(
    req: HttpRequest,
    body: web::Payload,
    session: Session,
    service: web::Data<dyn ClaService>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, actix_web::Error> {
    let Some(token) = get_access_token(&session) else {
        return Ok(HttpResponse::Unauthorized().finish());
    };
    let companies = service.list_companies(&token).await.map_err(AppError::from)?;

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;
    let quiet = config.search_debounce;

    actix_web::rt::spawn(async move {
        let (mut filter, mut results) = DebouncedSearchFilter::new(companies, quiet);
        loop {
            tokio::select! {
                Some(result) = results.recv() => {
                    let msg = serde_json::json!({
                        "type": "companies",
                        "query": result.query,
                        "companies": result.companies,
                    });
                    if ws_session.text(msg.to_string()).await.is_err() {
                        break;
                    }
                }
                msg = msg_stream.recv() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        let query: String = text.trim().chars().take(MAX_QUERY_CHARS).collect();
                        filter.on_query_change(query);
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if ws_session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                },
            }
        }
        // Dropping the filter aborts any pending search.
        drop(filter);
        let _ = ws_session.close(None).await;
    });

    Ok(response)
}
