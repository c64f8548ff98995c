use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::session::ACCESS_TOKEN;

/// Middleware for restricted pages: requires an access token in the session.
/// Redirects to /login, remembering where the user was headed.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_token = session
        .get::<String>(ACCESS_TOKEN)
        .unwrap_or(None)
        .is_some_and(|t| !t.is_empty());

    if !has_token {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        let query = serde_urlencoded::to_string([("target", target.as_str())]).unwrap_or_default();
        log::info!("Unauthenticated request to {}, redirecting to login", req.path());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", format!("/login?{query}")))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
