pub mod auth_handlers;
pub mod employee_handlers;
pub mod gerrit_handlers;
pub mod landing;

use actix_web::web;

use crate::auth::middleware::require_auth;

/// Register every portal route. Expects `web::Data<dyn ClaService>` and
/// `web::Data<AppConfig>` in app data and a session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing::index))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/auth", web::get().to(auth_handlers::auth_callback))
        .route("/logout", web::post().to(auth_handlers::logout))
        .service(
            web::scope("/cla")
                .wrap(actix_web::middleware::from_fn(require_auth))
                // Gerrit corporate flow
                .route("/gerrit/project/{project_id}/corporate", web::get().to(gerrit_handlers::corporate_page))
                .route("/gerrit/project/{project_id}/corporate/select", web::post().to(gerrit_handlers::select_company))
                .route("/gerrit/project/{project_id}/corporate/search", web::get().to(gerrit_handlers::search_ws))
                // Employee destinations
                .route(
                    "/project/{project_id}/user/{user_id}/employee/company/{company_id}/troubleshoot",
                    web::get().to(employee_handlers::troubleshoot),
                )
                .route(
                    "/project/{project_id}/user/{user_id}/employee/company/{company_id}/confirm",
                    web::get().to(employee_handlers::confirm),
                )
                .route(
                    "/project/{project_id}/user/{user_id}/company/{company_id}/manager-email",
                    web::get().to(employee_handlers::manager_email),
                )
                .route(
                    "/project/{project_id}/user/{user_id}/company/{company_id}/request-access",
                    web::get().to(employee_handlers::request_access),
                )
                .route("/project/{project_id}/company/new", web::get().to(employee_handlers::new_company))
                .route(
                    "/project/{project_id}/user/{user_id}/company-admin",
                    web::get().to(employee_handlers::company_admin),
                ),
        );
}
