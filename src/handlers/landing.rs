use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::config::{AppConfig, LEARN_MORE_URL};
use crate::errors::{AppError, render};
use crate::templates_structs::{LandingTemplate, Link, PageContext};

pub fn header_links(config: &AppConfig) -> Vec<Link> {
    vec![
        Link::new("Project Login", config.project_login_url.clone()),
        Link::new("CLA Manager Login", config.corporate_login_url.clone()),
        Link::new("Developer", LEARN_MORE_URL),
    ]
}

pub async fn index(
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config);
    render(LandingTemplate {
        ctx,
        links: header_links(&config),
    })
}
