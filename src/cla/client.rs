use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::{AuthToken, ClaError, ClaService};
use crate::models::{Company, Project, ProjectSignatures, SignatureOutcome, SigningRequest, User};
use crate::paths::segment;

/// `ClaService` over the backend's JSON HTTP API.
#[derive(Clone)]
pub struct ClaClient {
    base: String,
    http: Client,
}

impl ClaClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ClaError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base, http))
    }

    pub fn with_client(base: &str, http: Client) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn send(&self, req: RequestBuilder, token: &AuthToken) -> Result<Response, ClaError> {
        let resp = req
            .bearer_auth(token.as_str())
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let url = resp.url().path().to_string();
            let body = resp.text().await.unwrap_or_default();
            log::warn!("CLA backend returned {} for {}", status.as_u16(), url);
            return Err(ClaError::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &AuthToken) -> Result<T, ClaError> {
        let resp = self.send(self.http.get(self.url(path)), token).await?;
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl ClaService for ClaClient {
    async fn get_project(&self, token: &AuthToken, project_id: &str) -> Result<Project, ClaError> {
        self.get_json(&format!("/v2/project/{}", segment(project_id)), token).await
    }

    async fn post_or_get_user_for_gerrit(&self, token: &AuthToken) -> Result<User, ClaError> {
        let resp = self.send(self.http.post(self.url("/v1/user/gerrit")), token).await?;
        Ok(resp.json::<User>().await?)
    }

    async fn list_companies(&self, token: &AuthToken) -> Result<Vec<Company>, ClaError> {
        self.get_json("/v2/company", token).await
    }

    async fn get_company(&self, token: &AuthToken, company_id: &str) -> Result<Company, ClaError> {
        self.get_json(&format!("/v2/company/{}", segment(company_id)), token).await
    }

    async fn get_company_project_signatures(
        &self,
        token: &AuthToken,
        company_id: &str,
        project_id: &str,
    ) -> Result<ProjectSignatures, ClaError> {
        let path = format!(
            "/v3/signatures/company/{}/project/{}",
            segment(company_id),
            segment(project_id)
        );
        self.get_json(&path, token).await
    }

    async fn check_and_prepare_employee_signature(
        &self,
        token: &AuthToken,
        request: &SigningRequest,
    ) -> Result<SignatureOutcome, ClaError> {
        let req = self
            .http
            .post(self.url("/v2/check-prepare-employee-signature"))
            .json(request);
        match self.send(req, token).await {
            Ok(resp) => {
                let body: Value = resp.json().await?;
                Ok(SignatureOutcome::from_response(body))
            }
            // Some deployments report the known error shapes with a 400.
            Err(ClaError::Status { status: 400, body }) => {
                match serde_json::from_str::<Value>(&body) {
                    Ok(value) if value.get("errors").is_some() => {
                        Ok(SignatureOutcome::from_response(value))
                    }
                    _ => Err(ClaError::Status { status: 400, body }),
                }
            }
            Err(e) => Err(e),
        }
    }
}
