use std::fmt;

use crate::paths::segment;

/// Origin of a contribution; Gerrit has no repository concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitService {
    Gerrit,
    GitHub,
}

impl GitService {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitService::Gerrit => "Gerrit",
            GitService::GitHub => "GitHub",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Gerrit" => Some(GitService::Gerrit),
            "GitHub" | "Github" => Some(GitService::GitHub),
            _ => None,
        }
    }
}

impl fmt::Display for GitService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named page the flow can send the contributor to, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    SendClaManagerEmail {
        project_id: String,
        company_id: String,
        user_id: String,
        authenticated: bool,
    },
    EmployeeCompanyTroubleshoot {
        project_id: String,
        repository_id: String,
        user_id: String,
        company_id: String,
        git_service: GitService,
    },
    EmployeeCompanyConfirm {
        project_id: String,
        signing_type: GitService,
        user_id: String,
        company_id: String,
    },
    NewCompany {
        project_id: String,
    },
    CompanyAdminYesNo {
        project_id: String,
        user_id: String,
        authenticated: bool,
    },
    EmployeeRequestAccess {
        project_id: String,
        repository_id: String,
        user_id: String,
        company_id: String,
        authenticated: bool,
    },
}

impl Destination {
    pub fn name(&self) -> &'static str {
        match self {
            Destination::SendClaManagerEmail { .. } => "ClaSendClaManagerEmailModal",
            Destination::EmployeeCompanyTroubleshoot { .. } => "ClaEmployeeCompanyTroubleshootPage",
            Destination::EmployeeCompanyConfirm { .. } => "ClaEmployeeCompanyConfirmPage",
            Destination::NewCompany { .. } => "ClaNewCompanyModal",
            Destination::CompanyAdminYesNo { .. } => "ClaCompanyAdminYesnoModal",
            Destination::EmployeeRequestAccess { .. } => "ClaEmployeeRequestAccessModal",
        }
    }

    /// Modals are presented over the current page rather than pushed.
    pub fn is_modal(&self) -> bool {
        !matches!(
            self,
            Destination::EmployeeCompanyTroubleshoot { .. } | Destination::EmployeeCompanyConfirm { .. }
        )
    }

    /// Flat parameter map carried by the navigation.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Destination::SendClaManagerEmail { project_id, company_id, user_id, authenticated } => vec![
                ("projectId", project_id.clone()),
                ("userId", user_id.clone()),
                ("companyId", company_id.clone()),
                ("authenticated", authenticated.to_string()),
            ],
            Destination::EmployeeCompanyTroubleshoot {
                project_id,
                repository_id,
                user_id,
                company_id,
                git_service,
            } => vec![
                ("projectId", project_id.clone()),
                ("repositoryId", repository_id.clone()),
                ("userId", user_id.clone()),
                ("companyId", company_id.clone()),
                ("gitService", git_service.to_string()),
            ],
            Destination::EmployeeCompanyConfirm { project_id, signing_type, user_id, company_id } => vec![
                ("projectId", project_id.clone()),
                ("signingType", signing_type.to_string()),
                ("userId", user_id.clone()),
                ("companyId", company_id.clone()),
            ],
            Destination::NewCompany { project_id } => vec![("projectId", project_id.clone())],
            Destination::CompanyAdminYesNo { project_id, user_id, authenticated } => vec![
                ("projectId", project_id.clone()),
                ("userId", user_id.clone()),
                ("authenticated", authenticated.to_string()),
            ],
            Destination::EmployeeRequestAccess {
                project_id,
                repository_id,
                user_id,
                company_id,
                authenticated,
            } => vec![
                ("projectId", project_id.clone()),
                ("repositoryId", repository_id.clone()),
                ("userId", user_id.clone()),
                ("companyId", company_id.clone()),
                ("authenticated", authenticated.to_string()),
            ],
        }
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params().into_iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Portal URL serving this destination; ids go in the path, the rest in the query.
    pub fn path(&self) -> String {
        match self {
            Destination::SendClaManagerEmail { project_id, company_id, user_id, authenticated } => {
                with_query(
                    format!(
                        "/cla/project/{}/user/{}/company/{}/manager-email",
                        segment(project_id),
                        segment(user_id),
                        segment(company_id)
                    ),
                    &[("authenticated", bool_str(*authenticated))],
                )
            }
            Destination::EmployeeCompanyTroubleshoot {
                project_id,
                repository_id,
                user_id,
                company_id,
                git_service,
            } => with_query(
                format!(
                    "/cla/project/{}/user/{}/employee/company/{}/troubleshoot",
                    segment(project_id),
                    segment(user_id),
                    segment(company_id)
                ),
                &[("repositoryId", repository_id.as_str()), ("gitService", git_service.as_str())],
            ),
            Destination::EmployeeCompanyConfirm { project_id, signing_type, user_id, company_id } => {
                with_query(
                    format!(
                        "/cla/project/{}/user/{}/employee/company/{}/confirm",
                        segment(project_id),
                        segment(user_id),
                        segment(company_id)
                    ),
                    &[("signingType", signing_type.as_str())],
                )
            }
            Destination::NewCompany { project_id } => {
                format!("/cla/project/{}/company/new", segment(project_id))
            }
            Destination::CompanyAdminYesNo { project_id, user_id, authenticated } => with_query(
                format!(
                    "/cla/project/{}/user/{}/company-admin",
                    segment(project_id),
                    segment(user_id)
                ),
                &[("authenticated", bool_str(*authenticated))],
            ),
            Destination::EmployeeRequestAccess {
                project_id,
                repository_id,
                user_id,
                company_id,
                authenticated,
            } => with_query(
                format!(
                    "/cla/project/{}/user/{}/company/{}/request-access",
                    segment(project_id),
                    segment(user_id),
                    segment(company_id)
                ),
                &[
                    ("repositoryId", repository_id.as_str()),
                    ("authenticated", bool_str(*authenticated)),
                ],
            ),
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn with_query(path: String, pairs: &[(&str, &str)]) -> String {
    match serde_urlencoded::to_string(pairs) {
        Ok(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path,
    }
}
