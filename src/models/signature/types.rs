use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::signing::approval_list;

pub const CCLA_SIGNATURE_TYPE: &str = "ccla";

/// Input to the signing resolver, built fresh for every company selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningRequest {
    pub project_id: String,
    pub company_id: String,
    pub user_id: String,
}

impl SigningRequest {
    pub fn new(
        project_id: impl Into<String>,
        company_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            company_id: company_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// A signature as returned by the company/project signature lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(rename = "signatureID", alias = "signature_id")]
    pub signature_id: String,
    #[serde(default, alias = "signature_type")]
    pub signature_type: String,
    #[serde(default)]
    pub signature_signed: bool,
    #[serde(default)]
    pub signature_approved: bool,
    #[serde(default)]
    pub signature_created: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default, alias = "githubOrgApprovalList")]
    pub github_org_whitelist: Option<Vec<String>>,
    #[serde(default, alias = "emailApprovalList")]
    pub email_whitelist: Option<Vec<String>>,
    #[serde(default, alias = "domainApprovalList")]
    pub domain_whitelist: Option<Vec<String>>,
}

impl Signature {
    pub fn is_ccla(&self) -> bool {
        self.signature_type == CCLA_SIGNATURE_TYPE
    }

    /// Sort and deduplicate every approval list carried by this signature.
    pub fn normalize_approval_lists(&mut self) {
        for list in [
            &mut self.github_org_whitelist,
            &mut self.email_whitelist,
            &mut self.domain_whitelist,
        ] {
            if let Some(entries) = list.take() {
                *list = Some(approval_list::normalize(&entries));
            }
        }
    }

    pub fn github_orgs(&self) -> &[String] {
        self.github_org_whitelist.as_deref().unwrap_or_default()
    }

    pub fn emails(&self) -> &[String] {
        self.email_whitelist.as_deref().unwrap_or_default()
    }

    pub fn domains(&self) -> &[String] {
        self.domain_whitelist.as_deref().unwrap_or_default()
    }

    /// Creation date as "Jan 2, 2006"; unparsable values are shown as-is.
    pub fn created_display(&self) -> String {
        match self.signature_created.as_deref() {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(t) => t.format("%b %-d, %Y").to_string(),
                Err(_) => raw.to_string(),
            },
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSignatures {
    #[serde(default)]
    pub result_count: i64,
    #[serde(default)]
    pub signatures: Option<Vec<Signature>>,
}

impl ProjectSignatures {
    /// The company's CCLA signature for the project; there should be at most one.
    pub fn into_ccla(self) -> Option<Signature> {
        self.signatures?.into_iter().find(Signature::is_ccla)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_v3_signature() {
        let json = r#"{
            "signatureID": "sig-1",
            "signatureType": "ccla",
            "signatureSigned": true,
            "signatureApproved": true,
            "signatureCreated": "2020-06-03T15:12:04Z",
            "githubOrgWhitelist": ["zeta", " alpha"]
        }"#;
        let sig: Signature = serde_json::from_str(json).expect("decode");
        assert_eq!(sig.signature_id, "sig-1");
        assert!(sig.is_ccla());
        assert_eq!(sig.github_orgs().len(), 2);
        assert!(sig.emails().is_empty());
        assert_eq!(sig.created_display(), "Jun 3, 2020");
    }

    #[test]
    fn test_into_ccla_skips_icla() {
        let sigs = ProjectSignatures {
            result_count: 2,
            signatures: Some(vec![
                Signature { signature_id: "a".into(), signature_type: "cla".into(), ..Default::default() },
                Signature { signature_id: "b".into(), signature_type: "ccla".into(), ..Default::default() },
            ]),
        };
        assert_eq!(sigs.into_ccla().map(|s| s.signature_id), Some("b".to_string()));
    }

    #[test]
    fn test_into_ccla_without_signatures() {
        assert!(ProjectSignatures::default().into_ccla().is_none());
    }

    #[test]
    fn test_normalize_approval_lists() {
        let mut sig = Signature {
            github_org_whitelist: Some(vec!["b".into(), " a ".into(), "b".into()]),
            ..Default::default()
        };
        sig.normalize_approval_lists();
        assert_eq!(sig.github_orgs(), ["a".to_string(), "b".to_string()]);
        assert!(sig.domain_whitelist.is_none());
    }

    #[test]
    fn test_created_display_passthrough() {
        let sig = Signature { signature_created: Some("yesterday".into()), ..Default::default() };
        assert_eq!(sig.created_display(), "yesterday");
    }
}
