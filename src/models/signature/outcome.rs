use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MISSING_CCLA_KEY: &str = "missing_ccla";
pub const CCLA_APPROVAL_LIST_KEY: &str = "ccla_approval_list";

/// Largest serialized signature summary kept in the session cookie.
pub const MAX_STORED_SIGNATURE_BYTES: usize = 1024;

/// The prepared employee signature, kept opaque and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureRecord(pub Value);

impl SignatureRecord {
    /// Top-level string field, if the record carries one.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Top-level scalar fields only. Approval lists and other nested
    /// values are dropped; a non-object record is kept as is.
    pub fn summary(&self) -> SignatureRecord {
        match self.0.as_object() {
            Some(map) => SignatureRecord(Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_array() && !v.is_object())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            None => self.clone(),
        }
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        serde_json::to_string(&self.0).map_or(usize::MAX, |s| s.len())
    }

    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

/// Result of the check-and-prepare employee signature call.
///
/// Exactly one case applies. When the `errors` object carries both known
/// keys, `missing_ccla` wins.
#[derive(Debug, Clone, PartialEq)]
pub enum SignatureOutcome {
    /// The company has no CCLA with the project.
    MissingCcla,
    /// The user is not on the company's approval list for the project.
    NotOnApprovalList,
    SignaturePrepared(SignatureRecord),
    /// An `errors` value matching neither known key.
    UnrecognizedErrors(Value),
}

impl SignatureOutcome {
    pub fn from_response(response: Value) -> Self {
        let errors = match response.get("errors") {
            Some(errors) => errors,
            None => return SignatureOutcome::SignaturePrepared(SignatureRecord(response)),
        };
        match errors.as_object() {
            Some(map) if map.contains_key(MISSING_CCLA_KEY) => SignatureOutcome::MissingCcla,
            Some(map) if map.contains_key(CCLA_APPROVAL_LIST_KEY) => {
                SignatureOutcome::NotOnApprovalList
            }
            _ => SignatureOutcome::UnrecognizedErrors(errors.clone()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignatureOutcome::MissingCcla => "missing_ccla",
            SignatureOutcome::NotOnApprovalList => "not_on_approval_list",
            SignatureOutcome::SignaturePrepared(_) => "signature_prepared",
            SignatureOutcome::UnrecognizedErrors(_) => "unrecognized_errors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_ccla_wins_over_approval_list() {
        let outcome = SignatureOutcome::from_response(json!({
            "errors": {
                "ccla_approval_list": "No user email authorized for this ccla",
                "missing_ccla": "Company does not have CCLA with this project"
            }
        }));
        assert_eq!(outcome, SignatureOutcome::MissingCcla);
    }

    #[test]
    fn test_approval_list_only() {
        let outcome = SignatureOutcome::from_response(json!({
            "errors": {"ccla_approval_list": "No user email authorized for this ccla"}
        }));
        assert_eq!(outcome, SignatureOutcome::NotOnApprovalList);
    }

    #[test]
    fn test_null_valued_key_still_counts() {
        let outcome = SignatureOutcome::from_response(json!({"errors": {"missing_ccla": null}}));
        assert_eq!(outcome, SignatureOutcome::MissingCcla);
    }

    #[test]
    fn test_no_errors_is_prepared_signature() {
        let body = json!({"signature_id": "abc", "signature_signed": true});
        let outcome = SignatureOutcome::from_response(body.clone());
        assert_eq!(outcome, SignatureOutcome::SignaturePrepared(SignatureRecord(body)));
    }

    #[test]
    fn test_unknown_error_keys() {
        let outcome = SignatureOutcome::from_response(json!({"errors": {"project_id": "bad"}}));
        assert_eq!(outcome, SignatureOutcome::UnrecognizedErrors(json!({"project_id": "bad"})));
    }

    #[test]
    fn test_errors_not_an_object() {
        let outcome = SignatureOutcome::from_response(json!({"errors": "boom"}));
        assert_eq!(outcome.label(), "unrecognized_errors");
    }

    #[test]
    fn test_summary_drops_nested_values() {
        let orgs: Vec<String> = (0..200).map(|i| format!("org-{i}")).collect();
        let record = SignatureRecord(json!({
            "signature_id": "sig-big",
            "signature_signed": true,
            "githubOrgWhitelist": orgs,
            "company": {"company_id": "c-acme"}
        }));
        let summary = record.summary();
        assert_eq!(summary, SignatureRecord(json!({"signature_id": "sig-big", "signature_signed": true})));
        assert!(summary.encoded_len() < MAX_STORED_SIGNATURE_BYTES);
        assert!(record.encoded_len() > MAX_STORED_SIGNATURE_BYTES);
    }

    #[test]
    fn test_record_field_lookup() {
        let record = SignatureRecord(json!({"signature_id": "abc", "count": 3}));
        assert_eq!(record.field("signature_id"), Some("abc"));
        assert_eq!(record.field("count"), None);
        assert_eq!(record.field("missing"), None);
    }
}
