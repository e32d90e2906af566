//! Statement responses and per-attempt outcomes.

use disclosure_core::{
    AccountLine, DisclosureError, StatementQuery, StatementResult, Status, status,
};
use serde::Deserialize;

/// Body of a `fnlttSinglAcnt.json` response.
#[derive(Debug, Deserialize)]
struct StatementEnvelope {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    list: Option<Vec<AccountLine>>,
}

/// Outcome of one (scope, year) attempt.
#[derive(Debug)]
pub(crate) enum Attempt {
    /// Success with at least one account line.
    Found(StatementResult),
    /// No data for this scope, or success with an empty list.
    Empty,
    /// The upstream rejected the request.
    Rejected { code: String, message: String },
    /// The request failed before a classifiable status came back.
    Failed(DisclosureError),
}

impl Attempt {
    /// Interprets a raw response body for `query`.
    pub(crate) fn from_body(query: &StatementQuery, body: &[u8]) -> Self {
        match serde_json::from_slice::<StatementEnvelope>(body) {
            Ok(envelope) => Self::from_envelope(query, envelope),
            Err(e) => Self::Failed(DisclosureError::MalformedPayload(format!(
                "Failed to parse statement response: {e}"
            ))),
        }
    }

    fn from_envelope(query: &StatementQuery, envelope: StatementEnvelope) -> Self {
        match status::classify(&envelope.status, envelope.message.as_deref()) {
            Status::Success => {
                let lines = envelope.list.unwrap_or_default();
                if lines.is_empty() {
                    return Self::Empty;
                }
                Self::Found(StatementResult {
                    company_code: query.company_code.clone(),
                    status_code: envelope.status,
                    status_message: envelope.message.unwrap_or_default(),
                    consolidation_scope_used: query.consolidation_scope,
                    fiscal_year_used: query.fiscal_year.clone(),
                    lines,
                })
            }
            Status::EmptyResult => Self::Empty,
            Status::FatalError { code, message } => Self::Rejected { code, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disclosure_core::ConsolidationScope;

    fn query() -> StatementQuery {
        StatementQuery::annual("00126380", "2023", ConsolidationScope::Standalone)
    }

    #[test]
    fn test_found_records_scope_and_year() {
        let body = r#"{"status":"000","message":"정상","list":[
            {"account_nm":"매출액","thstrm_amount":"100","frmtrm_amount":"90"}
        ]}"#.as_bytes();
        match Attempt::from_body(&query(), body) {
            Attempt::Found(result) => {
                assert_eq!(result.consolidation_scope_used, ConsolidationScope::Standalone);
                assert_eq!(result.fiscal_year_used, "2023");
                assert_eq!(result.company_code, "00126380");
                assert_eq!(result.status_message, "정상");
                assert_eq!(result.lines.len(), 1);
            }
            other => panic!("unexpected attempt: {other:?}"),
        }
    }

    #[test]
    fn test_success_with_empty_list_is_empty() {
        let body = r#"{"status":"000","message":"정상","list":[]}"#.as_bytes();
        assert!(matches!(Attempt::from_body(&query(), body), Attempt::Empty));

        let body = r#"{"status":"000"}"#.as_bytes();
        assert!(matches!(Attempt::from_body(&query(), body), Attempt::Empty));
    }

    #[test]
    fn test_no_data_status() {
        let body = r#"{"status":"013","message":"조회된 데이타가 없습니다."}"#.as_bytes();
        assert!(matches!(Attempt::from_body(&query(), body), Attempt::Empty));
    }

    #[test]
    fn test_rejection_keeps_message() {
        let body = r#"{"status":"020","message":"요청 제한을 초과하였습니다."}"#.as_bytes();
        match Attempt::from_body(&query(), body) {
            Attempt::Rejected { code, message } => {
                assert_eq!(code, "020");
                assert_eq!(message, "요청 제한을 초과하였습니다.");
            }
            other => panic!("unexpected attempt: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_body_fails() {
        let attempt = Attempt::from_body(&query(), b"<html>maintenance</html>");
        assert!(matches!(
            attempt,
            Attempt::Failed(DisclosureError::MalformedPayload(_))
        ));
    }
}
