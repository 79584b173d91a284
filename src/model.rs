//! # Request and Artifact Model
//!
//! The input to a generation call and the terminal artifact it produces.
//! A request is created fresh per call, is immutable, and carries no state
//! beyond the recipient name and the issue date.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

/// Fixed name the output artifact is addressed by. Callers wanting to
/// retain multiple certificates rename the file themselves.
pub const ARTIFACT_NAME: &str = "certificate.pdf";

/// One certificate to generate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    /// Exact text drawn in the name block. Arbitrary Unicode; empty is
    /// allowed and renders a blank block.
    pub recipient_name: String,

    /// Defaults to today's local date when not supplied.
    #[serde(default = "today")]
    pub issue_date: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl CertificateRequest {
    /// A request issued today.
    pub fn new(recipient_name: impl Into<String>) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            issue_date: today(),
        }
    }

    /// A request with a pinned date, for reproducible output.
    pub fn with_date(recipient_name: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            issue_date,
        }
    }

    /// The issue date as it appears on the page: "March 15, 2024".
    pub fn formatted_date(&self) -> String {
        self.issue_date.format("%B %d, %Y").to_string()
    }
}

/// The single output artifact of a generation call.
#[derive(Debug, Clone)]
pub struct RenderedCertificate {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_date() {
        let req = CertificateRequest::with_date(
            "Jane Doe",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );
        assert_eq!(req.formatted_date(), "March 15, 2024");
    }

    #[test]
    fn test_formatted_date_pads_single_digit_days() {
        let req = CertificateRequest::with_date(
            "Jane Doe",
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        );
        assert_eq!(req.formatted_date(), "January 05, 2026");
    }

    #[test]
    fn test_json_date_defaults_to_today() {
        let req: CertificateRequest =
            serde_json::from_str(r#"{ "recipientName": "Jane Doe" }"#).unwrap();
        assert_eq!(req.recipient_name, "Jane Doe");
        assert_eq!(req.issue_date, Local::now().date_naive());
    }

    #[test]
    fn test_json_pinned_date() {
        let req: CertificateRequest = serde_json::from_str(
            r#"{ "recipientName": "Jane Doe", "issueDate": "2024-03-15" }"#,
        )
        .unwrap();
        assert_eq!(req.issue_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_empty_name_is_a_valid_request() {
        let req = CertificateRequest::new("");
        assert_eq!(req.recipient_name, "");
    }
}
