use crate::core::extract::extract_fields;
use crate::domain::model::{FieldMap, RejectDetails, FLAT_NO_FIELD};

pub const REASON_NO_TABLE: &str = "No table found";
pub const REASON_EMPTY_TABLE: &str = "Empty table - no data found";
pub const REASON_FETCH_OR_PARSE: &str = "Fetch or parse error";

/// Terminal classification of one leaf's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(FieldMap),
    Rejected {
        reason: String,
        details: RejectDetails,
    },
}

/// Classifies a raw detail payload against the unit it was fetched for.
///
/// Rules apply in order: missing table, empty table, unit identity
/// mismatch, accept. The empty-table check must run before the identity
/// check, which only applies when data exists.
pub fn classify_payload(payload: &str, unit_label: &str) -> Outcome {
    let fields = match extract_fields(payload) {
        Ok(fields) => fields,
        Err(_) => {
            return Outcome::Rejected {
                reason: REASON_NO_TABLE.to_string(),
                details: RejectDetails::Text(payload.to_string()),
            }
        }
    };

    if fields.is_empty() {
        return Outcome::Rejected {
            reason: REASON_EMPTY_TABLE.to_string(),
            details: RejectDetails::Fields(fields),
        };
    }

    if let Some(flat_no) = fields.get(FLAT_NO_FIELD) {
        if flat_no != unit_label {
            let reason = format!(
                "Unit name mismatch - expected: {}, got: {}",
                unit_label, flat_no
            );
            return Outcome::Rejected {
                reason,
                details: RejectDetails::Fields(fields),
            };
        }
    }

    Outcome::Accepted(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str, &str, &str)]) -> String {
        let mut html = String::from(r#"<table class="table-bordered">"#);
        for (l1, v1, l2, v2) in rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                l1, v1, l2, v2
            ));
        }
        html.push_str("</table>");
        html
    }

    #[test]
    fn test_no_table_is_rejected_with_raw_payload() {
        let payload = "<div>Session expired</div>";
        let outcome = classify_payload(payload, "A-101");
        match outcome {
            Outcome::Rejected { reason, details } => {
                assert_eq!(reason, "No table found");
                assert_eq!(details_text(&details), payload);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_is_rejected_before_identity_check() {
        let payload = r#"<table class="table-bordered"><tr><th>x</th></tr></table>"#;
        let outcome = classify_payload(payload, "A-101");
        match outcome {
            Outcome::Rejected { reason, details } => {
                assert_eq!(reason, "Empty table - no data found");
                match details {
                    RejectDetails::Fields(fields) => assert!(fields.is_empty()),
                    other => panic!("expected field map, got {:?}", other),
                }
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_no_mismatch_reports_expected_and_actual() {
        let payload = table(&[("Name", "A. Sharma", "Flat No.", "B-204")]);
        let outcome = classify_payload(&payload, "B-203");
        match outcome {
            Outcome::Rejected { reason, .. } => {
                assert_eq!(reason, "Unit name mismatch - expected: B-203, got: B-204");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_flat_no_is_accepted() {
        let payload = table(&[
            ("Name", "A. Sharma", "Mobile", "9999999999"),
            ("Flat No.", "C-101", "Status", "Allotted"),
        ]);
        let outcome = classify_payload(&payload, "C-101");
        match outcome {
            Outcome::Accepted(fields) => {
                assert_eq!(fields.get("Name").unwrap(), "A. Sharma");
                assert_eq!(fields.get("Mobile").unwrap(), "9999999999");
                assert_eq!(fields.get("Flat No.").unwrap(), "C-101");
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_flat_no_is_accepted() {
        let payload = table(&[("Name", "A. Sharma", "Mobile", "9999999999")]);
        let outcome = classify_payload(&payload, "D-404");
        assert!(matches!(outcome, Outcome::Accepted(_)));
    }

    fn details_text(details: &RejectDetails) -> &str {
        match details {
            RejectDetails::Text(text) => text,
            other => panic!("expected raw text, got {:?}", other),
        }
    }
}
