//! Comprehensive tests for domain_claims

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, ClaimMonth, LecturerId, Money};

use domain_claims::claim::{ClaimRecord, ClaimStatus, Transition, NO_REASON_PROVIDED};
use domain_claims::document::{DocumentPolicy, SupportingDocument};
use domain_claims::error::ClaimError;

fn month(s: &str) -> ClaimMonth {
    s.parse().unwrap()
}

fn submitted_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
}

fn create_test_claim() -> ClaimRecord {
    ClaimRecord::submit(
        LecturerId::new(1),
        month("2025-01"),
        dec!(40),
        Money::zar(dec!(200)),
        submitted_at(),
    )
    .unwrap()
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submit_creates_pending_claim() {
        let claim = create_test_claim();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.submission_date, submitted_at());
        assert!(claim.approval_date.is_none());
        assert!(claim.approved_by.is_none());
        assert!(claim.rejection_reason.is_none());
        assert!(claim.documents.is_empty());
    }

    #[test]
    fn test_submit_rejects_excessive_hours() {
        let result = ClaimRecord::submit(
            LecturerId::new(1),
            month("2025-01"),
            dec!(177),
            Money::zar(dec!(200)),
            submitted_at(),
        );

        match result {
            Err(ClaimError::Validation(message)) => {
                assert_eq!(message, "Maximum 176 hours per month allowed");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_rejects_non_positive_hours() {
        let result = ClaimRecord::submit(
            LecturerId::new(1),
            month("2025-01"),
            dec!(0),
            Money::zar(dec!(200)),
            submitted_at(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_rejects_rate_out_of_band() {
        for rate in [dec!(99.99), dec!(1000.01)] {
            let result = ClaimRecord::submit(
                LecturerId::new(1),
                month("2025-01"),
                dec!(40),
                Money::zar(rate),
                submitted_at(),
            );
            match result {
                Err(ClaimError::Validation(message)) => {
                    assert_eq!(message, "Hourly rate must be between R100 and R1000");
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_submit_accepts_rate_boundaries() {
        for rate in [dec!(100), dec!(1000)] {
            assert!(ClaimRecord::submit(
                LecturerId::new(1),
                month("2025-01"),
                dec!(40),
                Money::zar(rate),
                submitted_at(),
            )
            .is_ok());
        }
    }

    #[test]
    fn test_total_amount_is_product_of_hours_and_rate() {
        let claim = create_test_claim();
        assert_eq!(claim.total_amount(), Money::zar(dec!(8000)));
    }
}

// ============================================================================
// Transition Tests
// ============================================================================

mod transition_tests {
    use super::*;

    #[test]
    fn test_approve_stamps_audit_fields() {
        let mut claim = create_test_claim();
        let decided_at = Utc.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap();

        let previous = claim
            .apply_transition(
                &Transition::Approve {
                    actor: "coordinator@cmcs".to_string(),
                },
                decided_at,
            )
            .unwrap();

        assert_eq!(previous, ClaimStatus::Pending);
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.approval_date, Some(decided_at));
        assert_eq!(claim.approved_by.as_deref(), Some("coordinator@cmcs"));
        assert!(claim.rejection_reason.is_none());
    }

    #[test]
    fn test_reject_records_reason() {
        let mut claim = create_test_claim();

        claim
            .apply_transition(
                &Transition::Reject {
                    actor: "manager@cmcs".to_string(),
                    reason: Some("Hours not verified".to_string()),
                },
                submitted_at(),
            )
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.rejection_reason.as_deref(), Some("Hours not verified"));
    }

    #[test]
    fn test_reject_without_reason_uses_default() {
        let mut claim = create_test_claim();

        claim
            .apply_transition(
                &Transition::Reject {
                    actor: "manager@cmcs".to_string(),
                    reason: None,
                },
                submitted_at(),
            )
            .unwrap();

        assert_eq!(claim.rejection_reason.as_deref(), Some(NO_REASON_PROVIDED));
    }

    #[test]
    fn test_mark_paid_requires_approved() {
        let mut claim = create_test_claim();
        let paid = Transition::MarkPaid {
            actor: "hr@cmcs".to_string(),
        };

        // Pending -> Paid is not legal
        let result = claim.apply_transition(&paid, submitted_at());
        assert!(matches!(
            result,
            Err(ClaimError::InvalidTransition {
                from: ClaimStatus::Pending,
                to: ClaimStatus::Paid,
            })
        ));

        claim
            .apply_transition(
                &Transition::Approve {
                    actor: "coordinator@cmcs".to_string(),
                },
                submitted_at(),
            )
            .unwrap();

        let paid_at = Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap();
        claim.apply_transition(&paid, paid_at).unwrap();
        assert_eq!(claim.status, ClaimStatus::Paid);
        assert_eq!(claim.processed_date, Some(paid_at));
        assert_eq!(claim.processed_by.as_deref(), Some("hr@cmcs"));
    }

    #[test]
    fn test_terminal_states_are_not_overwritable() {
        let mut claim = create_test_claim();
        claim
            .apply_transition(
                &Transition::Reject {
                    actor: "manager@cmcs".to_string(),
                    reason: None,
                },
                submitted_at(),
            )
            .unwrap();

        // Rejected claims are never revived
        let result = claim.apply_transition(
            &Transition::Approve {
                actor: "manager@cmcs".to_string(),
            },
            submitted_at(),
        );
        assert!(matches!(result, Err(ClaimError::InvalidTransition { .. })));
        assert_eq!(claim.status, ClaimStatus::Rejected);
    }

    #[test]
    fn test_transition_into_status_mapping() {
        let approve =
            Transition::into_status(ClaimStatus::Approved, "a".to_string(), None).unwrap();
        assert_eq!(approve.target_status(), ClaimStatus::Approved);

        let reject = Transition::into_status(
            ClaimStatus::Rejected,
            "a".to_string(),
            Some("late".to_string()),
        )
        .unwrap();
        assert_eq!(reject.target_status(), ClaimStatus::Rejected);

        assert!(Transition::into_status(ClaimStatus::Pending, "a".to_string(), None).is_none());
    }

    #[test]
    fn test_days_since_submission() {
        let claim = create_test_claim();
        let later = submitted_at() + chrono::Duration::days(31);
        assert_eq!(claim.days_since_submission(later), 31);
    }
}

// ============================================================================
// Document Policy Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_accept_builds_metadata() {
        let doc = SupportingDocument::accept(
            ClaimId::new(7),
            "timesheet.pdf",
            "application/pdf",
            1024,
            submitted_at(),
        )
        .unwrap();

        assert_eq!(doc.claim_id, ClaimId::new(7));
        assert_eq!(doc.file_name, "timesheet.pdf");
        assert!(doc.stored_name.starts_with("7_"));
        assert!(doc.stored_name.ends_with(".pdf"));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let result = SupportingDocument::accept(
            ClaimId::new(7),
            "timesheet.pdf",
            "application/pdf",
            6 * 1024 * 1024,
            submitted_at(),
        );
        match result {
            Err(ClaimError::Validation(message)) => {
                assert_eq!(message, "File size must be less than 5MB");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        for name in ["payload.exe", "noextension", "archive.tar.gz"] {
            let result = DocumentPolicy::default().check(name, 1024);
            match result {
                Err(ClaimError::Validation(message)) => {
                    assert_eq!(
                        message,
                        "Only PDF, DOCX, XLSX, JPG, and PNG files are allowed"
                    );
                }
                other => panic!("expected validation error for {}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(DocumentPolicy::default().check("Timesheet.PDF", 1024).is_ok());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_amount_is_pure_function_of_inputs(
            hours_minor in 1i64..17600i64,
            rate_minor in 10000i64..100000i64
        ) {
            let hours = Decimal::new(hours_minor, 2);
            let rate = Money::from_minor(rate_minor, core_kernel::Currency::ZAR);

            if let Ok(claim) = ClaimRecord::submit(
                LecturerId::new(1),
                month("2025-01"),
                hours,
                rate,
                submitted_at(),
            ) {
                // Recomputation never drifts
                prop_assert_eq!(claim.total_amount(), claim.total_amount());
                prop_assert_eq!(
                    claim.total_amount().amount(),
                    (rate.amount() * hours).round_dp(2)
                );
            }
        }
    }
}
