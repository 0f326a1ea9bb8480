//! Test data builders
//!
//! Builders construct entities directly (bypassing submission guards) so
//! tests can also produce out-of-band claims the validation rules must
//! catch. Use only the fields relevant to the scenario; everything else has
//! a sensible default.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, ClaimMonth, DocumentId, LecturerId, Money};
use domain_claims::{ClaimRecord, ClaimStatus, Lecturer, SupportingDocument};

/// Default submission instant used across the suites
pub fn default_submission_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

/// Builder for test claims
pub struct ClaimBuilder {
    id: ClaimId,
    lecturer_id: LecturerId,
    claim_month: ClaimMonth,
    hours_worked: Decimal,
    hourly_rate: Money,
    status: ClaimStatus,
    submission_date: DateTime<Utc>,
    document_count: usize,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// A Pending 40h @ R200 claim for 2025-03, no documents
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(0),
            lecturer_id: LecturerId::new(1),
            claim_month: "2025-03".parse().unwrap(),
            hours_worked: dec!(40),
            hourly_rate: Money::zar(dec!(200)),
            status: ClaimStatus::Pending,
            submission_date: default_submission_date(),
            document_count: 0,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    pub fn with_lecturer(mut self, id: i64) -> Self {
        self.lecturer_id = LecturerId::new(id);
        self
    }

    pub fn with_month(mut self, month: &str) -> Self {
        self.claim_month = month.parse().expect("valid claim month");
        self
    }

    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = Money::zar(rate);
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_submission_date(mut self, date: DateTime<Utc>) -> Self {
        self.submission_date = date;
        self
    }

    pub fn with_documents(mut self, count: usize) -> Self {
        self.document_count = count;
        self
    }

    pub fn build(self) -> ClaimRecord {
        let documents = (0..self.document_count)
            .map(|i| SupportingDocument {
                id: DocumentId::new(0),
                claim_id: self.id,
                file_name: format!("timesheet-{}.pdf", i + 1),
                stored_name: format!("{}_{}.pdf", self.id.value(), i + 1),
                content_type: "application/pdf".to_string(),
                size_bytes: 64 * 1024,
                uploaded_at: self.submission_date,
            })
            .collect();

        ClaimRecord {
            id: self.id,
            lecturer_id: self.lecturer_id,
            claim_month: self.claim_month,
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            status: self.status,
            submission_date: self.submission_date,
            approval_date: None,
            approved_by: None,
            rejection_reason: None,
            processed_date: None,
            processed_by: None,
            documents,
        }
    }
}

/// Builder for test lecturers
pub struct LecturerBuilder {
    id: LecturerId,
    name: String,
    email: String,
    department: String,
    is_active: bool,
}

impl Default for LecturerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LecturerBuilder {
    pub fn new() -> Self {
        Self {
            id: LecturerId::new(1),
            name: "T. Ndlovu".to_string(),
            email: "t.ndlovu@university.ac.za".to_string(),
            department: "Computer Science".to_string(),
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = LecturerId::new(id);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Lecturer {
        Lecturer {
            id: self.id,
            name: self.name,
            email: self.email,
            department: self.department,
            is_active: self.is_active,
        }
    }
}
