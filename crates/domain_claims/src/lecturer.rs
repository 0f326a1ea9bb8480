//! Lecturer entity

use serde::{Deserialize, Serialize};

use core_kernel::LecturerId;

/// A contract lecturer who submits monthly claims
///
/// Claim validity depends on `is_active` at evaluation time; the flag is
/// looked up live, never cached on the claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    /// Unique across lecturers
    pub email: String,
    pub department: String,
    pub is_active: bool,
}

impl Lecturer {
    pub fn new(
        id: LecturerId,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            department: department.into(),
            is_active: true,
        }
    }
}
