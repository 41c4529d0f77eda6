// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guide application status tracking.
//!
//! Applications start `Pending` and are resolved irrevocably by the
//! acceptance transaction: exactly one sibling becomes `Selected`, every
//! other sibling becomes `Rejected`. No other path resolves an application.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a guide application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Competing for the request. Price and cover letter remain editable.
    Pending,
    /// The winning application of its request.
    Selected,
    /// Lost to a selected sibling.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "selected" => Ok(Self::Selected),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApplicationStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal. Resolution is irrevocable.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Selected | Self::Rejected)
    }

    /// Returns true while the application is still competing.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
