// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules.
//!
//! Validation is separate from the entity types: constructors assemble,
//! these functions judge. Partial updates are validated against the
//! effective value, i.e. the patch field when present, the stored value
//! otherwise.

use time::Date;

use crate::error::DomainError;
use crate::types::{RequestPatch, TourRequest};

/// Validates that a request title is non-blank.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is blank.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that a destination is non-blank.
///
/// # Errors
///
/// Returns `DomainError::InvalidDestination` if the destination is blank.
pub fn validate_destination(destination: &str) -> Result<(), DomainError> {
    if destination.trim().is_empty() {
        return Err(DomainError::InvalidDestination(String::from(
            "Destination cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that the trip start date does not fall after the end date.
///
/// # Errors
///
/// Returns `DomainError::InvalidTripDates` if `start_date > end_date`.
pub fn validate_trip_dates(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if start_date > end_date {
        return Err(DomainError::InvalidTripDates {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates that a budget is a positive, finite amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidBudget` otherwise.
pub fn validate_budget(budget: f64) -> Result<(), DomainError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(DomainError::InvalidBudget { budget });
    }
    Ok(())
}

/// Validates that a party size is at least one person.
///
/// # Errors
///
/// Returns `DomainError::InvalidPartySize` if the size is zero.
pub fn validate_party_size(party_size: u32) -> Result<(), DomainError> {
    if party_size == 0 {
        return Err(DomainError::InvalidPartySize { party_size });
    }
    Ok(())
}

/// Validates a proposed price at submission time. Must be positive.
///
/// # Errors
///
/// Returns `DomainError::InvalidProposedPrice` otherwise.
pub fn validate_proposed_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidProposedPrice { price });
    }
    Ok(())
}

/// Validates a proposed price carried by an edit patch.
///
/// Edits accept zero; only submission insists on a positive bid.
///
/// # Errors
///
/// Returns `DomainError::InvalidProposedPrice` for negative or non-finite
/// values.
pub fn validate_edited_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::InvalidProposedPrice { price });
    }
    Ok(())
}

/// Validates that a cover letter is non-blank.
///
/// # Errors
///
/// Returns `DomainError::InvalidCoverLetter` if the letter is blank.
pub fn validate_cover_letter(cover_letter: &str) -> Result<(), DomainError> {
    if cover_letter.trim().is_empty() {
        return Err(DomainError::InvalidCoverLetter(String::from(
            "Cover letter cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a partial request update against the stored request.
///
/// Date and budget fields present in the patch are checked against the
/// patch's own counterpart when both are present, and against the stored
/// counterpart otherwise. A patch carrying only `start_date` is therefore
/// still rejected when it crosses the stored `end_date`.
///
/// # Errors
///
/// Returns the first field validation error encountered.
pub fn validate_request_patch(
    patch: &RequestPatch,
    current: &TourRequest,
) -> Result<(), DomainError> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(destination) = &patch.destination {
        validate_destination(destination)?;
    }
    if patch.start_date.is_some() || patch.end_date.is_some() {
        let effective_start: Date = patch.start_date.unwrap_or(current.start_date);
        let effective_end: Date = patch.end_date.unwrap_or(current.end_date);
        validate_trip_dates(effective_start, effective_end)?;
    }
    if let Some(budget) = patch.budget {
        validate_budget(budget)?;
    }
    if let Some(party_size) = patch.party_size {
        validate_party_size(party_size)?;
    }
    Ok(())
}
