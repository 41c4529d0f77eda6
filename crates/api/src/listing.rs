// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The listing pipeline: search, filter, sort, paginate.
//!
//! Pure functions applied uniformly to requests, applications, and
//! bookings, in that stage order. Search is a case-insensitive substring
//! match over a fixed per-entity field list with OR semantics. Date range
//! filters compare the `YYYY-MM-DD` renderings lexicographically, which
//! is valid exactly because of that format. Unknown sort keys fall back
//! to the entity's default key instead of erroring.

use std::cmp::Ordering;
use std::str::FromStr;

use tour_match_domain::{
    Application, ApplicationStatus, Booking, BookingStatus, RequestStatus, TourRequest,
};

use crate::error::{ApiError, translate_domain_error};

/// Page size applied when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound a requested page size is clamped to.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination inputs, before clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// 1-indexed page number. Clamped to at least 1.
    pub page: Option<u32>,
    /// Page size. Clamped to `[1, MAX_PAGE_SIZE]`.
    pub page_size: Option<u32>,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total items across all pages.
    pub total_count: usize,
    /// The clamped 1-indexed page number.
    pub page: u32,
    /// The clamped page size.
    pub page_size: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

/// Slices one page out of a full result set.
#[must_use]
pub fn paginate<T>(items: Vec<T>, params: &PageParams) -> Page<T> {
    let page: u32 = params.page.unwrap_or(1).max(1);
    let page_size: u32 = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let total_count: usize = items.len();
    let size: usize = usize::try_from(page_size).unwrap_or(usize::MAX);
    let total_pages: u32 = u32::try_from(total_count.div_ceil(size)).unwrap_or(u32::MAX);
    let offset: usize = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(size);

    let page_items: Vec<T> = items.into_iter().skip(offset).take(size).collect();
    let has_next_page: bool = offset.saturating_add(size) < total_count;
    let has_previous_page: bool = page > 1;

    Page {
        items: page_items,
        total_count,
        page,
        page_size,
        total_pages,
        has_next_page,
        has_previous_page,
    }
}

/// Keeps the items whose searched fields contain the term.
///
/// Case-insensitive substring match; an item matches when any of its
/// fields does.
fn search<T, F>(items: Vec<T>, term: &str, fields: F) -> Vec<T>
where
    F: for<'a> Fn(&'a T) -> Vec<&'a str>,
{
    let needle: String = term.to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            fields(item)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sort direction, with a per-key default when absent or unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    fn from_param(param: Option<&str>, default: Self) -> Self {
        match param.map(str::to_lowercase).as_deref() {
            Some("asc") => Self::Ascending,
            Some("desc") => Self::Descending,
            _ => default,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ============================================================================
// Requests
// ============================================================================

/// Sort keys for request listings. Default: creation time, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSortKey {
    /// Creation timestamp (the default).
    CreatedAt,
    /// Budget amount.
    Budget,
    /// Trip start date.
    StartDate,
    /// Trip title.
    Title,
}

impl RequestSortKey {
    /// Parses a sort key, falling back to the default for unknown keys.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("budget") => Self::Budget,
            Some("start_date") => Self::StartDate,
            Some("title") => Self::Title,
            _ => Self::CreatedAt,
        }
    }

    /// The direction used when the caller does not pick one.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::CreatedAt => SortDirection::Descending,
            Self::Budget | Self::StartDate | Self::Title => SortDirection::Ascending,
        }
    }
}

/// Listing parameters for tour requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestListParams {
    /// Substring search over title, destination, description, tour type.
    pub search: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
    /// Exact destination filter.
    pub destination: Option<String>,
    /// Exact tour type filter.
    pub tour_type: Option<String>,
    /// Lower budget bound (inclusive).
    pub min_budget: Option<f64>,
    /// Upper budget bound (inclusive).
    pub max_budget: Option<f64>,
    /// Earliest trip start date, as `YYYY-MM-DD`.
    pub start_date_from: Option<String>,
    /// Latest trip start date, as `YYYY-MM-DD`.
    pub start_date_to: Option<String>,
    /// Sort key. Unknown values fall back to `created_at`.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub sort_direction: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

impl RequestListParams {
    const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Runs the full pipeline over a request list.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the status filter is not a
/// recognized status.
pub fn list_requests_page(
    items: Vec<TourRequest>,
    params: &RequestListParams,
) -> Result<Page<TourRequest>, ApiError> {
    let status_filter: Option<RequestStatus> = params
        .status
        .as_deref()
        .map(RequestStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let mut items: Vec<TourRequest> = items;
    if let Some(term) = params.search.as_deref() {
        items = search(items, term, |r: &TourRequest| {
            vec![
                r.title.as_str(),
                r.destination.as_str(),
                r.description.as_str(),
                r.tour_type.as_str(),
            ]
        });
    }

    items.retain(|r| {
        status_filter.is_none_or(|status| r.status == status)
            && params
                .destination
                .as_deref()
                .is_none_or(|destination| r.destination == destination)
            && params
                .tour_type
                .as_deref()
                .is_none_or(|tour_type| r.tour_type == tour_type)
            && params.min_budget.is_none_or(|min| r.budget >= min)
            && params.max_budget.is_none_or(|max| r.budget <= max)
            && params
                .start_date_from
                .as_deref()
                .is_none_or(|from| r.start_date.to_string().as_str() >= from)
            && params
                .start_date_to
                .as_deref()
                .is_none_or(|to| r.start_date.to_string().as_str() <= to)
    });

    let key: RequestSortKey = RequestSortKey::from_param(params.sort_by.as_deref());
    let direction: SortDirection =
        SortDirection::from_param(params.sort_direction.as_deref(), key.default_direction());
    items.sort_by(|a, b| {
        let ordering: Ordering = match key {
            RequestSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            RequestSortKey::Budget => compare_f64(a.budget, b.budget),
            RequestSortKey::StartDate => a.start_date.cmp(&b.start_date),
            RequestSortKey::Title => a.title.cmp(&b.title),
        };
        direction.apply(ordering)
    });

    Ok(paginate(items, &params.page_params()))
}

// ============================================================================
// Applications
// ============================================================================

/// Sort keys for application listings. Default: creation time, newest
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationSortKey {
    /// Creation timestamp (the default).
    CreatedAt,
    /// The guide's proposed price.
    ProposedPrice,
    /// The guide's display name.
    GuideName,
}

impl ApplicationSortKey {
    /// Parses a sort key, falling back to the default for unknown keys.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("proposed_price") => Self::ProposedPrice,
            Some("guide_name") => Self::GuideName,
            _ => Self::CreatedAt,
        }
    }

    /// The direction used when the caller does not pick one.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::CreatedAt => SortDirection::Descending,
            Self::ProposedPrice | Self::GuideName => SortDirection::Ascending,
        }
    }
}

/// Listing parameters for a request's applications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationListParams {
    /// Substring search over guide name, cover letter, request title,
    /// request destination.
    pub search: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
    /// Lower proposed price bound (inclusive).
    pub min_price: Option<f64>,
    /// Upper proposed price bound (inclusive).
    pub max_price: Option<f64>,
    /// Sort key. Unknown values fall back to `created_at`.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub sort_direction: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

impl ApplicationListParams {
    const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Runs the full pipeline over an application list.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the status filter is not a
/// recognized status.
pub fn list_applications_page(
    items: Vec<Application>,
    params: &ApplicationListParams,
) -> Result<Page<Application>, ApiError> {
    let status_filter: Option<ApplicationStatus> = params
        .status
        .as_deref()
        .map(ApplicationStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let mut items: Vec<Application> = items;
    if let Some(term) = params.search.as_deref() {
        items = search(items, term, |a: &Application| {
            vec![
                a.guide_name.as_str(),
                a.cover_letter.as_str(),
                a.request_title.as_str(),
                a.request_destination.as_str(),
            ]
        });
    }

    items.retain(|a| {
        status_filter.is_none_or(|status| a.status == status)
            && params.min_price.is_none_or(|min| a.proposed_price >= min)
            && params.max_price.is_none_or(|max| a.proposed_price <= max)
    });

    let key: ApplicationSortKey = ApplicationSortKey::from_param(params.sort_by.as_deref());
    let direction: SortDirection =
        SortDirection::from_param(params.sort_direction.as_deref(), key.default_direction());
    items.sort_by(|a, b| {
        let ordering: Ordering = match key {
            ApplicationSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            ApplicationSortKey::ProposedPrice => compare_f64(a.proposed_price, b.proposed_price),
            ApplicationSortKey::GuideName => a.guide_name.cmp(&b.guide_name),
        };
        direction.apply(ordering)
    });

    Ok(paginate(items, &params.page_params()))
}

// ============================================================================
// Bookings
// ============================================================================

/// Sort keys for booking listings. Default: creation time, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSortKey {
    /// Creation timestamp (the default).
    CreatedAt,
    /// Trip start date.
    StartDate,
    /// The agreed price.
    AgreedPrice,
}

impl BookingSortKey {
    /// Parses a sort key, falling back to the default for unknown keys.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("start_date") => Self::StartDate,
            Some("agreed_price") => Self::AgreedPrice,
            _ => Self::CreatedAt,
        }
    }

    /// The direction used when the caller does not pick one.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::CreatedAt => SortDirection::Descending,
            Self::StartDate | Self::AgreedPrice => SortDirection::Ascending,
        }
    }
}

/// Listing parameters for bookings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingListParams {
    /// Substring search over title, destination, guide name, tourist
    /// name.
    pub search: Option<String>,
    /// Exact status filter.
    pub status: Option<String>,
    /// Exact tourist filter.
    pub tourist_id: Option<String>,
    /// Exact guide filter.
    pub guide_id: Option<String>,
    /// Earliest trip start date, as `YYYY-MM-DD`.
    pub start_date_from: Option<String>,
    /// Latest trip start date, as `YYYY-MM-DD`.
    pub start_date_to: Option<String>,
    /// Sort key. Unknown values fall back to `created_at`.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub sort_direction: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

impl BookingListParams {
    const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Runs the full pipeline over a booking list.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the status filter is not a
/// recognized status.
pub fn list_bookings_page(
    items: Vec<Booking>,
    params: &BookingListParams,
) -> Result<Page<Booking>, ApiError> {
    let status_filter: Option<BookingStatus> = params
        .status
        .as_deref()
        .map(BookingStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let mut items: Vec<Booking> = items;
    if let Some(term) = params.search.as_deref() {
        items = search(items, term, |b: &Booking| {
            vec![
                b.title.as_str(),
                b.destination.as_str(),
                b.guide_name.as_str(),
                b.tourist_name.as_str(),
            ]
        });
    }

    items.retain(|b| {
        status_filter.is_none_or(|status| b.status == status)
            && params
                .tourist_id
                .as_deref()
                .is_none_or(|tourist_id| b.tourist_id == tourist_id)
            && params
                .guide_id
                .as_deref()
                .is_none_or(|guide_id| b.guide_id == guide_id)
            && params
                .start_date_from
                .as_deref()
                .is_none_or(|from| b.start_date.to_string().as_str() >= from)
            && params
                .start_date_to
                .as_deref()
                .is_none_or(|to| b.start_date.to_string().as_str() <= to)
    });

    let key: BookingSortKey = BookingSortKey::from_param(params.sort_by.as_deref());
    let direction: SortDirection =
        SortDirection::from_param(params.sort_direction.as_deref(), key.default_direction());
    items.sort_by(|a, b| {
        let ordering: Ordering = match key {
            BookingSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            BookingSortKey::StartDate => a.start_date.cmp(&b.start_date),
            BookingSortKey::AgreedPrice => compare_f64(a.agreed_price, b.agreed_price),
        };
        direction.apply(ordering)
    });

    Ok(paginate(items, &params.page_params()))
}
