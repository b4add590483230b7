use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::models::booking_model::{BookingStatus, BookingWithRelations, EventCategory};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub category: Option<EventCategory>,
    pub group_size: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Stable string form of the filter, used in listing cache keys.
    pub fn fingerprint(&self) -> String {
        format!(
            "s:{}|c:{}|g:{}|st:{}",
            self.search.as_deref().unwrap_or("-"),
            self.category.map(|c| c.as_str()).unwrap_or("-"),
            self.group_size.as_deref().unwrap_or("-"),
            self.status.map(|s| s.as_str()).unwrap_or("-"),
        )
    }
}

/// Applies the optional filters conjunctively. A search term switches the
/// ordering to descending match quality; otherwise the input order is kept.
/// Never mutates the input.
pub fn apply_filters(
    bookings: &[BookingWithRelations],
    filter: &BookingFilter,
) -> Vec<BookingWithRelations> {
    let mut result: Vec<BookingWithRelations> = match filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        Some(term) => {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, &BookingWithRelations)> = bookings
                .iter()
                .filter_map(|b| search_score(&matcher, b, term).map(|score| (score, b)))
                .collect();
            // sort_by is stable, so ties keep the store's order
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            scored.into_iter().map(|(_, b)| b.clone()).collect()
        }
        None => bookings.to_vec(),
    };

    if let Some(category) = filter.category {
        result.retain(|b| b.event.category == category);
    }
    if let Some(group_size) = filter.group_size.as_deref() {
        result.retain(|b| b.event.group_size == group_size);
    }
    if let Some(status) = filter.status {
        result.retain(|b| b.booking.status == status);
    }

    result
}

fn search_score(
    matcher: &SkimMatcherV2,
    booking: &BookingWithRelations,
    term: &str,
) -> Option<i64> {
    [
        booking.team.name.as_str(),
        booking.leader.name.as_str(),
        booking.event.title.as_str(),
    ]
    .iter()
    .filter_map(|field| matcher.fuzzy_match(field, term))
    .max()
}

/// Saturating, so absurd caller-supplied pages yield an out-of-range offset
/// instead of overflowing.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1).saturating_mul(limit)
}

pub fn clamp_page(page: Option<i64>) -> i64 {
    page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT)
}

/// Offset/limit slice; an out-of-range page yields an empty vec, never an
/// error. `page` and `limit` must already be clamped to >= 1.
pub fn paginate<T: Clone>(items: &[T], page: i64, limit: i64) -> Vec<T> {
    let offset = page_offset(page, limit);
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}
