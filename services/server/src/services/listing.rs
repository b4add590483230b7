use cache_client::CacheManager;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::booking_model::BookingWithRelations;
use crate::store::filter::{apply_filters, page_offset, paginate, BookingFilter};
use crate::store::{BookingStore, Scope};

const CACHE_TTL_SECONDS: i64 = 300;
const GENERATION_KEY: &str = "bookings:gen";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookingPage {
    pub bookings: Vec<BookingWithRelations>,
    pub total_count: i64,
    pub offset: i64,
    pub limit: i64,
}

/// Scope-bound listing: load the candidate set for the scope, narrow it with
/// the filter engine, then slice the requested page. `total_count` is the
/// post-filter, pre-pagination count. Reads through the listing cache when
/// one is configured; `page` and `limit` must already be clamped.
pub async fn list_bookings<S: BookingStore>(
    store: &S,
    scope: Scope,
    filter: &BookingFilter,
    page: i64,
    limit: i64,
) -> Result<BookingPage, BookingError> {
    let cache_key = listing_cache_key(scope, filter, page, limit).await;

    if let (Some(cache), Some(key)) = (CacheManager::global(), cache_key.as_deref()) {
        match cache.get(key).await {
            Ok(Some(cached)) => {
                if let Ok(cached_page) = serde_json::from_str::<BookingPage>(&cached) {
                    return Ok(cached_page);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("cache read failed for {}: {:?}", key, e),
        }
    }

    let candidates = store.list(scope).await?;
    let filtered = apply_filters(&candidates, filter);
    let total_count = filtered.len() as i64;
    let bookings = paginate(&filtered, page, limit);

    let result = BookingPage {
        bookings,
        total_count,
        offset: page_offset(page, limit),
        limit,
    };

    if let (Some(cache), Some(key)) = (CacheManager::global(), cache_key.as_deref()) {
        if let Ok(serialized) = serde_json::to_string(&result) {
            if let Err(e) = cache.set_with_ttl(key, &serialized, CACHE_TTL_SECONDS).await {
                warn!("failed to cache listing {}: {:?}", key, e);
            }
        }
    }

    Ok(result)
}

/// Every successful booking mutation bumps the generation, orphaning the
/// whole cached listing family at once; orphans age out via TTL.
pub async fn invalidate_listings() {
    if let Some(cache) = CacheManager::global() {
        if let Err(e) = cache.incr(GENERATION_KEY).await {
            warn!("failed to bump booking cache generation: {:?}", e);
        }
    }
}

async fn listing_cache_key(
    scope: Scope,
    filter: &BookingFilter,
    page: i64,
    limit: i64,
) -> Option<String> {
    let cache = CacheManager::global()?;
    let generation = match cache.get(GENERATION_KEY).await {
        Ok(Some(value)) => value,
        Ok(None) => "0".to_string(),
        Err(e) => {
            warn!("cache generation read failed: {:?}", e);
            return None;
        }
    };

    Some(format!(
        "bookings:{}:{}:{}:p{}:l{}",
        generation,
        scope.cache_tag(),
        filter.fingerprint(),
        page,
        limit
    ))
}
