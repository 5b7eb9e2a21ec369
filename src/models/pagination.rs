use serde::Serialize;

/// Zero-based page request shared by every paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit: if limit == 0 { Self::DEFAULT_LIMIT } else { limit },
        }
    }

    /// Largest `LIMIT` or `START` the store accepts.
    pub const STORE_MAX: u64 = i64::MAX as u64;

    /// Lenient parsing of raw query values: unparsable page is 0, negative
    /// values are taken by absolute value, a missing or zero limit is the default.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| {
            raw.and_then(|v| v.trim().parse::<i64>().ok())
                .map(i64::unsigned_abs)
                .unwrap_or(0)
        };

        Self::new(parse(page), parse(limit))
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }

    /// Whether both the limit and the offset can be bound in a store query.
    pub fn fits_store(&self) -> bool {
        self.limit <= Self::STORE_MAX
            && self
                .page
                .checked_mul(self.limit)
                .is_some_and(|skip| skip <= Self::STORE_MAX)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total_results: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub results_per_page: u64,
}

impl PaginationInfo {
    pub fn new(total_results: u64, request: PageRequest) -> Self {
        Self {
            total_results,
            total_pages: total_pages(total_results, request.limit),
            current_page: request.page,
            results_per_page: request.limit,
        }
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}
