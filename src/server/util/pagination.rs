/// Page size used when the caller sends none.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u64 = 100;
/// Largest page number accepted. Keeps `page * limit` within the signed 64-bit offset
/// range the database takes.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// Normalized 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Applies defaults and clamps `page` to `1..=MAX_PAGE` and `limit` to `1..=MAX_LIMIT`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// Zero-based page index as used by SeaORM paginators.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let request = PageRequest::new(Some(0), Some(1000));
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, MAX_LIMIT);

        assert_eq!(PageRequest::new(Some(3), Some(0)).limit, 1);

        let huge = PageRequest::new(Some(u64::MAX), Some(MAX_LIMIT));
        assert_eq!(huge.page, MAX_PAGE);
        assert!(huge.index().checked_mul(huge.limit).is_some_and(|o| o <= i64::MAX as u64));
    }

    #[test]
    fn counts_partial_last_page() {
        let request = PageRequest::new(Some(1), Some(10));
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(10), 1);
        assert_eq!(request.total_pages(11), 2);
    }
}
