//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to return per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated page request: which page to fetch and how many items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The page number, starting from 1.
    pub number: u64,
    /// The maximum number of items on a page, at least 1.
    pub size: u64,
}

impl Page {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns [Error::InvalidParameters] if either value is zero or if the
    /// page lies beyond what the database can address.
    pub fn new(number: u64, size: u64) -> Result<Self, Error> {
        if number < 1 {
            return Err(Error::InvalidParameters(
                "page must be at least 1".to_owned(),
            ));
        }

        if size < 1 {
            return Err(Error::InvalidParameters(
                "perPage must be at least 1".to_owned(),
            ));
        }

        let page = Self { number, size };
        let addressable = i64::try_from(size).is_ok()
            && page
                .offset_checked()
                .is_some_and(|offset| i64::try_from(offset).is_ok());

        if !addressable {
            return Err(Error::InvalidParameters(
                "page and perPage are too large".to_owned(),
            ));
        }

        Ok(page)
    }

    /// The number of items to skip before this page.
    pub fn offset(self) -> u64 {
        // `Page::new` guarantees this does not overflow.
        (self.number - 1) * self.size
    }

    fn offset_checked(self) -> Option<u64> {
        (self.number - 1).checked_mul(self.size)
    }
}

/// The number of pages needed to show `item_count` items, `page_size` per page.
pub fn page_count(item_count: u64, page_size: u64) -> u64 {
    item_count.div_ceil(page_size)
}
