//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the driver.

use crate::error::Result;
use async_trait::async_trait;

/// Records requested per page; the maximum the list endpoints accept
pub const PAGE_SIZE: u32 = 100;

/// One response of a list endpoint
pub trait Page {
    /// Record type carried by the page
    type Record;

    /// Total number of records the query matches
    fn total_count(&self) -> u32;

    /// 1-based position of the first record in this page
    fn first_position(&self) -> u32;

    /// Consume the page, returning its records in order
    fn into_records(self) -> Vec<Self::Record>;
}

/// Something that can fetch one page for an offset/hits window
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Page type returned by the source
    type Page: Page + Send;

    /// Fetch the page starting at `offset` holding at most `hits` records
    async fn fetch_page(&self, offset: u32, hits: u32) -> Result<Self::Page>;
}

/// Record type produced by a page source
pub type RecordOf<S> = <<S as PageSource>::Page as Page>::Record;

/// Driver-local position within a paginated query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    offset: u32,
    total_count: Option<u32>,
    hits: u32,
}

impl PaginationCursor {
    /// Create a cursor at offset 1 with an unknown total
    pub fn new(hits: u32) -> Self {
        Self {
            offset: 1,
            total_count: None,
            hits,
        }
    }

    /// Offset of the next page to fetch
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Page size
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Total learned from the first page, if any
    pub fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    /// Record the total declared by the first page; later totals are ignored
    pub fn record_total(&mut self, total: u32) {
        if self.total_count.is_none() {
            self.total_count = Some(total);
        }
    }

    /// True while the total is unknown or the offset has not passed it
    pub fn has_more(&self) -> bool {
        match self.total_count {
            None => true,
            Some(total) => self.offset <= total,
        }
    }

    /// Move past a page that started at `first_position` and held `count` records
    ///
    /// Returns `false` when the new offset would not move forward.
    pub fn advance(&mut self, first_position: u32, count: u32) -> bool {
        let next = first_position.saturating_add(count);
        if next <= self.offset {
            return false;
        }
        self.offset = next;
        true
    }
}
