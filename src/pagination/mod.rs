//! Pagination module
//!
//! Turns the offset/hits list endpoints into one lazy record stream.
//!
//! # Overview
//!
//! A [`PageSource`] fetches one page for a given window. [`paginate`] drives
//! it: it starts at offset 1, learns the total from the first page, yields
//! records in order and advances from the server-reported `first_position`.
//! Pages are fetched only when the consumer pulls past the buffered records.

mod driver;
mod types;

pub use driver::{paginate, paginate_with_page_size, RecordStream};
pub use types::{Page, PageSource, PaginationCursor, RecordOf, PAGE_SIZE};
