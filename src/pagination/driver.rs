//! Pagination driver
//!
//! Flattens successive pages from a [`PageSource`] into a single stream.

use super::types::{Page, PageSource, PaginationCursor, RecordOf, PAGE_SIZE};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::{debug, warn};

/// Boxed stream of records, ending at the first error
pub type RecordStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

struct DriverState<S: PageSource> {
    source: S,
    cursor: PaginationCursor,
    buffer: VecDeque<RecordOf<S>>,
    exhausted: bool,
}

/// Stream every record of a paginated query, [`PAGE_SIZE`] records per fetch
pub fn paginate<'a, S>(source: S) -> RecordStream<'a, RecordOf<S>>
where
    S: PageSource + 'a,
    RecordOf<S>: Send + 'a,
{
    paginate_with_page_size(source, PAGE_SIZE)
}

/// Stream every record of a paginated query with a custom page size
///
/// A failed fetch ends the stream with [`Error::Pagination`] carrying the
/// offset of the failed page; records yielded before it stay delivered.
pub fn paginate_with_page_size<'a, S>(source: S, hits: u32) -> RecordStream<'a, RecordOf<S>>
where
    S: PageSource + 'a,
    RecordOf<S>: Send + 'a,
{
    let state = DriverState {
        source,
        cursor: PaginationCursor::new(hits.max(1)),
        buffer: VecDeque::new(),
        exhausted: false,
    };

    Box::pin(stream::try_unfold(state, |mut state| async move {
        loop {
            if let Some(record) = state.buffer.pop_front() {
                return Ok(Some((record, state)));
            }
            if state.exhausted || !state.cursor.has_more() {
                return Ok(None);
            }

            let offset = state.cursor.offset();
            let hits = state.cursor.hits();
            debug!(offset, hits, "Fetching page");

            let page = match state.source.fetch_page(offset, hits).await {
                Ok(page) => page,
                Err(e) => return Err(Error::pagination(offset, e)),
            };

            if state.cursor.total_count().is_none() {
                let total = page.total_count();
                state.cursor.record_total(total);
                if total == 0 {
                    debug!("Query matched no records");
                    return Ok(None);
                }
            }

            let first_position = page.first_position();
            let records = page.into_records();
            if records.is_empty() {
                debug!(offset, "Empty page before reaching the total, stopping");
                return Ok(None);
            }

            if !state.cursor.advance(first_position, records.len() as u32) {
                warn!(
                    "Page at offset {} reported first_position {}, not advancing further",
                    offset, first_position
                );
                state.exhausted = true;
            }
            state.buffer.extend(records);
        }
    }))
}
