//! Endpoint definitions
//!
//! Parameter and response types for each endpoint of the affiliate API.
//! A parameter struct knows which path it is sent to ([`Endpoint`]) and,
//! for list endpoints, how to place an offset/hits window into itself
//! ([`PagedEndpoint`]) so the pagination driver can own those two fields.

/// Generates `#[must_use]` builder setters for `Option` fields
macro_rules! optional_setters {
    ($ty:ident { $($(#[$meta:meta])* $field:ident: $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                $(#[$meta])*
                #[must_use]
                pub fn $field(mut self, value: impl Into<$value>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

/// Like `optional_setters!` for `Copy` values taken as-is
macro_rules! value_setters {
    ($ty:ident { $($(#[$meta:meta])* $field:ident: $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                $(#[$meta])*
                #[must_use]
                pub fn $field(mut self, value: $value) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*
        }
    };
}

pub(crate) use {optional_setters, value_setters};

mod floors;
mod items;
mod search;

pub use floors::{Floor, FloorListParams, FloorListResponse, FloorService, FloorSite};
pub use items::{
    Article, Deliveries, Delivery, ImageList, ImageUrls, InfoEntry, Item, ItemInfo,
    ItemListParams, ItemListResponse, ItemSort, Prices, Review, SampleImages, SampleMovies, Site,
};
pub use search::{
    Actress, ActressImages, ActressListUrls, ActressSearchParams, ActressSearchResponse,
    ActressSort, Author, AuthorSearchParams, AuthorSearchResponse, FloorSearchHeader, Genre,
    GenreSearchParams, GenreSearchResponse, Maker, MakerSearchParams, MakerSearchResponse, Series,
    SeriesSearchParams, SeriesSearchResponse,
};

use crate::pagination::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A request parameter type bound to one endpoint path
pub trait Endpoint: Serialize {
    /// Path relative to the base URL
    const PATH: &'static str;

    /// Payload found under `result` in the response
    type Response: DeserializeOwned;
}

/// An endpoint that pages with `offset` / `hits`
pub trait PagedEndpoint: Endpoint + Clone + Send + Sync + 'static {
    /// Page type; the same type as [`Endpoint::Response`]
    type Page: Page + DeserializeOwned + Send;

    /// Copy of these parameters with the paging window replaced
    fn with_window(&self, offset: u32, hits: u32) -> Self;
}

#[cfg(test)]
mod tests;
