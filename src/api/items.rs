//! Item listing endpoint (`/ItemList`)

use super::{optional_setters, value_setters, Endpoint, PagedEndpoint};
use crate::pagination::Page;
use crate::types::{de_lenient, de_opt_lenient};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by `date`, `gte_date` and `lte_date`
const REQUEST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const RESPONSE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Parameters
// ============================================================================

/// Storefront to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Site {
    /// General store
    #[default]
    #[serde(rename = "DMM.com")]
    Dmm,
    /// Adult store
    #[serde(rename = "FANZA")]
    Fanza,
}

/// Sort order for item listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSort {
    /// Popularity
    #[serde(rename = "rank")]
    Rank,
    /// Price, highest first
    #[serde(rename = "price")]
    PriceDesc,
    /// Price, lowest first
    #[serde(rename = "-price")]
    PriceAsc,
    /// Release date, newest first
    #[serde(rename = "date")]
    Date,
    /// Review score
    #[serde(rename = "review")]
    Review,
    /// Keyword relevance
    #[serde(rename = "match")]
    Match,
}

/// Category used to narrow an item search by `article_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Actress,
    Author,
    Genre,
    Series,
    Maker,
}

/// Parameters of `/ItemList`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemListParams {
    pub site: Site,
    pub service: Option<String>,
    pub floor: Option<String>,
    pub hits: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<ItemSort>,
    pub keyword: Option<String>,
    pub cid: Option<String>,
    pub article: Option<Article>,
    pub article_id: Option<String>,
    pub gte_date: Option<String>,
    pub lte_date: Option<String>,
    pub mono_stock: Option<String>,
}

impl ItemListParams {
    /// Parameters for a listing on `site`
    pub fn new(site: Site) -> Self {
        Self {
            site,
            ..Self::default()
        }
    }

    /// Narrow by category, e.g. every item of one actress
    #[must_use]
    pub fn article(mut self, article: Article, id: impl Into<String>) -> Self {
        self.article = Some(article);
        self.article_id = Some(id.into());
        self
    }

    /// Only items released at or after `date`
    #[must_use]
    pub fn released_after(mut self, date: NaiveDateTime) -> Self {
        self.gte_date = Some(date.format(REQUEST_DATE_FORMAT).to_string());
        self
    }

    /// Only items released at or before `date`
    #[must_use]
    pub fn released_before(mut self, date: NaiveDateTime) -> Self {
        self.lte_date = Some(date.format(REQUEST_DATE_FORMAT).to_string());
        self
    }
}

optional_setters!(ItemListParams {
    /// Service code, e.g. `digital`
    service: String,
    /// Floor code, e.g. `videoa`
    floor: String,
    /// Free-text keyword
    keyword: String,
    /// Content id of a single item
    cid: String,
    /// Stock filter for physical goods (`stock`, `reserve`, `mono`, ...)
    mono_stock: String,
});

value_setters!(ItemListParams {
    /// Records per page, at most 100
    hits: u32,
    /// 1-based position of the first record
    offset: u32,
    sort: ItemSort,
});

impl Endpoint for ItemListParams {
    const PATH: &'static str = "/ItemList";
    type Response = ItemListResponse;
}

impl PagedEndpoint for ItemListParams {
    type Page = ItemListResponse;

    fn with_window(&self, offset: u32, hits: u32) -> Self {
        Self {
            offset: Some(offset),
            hits: Some(hits),
            ..self.clone()
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Result of `/ItemList`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemListResponse {
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub status: Option<u16>,
    #[serde(deserialize_with = "de_lenient")]
    pub result_count: u32,
    #[serde(deserialize_with = "de_lenient")]
    pub total_count: u32,
    #[serde(deserialize_with = "de_lenient")]
    pub first_position: u32,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Page for ItemListResponse {
    type Record = Item;

    fn total_count(&self) -> u32 {
        self.total_count
    }

    fn first_position(&self) -> u32 {
        self.first_position
    }

    fn into_records(self) -> Vec<Item> {
        self.items
    }
}

/// One product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub content_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub floor_code: Option<String>,
    #[serde(default)]
    pub floor_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(rename = "affiliateURL", default)]
    pub affiliate_url: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<ImageUrls>,
    #[serde(rename = "sampleImageURL", default)]
    pub sample_image_url: Option<SampleImages>,
    #[serde(rename = "sampleMovieURL", default)]
    pub sample_movie_url: Option<SampleMovies>,
    #[serde(default)]
    pub prices: Option<Prices>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub iteminfo: ItemInfo,
}

impl Item {
    /// Release timestamp parsed from `date`
    pub fn release_date(&self) -> Option<NaiveDateTime> {
        let date = self.date.as_deref()?;
        NaiveDateTime::parse_from_str(date, RESPONSE_DATE_FORMAT).ok()
    }
}

/// Review summary
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub count: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub average: Option<f64>,
}

/// Package image URLs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageUrls {
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Sample image URLs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleImages {
    #[serde(rename = "sample_s", default)]
    pub small: Option<ImageList>,
    #[serde(rename = "sample_l", default)]
    pub large: Option<ImageList>,
}

/// List of image URLs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageList {
    #[serde(default)]
    pub image: Vec<String>,
}

/// Sample movie player URLs, keyed by player size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleMovies {
    #[serde(default)]
    pub size_476_306: Option<String>,
    #[serde(default)]
    pub size_560_360: Option<String>,
    #[serde(default)]
    pub size_644_414: Option<String>,
    #[serde(default)]
    pub size_720_480: Option<String>,
    #[serde(default)]
    pub pc_flag: Option<u8>,
    #[serde(default)]
    pub sp_flag: Option<u8>,
}

/// Price information; prices are display strings such as `"300~"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub list_price: Option<String>,
    #[serde(default)]
    pub deliveries: Option<Deliveries>,
}

/// Wrapper around the per-format price list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deliveries {
    #[serde(default)]
    pub delivery: Vec<Delivery>,
}

/// Price of one delivery format
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Delivery {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub list_price: Option<String>,
}

/// Categories an item belongs to
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemInfo {
    #[serde(default)]
    pub genre: Vec<InfoEntry>,
    #[serde(default)]
    pub series: Vec<InfoEntry>,
    #[serde(default)]
    pub maker: Vec<InfoEntry>,
    #[serde(default)]
    pub actress: Vec<InfoEntry>,
    #[serde(default)]
    pub director: Vec<InfoEntry>,
    #[serde(default)]
    pub author: Vec<InfoEntry>,
    #[serde(default)]
    pub label: Vec<InfoEntry>,
}

/// Reference to a category entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoEntry {
    #[serde(deserialize_with = "de_lenient")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
}
