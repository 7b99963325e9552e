//! Search endpoints
//!
//! `/ActressSearch` takes its own filter set. The floor-scoped searches
//! (`/GenreSearch`, `/MakerSearch`, `/SeriesSearch`, `/AuthorSearch`) share
//! one parameter shape keyed by a required `floor_id`.

use super::{optional_setters, value_setters, Endpoint, PagedEndpoint};
use crate::pagination::Page;
use crate::types::{de_lenient, de_opt_lenient};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Actress Search
// ============================================================================

/// Sort order for actress searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActressSort {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
    #[serde(rename = "bust")]
    Bust,
    #[serde(rename = "-bust")]
    BustDesc,
    #[serde(rename = "waist")]
    Waist,
    #[serde(rename = "-waist")]
    WaistDesc,
    #[serde(rename = "hip")]
    Hip,
    #[serde(rename = "-hip")]
    HipDesc,
    #[serde(rename = "height")]
    Height,
    #[serde(rename = "-height")]
    HeightDesc,
    #[serde(rename = "birthday")]
    Birthday,
    #[serde(rename = "-birthday")]
    BirthdayDesc,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "-id")]
    IdDesc,
}

/// Parameters of `/ActressSearch`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActressSearchParams {
    pub initial: Option<String>,
    pub actress_id: Option<String>,
    pub keyword: Option<String>,
    pub gte_bust: Option<u32>,
    pub lte_bust: Option<u32>,
    pub gte_waist: Option<u32>,
    pub lte_waist: Option<u32>,
    pub gte_hip: Option<u32>,
    pub lte_hip: Option<u32>,
    pub gte_height: Option<u32>,
    pub lte_height: Option<u32>,
    pub gte_birthday: Option<String>,
    pub lte_birthday: Option<String>,
    pub sort: Option<ActressSort>,
    pub hits: Option<u32>,
    pub offset: Option<u32>,
}

impl ActressSearchParams {
    /// Parameters with no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only actresses born between `from` and `to`, inclusive
    #[must_use]
    pub fn born_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.gte_birthday = Some(from.format("%Y-%m-%d").to_string());
        self.lte_birthday = Some(to.format("%Y-%m-%d").to_string());
        self
    }

    /// Only actresses whose height is within `min..=max` centimetres
    #[must_use]
    pub fn height_between(mut self, min: u32, max: u32) -> Self {
        self.gte_height = Some(min);
        self.lte_height = Some(max);
        self
    }
}

optional_setters!(ActressSearchParams {
    /// Initial of the reading, in hiragana
    initial: String,
    actress_id: String,
    keyword: String,
});

value_setters!(ActressSearchParams {
    gte_bust: u32,
    lte_bust: u32,
    gte_waist: u32,
    lte_waist: u32,
    gte_hip: u32,
    lte_hip: u32,
    sort: ActressSort,
    hits: u32,
    offset: u32,
});

impl Endpoint for ActressSearchParams {
    const PATH: &'static str = "/ActressSearch";
    type Response = ActressSearchResponse;
}

impl PagedEndpoint for ActressSearchParams {
    type Page = ActressSearchResponse;

    fn with_window(&self, offset: u32, hits: u32) -> Self {
        Self {
            offset: Some(offset),
            hits: Some(hits),
            ..self.clone()
        }
    }
}

/// Result of `/ActressSearch`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActressSearchResponse {
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub status: Option<u16>,
    #[serde(deserialize_with = "de_lenient")]
    pub result_count: u32,
    #[serde(deserialize_with = "de_lenient")]
    pub total_count: u32,
    #[serde(deserialize_with = "de_lenient")]
    pub first_position: u32,
    #[serde(default)]
    pub actress: Vec<Actress>,
}

impl Page for ActressSearchResponse {
    type Record = Actress;

    fn total_count(&self) -> u32 {
        self.total_count
    }

    fn first_position(&self) -> u32 {
        self.first_position
    }

    fn into_records(self) -> Vec<Actress> {
        self.actress
    }
}

/// One actress profile
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Actress {
    #[serde(deserialize_with = "de_lenient")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub bust: Option<u32>,
    #[serde(default)]
    pub cup: Option<String>,
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub waist: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub hip: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_lenient")]
    pub height: Option<u32>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub hobby: Option<String>,
    #[serde(default)]
    pub prefectures: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<ActressImages>,
    #[serde(rename = "listURL", default)]
    pub list_url: Option<ActressListUrls>,
}

impl Actress {
    /// Birthday parsed as a calendar date
    pub fn birth_date(&self) -> Option<NaiveDate> {
        let birthday = self.birthday.as_deref()?;
        NaiveDate::parse_from_str(birthday, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActressImages {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActressListUrls {
    #[serde(default)]
    pub digital: Option<String>,
    #[serde(default)]
    pub monthly: Option<String>,
    #[serde(default)]
    pub mono: Option<String>,
}

// ============================================================================
// Floor-Scoped Searches
// ============================================================================

/// Floor description returned alongside every floor-scoped search
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FloorSearchHeader {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_code: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub floor_id: Option<String>,
    #[serde(default)]
    pub floor_name: Option<String>,
    #[serde(default)]
    pub floor_code: Option<String>,
}

macro_rules! floor_search {
    (
        $(#[$meta:meta])*
        $params:ident => $response:ident { $field:ident: $record:ty }, $path:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $params {
            pub floor_id: u32,
            pub initial: Option<String>,
            pub hits: Option<u32>,
            pub offset: Option<u32>,
        }

        impl $params {
            /// Parameters for the floor with id `floor_id`
            pub fn new(floor_id: u32) -> Self {
                Self {
                    floor_id,
                    initial: None,
                    hits: None,
                    offset: None,
                }
            }
        }

        optional_setters!($params {
            /// Initial of the reading, in hiragana
            initial: String,
        });

        value_setters!($params {
            hits: u32,
            offset: u32,
        });

        impl Endpoint for $params {
            const PATH: &'static str = $path;
            type Response = $response;
        }

        impl PagedEndpoint for $params {
            type Page = $response;

            fn with_window(&self, offset: u32, hits: u32) -> Self {
                Self {
                    offset: Some(offset),
                    hits: Some(hits),
                    ..self.clone()
                }
            }
        }

        #[doc = concat!("Result of `", $path, "`")]
        #[derive(Debug, Clone, PartialEq, Deserialize)]
        pub struct $response {
            #[serde(default, deserialize_with = "de_opt_lenient")]
            pub status: Option<u16>,
            #[serde(deserialize_with = "de_lenient")]
            pub result_count: u32,
            #[serde(deserialize_with = "de_lenient")]
            pub total_count: u32,
            #[serde(deserialize_with = "de_lenient")]
            pub first_position: u32,
            #[serde(flatten)]
            pub floor: FloorSearchHeader,
            #[serde(default)]
            pub $field: Vec<$record>,
        }

        impl Page for $response {
            type Record = $record;

            fn total_count(&self) -> u32 {
                self.total_count
            }

            fn first_position(&self) -> u32 {
                self.first_position
            }

            fn into_records(self) -> Vec<$record> {
                self.$field
            }
        }
    };
}

floor_search! {
    /// Parameters of `/GenreSearch`
    GenreSearchParams => GenreSearchResponse { genre: Genre }, "/GenreSearch"
}

floor_search! {
    /// Parameters of `/MakerSearch`
    MakerSearchParams => MakerSearchResponse { maker: Maker }, "/MakerSearch"
}

floor_search! {
    /// Parameters of `/SeriesSearch`
    SeriesSearchParams => SeriesSearchResponse { series: Series }, "/SeriesSearch"
}

floor_search! {
    /// Parameters of `/AuthorSearch`
    AuthorSearchParams => AuthorSearchResponse { author: Author }, "/AuthorSearch"
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    #[serde(deserialize_with = "de_lenient")]
    pub genre_id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
    #[serde(default)]
    pub list_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Maker {
    #[serde(deserialize_with = "de_lenient")]
    pub maker_id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
    #[serde(default)]
    pub list_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Series {
    #[serde(deserialize_with = "de_lenient")]
    pub series_id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
    #[serde(default)]
    pub list_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    #[serde(deserialize_with = "de_lenient")]
    pub author_id: u64,
    pub name: String,
    #[serde(default)]
    pub ruby: Option<String>,
    #[serde(default)]
    pub another_name: Option<String>,
    #[serde(default)]
    pub list_url: Option<String>,
}
