//! Typed client for the affiliate API
//!
//! `DmmClient` wraps the request executor with one method per endpoint,
//! a lookup of a single item by content id, and lazily paginated streams
//! over the list endpoints.

use crate::api::{
    Actress, ActressSearchParams, ActressSearchResponse, Author, AuthorSearchParams,
    AuthorSearchResponse, Endpoint, FloorListParams, FloorListResponse, Genre, GenreSearchParams,
    GenreSearchResponse, Item, ItemListParams, ItemListResponse, Maker, MakerSearchParams,
    MakerSearchResponse, PagedEndpoint, Series, SeriesSearchParams, SeriesSearchResponse, Site,
};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{paginate, Page, PageSource, RecordStream};
use crate::types::QueryParams;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Client for the DMM affiliate API
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct DmmClient {
    http: HttpClient,
}

impl DmmClient {
    /// Create a client from a validated config
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client with default settings for the given credentials
    pub fn with_credentials(
        api_id: impl Into<String>,
        affiliate_id: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ClientConfig::new(api_id, affiliate_id)?)
    }

    /// Get the underlying request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Call an arbitrary endpoint with raw parameters
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T> {
        self.http.execute(endpoint, params).await
    }

    /// Call the endpoint a parameter type is bound to
    pub async fn call<E: Endpoint>(&self, params: &E) -> Result<E::Response> {
        self.http.execute_with(E::PATH, params).await
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    /// Search items (`/ItemList`)
    pub async fn item_list(&self, params: &ItemListParams) -> Result<ItemListResponse> {
        self.call(params).await
    }

    /// List every site, service and floor (`/FloorList`)
    pub async fn floor_list(&self) -> Result<FloorListResponse> {
        self.call(&FloorListParams::default()).await
    }

    /// Search actresses (`/ActressSearch`)
    pub async fn actress_search(
        &self,
        params: &ActressSearchParams,
    ) -> Result<ActressSearchResponse> {
        self.call(params).await
    }

    /// Search genres on a floor (`/GenreSearch`)
    pub async fn genre_search(&self, params: &GenreSearchParams) -> Result<GenreSearchResponse> {
        self.call(params).await
    }

    /// Search makers on a floor (`/MakerSearch`)
    pub async fn maker_search(&self, params: &MakerSearchParams) -> Result<MakerSearchResponse> {
        self.call(params).await
    }

    /// Search series on a floor (`/SeriesSearch`)
    pub async fn series_search(
        &self,
        params: &SeriesSearchParams,
    ) -> Result<SeriesSearchResponse> {
        self.call(params).await
    }

    /// Search authors on a floor (`/AuthorSearch`)
    pub async fn author_search(
        &self,
        params: &AuthorSearchParams,
    ) -> Result<AuthorSearchResponse> {
        self.call(params).await
    }

    /// Fetch one item by content id
    ///
    /// Returns `Ok(None)` when nothing matches; request failures are errors.
    pub async fn item_by_id(&self, site: Site, content_id: &str) -> Result<Option<Item>> {
        let params = ItemListParams::new(site).cid(content_id).hits(1);
        let response = self.item_list(&params).await?;
        Ok(response.items.into_iter().next())
    }

    // ========================================================================
    // Paginated Streams
    // ========================================================================

    /// Stream every record matched by a list query
    ///
    /// The stream owns `offset` and `hits`; any values set on `params` are
    /// replaced for each page.
    pub fn paginate<E>(&self, params: E) -> RecordStream<'static, <E::Page as Page>::Record>
    where
        E: PagedEndpoint,
        <E::Page as Page>::Record: Send + 'static,
    {
        paginate(EndpointPages {
            http: self.http.clone(),
            params,
        })
    }

    /// Stream every item matched by `params`
    pub fn items(&self, params: ItemListParams) -> RecordStream<'static, Item> {
        self.paginate(params)
    }

    /// Stream every actress matched by `params`
    pub fn actresses(&self, params: ActressSearchParams) -> RecordStream<'static, Actress> {
        self.paginate(params)
    }

    /// Stream every genre of a floor
    pub fn genres(&self, params: GenreSearchParams) -> RecordStream<'static, Genre> {
        self.paginate(params)
    }

    /// Stream every maker of a floor
    pub fn makers(&self, params: MakerSearchParams) -> RecordStream<'static, Maker> {
        self.paginate(params)
    }

    /// Stream every series of a floor
    pub fn series(&self, params: SeriesSearchParams) -> RecordStream<'static, Series> {
        self.paginate(params)
    }

    /// Stream every author of a floor
    pub fn authors(&self, params: AuthorSearchParams) -> RecordStream<'static, Author> {
        self.paginate(params)
    }
}

/// Page source that re-sends fixed parameters with a moving window
struct EndpointPages<E> {
    http: HttpClient,
    params: E,
}

#[async_trait]
impl<E: PagedEndpoint> PageSource for EndpointPages<E> {
    type Page = E::Page;

    async fn fetch_page(&self, offset: u32, hits: u32) -> Result<E::Page> {
        let params = self.params.with_window(offset, hits);
        self.http.execute_with(E::PATH, &params).await
    }
}
