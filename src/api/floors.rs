//! Floor listing endpoint (`/FloorList`)
//!
//! Lists every site, service and floor. Takes no parameters besides the
//! credentials and is not paginated.

use super::Endpoint;
use serde::{Deserialize, Serialize};

/// Parameters of `/FloorList` (none)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FloorListParams {}

impl Endpoint for FloorListParams {
    const PATH: &'static str = "/FloorList";
    type Response = FloorListResponse;
}

/// Result of `/FloorList`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FloorListResponse {
    #[serde(default)]
    pub site: Vec<FloorSite>,
}

impl FloorListResponse {
    /// Find a floor by its numeric id
    pub fn find_floor(&self, floor_id: &str) -> Option<&Floor> {
        self.site
            .iter()
            .flat_map(|site| &site.service)
            .flat_map(|service| &service.floor)
            .find(|floor| floor.id == floor_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FloorSite {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub service: Vec<FloorService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FloorService {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub floor: Vec<Floor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    pub code: String,
}
