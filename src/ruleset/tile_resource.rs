use serde::{Deserialize, Serialize};

use crate::tile_component::ResourceType;

use super::Name;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileResource {
    pub name: String,
    pub resource_type: ResourceType,
    /// The terrains (base terrains or features) this resource can be placed on.
    #[serde(default)]
    pub terrains_can_be_found_on: Vec<String>,
    #[serde(default)]
    pub uniques: Vec<String>,
}

impl Name for TileResource {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TileResource {
    pub fn can_be_found_on(&self, terrain: &str) -> bool {
        self.terrains_can_be_found_on.iter().any(|x| x == terrain)
    }
}
