use serde::{Deserialize, Serialize};

use super::Name;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileImprovement {
    pub name: String,
    #[serde(default)]
    pub terrains_can_be_built_on: Vec<String>,
    #[serde(default)]
    pub uniques: Vec<String>,
}

impl Name for TileImprovement {
    fn name(&self) -> &str {
        &self.name
    }
}
