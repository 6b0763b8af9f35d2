use serde::{Deserialize, Serialize};

use super::Name;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nation {
    pub name: String,
    #[serde(default)]
    pub leader_name: String,
    /// Start biases in ruleset notation, e.g. `Coast`, `Desert` or `Avoid [Tundra]`.
    #[serde(default)]
    pub start_bias: Vec<String>,
    /// Set for city-states, which are not placed by the starting location solver.
    #[serde(default)]
    pub city_state_type: Option<String>,
}

impl Name for Nation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Nation {
    pub fn is_city_state(&self) -> bool {
        self.city_state_type.is_some()
    }
}
