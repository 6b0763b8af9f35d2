use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// The category of a resource. Each category is placed in its own round.
#[derive(Enum, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug)]
pub enum ResourceType {
    Strategic,
    Luxury,
    Bonus,
}
