use serde::{Deserialize, Serialize};

/// The terrain features the generation stages reason about by identity.
///
/// Rare features are not listed here, they are whatever the ruleset flags with [`Feature::RARE_FEATURE_UNIQUE`].
#[derive(PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug)]
pub enum Feature {
    Hill,
    Forest,
    Jungle,
    Ice,
}

impl Feature {
    /// Features that vegetation placement chooses from.
    pub const VEGETATION: [Feature; 2] = [Feature::Forest, Feature::Jungle];

    pub const RARE_FEATURE_UNIQUE: &'static str = "Rare feature";

    pub const fn name(&self) -> &'static str {
        match self {
            Feature::Hill => "Hill",
            Feature::Forest => "Forest",
            Feature::Jungle => "Jungle",
            Feature::Ice => "Ice",
        }
    }
}
