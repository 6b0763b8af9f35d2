use thiserror::Error;

/// Errors surfaced by the top-level generation call.
#[derive(Debug, Error)]
pub enum MapGenerationError {
    /// The viable land cannot hold every civilization, even with adjacent starting tiles allowed.
    #[error(
        "cannot generate starting tiles for {civilization_num} civilizations on {viable_land_tile_num} viable land tiles, reduce the number of civilizations or increase the map size"
    )]
    CannotGenerateStartingTiles {
        civilization_num: usize,
        viable_land_tile_num: usize,
    },
}

/// Errors raised while loading a ruleset or looking up one of its entries.
///
/// A lookup of a name the ruleset does not define is an error. An absent tag (a tile without resource,
/// for example) is represented by `Option` at the call site instead.
#[derive(Debug, Error)]
pub enum RulesetError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown terrain `{0}`")]
    UnknownTerrain(String),
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
    #[error("unknown nation `{0}`")]
    UnknownNation(String),
}
