//! This module defines the [`Ruleset`] struct and its associated methods.
//! It loads the game rules the generator depends on from *JSON* files: terrains (base terrains,
//! features and natural wonders), tile resources, tile improvements and nations.
//!
//! Entries keep their definition order. Several stages depend on it: the first-defined terrain is the
//! climate fallback, and resources are placed in the order they are defined.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

pub mod nation;
pub mod terrain;
pub mod tile_improvement;
pub mod tile_resource;

use crate::{
    error::RulesetError,
    ruleset::{
        nation::Nation, terrain::Terrain, tile_improvement::TileImprovement,
        tile_resource::TileResource,
    },
};

pub trait Name {
    fn name(&self) -> &str;
}

/// Ruleset entries in definition order, addressable by name.
#[derive(Debug, Clone)]
pub struct NamedList<T> {
    items: Vec<T>,
    index_by_name: HashMap<String, usize>,
}

impl<T: Name> NamedList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut index_by_name = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            // The first definition of a name wins.
            index_by_name.entry(item.name().to_owned()).or_insert(index);
        }
        Self {
            items,
            index_by_name,
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index_by_name.get(name).map(|&index| &self.items[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_by_name.contains_key(name)
    }

    /// Iterates the entries in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn create_named_list_from_json<T: DeserializeOwned + Name>(
    file: &'static str,
    json: &str,
) -> Result<NamedList<T>, RulesetError> {
    let json_without_comments = strip_json_comments(json, true);
    let items: Vec<T> = serde_json::from_str(&json_without_comments)
        .map_err(|source| RulesetError::Parse { file, source })?;
    Ok(NamedList::new(items))
}

/// The JSON documents a [`Ruleset`] is built from.
#[derive(Debug, Clone, Copy)]
pub struct RulesetJson<'a> {
    pub terrains: &'a str,
    pub tile_resources: &'a str,
    pub tile_improvements: &'a str,
    pub nations: &'a str,
}

impl RulesetJson<'static> {
    /// The ruleset compiled into the crate.
    pub const BUILT_IN: Self = Self {
        terrains: include_str!("../jsons/Civ V - Vanilla/Terrains.json"),
        tile_resources: include_str!("../jsons/Civ V - Vanilla/TileResources.json"),
        tile_improvements: include_str!("../jsons/Civ V - Vanilla/TileImprovements.json"),
        nations: include_str!("../jsons/Civ V - Vanilla/Nations.json"),
    };
}

#[derive(Debug, Clone)]
pub struct Ruleset {
    pub terrains: NamedList<Terrain>,
    pub tile_resources: NamedList<TileResource>,
    pub tile_improvements: NamedList<TileImprovement>,
    pub nations: NamedList<Nation>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::from_json(RulesetJson::BUILT_IN).expect("the built-in ruleset is valid")
    }
}

impl Ruleset {
    pub fn from_json(json: RulesetJson<'_>) -> Result<Self, RulesetError> {
        Ok(Self {
            terrains: create_named_list_from_json("Terrains.json", json.terrains)?,
            tile_resources: create_named_list_from_json("TileResources.json", json.tile_resources)?,
            tile_improvements: create_named_list_from_json(
                "TileImprovements.json",
                json.tile_improvements,
            )?,
            nations: create_named_list_from_json("Nations.json", json.nations)?,
        })
    }

    pub fn terrain(&self, name: &str) -> Result<&Terrain, RulesetError> {
        self.terrains
            .get(name)
            .ok_or_else(|| RulesetError::UnknownTerrain(name.to_owned()))
    }

    pub fn tile_resource(&self, name: &str) -> Result<&TileResource, RulesetError> {
        self.tile_resources
            .get(name)
            .ok_or_else(|| RulesetError::UnknownResource(name.to_owned()))
    }

    pub fn nation(&self, name: &str) -> Result<&Nation, RulesetError> {
        self.nations
            .get(name)
            .ok_or_else(|| RulesetError::UnknownNation(name.to_owned()))
    }

    /// Whether any terrain declares the temperature and humidity range it occurs in.
    ///
    /// If one does, climate classification uses the declared ranges for all terrains.
    pub fn has_climate_ranges(&self) -> bool {
        self.terrains
            .iter()
            .any(|terrain| terrain.climate_ranges().next().is_some())
    }
}

/// Take a JSON string with comments and return the version without comments
/// which can be parsed well by serde_json as the standard JSON string.
/// Support line comment(//...) and block comment(/*...*/)
/// When `preserve_locations` is true, comments are replaced with spaces so that JSON parsing
/// errors can point to the right location.
pub fn strip_json_comments(json_with_comments: &str, preserve_locations: bool) -> String {
    let mut json_without_comments = String::with_capacity(json_with_comments.len());

    let mut block_comment_depth: u8 = 0;
    let mut is_in_string = false;

    for line in json_with_comments.lines() {
        let mut chars = line.chars().peekable();
        let mut last_char: Option<char> = None;

        while let Some(cur_char) = chars.next() {
            if block_comment_depth > 0 {
                if cur_char == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    block_comment_depth -= 1;
                    if preserve_locations {
                        json_without_comments.push_str("  ");
                    }
                } else if preserve_locations {
                    json_without_comments.push(' ');
                }
                continue;
            }

            if is_in_string {
                if cur_char == '"' && last_char != Some('\\') {
                    is_in_string = false;
                }
                json_without_comments.push(cur_char);
                last_char = if cur_char == '\\' && last_char == Some('\\') {
                    None
                } else {
                    Some(cur_char)
                };
                continue;
            }

            match (cur_char, chars.peek()) {
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    chars.next();
                    block_comment_depth += 1;
                    if preserve_locations {
                        json_without_comments.push_str("  ");
                    }
                }
                _ => {
                    if cur_char == '"' {
                        is_in_string = true;
                    }
                    json_without_comments.push(cur_char);
                }
            }
            last_char = Some(cur_char);
        }

        while json_without_comments.ends_with(' ') {
            json_without_comments.pop();
        }
        json_without_comments.push('\n');
    }

    json_without_comments
}

#[cfg(test)]
mod tests {
    use super::{Ruleset, RulesetJson, strip_json_comments};
    use crate::{
        error::RulesetError,
        tile_component::{BaseTerrain, Feature, ResourceType, TerrainType},
    };

    #[test]
    fn strip_comments_keeps_strings() {
        let json = "[ // line comment\n  \"a // not a comment\", /* block\n comment */ \"b\" ]";
        let stripped = strip_json_comments(json, false);
        let values: Vec<String> = serde_json::from_str(&stripped).unwrap();
        assert_eq!(vec!["a // not a comment", "b"], values);
    }

    #[test]
    fn built_in_ruleset_loads() {
        let ruleset = Ruleset::default();
        assert_eq!("Ocean", ruleset.terrains.first().unwrap().name);
        for base_terrain in [
            BaseTerrain::Ocean,
            BaseTerrain::Coast,
            BaseTerrain::Lake,
            BaseTerrain::Grassland,
            BaseTerrain::Plains,
            BaseTerrain::Desert,
            BaseTerrain::Tundra,
            BaseTerrain::Snow,
            BaseTerrain::Mountain,
        ] {
            assert!(ruleset.terrains.contains(base_terrain.name()));
        }
        assert_eq!(
            TerrainType::TerrainFeature,
            ruleset.terrain(Feature::Hill.name()).unwrap().r#type
        );
        assert!(ruleset.terrain(BaseTerrain::Mountain.name()).unwrap().impassable);
        assert!(ruleset.terrains.iter().any(|terrain| terrain.is_rare_feature()));
        assert!(
            ruleset
                .tile_resources
                .iter()
                .any(|resource| resource.resource_type == ResourceType::Strategic)
        );
        assert!(ruleset.tile_improvements.contains("Ancient ruins"));
        assert!(!ruleset.has_climate_ranges());
    }

    #[test]
    fn unknown_lookup_is_an_error() {
        let ruleset = Ruleset::default();
        assert!(matches!(
            ruleset.terrain("Volcano"),
            Err(RulesetError::UnknownTerrain(name)) if name == "Volcano"
        ));
        assert!(matches!(
            ruleset.tile_resource("Mithril"),
            Err(RulesetError::UnknownResource(_))
        ));
    }

    #[test]
    fn parse_error_names_the_file() {
        let json = RulesetJson {
            terrains: "[ { \"name\": \"Ocean\" } ]",
            ..RulesetJson::BUILT_IN
        };
        let error = Ruleset::from_json(json).unwrap_err();
        assert!(matches!(error, RulesetError::Parse { file: "Terrains.json", .. }));
    }
}
