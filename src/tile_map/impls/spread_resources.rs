use enum_map::EnumMap;
use tracing::{debug, warn};

use crate::{
    map_parameters::MapParameters,
    randomness::MapRandomness,
    ruleset::{Ruleset, tile_resource::TileResource},
    tile::Tile,
    tile_component::{BaseTerrain, Improvement, ResourceType},
    tile_map::TileMap,
};

impl TileMap {
    /// Clears every resource, then places strategic, luxury and bonus resources in that order.
    ///
    /// Resources are spread out with the characteristic radius of the map as the initial distance.
    pub fn spread_resources(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let distance = self.characteristic_radius();
        self.resource_list.fill(None);

        let mut placed_resources: EnumMap<ResourceType, usize> = EnumMap::default();
        placed_resources[ResourceType::Strategic] =
            self.spread_strategic_resources(map_parameters, ruleset, randomness, distance);
        for resource_type in [ResourceType::Luxury, ResourceType::Bonus] {
            (placed_resources[resource_type], _) = self.spread_resources_of_type(
                map_parameters,
                ruleset,
                randomness,
                distance,
                resource_type,
            );
        }

        debug!(?placed_resources, "Resources spread");
    }

    /// Spreads every strategic resource over the map on its own.
    ///
    /// The quota `passable land tiles * resource_richness` is shared evenly between the strategic resources.
    /// Returns the number of tiles that got a strategic resource.
    fn spread_strategic_resources(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
        distance: u32,
    ) -> usize {
        let strategic_resources: Vec<&TileResource> = ruleset
            .tile_resources
            .iter()
            .filter(|resource| resource.resource_type == ResourceType::Strategic)
            .collect();
        if strategic_resources.is_empty() {
            warn!("The ruleset has no strategic resource");
            return 0;
        }

        let candidate_tiles: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| tile.resource(self).is_none() && !tile.is_impassable(self, ruleset))
            .collect();
        let total_number_of_resources = candidate_tiles
            .iter()
            .filter(|tile| tile.is_land(self))
            .count() as f64
            * map_parameters.resource_richness;
        let resources_per_type =
            (total_number_of_resources / strategic_resources.len() as f64) as usize;

        let mut placed = 0;
        for resource in strategic_resources {
            let suitable_tiles: Vec<Tile> = candidate_tiles
                .iter()
                .copied()
                .filter(|&tile| self.can_hold_resource(tile, resource))
                .collect();

            let (locations, final_distance) = randomness.choose_spread_out_locations(
                resources_per_type,
                &suitable_tiles,
                distance,
                self,
            );

            debug!(
                resource = %resource.name,
                placed = locations.len(),
                distance = final_distance,
                "Strategic resource spread"
            );

            placed += locations.len();
            for tile in locations {
                tile.set_resource(self, Some(&resource.name));
            }
        }
        placed
    }

    /// Spreads all resources of `resource_type` in one round.
    ///
    /// The quota is `passable land tiles * resource_richness`. Each chosen tile gets the resource with
    /// the fewest assignments so far among the ones that can be found on its top terrain.
    /// Returns the number of tiles that got a resource and the distance the picks keep from each other.
    fn spread_resources_of_type(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
        distance: u32,
        resource_type: ResourceType,
    ) -> (usize, u32) {
        let resources_of_type: Vec<&TileResource> = ruleset
            .tile_resources
            .iter()
            .filter(|resource| resource.resource_type == resource_type)
            .collect();
        if resources_of_type.is_empty() {
            warn!("The ruleset has no {resource_type:?} resource");
            return (0, distance);
        }

        let suitable_tiles: Vec<Tile> = self
            .all_tiles()
            .filter(|&tile| {
                resources_of_type
                    .iter()
                    .any(|resource| self.can_hold_resource(tile, resource))
            })
            .collect();
        let number_of_resources = (self
            .all_tiles()
            .filter(|tile| tile.is_land(self) && !tile.is_impassable(self, ruleset))
            .count() as f64
            * map_parameters.resource_richness) as usize;

        let (locations, final_distance) = randomness.choose_spread_out_locations(
            number_of_resources,
            &suitable_tiles,
            distance,
            self,
        );

        let mut assignment_count = vec![0; resources_of_type.len()];
        for &tile in &locations {
            let last_terrain = tile.last_terrain(self);
            let resource_with_least_assignments = resources_of_type
                .iter()
                .enumerate()
                .filter(|(_, resource)| resource.can_be_found_on(last_terrain))
                .min_by_key(|&(index, _)| assignment_count[index]);

            if let Some((index, resource)) = resource_with_least_assignments {
                assignment_count[index] += 1;
                tile.set_resource(self, Some(&resource.name));
            }
        }

        debug!(
            ?resource_type,
            placed = locations.len(),
            distance = final_distance,
            "Resource category spread"
        );

        (locations.len(), final_distance)
    }

    /// Scatters ancient ruins over passable land, one per 50 tiles, at least 10 steps apart where possible.
    ///
    /// Nothing is placed when [`MapParameters::no_ruins`] is set or the ruleset has no ancient ruins.
    pub fn spread_ancient_ruins(
        &mut self,
        map_parameters: &MapParameters,
        ruleset: &Ruleset,
        randomness: &mut MapRandomness,
    ) {
        let ancient_ruins = Improvement::AncientRuins.name();
        if map_parameters.no_ruins || !ruleset.tile_improvements.contains(&ancient_ruins) {
            return;
        }

        let suitable_tiles: Vec<Tile> = self
            .all_tiles()
            .filter(|tile| tile.is_land(self) && !tile.is_impassable(self, ruleset))
            .collect();

        let (locations, _) = randomness.choose_spread_out_locations(
            suitable_tiles.len() / 50,
            &suitable_tiles,
            10,
            self,
        );

        debug!(ancient_ruins = locations.len(), "Ancient ruins spread");

        for tile in locations {
            tile.set_improvement(self, Some(&ancient_ruins));
        }
    }

    /// Whether `resource` may be placed on `tile`: the tile has no resource, is not a snowy hill,
    /// and the resource can be found on its top terrain.
    fn can_hold_resource(&self, tile: Tile, resource: &TileResource) -> bool {
        tile.resource(self).is_none()
            && !(tile.base_terrain_is(self, BaseTerrain::Snow) && tile.is_hill(self))
            && resource.can_be_found_on(tile.last_terrain(self))
    }
}
