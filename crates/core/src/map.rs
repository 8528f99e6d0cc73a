use crate::{HexCoord, HexGrid, MapConfig, OddQ, Passable, TileIndex};
use anyhow::{ensure, Context};
use fnv::{FnvBuildHasher, FnvHashSet};
use indexmap::IndexSet;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use validator::Validate;

/// Tiles bucketed by their (floored) distance from the center of the map
type Ring = IndexSet<TileIndex, FnvBuildHasher>;

/// Largest patch of raised tiles grown from a single seed tile
const RAISED_PATCH_SIZE: usize = 5;

/// Attempts at finding a visible tile to seed a raised patch from, before
/// giving up on raised tiles altogether
const RAISED_SEED_ATTEMPTS: usize = 10;

/// The lifecycle of a single tile. Tiles start out either hidden or visible,
/// and erosion moves them along towards sinking.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileState {
    /// Not part of the playable map
    Hidden,
    Visible,
    /// Visible, and drawn glowing to draw the player's attention
    Highlighted,
    /// About to collapse, but still standing
    Shaking,
    /// Collapsed
    Sinking,
    /// A raised bump on the map
    Raised,
}

impl TileState {
    /// Can something stand on a tile in this state?
    pub fn is_passable(self) -> bool {
        match self {
            Self::Visible
            | Self::Highlighted
            | Self::Raised
            | Self::Shaking => true,
            Self::Hidden | Self::Sinking => false,
        }
    }
}

/// Per-tile state for a single [HexGrid], stored in flat arrays indexed by
/// [TileIndex]. The map also tracks which tiles are still standing, grouped
/// into rings by distance from the center, so that [TileMap::erode] can
/// shrink the playable area from the outside in.
#[derive(Clone, Debug)]
pub struct TileMap {
    grid: HexGrid,
    states: Vec<TileState>,
    obstacles: Vec<Option<u8>>,
    /// Standing tiles, by ring. The outermost ring is last.
    rings: Vec<Ring>,
    /// Separate RNG for erosion, so the erosion sequence doesn't depend on
    /// how many numbers generation happened to consume
    erode_rng: Pcg64,
}

impl TileMap {
    /// Generate a new map for the grid. The output is fully determined by the
    /// grid and the config's seed.
    pub fn generate(
        grid: &HexGrid,
        config: &MapConfig,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid map config")?;
        ensure!(
            !config.erosion_fraction.is_nan()
                && !config.obstacle_chance.is_nan(),
            "map config fractions cannot be NaN"
        );

        let map = crate::timed!("Map generation", {
            let mut rng = Pcg64::seed_from_u64(config.seed);
            let mut map = Self {
                grid: *grid,
                states: vec![TileState::Hidden; grid.len()],
                obstacles: vec![None; grid.len()],
                rings: Vec::new(),
                erode_rng: rng.clone(),
            };
            map.generate_tiles(config, &mut rng);
            map.generate_raised_tiles(&mut rng);
            map
        });

        info!(
            "Generated {}x{} map with {} passable tiles in {} rings",
            grid.width(),
            grid.height(),
            map.passable_count(),
            map.rings.len()
        );
        Ok(map)
    }

    /// Decide the initial state and obstacle of every tile. Tiles near the
    /// edge of the map are increasingly likely to start out hidden.
    fn generate_tiles(&mut self, config: &MapConfig, rng: &mut Pcg64) {
        let (width, height) = (self.grid.width(), self.grid.height());
        let center =
            HexCoord::<OddQ>::new(width as f64 / 2.0, height as f64 / 2.0, 0.0);
        let max_magnitude =
            HexCoord::<OddQ>::new(width as f64, height as f64, 0.0).length()
                / 2.0;
        let erosion_magnitude = max_magnitude * config.erosion_fraction;

        for index in self.grid.indices() {
            let offset = match self.grid.index_to_offset(index) {
                Some(offset) => offset,
                None => continue,
            };
            let magnitude =
                (HexCoord::<OddQ>::from(offset) - center).length();

            let hidden = magnitude > erosion_magnitude && {
                let delta = (erosion_magnitude - magnitude).abs();
                rng.gen::<f64>() < 0.5 + delta / erosion_magnitude
            };
            let state = if hidden {
                TileState::Hidden
            } else {
                TileState::Visible
            };

            let obstacle = if rng.gen_bool(config.obstacle_chance) {
                Some(rng.gen_range(0..config.obstacle_kinds))
            } else {
                None
            };

            if !hidden {
                let ring = magnitude.floor() as usize;
                if self.rings.len() <= ring {
                    self.rings.resize_with(ring + 1, Ring::default);
                }
                self.rings[ring].insert(index);
            }

            self.states[index.0] = state;
            self.obstacles[index.0] = obstacle;
        }
    }

    /// Scatter small patches of raised tiles around the visible part of the
    /// map, roughly one patch per 64 tiles
    fn generate_raised_tiles(&mut self, rng: &mut Pcg64) {
        let len = self.grid.len();
        if len == 0 {
            return;
        }

        let mut visited = FnvHashSet::default();
        for _ in 0..len / 64 {
            let seed = match (0..RAISED_SEED_ATTEMPTS)
                .map(|_| TileIndex(rng.gen_range(0..len)))
                .find(|&index| self.states[index.0] == TileState::Visible)
            {
                Some(index) => index,
                // The map is mostly hidden, don't bother
                None => return,
            };

            let mut frontier = vec![seed];
            let mut size = 0;
            while size < RAISED_PATCH_SIZE {
                let index = match frontier.pop() {
                    Some(index) => index,
                    None => break,
                };
                if rng.gen_bool(0.5)
                    && !visited.contains(&index)
                    && self.obstacles[index.0].is_none()
                    && self.states[index.0] == TileState::Visible
                {
                    self.states[index.0] = TileState::Raised;
                    visited.insert(index);
                    size += 1;
                    frontier.extend(self.grid.neighbors(index));
                }
            }
        }
    }

    /// The grid this map was generated for
    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Get the state of a tile, or `None` if it's not on the map
    pub fn state(&self, index: TileIndex) -> Option<TileState> {
        self.states.get(index.0).copied()
    }

    /// Change the state of a tile. Returns the previous state, or `None` if
    /// the tile isn't on the map (in which case nothing changes).
    pub fn set_state(
        &mut self,
        index: TileIndex,
        state: TileState,
    ) -> Option<TileState> {
        let slot = self.states.get_mut(index.0)?;
        Some(std::mem::replace(slot, state))
    }

    /// Get the obstacle sprite on a tile. `None` if there is no obstacle, or
    /// the tile isn't on the map.
    pub fn obstacle(&self, index: TileIndex) -> Option<u8> {
        self.obstacles.get(index.0).copied().flatten()
    }

    /// Place or clear an obstacle. Returns `false` if the tile isn't on the
    /// map.
    pub fn set_obstacle(
        &mut self,
        index: TileIndex,
        obstacle: Option<u8>,
    ) -> bool {
        match self.obstacles.get_mut(index.0) {
            Some(slot) => {
                *slot = obstacle;
                true
            }
            None => false,
        }
    }

    /// Can something stand on this tile right now?
    pub fn is_passable(&self, index: TileIndex) -> bool {
        self.state(index).map_or(false, TileState::is_passable)
            && self.obstacle(index).is_none()
    }

    /// Number of tiles that are currently passable
    pub fn passable_count(&self) -> usize {
        self.grid
            .indices()
            .filter(|&index| self.is_passable(index))
            .count()
    }

    /// Number of rings that still hold standing tiles
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Erode a random handful of tiles from the outermost ring. Standing tiles
    /// start shaking, and tiles that are already shaking sink and leave the
    /// ring. Once a ring is empty, erosion moves on to the next one in. The
    /// more rings remain, the more tiles can erode in a single step.
    ///
    /// Returns the tiles that changed state, in order.
    pub fn erode(&mut self) -> Vec<TileIndex> {
        let max_eroded = (self.rings.len() + 4) / 5 * 3;
        if max_eroded == 0 {
            return Vec::new();
        }

        let attempts = self.erode_rng.gen_range(0..max_eroded);
        let mut changed = Vec::new();
        for _ in 0..attempts {
            let ring = match self.rings.last_mut() {
                Some(ring) => ring,
                None => break,
            };
            if ring.is_empty() {
                self.rings.pop();
                continue;
            }

            let position = self.erode_rng.gen_range(0..ring.len());
            let index = match ring.get_index(position) {
                Some(&index) => index,
                None => continue,
            };
            let state = &mut self.states[index.0];
            match state {
                TileState::Visible
                | TileState::Highlighted
                | TileState::Raised => {
                    *state = TileState::Shaking;
                    changed.push(index);
                }
                TileState::Shaking => {
                    ring.shift_remove_index(position);
                    *state = TileState::Sinking;
                    changed.push(index);
                }
                // Someone else already took this tile out, drop it
                TileState::Hidden | TileState::Sinking => {
                    ring.shift_remove_index(position);
                }
            }

            if ring.is_empty() {
                self.rings.pop();
            }
        }

        debug!(
            "Eroded {} tiles, {} rings remain",
            changed.len(),
            self.rings.len()
        );
        changed
    }

    /// Pick a random passable tile that's comfortably inside the map, away
    /// from both the eroding edge and the very center. Useful for spawning
    /// things. Returns `None` if nothing suitable turns up.
    pub fn random_habitable_tile(
        &self,
        rng: &mut impl Rng,
    ) -> Option<TileIndex> {
        let rings = self.rings.len();
        let min_ring = rings / 4;
        let max_ring = rings.saturating_sub(10).max(2).min(rings);
        if min_ring >= max_ring {
            return None;
        }

        for _ in 0..self.grid.len() {
            let ring = &self.rings[rng.gen_range(min_ring..max_ring)];
            if ring.is_empty() {
                continue;
            }
            let index = ring.get_index(rng.gen_range(0..ring.len()))?;
            if self.state(*index) == Some(TileState::Visible)
                && self.obstacle(*index).is_none()
            {
                return Some(*index);
            }
        }
        debug!("No habitable tile found");
        None
    }

    /// Pick a random passable tile on a ring of random radius (at least 1,
    /// less than `max_radius`) around a tile. Falls back to the tile itself
    /// if nothing on the ring is passable.
    pub fn random_nearby_passable_tile(
        &self,
        index: TileIndex,
        max_radius: u32,
        rng: &mut impl Rng,
    ) -> TileIndex {
        let radius = if max_radius > 2 {
            rng.gen_range(1..max_radius)
        } else {
            1
        };
        let mut ring: Vec<TileIndex> = self
            .grid
            .index_to_ring_indices(index, radius)
            .into_iter()
            .flatten()
            .collect();

        while !ring.is_empty() {
            let candidate = ring.swap_remove(rng.gen_range(0..ring.len()));
            if self.state(candidate) == Some(TileState::Visible)
                && self.obstacle(candidate).is_none()
            {
                return candidate;
            }
        }
        index
    }
}

impl Passable for TileMap {
    fn passable(&self, _: &HexGrid, index: TileIndex) -> bool {
        self.is_passable(index)
    }
}
