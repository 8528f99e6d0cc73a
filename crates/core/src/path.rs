//! Route finding across a [HexGrid]. The grid itself knows nothing about
//! which tiles can be walked on or how expensive a step is, so both are
//! supplied by the caller, via [Passable] and [EdgeCost].

use crate::{
    hex::{CubeTile, HexCoord, OddQ},
    util::cmp_unwrap,
    HexGrid, SearchConfig, TileIndex,
};
#[cfg(feature = "json")]
use anyhow::Context;
use derive_more::Display;
use fnv::FnvHashMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BinaryHeap};

/// Decides whether a tile can be part of a route
pub trait Passable {
    fn passable(&self, grid: &HexGrid, index: TileIndex) -> bool;
}

impl<F: Fn(&HexGrid, TileIndex) -> bool> Passable for F {
    fn passable(&self, grid: &HexGrid, index: TileIndex) -> bool {
        self(grid, index)
    }
}

/// Every tile on the grid is passable
#[derive(Copy, Clone, Debug, Default)]
pub struct AllPassable;

impl Passable for AllPassable {
    fn passable(&self, _: &HexGrid, _: TileIndex) -> bool {
        true
    }
}

/// The cost of stepping onto a tile while heading for a destination. The
/// search adds this to the accumulated cost of the tile it steps from, so it
/// acts as a per-tile weight rather than an estimate of the remaining
/// distance. Costs must be finite and non-negative, otherwise the search
/// fails with [PathError::InvalidEdgeCost].
pub trait EdgeCost {
    /// `to` is always the destination of the search, and `neighbor` is the
    /// tile being stepped onto
    fn cost(&self, grid: &HexGrid, to: TileIndex, neighbor: TileIndex) -> f64;
}

impl<F: Fn(&HexGrid, TileIndex, TileIndex) -> f64> EdgeCost for F {
    fn cost(&self, grid: &HexGrid, to: TileIndex, neighbor: TileIndex) -> f64 {
        self(grid, to, neighbor)
    }
}

/// Straight-line distance between the odd-q coordinates of the destination
/// and the tile being stepped onto, so tiles closer to the destination are
/// cheaper to walk on
#[derive(Copy, Clone, Debug, Default)]
pub struct OffsetDistance;

impl EdgeCost for OffsetDistance {
    fn cost(&self, grid: &HexGrid, to: TileIndex, neighbor: TileIndex) -> f64 {
        match (grid.index_to_offset(to), grid.index_to_offset(neighbor)) {
            (Some(a), Some(b)) => {
                HexCoord::<OddQ>::from(a).distance_to(&b.into())
            }
            // Unreachable for tiles handed out by the search, and rejected
            // as an invalid cost if it ever happens
            _ => f64::INFINITY,
        }
    }
}

/// Reasons a route can't be produced
#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum PathError {
    #[display(fmt = "tile {} is not on the grid", _0)]
    OutOfBounds(TileIndex),
    #[display(fmt = "destination tile is impassable")]
    DestinationImpassable,
    #[display(fmt = "start tile is impassable")]
    StartImpassable,
    #[display(fmt = "no route exists between the tiles")]
    NoPath,
    #[display(fmt = "search gave up after expanding {} tiles", expanded)]
    SearchAborted { expanded: usize },
    #[display(fmt = "invalid cost {} for step onto tile {}", cost, index)]
    InvalidEdgeCost { index: TileIndex, cost: f64 },
}

impl std::error::Error for PathError {}

/// A solved route between two tiles: every tile along the way, plus the
/// waypoints where the direction of travel changes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: TileIndex,
    pub to: TileIndex,
    pub path: Vec<TileIndex>,
    pub waypoints: Vec<TileIndex>,
}

impl Route {
    /// Deserialize a route from JSON, as produced by [Route::to_json]
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("error deserializing route")
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> String {
        // Panic here indicates an internal bug in the data format
        serde_json::to_string(self).expect("error serializing route")
    }
}

/// An entry in the search queue. Ordering is reversed so that the
/// [BinaryHeap] pops the cheapest entry first. Costs are validated before
/// they get here, so they're never NaN.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    cost: f64,
    index: TileIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_unwrap(&other.cost, &self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl HexGrid {
    /// Find the cheapest route between two tiles. See [HexGrid::path_with].
    pub fn path(
        &self,
        from: TileIndex,
        to: TileIndex,
        passable: &impl Passable,
        edge_cost: &impl EdgeCost,
    ) -> Result<Vec<TileIndex>, PathError> {
        self.path_with(from, to, passable, edge_cost, &SearchConfig::default())
    }

    /// Find the cheapest route between two tiles, where each step costs
    /// whatever `edge_cost` says it does. The returned route starts with
    /// `from`, ends with `to`, every consecutive pair is adjacent, and every
    /// tile in it is passable. If `from == to`, the route is just that tile.
    pub fn path_with(
        &self,
        from: TileIndex,
        to: TileIndex,
        passable: &impl Passable,
        edge_cost: &impl EdgeCost,
        config: &SearchConfig,
    ) -> Result<Vec<TileIndex>, PathError> {
        for index in [from, to] {
            if !self.contains(index) {
                return Err(PathError::OutOfBounds(index));
            }
        }
        if !passable.passable(self, to) {
            return Err(PathError::DestinationImpassable);
        }
        if from == to {
            return Ok(vec![from]);
        }
        if !passable.passable(self, from) {
            return Err(PathError::StartImpassable);
        }

        let mut queue = BinaryHeap::new();
        let mut costs: FnvHashMap<TileIndex, f64> = FnvHashMap::default();
        let mut came_from: FnvHashMap<TileIndex, TileIndex> =
            FnvHashMap::default();
        let mut expanded = 0;

        queue.push(Frontier {
            cost: 0.0,
            index: from,
        });
        costs.insert(from, 0.0);

        while let Some(Frontier { cost, index }) = queue.pop() {
            if index == to {
                let path = reconstruct(&came_from, from, to);
                debug!(
                    "Found route {} -> {} with {} tiles, cost {:.3}, \
                     expanded {} tiles",
                    from,
                    to,
                    path.len(),
                    cost,
                    expanded
                );
                return Ok(path);
            }

            // We already found a cheaper way here, this entry is stale
            if costs.get(&index).map_or(false, |&best| cost > best) {
                continue;
            }

            if let Some(max) = config.max_expansions {
                if expanded >= max {
                    debug!(
                        "Abandoned route {} -> {} after expanding {} tiles",
                        from, to, expanded
                    );
                    return Err(PathError::SearchAborted { expanded });
                }
            }
            expanded += 1;

            for neighbor in self.neighbors(index) {
                if !passable.passable(self, neighbor) {
                    continue;
                }

                let step = edge_cost.cost(self, to, neighbor);
                if !step.is_finite() || step < 0.0 {
                    return Err(PathError::InvalidEdgeCost {
                        index: neighbor,
                        cost: step,
                    });
                }

                let new_cost = cost + step;
                let improved = costs
                    .get(&neighbor)
                    .map_or(true, |&old_cost| new_cost < old_cost);
                if improved {
                    trace!(
                        "Relaxed {} via {} to {:.3}",
                        neighbor,
                        index,
                        new_cost
                    );
                    costs.insert(neighbor, new_cost);
                    came_from.insert(neighbor, index);
                    queue.push(Frontier {
                        cost: new_cost,
                        index: neighbor,
                    });
                }
            }
        }

        debug!(
            "No route {} -> {}, expanded {} tiles",
            from, to, expanded
        );
        Err(PathError::NoPath)
    }

    /// Find a route between two tiles and reduce it to the tiles where the
    /// direction of travel changes, plus both endpoints. See
    /// [compress_waypoints].
    pub fn waypoints(
        &self,
        from: TileIndex,
        to: TileIndex,
        passable: &impl Passable,
        edge_cost: &impl EdgeCost,
    ) -> Result<Vec<TileIndex>, PathError> {
        self.waypoints_with(
            from,
            to,
            passable,
            edge_cost,
            &SearchConfig::default(),
        )
    }

    pub fn waypoints_with(
        &self,
        from: TileIndex,
        to: TileIndex,
        passable: &impl Passable,
        edge_cost: &impl EdgeCost,
        config: &SearchConfig,
    ) -> Result<Vec<TileIndex>, PathError> {
        let path = self.path_with(from, to, passable, edge_cost, config)?;
        Ok(self.compress_path(&path))
    }

    /// Find a route and its waypoints with a single search
    pub fn route(
        &self,
        from: TileIndex,
        to: TileIndex,
        passable: &impl Passable,
        edge_cost: &impl EdgeCost,
        config: &SearchConfig,
    ) -> Result<Route, PathError> {
        let path = self.path_with(from, to, passable, edge_cost, config)?;
        let waypoints = self.compress_path(&path);
        Ok(Route {
            from,
            to,
            path,
            waypoints,
        })
    }

    /// Reduce a route of tile indices to its waypoints
    fn compress_path(&self, path: &[TileIndex]) -> Vec<TileIndex> {
        let cubes: Vec<CubeTile> = path
            .iter()
            .filter_map(|&index| self.index_to_cube(index))
            .collect();
        waypoint_positions(&cubes)
            .into_iter()
            .map(|i| path[i])
            .collect()
    }
}

/// Reduce a route of adjacent tiles to its waypoints: the first tile, the
/// last tile, and every tile where the step direction changes. Walking in a
/// straight line between consecutive waypoints retraces the full route.
pub fn compress_waypoints(path: &[CubeTile]) -> Vec<CubeTile> {
    waypoint_positions(path)
        .into_iter()
        .map(|i| path[i])
        .collect()
}

/// Positions within the route that are waypoints, in order
fn waypoint_positions(path: &[CubeTile]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut last_delta = CubeTile::ORIGIN;
    for (i, tile) in path.iter().enumerate() {
        match path.get(i + 1) {
            None => positions.push(i),
            Some(next) => {
                let delta = *next - *tile;
                if delta != last_delta {
                    positions.push(i);
                    last_delta = delta;
                }
            }
        }
    }
    positions
}

/// Walk the predecessor chain back from the destination
fn reconstruct(
    came_from: &FnvHashMap<TileIndex, TileIndex>,
    from: TileIndex,
    to: TileIndex,
) -> Vec<TileIndex> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match came_from.get(&current) {
            Some(&previous) => {
                path.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
