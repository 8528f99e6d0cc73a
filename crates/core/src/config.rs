use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines the shape of a hex grid. A grid is a rectangle
/// of `width` columns by `height` rows of flat-topped hexagons.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns (odd-q `q` ranges over `0..width`)
    #[validate(range(min = 0, max = 4096))]
    pub width: u32,

    /// Number of rows (odd-q `r` ranges over `0..height`)
    #[validate(range(min = 0, max = 4096))]
    pub height: u32,

    /// Size of a single hexagon in pixels, measured corner to corner. Must be
    /// positive, otherwise pixel conversions divide by zero.
    #[validate(range(min = 0.001, max = 1000000.0))]
    pub cell_size: f64,
}

/// Limits applied to a single route search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Give up after this many tiles have been expanded. `None` means the
    /// search runs until it either finds the destination or runs out of tiles
    /// to visit, which on a bounded grid always terminates.
    pub max_expansions: Option<usize>,
}

/// Configuration for generating a [TileMap](crate::TileMap). Two maps
/// generated from the same grid and config are always identical.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// RNG seed for tile visibility, obstacles and erosion.
    ///
    /// When deserializing a config, this field accepts either an integer that
    /// fits in a `u64`, or a string. Numeric strings are parsed, any other
    /// string (e.g. a game ID) is hashed. Anything else is an error.
    #[serde(deserialize_with = "serde_seed::deserialize")]
    pub seed: u64,

    /// Tiles further from the center of the map than this fraction of the
    /// maximum distance may start out hidden. The further out a tile is, the
    /// more likely it is to be hidden.
    #[validate(range(min = 0.0, max = 1.0))]
    pub erosion_fraction: f64,

    /// Chance that any given tile holds an obstacle (a tree, a rock...)
    #[validate(range(min = 0.0, max = 1.0))]
    pub obstacle_chance: f64,

    /// Number of distinct obstacle sprites to pick from
    #[validate(range(min = 1, max = 255))]
    pub obstacle_kinds: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            cell_size: 32.0,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            erosion_fraction: 0.65,
            obstacle_chance: 0.15,
            obstacle_kinds: 4,
        }
    }
}

mod serde_seed {
    use fnv::FnvHasher;
    use serde::{de::Visitor, Deserializer};
    use std::{
        convert::TryInto,
        fmt,
        hash::{Hash, Hasher},
    };

    /// Macro to make it easier to implement visit logic for different types
    macro_rules! impl_visit {
        ($fname:ident, $type:ty) => {
            fn $fname<E>(self, value: $type) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.try_into().map_err(|_| {
                    E::custom(format!("seed out of range: {}", value))
                })
            }
        };
    }

    struct SeedVisitor;

    impl<'de> Visitor<'de> for SeedVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer or a string")
        }

        impl_visit!(visit_u8, u8);
        impl_visit!(visit_u16, u16);
        impl_visit!(visit_u32, u32);
        impl_visit!(visit_u64, u64);
        impl_visit!(visit_i8, i8);
        impl_visit!(visit_i16, i16);
        impl_visit!(visit_i32, i32);
        impl_visit!(visit_i64, i64);

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            match value.parse::<u64>() {
                Ok(seed) => Ok(seed),
                Err(_) => {
                    let mut hasher = FnvHasher::default();
                    value.hash(&mut hasher);
                    Ok(hasher.finish())
                }
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Could be a number or a string, so no type hint
        deserializer.deserialize_any(SeedVisitor)
    }
}
