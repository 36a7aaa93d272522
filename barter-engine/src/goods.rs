//! Static catalog of tradable goods.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of goods in the catalog; also the width of an inventory vector.
pub const GOOD_COUNT: usize = 10;

/// Scarcity class of a good. Ordered from most to least plentiful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Common,
    Uncommon,
    Rare,
}

impl Tier {
    /// Numeric rank used for tier-gap arithmetic.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Common => 0,
            Self::Uncommon => 1,
            Self::Rare => 2,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }
}

/// Dense identifier of a catalog good.
///
/// The discriminant doubles as the stable ordering index used to
/// canonicalize trade keys and to order the goods of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodId {
    Wheat,
    Timber,
    Clay,
    Wool,
    Fish,
    Iron,
    Salt,
    Silk,
    Spice,
    Amber,
}

impl GoodId {
    /// Every good in catalog order.
    pub const ALL: [Self; GOOD_COUNT] = [
        Self::Wheat,
        Self::Timber,
        Self::Clay,
        Self::Wool,
        Self::Fish,
        Self::Iron,
        Self::Salt,
        Self::Silk,
        Self::Spice,
        Self::Amber,
    ];

    /// Position in the catalog and in inventory vectors.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Timber => "timber",
            Self::Clay => "clay",
            Self::Wool => "wool",
            Self::Fish => "fish",
            Self::Iron => "iron",
            Self::Salt => "salt",
            Self::Silk => "silk",
            Self::Spice => "spice",
            Self::Amber => "amber",
        }
    }

    #[must_use]
    pub fn good(self) -> &'static Good {
        &CATALOG[self.index()]
    }

    #[must_use]
    pub fn tier(self) -> Tier {
        self.good().tier
    }
}

impl fmt::Display for GoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raised when a string does not name a catalog good.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown good id: {0}")]
pub struct GoodParseError(pub String);

impl FromStr for GoodId {
    type Err = GoodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GoodParseError(wanted.to_string()))
    }
}

/// A tradable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Good {
    pub id: GoodId,
    pub display_name: &'static str,
    pub tier: Tier,
}

const fn good(id: GoodId, display_name: &'static str, tier: Tier) -> Good {
    Good {
        id,
        display_name,
        tier,
    }
}

/// The closed catalog, indexed by [`GoodId::index`].
pub static CATALOG: [Good; GOOD_COUNT] = [
    good(GoodId::Wheat, "Wheat", Tier::Common),
    good(GoodId::Timber, "Timber", Tier::Common),
    good(GoodId::Clay, "Clay", Tier::Common),
    good(GoodId::Wool, "Wool", Tier::Common),
    good(GoodId::Fish, "Fish", Tier::Common),
    good(GoodId::Iron, "Iron", Tier::Uncommon),
    good(GoodId::Salt, "Salt", Tier::Uncommon),
    good(GoodId::Silk, "Silk", Tier::Rare),
    good(GoodId::Spice, "Spice", Tier::Rare),
    good(GoodId::Amber, "Amber", Tier::Rare),
];

/// Look up a good. Ids come from the closed catalog so there is no error path.
#[must_use]
pub fn by_id(id: GoodId) -> &'static Good {
    id.good()
}

/// Ids of every good in `tier`, in catalog order.
#[must_use]
pub fn by_tier(tier: Tier) -> Vec<GoodId> {
    GoodId::ALL
        .iter()
        .copied()
        .filter(|id| id.tier() == tier)
        .collect()
}

/// Sort ids into catalog order and drop duplicates.
#[must_use]
pub fn in_catalog_order(ids: &[GoodId]) -> Vec<GoodId> {
    let mut ordered = ids.to_vec();
    ordered.sort_unstable();
    ordered.dedup();
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_id() {
        for (index, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.id.index(), index);
            assert_eq!(GoodId::from_index(index), Some(entry.id));
        }
        assert_eq!(GoodId::from_index(GOOD_COUNT), None);
    }

    #[test]
    fn tiers_partition_five_two_three() {
        assert_eq!(by_tier(Tier::Common).len(), 5);
        assert_eq!(by_tier(Tier::Uncommon).len(), 2);
        assert_eq!(by_tier(Tier::Rare).len(), 3);
        assert!(Tier::Common < Tier::Uncommon && Tier::Uncommon < Tier::Rare);
    }

    #[test]
    fn ids_parse_and_display() {
        assert_eq!("Salt".parse::<GoodId>(), Ok(GoodId::Salt));
        assert_eq!(GoodId::Amber.to_string(), "amber");
        assert!("copper".parse::<GoodId>().is_err());
        assert_eq!(by_id(GoodId::Silk).display_name, "Silk");
    }

    #[test]
    fn catalog_order_is_stable() {
        let ordered = in_catalog_order(&[GoodId::Amber, GoodId::Wheat, GoodId::Iron, GoodId::Wheat]);
        assert_eq!(ordered, vec![GoodId::Wheat, GoodId::Iron, GoodId::Amber]);
    }
}
