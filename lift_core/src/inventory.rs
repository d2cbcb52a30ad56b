//! Equipment inventories and achievable-weight enumeration.
//!
//! An inventory is a bounded multiset of plates. The achievable weights are
//! every positive total assemblable by taking 0..=count of each plate.
//! Enumeration processes one plate spec at a time against a growing set of
//! reachable partial sums, which bounds the work by
//! (distinct sums) x (specs) instead of 2^(total plates).

use crate::types::{to_centi, AchievableWeightSet, Inventory, PlateSpec};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

/// Cached standard barbell plate set - built once and reused.
///
/// Used when the user has enabled equipment-constrained adjustment but
/// has not listed their own plates.
static STANDARD_INVENTORY: Lazy<Inventory> = Lazy::new(|| {
    Inventory::new(vec![
        PlateSpec { weight: 45.0, count: 2 },
        PlateSpec { weight: 35.0, count: 2 },
        PlateSpec { weight: 25.0, count: 2 },
        PlateSpec { weight: 10.0, count: 2 },
        PlateSpec { weight: 5.0, count: 2 },
        PlateSpec { weight: 2.5, count: 2 },
    ])
    .expect("standard plate set is valid")
});

/// Get a reference to the cached standard plate inventory
pub fn standard_inventory() -> &'static Inventory {
    &STANDARD_INVENTORY
}

impl PlateSpec {
    /// Validated plate entry: positive weight on the 0.01 grid, count >= 1
    pub fn new(weight: f64, count: u32) -> Result<Self> {
        let spec = Self { weight, count };
        spec.validate()?;
        Ok(spec)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.weight.is_finite()
            || self.weight <= 0.0
            || to_centi(self.weight) == 0
            || self.count == 0
        {
            return Err(Error::InvalidPlateSpec {
                weight: self.weight,
                count: self.count,
            });
        }
        Ok(())
    }
}

impl Inventory {
    /// Build a validated inventory from plate entries.
    ///
    /// Rejects any entry with a non-positive weight or a zero count rather
    /// than silently filtering it. Duplicate weights are merged by summing
    /// counts; the stored representation is sorted ascending, so inventories
    /// built from the same plates hash and compare equal regardless of input
    /// order.
    pub fn new(specs: Vec<PlateSpec>) -> Result<Self> {
        let mut merged: BTreeMap<u64, u32> = BTreeMap::new();
        for spec in &specs {
            spec.validate()?;
            *merged.entry(to_centi(spec.weight)).or_insert(0) += spec.count;
        }

        let plates = merged
            .into_iter()
            .map(|(centi, count)| PlateSpec {
                weight: crate::types::from_centi(centi),
                count,
            })
            .collect();

        Ok(Self { plates })
    }

    /// Merged, ascending plate entries
    pub fn plates(&self) -> &[PlateSpec] {
        &self.plates
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    /// Total weight with every plate loaded
    pub fn total_weight(&self) -> f64 {
        self.plates
            .iter()
            .map(|p| p.weight * f64::from(p.count))
            .sum()
    }

    /// Number of individual plates across all entries
    pub fn unit_count(&self) -> u32 {
        self.plates.iter().map(|p| p.count).sum()
    }

    /// Hash of the merged content, usable as a cache key.
    ///
    /// In-memory key only; not stable across program runs.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for plate in &self.plates {
            (to_centi(plate.weight), plate.count).hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Enumerate every achievable positive total for this inventory.
    ///
    /// Bounded multiset subset-sum: for each plate spec, union the current
    /// sums with copies offset by weight, 2*weight, ..., count*weight. The
    /// empty selection (total 0) is excluded from the result.
    pub fn reachable_sums(&self) -> AchievableWeightSet {
        let mut sums: BTreeSet<u64> = BTreeSet::new();
        sums.insert(0);

        for plate in &self.plates {
            let weight = to_centi(plate.weight);
            let base: Vec<u64> = sums.iter().copied().collect();
            for k in 1..=u64::from(plate.count) {
                let offset = weight * k;
                for sum in &base {
                    sums.insert(sum + offset);
                }
            }
        }

        sums.remove(&0);
        tracing::debug!(
            "Enumerated {} achievable weights from {} plate entries",
            sums.len(),
            self.plates.len()
        );
        AchievableWeightSet::from_centi(sums.into_iter().collect())
    }
}

impl TryFrom<Vec<PlateSpec>> for Inventory {
    type Error = Error;

    fn try_from(specs: Vec<PlateSpec>) -> Result<Self> {
        Self::new(specs)
    }
}

impl From<Inventory> for Vec<PlateSpec> {
    fn from(inventory: Inventory) -> Self {
        inventory.plates
    }
}

/// Memo cache for reachable-sum sets, keyed by inventory content.
///
/// Enumeration is the expensive step relative to everything else in the
/// engine, and a session batch frequently repeats the same inventory.
#[derive(Debug, Default)]
pub struct SumCache {
    sets: HashMap<u64, AchievableWeightSet>,
}

impl SumCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reachable sums for `inventory`, computed on first use
    pub fn reachable(&mut self, inventory: &Inventory) -> &AchievableWeightSet {
        let key = inventory.content_hash();
        self.sets.entry(key).or_insert_with(|| {
            tracing::debug!("Sum cache miss for inventory {key:#018x}");
            inventory.reachable_sums()
        })
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
