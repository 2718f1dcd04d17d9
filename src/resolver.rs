// 📍 ZIP Resolver - target ZIP → SLCSP or a reason why not
//
// A ZIP gets a rate only when every mapping row for it points at the same
// (state, rate_area) and that area has a second-lowest Silver rate. All
// other outcomes are normal results, never errors.

use crate::aggregate::SecondLowestRates;
use crate::model::{RateAreaKey, TargetZip, ZipEntry};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// RESOLUTION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Single rate area with a second-lowest Silver rate
    Resolved(Decimal),

    /// ZIP spans more than one rate area
    Ambiguous { rate_areas: Vec<RateAreaKey> },

    /// Single rate area, but fewer than two distinct Silver rates in it
    NoSecondLowest(RateAreaKey),

    /// ZIP does not appear in the mapping at all
    Unmapped,
}

impl Resolution {
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            Resolution::Resolved(rate) => Some(*rate),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// A target row after resolution, `target.rate` filled from `resolution`
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZip {
    pub target: TargetZip,
    pub resolution: Resolution,
}

// ============================================================================
// ZIP INDEX
// ============================================================================

/// Distinct rate areas per ZIP code, built once from the mapping table
#[derive(Debug, Clone, Default)]
pub struct ZipIndex {
    areas: HashMap<String, BTreeSet<RateAreaKey>>,
}

impl ZipIndex {
    pub fn build(zips: &[ZipEntry]) -> Self {
        let mut areas: HashMap<String, BTreeSet<RateAreaKey>> = HashMap::new();
        for zip in zips {
            areas.entry(zip.zipcode.clone()).or_default().insert(zip.key());
        }
        ZipIndex { areas }
    }

    /// Distinct rate areas for a ZIP; empty when the ZIP is unknown
    pub fn rate_areas(&self, zipcode: &str) -> Vec<RateAreaKey> {
        self.areas
            .get(zipcode)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

pub fn resolve_zip(zipcode: &str, index: &ZipIndex, rates: &SecondLowestRates) -> Resolution {
    let mut rate_areas = index.rate_areas(zipcode);

    match rate_areas.len() {
        0 => Resolution::Unmapped,
        1 => {
            let key = rate_areas.remove(0);
            match rates.get(&key) {
                Some(rate) => Resolution::Resolved(rate),
                None => Resolution::NoSecondLowest(key),
            }
        }
        _ => Resolution::Ambiguous { rate_areas },
    }
}

/// Resolve every target, keeping input order and row count.
pub fn resolve_targets(
    targets: &[TargetZip],
    index: &ZipIndex,
    rates: &SecondLowestRates,
) -> Vec<ResolvedZip> {
    targets
        .iter()
        .map(|target| {
            let resolution = resolve_zip(&target.zipcode, index, rates);
            ResolvedZip {
                target: TargetZip {
                    rate: resolution.rate(),
                    ..target.clone()
                },
                resolution,
            }
        })
        .collect()
}
