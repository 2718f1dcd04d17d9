// 📊 Second-Lowest-Rate Aggregator
//
// Per (state, rate_area) group: collapse duplicate rates, rank ascending,
// take index 1. Fewer than two distinct rates means no second-lowest rate.

use crate::join::JoinedRate;
use crate::model::RateAreaKey;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Second-lowest distinct value of a rate group, if there is one.
///
/// Rates compare numerically, so `150` and `150.00` are the same value.
pub fn second_lowest_distinct<I>(rates: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let distinct: BTreeSet<Decimal> = rates.into_iter().collect();
    distinct.into_iter().nth(1)
}

/// Mapping from rate area to its second-lowest Silver rate.
///
/// Areas that had rows but fewer than two distinct rates map to `None`.
/// Areas never seen are absent; both read as "no rate" through [`get`].
///
/// [`get`]: SecondLowestRates::get
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecondLowestRates {
    rates: BTreeMap<RateAreaKey, Option<Decimal>>,
}

impl SecondLowestRates {
    pub fn get(&self, key: &RateAreaKey) -> Option<Decimal> {
        self.rates.get(key).copied().flatten()
    }

    /// Number of rate areas that had at least one joined row
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Number of areas with a defined second-lowest rate
    pub fn defined_count(&self) -> usize {
        self.rates.values().filter(|r| r.is_some()).count()
    }
}

impl FromIterator<(RateAreaKey, Option<Decimal>)> for SecondLowestRates {
    fn from_iter<T: IntoIterator<Item = (RateAreaKey, Option<Decimal>)>>(iter: T) -> Self {
        SecondLowestRates {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Group the joined relation by rate area and reduce each group.
pub fn second_lowest_rates(joined: &[JoinedRate]) -> SecondLowestRates {
    let mut groups: BTreeMap<&RateAreaKey, BTreeSet<Decimal>> = BTreeMap::new();
    for row in joined {
        groups.entry(&row.key).or_default().insert(row.rate);
    }

    groups
        .into_iter()
        .map(|(key, rates)| (key.clone(), second_lowest_distinct(rates)))
        .collect()
}
