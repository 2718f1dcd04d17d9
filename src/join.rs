// 🔗 Rate-Area Joiner - ZIP mapping ⋈ Silver plans on (state, rate_area)

use crate::model::{Plan, RateAreaKey, ZipEntry};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One row of the joined relation
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRate {
    pub zipcode: String,
    pub key: RateAreaKey,
    pub rate: Decimal,
}

/// Inner join of ZIP entries with plans on exact (state, rate_area).
///
/// Output follows ZIP entry order, then plan order within an area. Every
/// ZIP row pairs with every plan of its area, so the result can be larger
/// than either input. ZIP rows with no matching plan produce nothing.
pub fn join_rate_areas(zips: &[ZipEntry], plans: &[Plan]) -> Vec<JoinedRate> {
    let mut rates_by_area: HashMap<RateAreaKey, Vec<Decimal>> = HashMap::new();
    for plan in plans {
        rates_by_area.entry(plan.key()).or_default().push(plan.rate);
    }

    let mut joined = Vec::new();
    for zip in zips {
        let key = zip.key();
        if let Some(rates) = rates_by_area.get(&key) {
            joined.extend(rates.iter().map(|rate| JoinedRate {
                zipcode: zip.zipcode.clone(),
                key: key.clone(),
                rate: *rate,
            }));
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(zipcode: &str, state: &str, rate_area: u32) -> ZipEntry {
        ZipEntry {
            zipcode: zipcode.to_string(),
            state: state.to_string(),
            rate_area,
        }
    }

    fn silver(state: &str, rate_area: u32, rate: i64) -> Plan {
        Plan {
            state: state.to_string(),
            rate_area,
            metal_level: "Silver".to_string(),
            rate: Decimal::new(rate, 0),
        }
    }

    #[test]
    fn test_cross_product_within_area() {
        let zips = vec![zip("00001", "AA", 1), zip("00003", "AA", 1)];
        let plans = vec![silver("AA", 1, 100), silver("AA", 1, 150), silver("AA", 1, 150)];

        let joined = join_rate_areas(&zips, &plans);

        assert_eq!(joined.len(), 6);
        assert_eq!(joined.iter().filter(|j| j.zipcode == "00001").count(), 3);
        assert!(joined.iter().all(|j| j.key == RateAreaKey::new("AA", 1)));
    }

    #[test]
    fn test_key_needs_state_and_area() {
        // Same rate_area number in another state is a different area
        let zips = vec![zip("64148", "MO", 3)];
        let plans = vec![silver("KS", 3, 200), silver("MO", 4, 210)];

        assert!(join_rate_areas(&zips, &plans).is_empty());
    }

    #[test]
    fn test_unmatched_zip_rows_dropped() {
        let zips = vec![zip("00001", "AA", 1), zip("00002", "AA", 2)];
        let plans = vec![silver("AA", 2, 90)];

        let joined = join_rate_areas(&zips, &plans);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].zipcode, "00002");
        assert_eq!(joined[0].rate, Decimal::new(90, 0));
    }
}
