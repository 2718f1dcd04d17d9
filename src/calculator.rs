// 🧮 SLCSP Calculator - runs the stages in order
//
//   load → silver filter → join → second-lowest per area → resolve → write
//
// Each stage takes the previous stage's output by reference and returns a
// new value; nothing is shared or mutated across stages.

use crate::aggregate::{second_lowest_rates, SecondLowestRates};
use crate::filter::silver_plans;
use crate::join::join_rate_areas;
use crate::loader::{load_inputs, InputPaths, Inputs};
use crate::model::{TargetSchema, TargetZip};
use crate::resolver::{resolve_targets, Resolution, ResolvedZip, ZipIndex};
use tracing::debug;

// ============================================================================
// RESOLUTION REPORT
// ============================================================================

/// Outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub targets: usize,
    pub resolved: usize,
    pub ambiguous: usize,
    pub no_second_lowest: usize,
    pub unmapped: usize,
}

impl ResolutionReport {
    pub fn from_resolved(resolved: &[ResolvedZip]) -> Self {
        let mut report = ResolutionReport {
            targets: resolved.len(),
            ..Default::default()
        };

        for r in resolved {
            match r.resolution {
                Resolution::Resolved(_) => report.resolved += 1,
                Resolution::Ambiguous { .. } => report.ambiguous += 1,
                Resolution::NoSecondLowest(_) => report.no_second_lowest += 1,
                Resolution::Unmapped => report.unmapped += 1,
            }
        }

        report
    }

    pub fn blank(&self) -> usize {
        self.targets - self.resolved
    }

    pub fn summary(&self) -> String {
        format!(
            "{} target ZIPs: {} resolved, {} blank ({} ambiguous, {} without second-lowest Silver rate, {} not in mapping)",
            self.targets,
            self.resolved,
            self.blank(),
            self.ambiguous,
            self.no_second_lowest,
            self.unmapped
        )
    }
}

// ============================================================================
// CALCULATION
// ============================================================================

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct Calculation {
    pub schema: TargetSchema,
    pub rates: SecondLowestRates,
    pub resolved: Vec<ResolvedZip>,
    pub report: ResolutionReport,
}

impl Calculation {
    /// Targets with rates filled in, input order
    pub fn targets(&self) -> Vec<TargetZip> {
        self.resolved.iter().map(|r| r.target.clone()).collect()
    }
}

/// Run the pipeline on already-loaded tables. Cannot fail.
pub fn calculate(inputs: &Inputs) -> Calculation {
    let silver = silver_plans(&inputs.plans);
    debug!(
        silver = silver.len(),
        plans = inputs.plans.len(),
        "filtered Silver plans"
    );

    let joined = join_rate_areas(&inputs.zips, &silver);
    debug!(rows = joined.len(), "joined ZIP mapping with Silver plans");

    let rates = second_lowest_rates(&joined);
    debug!(
        areas = rates.len(),
        defined = rates.defined_count(),
        "computed second-lowest rates"
    );

    let index = ZipIndex::build(&inputs.zips);
    let resolved = resolve_targets(&inputs.targets, &index, &rates);
    let report = ResolutionReport::from_resolved(&resolved);

    Calculation {
        schema: inputs.target_schema.clone(),
        rates,
        resolved,
        report,
    }
}

/// Load the three files and run the pipeline.
pub fn calculate_from_paths(paths: &InputPaths) -> crate::error::Result<Calculation> {
    let inputs = load_inputs(paths)?;
    Ok(calculate(&inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Plan, RateAreaKey, ZipEntry};
    use rust_decimal::Decimal;

    fn silver(state: &str, rate_area: u32, rate: i64) -> Plan {
        Plan {
            state: state.to_string(),
            rate_area,
            metal_level: "Silver".to_string(),
            rate: Decimal::new(rate, 0),
        }
    }

    fn zip(zipcode: &str, state: &str, rate_area: u32) -> ZipEntry {
        ZipEntry {
            zipcode: zipcode.to_string(),
            state: state.to_string(),
            rate_area,
        }
    }

    fn scenario() -> Inputs {
        Inputs {
            plans: vec![
                silver("AA", 1, 100),
                silver("AA", 1, 150),
                silver("AA", 1, 150),
                silver("AA", 2, 90),
                Plan {
                    metal_level: "Gold".to_string(),
                    ..silver("AA", 2, 120)
                },
            ],
            zips: vec![
                zip("00001", "AA", 1),
                zip("00002", "AA", 2),
                zip("00003", "AA", 1),
                zip("00003", "AA", 2),
            ],
            targets: vec![
                TargetZip::new("00001"),
                TargetZip::new("00002"),
                TargetZip::new("00003"),
                TargetZip::new("00004"),
            ],
            target_schema: TargetSchema::default(),
        }
    }

    #[test]
    fn test_pipeline_scenario() {
        let calc = calculate(&scenario());
        let targets = calc.targets();

        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0].rate, Some(Decimal::new(150, 0)));
        // Gold plan does not give area 2 a second rate
        assert_eq!(targets[1].rate, None);
        assert_eq!(targets[2].rate, None);
        assert_eq!(targets[3].rate, None);
        assert_eq!(calc.rates.get(&RateAreaKey::new("AA", 2)), None);
    }

    #[test]
    fn test_report_counts() {
        let report = calculate(&scenario()).report;

        assert_eq!(
            report,
            ResolutionReport {
                targets: 4,
                resolved: 1,
                ambiguous: 1,
                no_second_lowest: 1,
                unmapped: 1,
            }
        );
        assert_eq!(report.blank(), 3);
        assert!(report.summary().starts_with("4 target ZIPs: 1 resolved, 3 blank"));
    }

    #[test]
    fn test_empty_inputs() {
        let calc = calculate(&Inputs::default());

        assert!(calc.resolved.is_empty());
        assert!(calc.rates.is_empty());
        assert_eq!(calc.report, ResolutionReport::default());
    }
}
