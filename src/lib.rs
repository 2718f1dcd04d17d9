// SLCSP Calculator - Core Library
// Second Lowest Cost Silver Plan per ZIP code, as a chain of pure stages.

pub mod model;
pub mod error;
pub mod loader;     // CSV tables → relations
pub mod filter;     // Silver plans only
pub mod join;       // ZIP mapping ⋈ plans
pub mod aggregate;  // second-lowest distinct rate per area
pub mod resolver;   // per-ZIP outcome
pub mod output;     // CSV writer
pub mod calculator; // stage orchestration + report
pub mod logging;

// Re-export commonly used types
pub use model::{Plan, RateAreaKey, TargetSchema, TargetTable, TargetZip, ZipEntry, SILVER};
pub use error::LoadError;
pub use loader::{
    load_inputs, load_plans, load_targets, load_zips,
    plans_from_reader, targets_from_reader, zips_from_reader,
    InputPaths, Inputs,
};
pub use filter::silver_plans;
pub use join::{join_rate_areas, JoinedRate};
pub use aggregate::{second_lowest_distinct, second_lowest_rates, SecondLowestRates};
pub use resolver::{resolve_targets, resolve_zip, Resolution, ResolvedZip, ZipIndex};
pub use output::{format_optional_rate, format_rate, write_results};
pub use calculator::{calculate, calculate_from_paths, Calculation, ResolutionReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
