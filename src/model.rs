// 📋 Data Model - Plans, ZIP mappings, target ZIPs
// Everything is loaded once per run and never mutated afterwards.

use rust_decimal::Decimal;

/// Metal level the calculator ranks. Matched exactly, case-sensitive.
pub const SILVER: &str = "Silver";

// ============================================================================
// RATE AREA KEY
// ============================================================================

/// Join/group key shared by ZIP entries and plans.
///
/// A rate area number only means something inside its state, so the key is
/// always the full pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RateAreaKey {
    pub state: String,
    pub rate_area: u32,
}

impl RateAreaKey {
    pub fn new(state: impl Into<String>, rate_area: u32) -> Self {
        RateAreaKey {
            state: state.into(),
            rate_area,
        }
    }
}

// ============================================================================
// PLAN
// ============================================================================

/// One row of the plan catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub state: String,
    pub rate_area: u32,
    pub metal_level: String,
    pub rate: Decimal,
}

impl Plan {
    pub fn key(&self) -> RateAreaKey {
        RateAreaKey::new(self.state.clone(), self.rate_area)
    }

    pub fn is_silver(&self) -> bool {
        self.metal_level == SILVER
    }
}

// ============================================================================
// ZIP ENTRY
// ============================================================================

/// One row of the ZIP-to-rate-area mapping.
///
/// The same ZIP may show up several times: with different rate areas
/// (ambiguous) or with the same one (redundant, e.g. one row per county).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntry {
    /// Kept as text so leading zeros survive
    pub zipcode: String,
    pub state: String,
    pub rate_area: u32,
}

impl ZipEntry {
    pub fn key(&self) -> RateAreaKey {
        RateAreaKey::new(self.state.clone(), self.rate_area)
    }
}

// ============================================================================
// TARGET ZIP
// ============================================================================

/// Output record. `rate` stays `None` until resolution fills it in.
///
/// `fields` holds the row as read, one entry per target column, so columns
/// the calculator does not use are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetZip {
    pub zipcode: String,
    pub rate: Option<Decimal>,
    pub fields: Vec<String>,
}

impl TargetZip {
    pub fn new(zipcode: impl Into<String>) -> Self {
        TargetZip {
            zipcode: zipcode.into(),
            rate: None,
            fields: Vec::new(),
        }
    }
}

// ============================================================================
// TARGET SCHEMA
// ============================================================================

/// Header of the target table, with the positions of the columns we touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSchema {
    pub columns: Vec<String>,
    pub zipcode_column: usize,
    /// `None` when the input had no `rate` column; output then appends one
    pub rate_column: Option<usize>,
}

impl Default for TargetSchema {
    fn default() -> Self {
        TargetSchema {
            columns: vec!["zipcode".to_string(), "rate".to_string()],
            zipcode_column: 0,
            rate_column: Some(1),
        }
    }
}

impl TargetSchema {
    /// Input header, plus `rate` at the end if it was missing
    pub fn output_header(&self) -> Vec<&str> {
        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        if self.rate_column.is_none() {
            header.push("rate");
        }
        header
    }

    /// A target's fields with the formatted rate in the rate slot.
    ///
    /// Targets built without fields get a row with only zipcode and rate set.
    pub fn output_row(&self, target: &TargetZip, rate: String) -> Vec<String> {
        let mut row = if target.fields.len() == self.columns.len() {
            target.fields.clone()
        } else {
            let mut row = vec![String::new(); self.columns.len()];
            row[self.zipcode_column] = target.zipcode.clone();
            row
        };

        match self.rate_column {
            Some(index) => row[index] = rate,
            None => row.push(rate),
        }
        row
    }
}

/// Target rows together with their header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetTable {
    pub schema: TargetSchema,
    pub rows: Vec<TargetZip>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: &[&str], zipcode_column: usize, rate_column: Option<usize>) -> TargetSchema {
        TargetSchema {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            zipcode_column,
            rate_column,
        }
    }

    fn target(zipcode: &str, fields: &[&str]) -> TargetZip {
        TargetZip {
            zipcode: zipcode.to_string(),
            rate: None,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_rate_written_in_place() {
        let schema = schema(&["note", "rate", "zipcode"], 2, Some(1));

        assert_eq!(schema.output_header(), vec!["note", "rate", "zipcode"]);
        assert_eq!(
            schema.output_row(&target("64148", &["keep", "", "64148"]), "245.20".to_string()),
            vec!["keep", "245.20", "64148"]
        );
    }

    #[test]
    fn test_rate_appended_when_missing() {
        let schema = schema(&["zipcode", "county"], 0, None);

        assert_eq!(schema.output_header(), vec!["zipcode", "county", "rate"]);
        assert_eq!(
            schema.output_row(&target("64148", &["64148", "Jackson"]), String::new()),
            vec!["64148", "Jackson", ""]
        );
    }

    #[test]
    fn test_row_built_from_zipcode_without_fields() {
        let schema = TargetSchema::default();

        assert_eq!(
            schema.output_row(&TargetZip::new("00001"), "150.00".to_string()),
            vec!["00001", "150.00"]
        );
    }
}
