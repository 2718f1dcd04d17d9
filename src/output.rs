// 🖨️ Formatter/Writer - TargetZip relation → CSV

use crate::model::{TargetSchema, TargetZip};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// Two fractional digits, half-to-even rounding: `100` → `"100.00"`, `12.3` → `"12.30"`.
pub fn format_rate(rate: Decimal) -> String {
    let mut rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded.to_string()
}

/// Defined rates are formatted, undefined ones become an empty field.
pub fn format_optional_rate(rate: Option<Decimal>) -> String {
    rate.map(format_rate).unwrap_or_default()
}

/// Write the target table back out, header first, rows in the given
/// order, with the resolved rate in the `rate` column.
pub fn write_results<W: Write>(
    writer: W,
    schema: &TargetSchema,
    targets: &[TargetZip],
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(schema.output_header())?;

    for target in targets {
        wtr.write_record(schema.output_row(target, format_optional_rate(target.rate)))?;
    }

    wtr.flush()?;
    Ok(())
}
