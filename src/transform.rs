//! Currency conversion of extracted records.

use log::info;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::app::ProgressLog;
use crate::error_handling::TransformError;
use crate::models::{BankRecord, ConvertedRecord};
use crate::rates::{Currency, RateTable};

/// Decimal places kept on converted amounts.
pub const CONVERTED_SCALE: u32 = 2;

/// Converts `amount_usd` with `rate`, rounding half-to-even to two places.
///
/// The result always carries exactly two decimal places (`80` becomes `80.00`).
/// Returns `None` when the product does not fit in a `Decimal`.
pub fn convert(amount_usd: Decimal, rate: Decimal) -> Option<Decimal> {
    let mut converted = amount_usd
        .checked_mul(rate)?
        .round_dp_with_strategy(CONVERTED_SCALE, RoundingStrategy::MidpointNearestEven);
    converted.rescale(CONVERTED_SCALE);
    Some(converted)
}

/// Adds EUR, GBP and INR market caps to every record.
///
/// Record order and the input fields are preserved. The rate table is
/// only read.
///
/// # Errors
///
/// Returns `TransformError::Config` if `rates` lacks any of the three
/// currencies and `TransformError::Overflow` if a converted amount is out of
/// range. No record is skipped.
pub fn transform(
    records: &[BankRecord],
    rates: &RateTable,
    progress: &dyn ProgressLog,
) -> Result<Vec<ConvertedRecord>, TransformError> {
    progress.record("Transforming extracted data");

    let eur = rates.get(Currency::Eur)?;
    let gbp = rates.get(Currency::Gbp)?;
    let inr = rates.get(Currency::Inr)?;

    let converted = records
        .iter()
        .map(|record| {
            Ok(ConvertedRecord {
                name: record.name.clone(),
                market_cap_usd: record.market_cap_usd,
                market_cap_eur: convert_record(record, Currency::Eur, eur)?,
                market_cap_gbp: convert_record(record, Currency::Gbp, gbp)?,
                market_cap_inr: convert_record(record, Currency::Inr, inr)?,
            })
        })
        .collect::<Result<Vec<_>, TransformError>>()?;

    info!("Converted {} records into EUR, GBP and INR", converted.len());
    progress.record("Successfully transformed extracted data");
    Ok(converted)
}

fn convert_record(
    record: &BankRecord,
    currency: Currency,
    rate: Decimal,
) -> Result<Decimal, TransformError> {
    convert(record.market_cap_usd, rate).ok_or_else(|| TransformError::Overflow {
        name: record.name.clone(),
        amount: record.market_cap_usd,
        currency,
    })
}
