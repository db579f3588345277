//! Bank ranking table extraction.
//!
//! Finds the first element matching the table selector, walks the rows of its
//! first `tbody` in document order and turns each into a [`BankRecord`].
//! A bad row is recorded as a [`SkippedRow`] and never stops the walk.

use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::error_handling::{ExtractError, RowFault};
use crate::models::{BankRecord, RecordSet};
use crate::utils::{clean_numeric_text, normalize_whitespace};

/// Which data cells (`td`, zero-based) hold the name and the market cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Index of the bank name cell
    pub name_column: usize,
    /// Index of the USD market-cap cell
    pub market_cap_column: usize,
}

impl TableLayout {
    /// Fewest `td` cells a row needs before parsing is attempted.
    pub fn min_cells(&self) -> usize {
        self.name_column
            .max(self.market_cap_column)
            .saturating_add(1)
    }
}

/// A row that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position among the table body rows
    pub index: usize,
    /// Why it was dropped
    pub fault: RowFault,
}

/// Records parsed from one table plus the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableExtraction {
    /// Well-formed rows, in table order
    pub records: RecordSet,
    /// Malformed rows, in table order
    pub skipped: Vec<SkippedRow>,
}

/// Parses the bank table out of an HTML document.
///
/// `selector_text` is the source of `table_selector`, used in the error.
///
/// # Errors
///
/// Returns an `ExtractError` of kind `TableNotFound` when nothing matches the
/// selector. Once the table is found the result is always `Ok`, possibly
/// with no records.
pub fn parse_bank_table(
    html: &str,
    table_selector: &Selector,
    selector_text: &str,
    layout: TableLayout,
) -> Result<TableExtraction, ExtractError> {
    let document = Html::parse_document(html);
    let table = document
        .select(table_selector)
        .next()
        .ok_or_else(|| ExtractError::table_not_found(selector_text))?;

    let mut extraction = TableExtraction::default();
    for (index, row) in body_rows(table).into_iter().enumerate() {
        match parse_row(row, layout) {
            Ok(record) => extraction.records.push(record),
            Err(fault) => {
                log::debug!("Row {} skipped: {}", index, fault);
                extraction.skipped.push(SkippedRow { index, fault });
            }
        }
    }
    Ok(extraction)
}

/// Parses market-cap text such as `432.92`, `1,234.5` or `231.52[1]`.
///
/// # Errors
///
/// `RowFault::InvalidMarketCap` for non-numeric text,
/// `RowFault::NegativeMarketCap` for values below zero.
pub fn parse_market_cap(text: &str) -> Result<Decimal, RowFault> {
    let cleaned = clean_numeric_text(text);
    let value = Decimal::from_str(&cleaned)
        .map_err(|_| RowFault::InvalidMarketCap(text.trim().to_string()))?;
    if value < Decimal::ZERO {
        return Err(RowFault::NegativeMarketCap(text.trim().to_string()));
    }
    Ok(value)
}

fn parse_row(row: ElementRef<'_>, layout: TableLayout) -> Result<BankRecord, RowFault> {
    let cells: Vec<ElementRef<'_>> = child_elements(row, "td").collect();
    let needed = layout.min_cells();
    if cells.len() < needed {
        return Err(RowFault::TooFewCells {
            found: cells.len(),
            needed,
        });
    }

    let name = cell_text(cells[layout.name_column]);
    if name.is_empty() {
        return Err(RowFault::EmptyName);
    }
    let market_cap_usd = parse_market_cap(&cell_text(cells[layout.market_cap_column]))?;

    Ok(BankRecord {
        name,
        market_cap_usd,
    })
}

// Rows of the first tbody. html5ever inserts a tbody around bare rows, the
// fallback only matters for non-table elements picked by a custom selector.
fn body_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    match child_elements(table, "tbody").next() {
        Some(tbody) => child_elements(tbody, "tr").collect(),
        None => child_elements(table, "tr").collect(),
    }
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    normalize_whitespace(&cell.text().collect::<String>())
}
