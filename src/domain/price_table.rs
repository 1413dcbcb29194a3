//! In-memory price snapshot: trading day -> (column -> close price).

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// An immutable, date-ordered price table.
///
/// The date axis is strictly increasing and deduplicated. Missing
/// cells are simply absent; they are never null-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    cells: HashMap<NaiveDate, HashMap<String, f64>>,
}

impl PriceTable {
    /// Build a table from individual `(date, column, price)` cells.
    ///
    /// Dates are sorted and deduplicated; a later cell for the same
    /// `(date, column)` overwrites an earlier one. Column order follows
    /// first appearance.
    pub fn from_cells(cells: impl IntoIterator<Item = (NaiveDate, String, f64)>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, HashMap<String, f64>> = BTreeMap::new();
        let mut columns: Vec<String> = Vec::new();

        for (date, column, price) in cells {
            if !columns.contains(&column) {
                columns.push(column.clone());
            }
            by_date.entry(date).or_default().insert(column, price);
        }

        let dates: Vec<NaiveDate> = by_date.keys().copied().collect();
        Self {
            dates,
            columns,
            cells: by_date.into_iter().collect(),
        }
    }

    /// The ascending, deduplicated date axis.
    pub fn trading_days(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column labels in first-appearance order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn price(&self, date: NaiveDate, column: &str) -> Option<f64> {
        self.cells.get(&date).and_then(|row| row.get(column)).copied()
    }

    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
