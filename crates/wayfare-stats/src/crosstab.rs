//! Two-key conversion-rate matrices

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use wayfare_core::Dataset;

use crate::key::{GroupKey, KeyError};

/// A rectangular conversion-rate matrix over the Cartesian product of two
/// keys' distinct observed values. Cells for combinations that never
/// co-occur are `None`, not zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    /// Name of the key spanning the rows
    pub row_key: &'static str,
    /// Name of the key spanning the columns
    pub col_key: &'static str,
    /// Distinct row values, sorted
    pub row_labels: Vec<String>,
    /// Distinct column values, sorted
    pub col_labels: Vec<String>,
    /// `cells[row][col]` is the conversion rate of the partition, or
    /// `None` when the combination is absent from the data
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CrossTab {
    /// Look up a cell by its row and column labels.
    pub fn cell(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        self.cells[r][c]
    }
}

/// Cross-tabulate conversion rates by two grouping keys.
///
/// Records where either key is undefined are excluded. The matrix covers
/// every observed row/column value; only co-occurring combinations carry
/// a rate.
pub fn crosstab(dataset: &Dataset, row_key: GroupKey, col_key: GroupKey) -> CrossTab {
    let mut counts: BTreeMap<(String, String), (u64, u64)> = BTreeMap::new();
    let mut row_labels: BTreeSet<String> = BTreeSet::new();
    let mut col_labels: BTreeSet<String> = BTreeSet::new();

    for record in dataset.records() {
        let (Some(row), Some(col)) = (row_key.value(record), col_key.value(record)) else {
            continue;
        };

        row_labels.insert(row.clone());
        col_labels.insert(col.clone());

        let (searches, bookings) = counts.entry((row, col)).or_insert((0, 0));
        *searches += 1;
        if record.base.is_booking {
            *bookings += 1;
        }
    }

    let row_labels: Vec<String> = row_labels.into_iter().collect();
    let col_labels: Vec<String> = col_labels.into_iter().collect();

    let cells = row_labels
        .iter()
        .map(|row| {
            col_labels
                .iter()
                .map(|col| {
                    counts
                        .get(&(row.clone(), col.clone()))
                        .map(|&(searches, bookings)| {
                            if searches == 0 {
                                0.0
                            } else {
                                100.0 * bookings as f64 / searches as f64
                            }
                        })
                })
                .collect()
        })
        .collect();

    CrossTab {
        row_key: row_key.name(),
        col_key: col_key.name(),
        row_labels,
        col_labels,
        cells,
    }
}

/// String-keyed entry point; unknown key names error immediately.
pub fn crosstab_by_name(
    dataset: &Dataset,
    row_key: &str,
    col_key: &str,
) -> Result<CrossTab, KeyError> {
    Ok(crosstab(dataset, row_key.parse()?, col_key.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_core::SearchRecord;

    fn record(is_mobile: bool, is_package: bool, is_booking: bool) -> SearchRecord {
        SearchRecord {
            is_mobile,
            is_package,
            is_booking,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_combinations_stay_undefined() {
        // Mobile searches are all packages; desktop all non-packages.
        let dataset = Dataset::derive(vec![
            record(true, true, true),
            record(true, true, false),
            record(false, false, false),
        ]);

        let tab = crosstab(&dataset, GroupKey::Device, GroupKey::Package);
        assert_eq!(tab.row_labels, vec!["Desktop", "Mobile"]);
        assert_eq!(tab.col_labels, vec!["Non-Package", "Package"]);

        assert_eq!(tab.cell("Mobile", "Package"), Some(50.0));
        assert_eq!(tab.cell("Desktop", "Non-Package"), Some(0.0));
        // observed labels, never co-observed
        assert_eq!(tab.cell("Mobile", "Non-Package"), None);
        assert_eq!(tab.cell("Desktop", "Package"), None);
    }

    #[test]
    fn test_records_missing_either_key_are_excluded() {
        // No check-in/check-out dates, so duration_category is undefined
        // everywhere and the matrix is empty.
        let dataset = Dataset::derive(vec![record(false, false, true)]);
        let tab = crosstab(&dataset, GroupKey::DurationCategory, GroupKey::Device);
        assert!(tab.row_labels.is_empty());
        assert!(tab.col_labels.is_empty());
        assert!(tab.cells.is_empty());
    }

    #[test]
    fn test_empty_dataset_yields_empty_matrix() {
        let dataset = Dataset::derive(Vec::new());
        let tab = crosstab(&dataset, GroupKey::Device, GroupKey::Package);
        assert!(tab.cells.is_empty());
    }

    #[test]
    fn test_crosstab_by_name_rejects_unknown_keys() {
        let dataset = Dataset::derive(Vec::new());
        assert!(crosstab_by_name(&dataset, "device", "package").is_ok());
        assert!(crosstab_by_name(&dataset, "device", "bogus").is_err());
    }
}
