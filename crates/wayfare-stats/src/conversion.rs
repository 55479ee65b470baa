//! Grouped conversion-rate summaries

use std::collections::BTreeMap;

use serde::Serialize;

use wayfare_core::Dataset;

use crate::key::{GroupKey, KeyError};

/// Minimum partition size a group needs before it is worth ranking;
/// smaller groups carry too much rate noise to compare.
pub const MIN_RANK_SEARCHES: u64 = 100;

/// One partition of a grouped aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupConversion {
    /// Distinct value of the grouping key
    pub group: String,
    /// Partition size; never zero, since partitions only exist for
    /// values present in the data
    pub searches: u64,
    /// Records in the partition that converted to a booking
    pub bookings: u64,
    /// `100 * bookings / searches`
    pub conversion_rate: f64,
}

/// Conversion rates for every distinct defined value of one grouping key.
///
/// Groups are emitted in label order so that aggregating the same dataset
/// twice yields identical summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub groups: Vec<GroupConversion>,
}

impl ConversionSummary {
    /// Number of groups in the summary.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the summary holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up one group by its label.
    pub fn get(&self, group: &str) -> Option<&GroupConversion> {
        self.groups.iter().find(|g| g.group == group)
    }

    /// Searches summed across all groups.
    pub fn total_searches(&self) -> u64 {
        self.groups.iter().map(|g| g.searches).sum()
    }

    /// Bookings summed across all groups.
    pub fn total_bookings(&self) -> u64 {
        self.groups.iter().map(|g| g.bookings).sum()
    }

    /// The `n` groups with the highest conversion rate, after dropping
    /// groups below the `min_searches` floor. Ties break on the group
    /// label so the ranking is deterministic.
    pub fn top_by_conversion(&self, n: usize, min_searches: u64) -> Vec<GroupConversion> {
        let mut ranked: Vec<GroupConversion> = self
            .groups
            .iter()
            .filter(|g| g.searches >= min_searches)
            .cloned()
            .collect();

        ranked.sort_by(|a, b| {
            b.conversion_rate
                .total_cmp(&a.conversion_rate)
                .then_with(|| a.group.cmp(&b.group))
        });
        ranked.truncate(n);
        ranked
    }
}

fn conversion_rate(bookings: u64, searches: u64) -> f64 {
    if searches == 0 {
        return 0.0;
    }
    100.0 * bookings as f64 / searches as f64
}

/// Partition the dataset by the key's defined values and compute per-group
/// searches, bookings, and conversion rate.
///
/// Records where the key's value is undefined are excluded from every
/// partition. An empty dataset yields an empty summary.
pub fn aggregate(dataset: &Dataset, key: GroupKey) -> ConversionSummary {
    let mut partitions: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for record in dataset.records() {
        if let Some(value) = key.value(record) {
            let (searches, bookings) = partitions.entry(value).or_insert((0, 0));
            *searches += 1;
            if record.base.is_booking {
                *bookings += 1;
            }
        }
    }

    let groups = partitions
        .into_iter()
        .map(|(group, (searches, bookings))| GroupConversion {
            group,
            searches,
            bookings,
            conversion_rate: conversion_rate(bookings, searches),
        })
        .collect();

    ConversionSummary { groups }
}

/// String-keyed entry point for presentation collaborators. Unknown key
/// names error immediately.
pub fn aggregate_by_name(dataset: &Dataset, key: &str) -> Result<ConversionSummary, KeyError> {
    Ok(aggregate(dataset, key.parse()?))
}
