//! Group-by + reduce over the dataset.
//!
//! Every function here is pure: it borrows a [`TableView`], never mutates it,
//! and returns a fresh [`SummaryTable`]. Groups are emitted one per distinct key,
//! ascending by key, unless the caller applies an explicit category order with
//! [`SummaryTable::with_category_order`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{GroupKey, GroupValue, TableView, ValueColumn};
use crate::error::AggregateError;

/// How a group's values are collapsed into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Mean,
    Sum,
}

/// One reduced group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: GroupValue,
    /// Reduced values, aligned with [`SummaryTable::columns`].
    pub values: Vec<f64>,
    /// Number of source rows in the group.
    pub count: usize,
}

/// The result of one group-by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub key: GroupKey,
    pub reduction: Reduction,
    pub columns: Vec<ValueColumn>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Position of `column` inside each row's `values`.
    pub fn column_index(&self, column: ValueColumn) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Reorder rows so keys listed in `order` come first, in that order.
    ///
    /// Keys not listed keep their ascending order after the listed ones.
    pub fn with_category_order(mut self, order: &[GroupValue]) -> Self {
        let rank = |key: &GroupValue| order.iter().position(|k| k == key).unwrap_or(order.len());
        self.rows
            .sort_by(|a, b| rank(&a.key).cmp(&rank(&b.key)).then_with(|| a.key.cmp(&b.key)));
        self
    }

    /// Total number of source rows across all groups.
    pub fn total_count(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Mean of `column` per distinct `key`.
pub fn mean_by(view: &TableView<'_>, key: GroupKey, column: ValueColumn) -> Result<SummaryTable, AggregateError> {
    reduce_by(view, key, &[column], Reduction::Mean)
}

/// Sum of `column` per distinct `key`.
pub fn sum_by(view: &TableView<'_>, key: GroupKey, column: ValueColumn) -> Result<SummaryTable, AggregateError> {
    reduce_by(view, key, &[column], Reduction::Sum)
}

/// Mean of several columns per distinct `key` (one pass, shared groups).
pub fn mean_by_multi(
    view: &TableView<'_>,
    key: GroupKey,
    columns: &[ValueColumn],
) -> Result<SummaryTable, AggregateError> {
    reduce_by(view, key, columns, Reduction::Mean)
}

fn reduce_by(
    view: &TableView<'_>,
    key: GroupKey,
    columns: &[ValueColumn],
    reduction: Reduction,
) -> Result<SummaryTable, AggregateError> {
    if columns.is_empty() {
        return Err(AggregateError::NoColumns);
    }
    if view.is_empty() {
        return Err(AggregateError::EmptyGroup { key });
    }

    let mut groups: BTreeMap<GroupValue, (Vec<f64>, usize)> = BTreeMap::new();
    for row in view.rows() {
        let (sums, count) = groups
            .entry(key.of(row))
            .or_insert_with(|| (vec![0.0; columns.len()], 0));
        for (acc, column) in sums.iter_mut().zip(columns) {
            *acc += column.of(row);
        }
        *count += 1;
    }

    let rows = groups
        .into_iter()
        .map(|(key, (sums, count))| {
            let values = match reduction {
                Reduction::Sum => sums,
                // `count` is at least 1: a group only exists once a row landed in it.
                Reduction::Mean => sums.into_iter().map(|s| s / count as f64).collect(),
            };
            SummaryRow { key, values, count }
        })
        .collect();

    Ok(SummaryTable {
        key,
        reduction,
        columns: columns.to_vec(),
        rows,
    })
}
