//! Column statistics appended below the data rows.
//!
//! The designated column is converted to integers once; each configured
//! statistic is then computed over the full, non-deduplicated column.

use crate::domain::{DistinctOrder, StatisticKind, StatisticSpec, SummaryConfig};
use crate::error::{MergeError, MergeResult, RowOrigin};
use crate::render::OutputTable;
use crate::utils::format_float;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i128),
    Float(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// A computed statistic together with the label written next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryValue {
    pub label: String,
    pub value: StatValue,
}

/// Parse every cell of `column` as an integer.
pub fn integer_column(table: &OutputTable, column: &str) -> MergeResult<Vec<i64>> {
    table
        .column(column)?
        .into_iter()
        .map(|(cell, origin)| parse_cell(column, cell, origin))
        .collect()
}

fn parse_cell(column: &str, cell: &str, origin: &RowOrigin) -> MergeResult<i64> {
    cell.trim().parse::<i64>().map_err(|_| MergeError::NonNumericCell {
        column: column.to_string(),
        value: cell.to_string(),
        origin: origin.clone(),
    })
}

/// The `rank`-th (1-based) distinct value.
///
/// With [`DistinctOrder::Encountered`] distinct values keep the order in which
/// they first appear in `values`; with [`DistinctOrder::Descending`] they are
/// sorted largest first, so rank 2 is the true second-highest value.
pub fn nth_distinct(
    column: &str,
    values: &[i64],
    rank: usize,
    order: DistinctOrder,
) -> MergeResult<i64> {
    let distinct: IndexSet<i64> = values.iter().copied().collect();
    let mut distinct: Vec<i64> = distinct.into_iter().collect();
    if order == DistinctOrder::Descending {
        distinct.sort_unstable_by(|a, b| b.cmp(a));
    }

    rank.checked_sub(1).and_then(|idx| distinct.get(idx)).copied().ok_or_else(|| {
        MergeError::InsufficientDistinctValues {
            column: column.to_string(),
            rank,
            found: distinct.len(),
        }
    })
}

pub fn mean(column: &str, values: &[i64]) -> MergeResult<f64> {
    if values.is_empty() {
        return Err(MergeError::EmptyColumn { column: column.to_string() });
    }
    let total: i128 = values.iter().map(|&v| i128::from(v)).sum();
    Ok(total as f64 / values.len() as f64)
}

fn compute(column: &str, values: &[i64], spec: &StatisticSpec) -> MergeResult<StatValue> {
    let empty = || MergeError::EmptyColumn { column: column.to_string() };
    let value = match spec.kind {
        StatisticKind::NthDistinct => {
            StatValue::Int(nth_distinct(column, values, spec.rank, spec.order)?.into())
        }
        StatisticKind::Mean => StatValue::Float(mean(column, values)?),
        StatisticKind::Min => StatValue::Int(values.iter().min().copied().ok_or_else(empty)?.into()),
        StatisticKind::Max => StatValue::Int(values.iter().max().copied().ok_or_else(empty)?.into()),
        StatisticKind::Sum => StatValue::Int(values.iter().map(|&v| i128::from(v)).sum()),
        StatisticKind::Count => StatValue::Int(values.len() as i128),
    };
    Ok(value)
}

/// Compute every configured statistic over the summary column.
///
/// Nothing is looked up when no statistics are configured, so a table
/// without the summary column is only an error if it is actually needed.
pub fn summarize(table: &OutputTable, summary: &SummaryConfig) -> MergeResult<Vec<SummaryValue>> {
    if summary.statistics.is_empty() {
        return Ok(Vec::new());
    }

    let values = integer_column(table, &summary.column)?;
    let mut results = Vec::with_capacity(summary.statistics.len());
    for spec in &summary.statistics {
        let value = compute(&summary.column, &values, spec)?;
        tracing::debug!("{} {} = {}", spec.label, summary.column, value);
        results.push(SummaryValue { label: spec.label.clone(), value });
    }
    Ok(results)
}
