use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::{
    data::{field::Field, record::Value},
    pipeline::{FilteredView, GroupSummary},
};

/// Grouped statistics as shown in the statistics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatsTable {
    pub rows: Vec<GroupSummary>,
}

/// Passes the group summaries through unchanged.
pub fn group_stats_table(summaries: Vec<GroupSummary>) -> GroupStatsTable {
    GroupStatsTable { rows: summaries }
}

impl GroupStatsTable {
    /// The same rows with statistics rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            rows: self.rows.iter().map(GroupSummary::rounded).collect(),
        }
    }
}

fn stat(value: Option<f64>) -> String {
    value.map_or_else(|| "NA".to_string(), |v| format!("{:.2}", v))
}

impl fmt::Display for GroupStatsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24}{:>8}{:>10}{:>10}{:>10}",
            "Group", "Count", "Mean", "Median", "SD"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<24}{:>8}{:>10}{:>10}{:>10}",
                row.group,
                row.count,
                stat(row.mean),
                stat(row.median),
                stat(row.std_dev)
            )?;
        }
        Ok(())
    }
}

/// One table cell; numbers and labels keep their type on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Integer(u64),
    Number(f64),
    Text(String),
}

impl From<Value<'_>> for Cell {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Integer(v) => Cell::Integer(v),
            Value::Number(v) => Cell::Number(v),
            Value::Text(v) => Cell::Text(v.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(v) => write!(f, "{}", v),
        }
    }
}

// Hashable stand-in for a cell; floats compare by bit pattern.
#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Integer(u64),
    Number(u64),
    Text(&'a str),
}

fn cell_key(cell: &Option<Cell>) -> Option<CellKey<'_>> {
    cell.as_ref().map(|c| match c {
        Cell::Integer(v) => CellKey::Integer(*v),
        Cell::Number(v) => CellKey::Number(v.to_bits()),
        Cell::Text(v) => CellKey::Text(v),
    })
}

pub type Row = Vec<Option<Cell>>;

/// Raw rows of the filtered view projected onto a fixed set of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowTable {
    pub columns: Vec<Field>,
    pub rows: Vec<Row>,
}

/// One page of a row table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPage {
    pub columns: Vec<Field>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub rows: Vec<Row>,
}

/// Columns of the row table: the identity and demographic columns, then the
/// measurement and group columns if not already among them.
pub fn row_table_columns(measurement: Field, group: Field) -> Vec<Field> {
    let mut columns = Field::ROW_TABLE_BASE.to_vec();
    for field in [measurement, group] {
        if !columns.contains(&field) {
            columns.push(field);
        }
    }
    columns
}

/**
Projects the view onto the row-table columns and drops exact duplicate rows,
keeping the first occurrence.
 */
pub fn row_table(view: &FilteredView<'_>, measurement: Field, group: Field) -> RowTable {
    let columns = row_table_columns(measurement, group);
    let projected: Vec<Row> = view
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|field| record.value(*field).map(Cell::from))
                .collect()
        })
        .collect();

    let mut keep = vec![false; projected.len()];
    {
        let mut seen: HashSet<Vec<Option<CellKey<'_>>>> = HashSet::new();
        for (i, row) in projected.iter().enumerate() {
            keep[i] = seen.insert(row.iter().map(cell_key).collect());
        }
    }
    let rows = projected
        .into_iter()
        .zip(keep)
        .filter_map(|(row, kept)| kept.then_some(row))
        .collect();

    RowTable { columns, rows }
}

impl RowTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows where any cell contains `query`, ignoring case. A blank query keeps every row.
    pub fn search(&self, query: &str) -> RowTable {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.iter()
                    .flatten()
                    .any(|cell| cell.to_string().to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        RowTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> RowTable {
        RowTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Zero-based page of at most `page_size` rows. Pages past the end are empty.
    pub fn page(&self, page: usize, page_size: usize) -> RowPage {
        let page_size = page_size.max(1);
        let rows = self
            .rows
            .iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();
        RowPage {
            columns: self.columns.clone(),
            total: self.rows.len(),
            page,
            page_size,
            rows,
        }
    }
}

impl fmt::Display for RowTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<&str> = self.columns.iter().map(|c| c.name()).collect();
        writeln!(f, "{}", header.join("\t"))?;
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.as_ref().map_or_else(|| "NA".to_string(), Cell::to_string))
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
