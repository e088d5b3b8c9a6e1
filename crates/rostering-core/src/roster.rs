//! Roster context: the sample workbook embedded into the copilot prompt.
//!
//! The workbook is illustrative only. It is never validated beyond being a
//! map of sheet names to lists of rows; each row is an arbitrary JSON object.
//! Sheets and columns keep their workbook order.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A single worksheet row (column name to cell value).
pub type RosterRow = Map<String, Value>;

/// Sheet name to rows, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RosterContext {
    sheets: Vec<(String, Vec<RosterRow>)>,
}

impl TryFrom<Map<String, Value>> for RosterContext {
    type Error = serde_json::Error;

    fn try_from(workbook: Map<String, Value>) -> Result<Self, Self::Error> {
        let sheets = workbook
            .into_iter()
            .map(|(name, rows)| {
                let rows: Vec<RosterRow> = serde_json::from_value(rows)?;
                Ok((name, rows))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        Ok(Self { sheets })
    }
}

impl RosterContext {
    /// An empty context, used when no workbook is available.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a workbook from its JSON form: `{ "<sheet>": [ {..row..}, .. ] }`.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Total number of rows across all sheets.
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|(_, rows)| rows.len()).sum()
    }

    /// Every sheet, in workbook order, truncated to its first `rows_per_sheet` rows.
    pub fn preview(&self, rows_per_sheet: usize) -> Vec<(&str, &[RosterRow])> {
        self.sheets
            .iter()
            .map(|(name, rows)| (name.as_str(), &rows[..rows.len().min(rows_per_sheet)]))
            .collect()
    }

    /// Pretty-printed JSON of [`RosterContext::preview`], for embedding in prompts.
    pub fn preview_json(&self, rows_per_sheet: usize) -> Result<String, CoreError> {
        let workbook: Map<String, Value> = self
            .preview(rows_per_sheet)
            .into_iter()
            .map(|(name, rows)| {
                let rows = rows.iter().cloned().map(Value::Object).collect();
                (name.to_string(), Value::Array(rows))
            })
            .collect();
        Ok(serde_json::to_string_pretty(&workbook)?)
    }
}
