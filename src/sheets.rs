//! Import options for Sheets-backed external tables.
//!
//! The query service consumes these as part of an external table definition;
//! this module only builds the options record and converts it to and from
//! the service's JSON wire form.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Format type tag for Sheets-backed external tables.
pub const GOOGLE_SHEETS: &str = "GOOGLE_SHEETS";

/// Immutable options record for importing from a spreadsheet.
///
/// Unset options stay absent on the wire rather than being encoded as
/// sentinel values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_leading_rows: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<String>,
}

impl SheetsOptions {
    pub fn builder() -> SheetsOptionsBuilder {
        SheetsOptionsBuilder::default()
    }

    /// A builder seeded with this record's values.
    pub fn to_builder(&self) -> SheetsOptionsBuilder {
        SheetsOptionsBuilder {
            skip_leading_rows: self.skip_leading_rows,
            range: self.range.clone(),
        }
    }

    /// Number of leading rows to skip when importing, if set.
    pub fn skip_leading_rows(&self) -> Option<i64> {
        self.skip_leading_rows
    }

    /// Cell range to import (e.g. `sheet1!A1:B20`), if set.
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// The format type this options record configures.
    pub fn format_type(&self) -> &'static str {
        GOOGLE_SHEETS
    }

    /// Convert to the service's JSON wire form.
    pub fn to_wire(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a record from its wire form. Unknown fields are tolerated;
    /// wrongly-typed ones fail with [`crate::Error::Wire`].
    pub fn from_wire(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SheetsOptionsBuilder {
    skip_leading_rows: Option<i64>,
    range: Option<String>,
}

impl SheetsOptionsBuilder {
    pub fn skip_leading_rows(mut self, rows: i64) -> Self {
        self.skip_leading_rows = Some(rows);
        self
    }

    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn build(self) -> SheetsOptions {
        SheetsOptions {
            skip_leading_rows: self.skip_leading_rows,
            range: self.range,
        }
    }
}
