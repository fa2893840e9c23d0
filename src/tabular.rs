//! Generic tabular access for the source exports and the combined output.
//!
//! Both exports are comma-delimited UTF-8 with a header row. Readers address
//! fields by column name so the pipeline stages never depend on column
//! positions; the writer is parametrized by an explicit field list so the
//! output schema lives with the exporter, not here.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::Result;

/// A fully-read table: header lookup plus all data rows.
#[derive(Debug)]
pub struct Table {
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Read the whole file into memory. Short rows are accepted; fields
    /// beyond a row's length read as absent.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }

        Ok(Self { columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }
}

/// One data row addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    values: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Raw cell value, `None` when the table has no such column or the row
    /// is too short. Empty cells are returned as `Some("")`.
    pub fn raw(&self, column: &str) -> Option<&'a str> {
        self.columns
            .get(column)
            .and_then(|&index| self.values.get(index))
    }

    /// Cell value with empty cells treated as absent.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.raw(column).filter(|value| !value.is_empty())
    }
}

/// Writer emitting rows under a fixed, caller-supplied column list.
pub struct TableWriter {
    writer: csv::Writer<File>,
    fields: &'static [&'static str],
}

impl TableWriter {
    /// Create the output file and write the header row.
    pub fn create(path: &Path, fields: &'static [&'static str]) -> Result<Self> {
        let mut writer = WriterBuilder::new().from_path(path)?;
        writer.write_record(fields)?;
        Ok(Self { writer, fields })
    }

    /// Write one row by resolving every declared field in order; fields
    /// that resolve to `None` are written as empty cells.
    pub fn write_row<F>(&mut self, mut resolve: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let values: Vec<String> = self
            .fields
            .iter()
            .map(|field| resolve(field).unwrap_or_default())
            .collect();
        self.writer.write_record(&values)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
