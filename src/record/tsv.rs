//! Append-only TSV log
//!
//! One row per run. The row being appended uses the union of the on-disk
//! header columns and the current report's projects, with `category` and
//! `date` pinned first and the rest sorted. The header itself is written
//! once, when the file is created, and never rewritten: a run that
//! introduces new projects appends a row with more fields than the header
//! declares. Reconciling that drift is left to whatever consumes the file.

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::WriteError;
use crate::report::UsageReport;
use crate::utils::format_date;

/// Fixed leading columns; project columns follow in sorted order.
const BASE_COLUMNS: [&str; 2] = ["category", "date"];

/// First line of an existing log, split on tabs. `None` when the file does
/// not exist or its first line is empty.
fn read_existing_columns(path: &Path) -> Result<Option<Vec<String>>, WriteError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(WriteError::ReadHeader {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(|err| WriteError::ReadHeader {
            path: path.to_path_buf(),
            source: err,
        })?;

    let header = header.trim_end_matches('\n').trim_end_matches('\r');
    if header.is_empty() {
        return Ok(None);
    }
    Ok(Some(header.split('\t').map(str::to_string).collect()))
}

/// Union of the existing columns and the report's projects, base columns
/// first and the rest in ascending lexicographic order. Recomputed every
/// run; applied only to the row being appended now.
fn sorted_columns(existing: &[String], report: &UsageReport) -> Vec<String> {
    let projects: BTreeSet<&str> = existing
        .iter()
        .map(String::as_str)
        .chain(report.counts.keys().map(String::as_str))
        .filter(|column| !BASE_COLUMNS.contains(column))
        .collect();

    BASE_COLUMNS
        .iter()
        .copied()
        .chain(projects)
        .map(str::to_string)
        .collect()
}

pub(crate) fn append_row(
    path: &Path,
    report: &UsageReport,
    today: NaiveDate,
) -> Result<(), WriteError> {
    let existing = read_existing_columns(path)?;
    let is_new_file = existing.is_none();
    let existing_columns =
        existing.unwrap_or_else(|| BASE_COLUMNS.iter().map(|c| c.to_string()).collect());
    let columns = sorted_columns(&existing_columns, report);

    let date = format_date(today);
    let fields: Vec<String> = columns
        .iter()
        .map(|column| match column.as_str() {
            "category" => report.category.clone(),
            "date" => date.clone(),
            project => report
                .counts
                .get(project)
                .map(|count| count.to_string())
                .unwrap_or_default(),
        })
        .collect();

    let append_err = |err| WriteError::Append {
        path: path.to_path_buf(),
        source: err,
    };

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(append_err)?;

    if is_new_file {
        writeln!(file, "{}", columns.join("\t")).map_err(append_err)?;
    }
    writeln!(file, "{}", fields.join("\t")).map_err(append_err)
}
