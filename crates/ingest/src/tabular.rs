//! Catalog and credit table readers.
//!
//! Both readers resolve their columns from the header row by name, then turn
//! each data row into a record. A missing required column is fatal; a row
//! that is short, undecodable, or lacks an id is skipped and counted.
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::IngestError;
use crate::names::decode_names;
use crate::types::{CatalogRecord, CreditRecord};

/// Columns read from the movie metadata table.
pub const CATALOG_COLUMNS: [&str; 5] = [
    "id",
    "title",
    "original_title",
    "production_companies",
    "release_date",
];

/// Columns read from the credits table.
pub const CREDIT_COLUMNS: [&str; 3] = ["id", "cast", "crew"];

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Counters and row-level problems collected while loading one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Name of the input, for messages.
    pub input: String,
    /// Data rows seen, header excluded.
    pub total_rows: usize,
    /// Rows dropped entirely.
    pub skipped_rows: usize,
    /// `(data row number, message)`; rows numbered from 1. A row can appear
    /// here without being skipped (e.g. an unreadable release date).
    pub row_errors: Vec<(usize, String)>,
}

impl TableStats {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Default::default()
        }
    }

    fn skip(&mut self, row: usize, message: String) {
        self.skipped_rows += 1;
        self.row_errors.push((row, message));
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A total of {} rows were parsed from {}. {} rows skipped, {} row errors.",
            self.total_rows,
            self.input,
            self.skipped_rows,
            self.row_errors.len()
        )
    }
}

/// Header positions of the columns a reader needs.
struct Columns {
    positions: HashMap<&'static str, usize>,
    width: usize,
}

impl Columns {
    fn resolve(
        input: &str,
        headers: &StringRecord,
        required: &[&'static str],
    ) -> Result<Self, IngestError> {
        let mut positions = HashMap::with_capacity(required.len());
        for &column in required {
            let position = headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| IngestError::MissingColumn {
                    input: input.to_string(),
                    column: column.to_string(),
                })?;
            positions.insert(column, position);
        }
        let width = positions.values().copied().max().map_or(0, |max| max + 1);
        Ok(Self { positions, width })
    }

    fn get<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|&position| row.get(position))
            .unwrap_or("")
    }
}

/// Walks the data rows of a table, handing each usable row to `parse_row`.
fn read_table<R, F>(
    input: &str,
    reader: R,
    required: &[&'static str],
    mut parse_row: F,
) -> Result<TableStats, IngestError>
where
    R: Read,
    F: FnMut(&Columns, &StringRecord, usize, &mut TableStats),
{
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyTable(input.to_string()));
    }
    let columns = Columns::resolve(input, &headers, required)?;
    info!(input, columns = ?required, "reading_table");

    let mut stats = TableStats::new(input);
    for result in rdr.records() {
        stats.total_rows += 1;
        let row_number = stats.total_rows;

        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(csv_error(err)),
            Err(err) => {
                stats.skip(row_number, format!("could not parse row: {err}"));
                continue;
            }
        };

        if row.len() < columns.width {
            stats.skip(
                row_number,
                format!(
                    "row has {} columns when at least {} are expected",
                    row.len(),
                    columns.width
                ),
            );
            continue;
        }

        if columns.get(&row, "id").trim().is_empty() {
            stats.skip(row_number, "row has an empty id".to_string());
            continue;
        }

        parse_row(&columns, &row, row_number, &mut stats);
    }

    info!(
        input,
        total_rows = stats.total_rows,
        skipped_rows = stats.skipped_rows,
        row_errors = stats.row_errors.len(),
        "table_loaded"
    );
    for (row, message) in &stats.row_errors {
        debug!(input, row, error = %message, "table_row_error");
    }

    Ok(stats)
}

fn csv_error(err: csv::Error) -> IngestError {
    IngestError::Io(err.to_string())
}

/// Read the movie metadata table into catalog records.
///
/// ```rust
/// use ingest::read_catalog;
///
/// let table = "id,title,original_title,production_companies,release_date\n\
///              862,Toy Story,Toy Story,\"[{'name': 'Pixar Animation Studios', 'id': 3}]\",1995-10-30\n";
/// let (records, stats) = read_catalog("movies_metadata.csv", table.as_bytes()).unwrap();
/// assert_eq!(records[0].tokens, vec!["pixar animation studios", "1995"]);
/// assert_eq!(stats.total_rows, 1);
/// ```
pub fn read_catalog<R: Read>(
    input: &str,
    reader: R,
) -> Result<(Vec<CatalogRecord>, TableStats), IngestError> {
    let mut records = Vec::new();
    let stats = read_table(input, reader, &CATALOG_COLUMNS, |columns, row, row_number, stats| {
        let release_date = columns.get(row, "release_date").trim();
        let release_year = if release_date.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(release_date, RELEASE_DATE_FORMAT) {
                Ok(date) => Some(date.year()),
                Err(_) => {
                    stats.row_errors.push((
                        row_number,
                        format!("column has value {release_date:?} which cannot be converted to a date"),
                    ));
                    None
                }
            }
        };

        records.push(CatalogRecord::new(
            columns.get(row, "id").trim(),
            columns.get(row, "title"),
            columns.get(row, "original_title"),
            decode_names(columns.get(row, "production_companies")),
            release_year,
        ));
    })?;

    Ok((records, stats))
}

/// Read the credits table into credit records.
pub fn read_credits<R: Read>(
    input: &str,
    reader: R,
) -> Result<(Vec<CreditRecord>, TableStats), IngestError> {
    let mut records = Vec::new();
    let stats = read_table(input, reader, &CREDIT_COLUMNS, |columns, row, _, _| {
        records.push(CreditRecord::new(
            columns.get(row, "id").trim(),
            decode_names(columns.get(row, "cast")),
            decode_names(columns.get(row, "crew")),
        ));
    })?;

    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = "\
adult,id,original_title,production_companies,release_date,title
False,862,Toy Story,\"[{'name': 'Pixar Animation Studios', 'id': 3}]\",1995-10-30,Toy Story
False,8844,Jumanji,\"[{'name': 'TriStar Pictures', 'id': 559}, {'name': 'Teitler Film', 'id': 2550}]\",1995-12-15,Jumanji
False,,No Id,[],1995-01-01,No Id
False,194,Le Fabuleux Destin d'Amélie Poulain,[],,Amélie
False,31357,Waiting to Exhale,[],not-a-date,Waiting to Exhale
short,row
";

    #[test]
    fn reads_catalog_rows() {
        let (records, stats) = read_catalog("metadata", METADATA.as_bytes()).expect("catalog");

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["862", "8844", "194", "31357"]);

        assert_eq!(records[1].tokens, vec!["tristar pictures", "teitler film", "1995"]);
        assert_eq!(records[2].title, "amélie");
        assert_eq!(records[2].alternate_title, "le fabuleux destin d'amélie poulain");
        assert!(records[2].tokens.is_empty());
        assert!(records[3].tokens.is_empty());

        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.skipped_rows, 2);
        assert_eq!(stats.row_errors.len(), 3);
        assert!(stats.row_errors.iter().any(|(row, msg)| *row == 5 && msg.contains("not-a-date")));
    }

    #[test]
    fn missing_column_is_fatal() {
        let table = "id,title,production_companies,release_date\n1,Heat,[],1995-12-15\n";
        let err = read_catalog("metadata", table.as_bytes()).expect_err("missing column");
        assert_eq!(
            err,
            IngestError::MissingColumn {
                input: "metadata".into(),
                column: "original_title".into(),
            }
        );
    }

    #[test]
    fn empty_table_is_fatal() {
        let err = read_credits("credits", "".as_bytes()).expect_err("empty");
        assert_eq!(err, IngestError::EmptyTable("credits".into()));
    }

    #[test]
    fn reads_credit_rows() {
        let table = "\
cast,crew,id
\"[{'character': 'Woody (voice)', 'name': 'Tom Hanks'}, {'name': 'Tim Allen'}]\",\"[{'job': 'Director', 'name': 'John Lasseter'}]\",862
[],[],8844
";
        let (records, stats) = read_credits("credits", table.as_bytes()).expect("credits");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "862");
        assert_eq!(records[0].tokens, vec!["tom hanks", "tim allen", "john lasseter"]);
        assert!(records[1].tokens.is_empty());
        assert_eq!(stats.to_string(), "A total of 2 rows were parsed from credits. 0 rows skipped, 0 row errors.");
    }
}
