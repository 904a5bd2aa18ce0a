use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use matcher::MatchTable;
use tracing::debug;

/// Column header of the result table.
pub const OUTPUT_HEADER: [&str; 4] = ["id", "url", "score", "abstract"];

/// Serialize `table` as CSV, one row per identifier, sorted by identifier.
pub fn write_matches<W: Write>(table: &MatchTable, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(OUTPUT_HEADER)?;
    for (id, entry) in table.sorted() {
        let score = format!("{:.6}", entry.score);
        csv.write_record([id, entry.url.as_str(), score.as_str(), entry.abstract_text.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

/// Create or truncate `path` and write `table` to it.
pub fn write_results(table: &MatchTable, path: &Path) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_matches(table, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), rows = table.len(), "results_written");
    Ok(())
}
