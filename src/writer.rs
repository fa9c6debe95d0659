use std::path::Path;

use csv::Writer;

use crate::{ReviewRow, Result};

pub const HEADER: [&str; 4] = ["id", "unix_time", "thumbs_up", "text"];

/// Writes the header and every row, in order, to `path`.
/// The file is truncated first. If a write fails halfway the partial file stays behind.
pub fn write_rows(rows: &[ReviewRow], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record([
            row.id.as_str(),
            row.timestamp.to_string().as_str(),
            vote_str(row.vote),
            row.text.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Matches the `True`/`False` spelling of earlier review dumps.
#[inline]
fn vote_str(vote: bool) -> &'static str {
    if vote {
        "True"
    } else {
        "False"
    }
}
