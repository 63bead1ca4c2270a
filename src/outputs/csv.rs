//! CSV output.
//!
//! Columns, in order: `Newspaper, Link, Headline, Content, Summary, Category, Date`.
//! Every field is quoted and the header row is written even when there are
//! no records.

use crate::error::Result;
use crate::models::ArticleRecord;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

pub const CSV_HEADER: [&str; 7] = [
    "Newspaper", "Link", "Headline", "Content", "Summary", "Category", "Date",
];

/// Write `records` to any writer.
pub fn write_records<W: Write>(records: &[ArticleRecord], out: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `records` to the file at `path`, replacing it.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_csv(records: &[ArticleRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records(records, file)?;
    info!(count = records.len(), "Wrote CSV");
    Ok(())
}
