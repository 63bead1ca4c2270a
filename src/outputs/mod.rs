//! Writers for the harvested records.
//!
//! # Submodules
//!
//! - [`csv`]: the record file, one quoted row per article under a header row
//! - [`json`]: an optional report with the run parameters and all records
//!
//! # Output Structure
//!
//! ```text
//! dummy_news_archive.csv
//! json_output_dir/
//! └── 2011-01-01_2011-01-15.json
//! ```

pub mod csv;
pub mod json;
