//! Extractors Crate
//!
//! Parsers that turn spreadsheet exports into typed records.
//!
//! # Available Extractors
//!
//! - `CsvTableParser`: parses a CSV export into rows and a header-indexed table
//! - `CommunityExtractor`: maps the community submission sheet to `CommunityPost`s
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::CommunityExtractor;
//!
//! let posts = CommunityExtractor::new().extract_published(&csv_text);
//! ```

pub mod community;
pub mod csv_table;

pub use community::CommunityExtractor;
pub use csv_table::{CsvRecord, CsvTable, CsvTableParser};
