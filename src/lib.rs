// Address Book - Core Library
// Parses a people CSV and answers counting, oldest and age-gap queries

pub mod errors;
pub mod entities;
pub mod parser;
pub mod query;
pub mod report;

// Re-export commonly used types
pub use errors::{AddressBookError, Result};
pub use entities::{Gender, Person, UnknownGender};
pub use parser::{CsvPersonReader, PersonSource, parse_short_date, correct_century};
pub use query::{PersonQueries, QueryEngine};
pub use report::{AddressBookReport, Report, ReportConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
