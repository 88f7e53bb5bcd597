// 🏗️ Parser - address book CSV → Person values
// One row per person: name, gender, birth date (D/M/YY)

use chrono::{Local, Months, NaiveDate};
use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use tracing::{debug, error};

use crate::entities::{Gender, Person};
use crate::errors::{AddressBookError, Result};

/// Columns every row must carry: name, gender, birth date
pub const EXPECTED_FIELDS: usize = 3;

/// Two-digit years are read as 20YY, then pulled back a century if that lands in the future
const CENTURY_BASE: i32 = 2000;
const CENTURY_MONTHS: u32 = 1200;

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// PersonSource - anything that can turn a path into a list of persons
///
/// The report facade depends on this trait, not on the CSV reader, so tests
/// can hand it canned data.
pub trait PersonSource {
    /// Read every person from the file at `path`
    ///
    /// # Returns
    /// * `Ok(Vec<Person>)` - one entry per data row, in file order
    /// * `Err(AddressBookError)` - first failure aborts the whole read
    fn read_persons(&self, path: &str) -> Result<Vec<Person>>;
}

// ============================================================================
// CSV READER
// ============================================================================

/// Reads `name,gender,D/M/YY` rows without a header line
#[derive(Debug, Clone, Default)]
pub struct CsvPersonReader {
    /// Fixed reference date for the future-date correction (None = local today)
    today: Option<NaiveDate>,
}

impl CsvPersonReader {
    pub fn new() -> Self {
        CsvPersonReader { today: None }
    }

    /// Pin "today" so the century correction is deterministic
    pub fn with_today(today: NaiveDate) -> Self {
        CsvPersonReader { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Parse rows from any reader. Used by `read_persons` once the file is open.
    pub fn parse_rows<R: Read>(&self, input: R, source: &str) -> Result<Vec<Person>> {
        let today = self.today();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);

        let mut persons = Vec::new();

        for result in reader.byte_records() {
            let raw = result.map_err(|err| classify_csv_error(err, source))?;
            let line = raw.position().map(|p| p.line()).unwrap_or(0);

            let record = StringRecord::from_byte_record(raw).map_err(|err| {
                let reason = format!("field {} is not valid UTF-8", err.utf8_error().field() + 1);
                let row = lossy_row(&err.into_byte_record());
                error!(
                    source,
                    line,
                    row = %row,
                    "file on provided path cannot be read: CSV structure/data unexpected: {}",
                    reason
                );
                AddressBookError::malformed(line, row, reason)
            })?;

            let person = record_to_person(&record, today).map_err(|reason| {
                let row = raw_row(&record);
                error!(
                    source,
                    line,
                    row = %row,
                    "file on provided path cannot be read: CSV structure/data unexpected: {}",
                    reason
                );
                AddressBookError::malformed(line, row, reason)
            })?;

            persons.push(person);
        }

        debug!(source, count = persons.len(), "parsed address book");
        Ok(persons)
    }
}

impl PersonSource for CsvPersonReader {
    fn read_persons(&self, path: &str) -> Result<Vec<Person>> {
        if path.trim().is_empty() {
            error!("given address book file path is blank");
            return Err(AddressBookError::InvalidInput(
                "given address book file path is blank".to_string(),
            ));
        }

        let file = File::open(path).map_err(|source| {
            error!(path, error = %source, "file on provided path cannot be read");
            AddressBookError::SourceUnavailable {
                path: path.to_string(),
                source,
            }
        })?;

        self.parse_rows(file, path)
    }
}

// ============================================================================
// ROW CONVERSION
// ============================================================================

/// Turn one CSV record into a Person, or explain why not
fn record_to_person(record: &StringRecord, today: NaiveDate) -> std::result::Result<Person, String> {
    if record.len() != EXPECTED_FIELDS {
        return Err(format!(
            "expected {} fields, found {}",
            EXPECTED_FIELDS,
            record.len()
        ));
    }

    let name = &record[0];
    if name.is_empty() {
        return Err("name is empty".to_string());
    }

    let gender: Gender = record[1].parse().map_err(|e| format!("{}", e))?;

    let birth_date = parse_short_date(&record[2])?;
    let birth_date = correct_century(birth_date, today)?;

    Ok(Person::new(name, gender, birth_date))
}

/// Parse `D/M/YY` (day and month 1-2 digits, year exactly 2 digits) as 20YY
pub fn parse_short_date(token: &str) -> std::result::Result<NaiveDate, String> {
    let invalid = || format!("date '{}' is not in D/M/YY format", token);

    let parts: Vec<&str> = token.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };

    let day = parse_digits(day, 1, 2).ok_or_else(invalid)?;
    let month = parse_digits(month, 1, 2).ok_or_else(invalid)?;
    let year = parse_digits(year, 2, 2).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(CENTURY_BASE + year as i32, month, day)
        .ok_or_else(|| format!("date '{}' is not a valid calendar date", token))
}

/// Subtract exactly 100 years from dates strictly after `today`
pub fn correct_century(date: NaiveDate, today: NaiveDate) -> std::result::Result<NaiveDate, String> {
    if date <= today {
        return Ok(date);
    }

    date.checked_sub_months(Months::new(CENTURY_MONTHS))
        .ok_or_else(|| format!("date {} cannot be moved back a century", date))
}

fn parse_digits(token: &str, min_len: usize, max_len: usize) -> Option<u32> {
    let len_ok = token.len() >= min_len && token.len() <= max_len;
    if !len_ok || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn raw_row(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

fn lossy_row(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

/// I/O trouble mid-stream is still "source unavailable"; anything else is bad content.
/// Undecodable rows never get here, they are reported with their bytes above.
fn classify_csv_error(err: csv::Error, source: &str) -> AddressBookError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);

    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => {
            error!(source, error = %io_err, "file on provided path cannot be read");
            AddressBookError::SourceUnavailable {
                path: source.to_string(),
                source: io_err,
            }
        }
        other => {
            let reason = format!("CSV reader error: {:?}", other);
            error!(source, line, "{}", reason);
            AddressBookError::malformed(line, String::new(), reason)
        }
    }
}
