// 📋 Report - parse, query, format
//
// Ties a PersonSource to PersonQueries and renders the fixed three-line
// report. `days_older` failing to resolve A/B is reported as "<none>";
// everything else bubbles up.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::entities::Gender;
use crate::errors::{AddressBookError, Result};
use crate::parser::PersonSource;
use crate::query::PersonQueries;

const NONE_PLACEHOLDER: &str = "<none>";

// ============================================================================
// CONFIG
// ============================================================================

/// Which gender to count and which two persons to compare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub gender: Gender,
    pub person_a: String,
    pub person_b: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            gender: Gender::Male,
            person_a: "Bill".to_string(),
            person_b: "Paul".to_string(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub gender: Gender,
    pub gender_count: usize,
    pub oldest_person: Option<String>,
    pub person_a: String,
    pub person_b: String,
    pub days_older: Option<i64>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Count of people with gender {}: {}",
            self.gender, self.gender_count
        )?;
        writeln!(
            f,
            "Oldest person is: {}",
            self.oldest_person.as_deref().unwrap_or(NONE_PLACEHOLDER)
        )?;

        let days = self
            .days_older
            .map(|d| d.to_string())
            .unwrap_or_else(|| NONE_PLACEHOLDER.to_string());
        writeln!(
            f,
            "{} is older than {}: {} days",
            self.person_a, self.person_b, days
        )
    }
}

// ============================================================================
// FACADE
// ============================================================================

pub struct AddressBookReport<S, Q> {
    source: S,
    queries: Q,
    config: ReportConfig,
}

impl<S, Q> AddressBookReport<S, Q>
where
    S: PersonSource,
    Q: PersonQueries,
{
    pub fn new(source: S, queries: Q) -> Self {
        Self::with_config(source, queries, ReportConfig::default())
    }

    pub fn with_config(source: S, queries: Q, config: ReportConfig) -> Self {
        AddressBookReport {
            source,
            queries,
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read the address book at `path` and answer the three queries
    pub fn process(&mut self, path: &str) -> Result<Report> {
        if path.trim().is_empty() {
            return Err(AddressBookError::InvalidInput(
                "given address book file path is blank".to_string(),
            ));
        }

        let persons = self.source.read_persons(path)?;
        self.queries
            .set_persons(persons.into_iter().map(Some).collect());

        let gender_count = self.queries.count_persons_of_gender(self.config.gender)?;
        let oldest_person = self
            .queries
            .oldest_person()?
            .map(|p| p.name().to_string());

        let days_older = match self
            .queries
            .days_older(&self.config.person_a, &self.config.person_b)
        {
            Ok(days) => Some(days),
            Err(err) if err.is_soft() => {
                warn!(
                    person_a = %self.config.person_a,
                    person_b = %self.config.person_b,
                    "no result for days older: {}",
                    err
                );
                None
            }
            Err(err) => return Err(err),
        };

        Ok(Report {
            gender: self.config.gender,
            gender_count,
            oldest_person,
            person_a: self.config.person_a.clone(),
            person_b: self.config.person_b.clone(),
            days_older,
        })
    }
}
