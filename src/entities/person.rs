// 👤 Person Entity - one parsed address book row
//
// A Person is a VALUE: name, gender and birth date are fixed at construction.
// Two persons with identical fields are the same person as far as queries go.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// GENDER
// ============================================================================

/// Closed two-valued classification of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Every variant, in declaration order
    pub fn all() -> [Gender; 2] {
        [Gender::Male, Gender::Female]
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender '{0}', expected Male or Female")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    /// Exact, case-sensitive match against the variant names
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

// ============================================================================
// PERSON ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    gender: Gender,
    birth_date: NaiveDate,
}

impl Person {
    pub fn new(name: impl Into<String>, gender: Gender, birth_date: NaiveDate) -> Self {
        Person {
            name: name.into(),
            gender,
            birth_date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Case-sensitive substring match on the full name
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.contains(fragment)
    }
}
