// 🔎 Query Engine - counting, oldest person, birth-date distance
//
// Holds the parsed collection as a list of optional slots. Absent slots are
// skipped by every query.

use tracing::{debug, warn};

use crate::entities::{Gender, Person};
use crate::errors::{AddressBookError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// QUERY TRAIT
// ============================================================================

/// PersonQueries - the three questions asked of an address book
pub trait PersonQueries {
    /// Replace the collection the queries run over
    fn set_persons(&mut self, persons: Vec<Option<Person>>);

    /// Number of present persons with the given gender
    fn count_persons_of_gender(&self, gender: Gender) -> Result<usize>;

    /// Earliest-born present person; first in sequence order on ties
    fn oldest_person(&self) -> Result<Option<Person>>;

    /// Days from A's birth date to B's (positive when A is older)
    ///
    /// A and B are resolved by case-sensitive substring match on the name.
    fn days_older(&self, name_a: &str, name_b: &str) -> Result<i64>;
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    /// None until a collection is supplied
    persons: Option<Vec<Option<Person>>>,
}

impl QueryEngine {
    /// Engine with no collection yet; queries fail with NotInitialized
    pub fn new() -> Self {
        QueryEngine { persons: None }
    }

    pub fn with_persons(persons: Vec<Option<Person>>) -> Self {
        QueryEngine {
            persons: Some(persons),
        }
    }

    /// Wrap parser output (which never has holes) as a full set of slots
    pub fn from_persons<I>(persons: I) -> Self
    where
        I: IntoIterator<Item = Person>,
    {
        Self::with_persons(persons.into_iter().map(Some).collect())
    }

    pub fn is_initialized(&self) -> bool {
        self.persons.is_some()
    }

    fn slots(&self) -> Result<&[Option<Person>]> {
        self.persons
            .as_deref()
            .ok_or(AddressBookError::NotInitialized)
    }

    /// Present persons whose name contains either fragment, in sequence order
    fn matching_persons<'a>(
        slots: &'a [Option<Person>],
        name_a: &str,
        name_b: &str,
    ) -> Vec<&'a Person> {
        let matches = |p: &&'a Person| p.name_contains(name_a) || p.name_contains(name_b);

        // rayon's collect keeps sequence order, pairing below relies on it
        #[cfg(feature = "parallel")]
        let found: Vec<&'a Person> = slots
            .par_iter()
            .filter_map(Option::as_ref)
            .filter(matches)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let found: Vec<&'a Person> = slots.iter().filter_map(Option::as_ref).filter(matches).collect();

        found
    }
}

impl PersonQueries for QueryEngine {
    fn set_persons(&mut self, persons: Vec<Option<Person>>) {
        debug!(slots = persons.len(), "query engine loaded");
        self.persons = Some(persons);
    }

    fn count_persons_of_gender(&self, gender: Gender) -> Result<usize> {
        let count = self
            .slots()?
            .iter()
            .flatten()
            .filter(|p| p.gender() == gender)
            .count();

        Ok(count)
    }

    fn oldest_person(&self) -> Result<Option<Person>> {
        // min_by_key keeps the first of equal minima
        let oldest = self
            .slots()?
            .iter()
            .flatten()
            .min_by_key(|p| p.birth_date())
            .cloned();

        Ok(oldest)
    }

    fn days_older(&self, name_a: &str, name_b: &str) -> Result<i64> {
        let slots = self.slots()?;

        if name_a.trim().is_empty() || name_b.trim().is_empty() {
            return Err(AddressBookError::InvalidInput(
                "person A and B names must be given".to_string(),
            ));
        }

        let not_found = || AddressBookError::AmbiguousOrMissingMatch {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
        };

        let matches = Self::matching_persons(slots, name_a, name_b);

        let [first, second] = matches.as_slice() else {
            warn!(
                name_a,
                name_b,
                found = matches.len(),
                "less than or more than 2 people found"
            );
            return Err(not_found());
        };

        let (person_a, person_b) = if first.name_contains(name_a) && second.name_contains(name_b) {
            (first, second)
        } else if second.name_contains(name_a) && first.name_contains(name_b) {
            (second, first)
        } else {
            warn!(name_a, name_b, "person A or B not found among matches");
            return Err(not_found());
        };

        Ok((person_b.birth_date() - person_a.birth_date()).num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_slots() -> Vec<Option<Person>> {
        vec![
            None,
            None,
            Some(Person::new("Jill Jungle", Gender::Female, date(1982, 4, 4))),
            Some(Person::new("Guybrush Island", Gender::Male, date(1917, 1, 1))),
            Some(Person::new("Jade BeyondGood", Gender::Female, date(1987, 2, 2))),
            Some(Person::new("Lara Raider", Gender::Female, date(1997, 3, 3))),
            None,
            None,
        ]
    }

    fn engine() -> QueryEngine {
        QueryEngine::with_persons(sample_slots())
    }

    #[test]
    fn test_count_females() {
        assert_eq!(engine().count_persons_of_gender(Gender::Female).unwrap(), 3);
    }

    #[test]
    fn test_counts_sum_to_present_entries() {
        let engine = engine();
        let total: usize = Gender::all()
            .iter()
            .map(|g| engine.count_persons_of_gender(*g).unwrap())
            .sum();

        assert_eq!(total, 4);
        assert_eq!(engine.count_persons_of_gender(Gender::Male).unwrap(), 1);
    }

    #[test]
    fn test_oldest_person() {
        let oldest = engine().oldest_person().unwrap().unwrap();
        assert_eq!(oldest.name(), "Guybrush Island");
    }

    #[test]
    fn test_oldest_person_tie_takes_first() {
        let engine = QueryEngine::with_persons(vec![
            None,
            Some(Person::new("Late", Gender::Male, date(1990, 1, 1))),
            Some(Person::new("First Twin", Gender::Male, date(1950, 6, 6))),
            None,
            Some(Person::new("Second Twin", Gender::Female, date(1950, 6, 6))),
        ]);

        let oldest = engine.oldest_person().unwrap().unwrap();
        assert_eq!(oldest.name(), "First Twin");
    }

    #[test]
    fn test_oldest_person_single_entry() {
        let only = Person::new("Solo", Gender::Female, date(2000, 1, 1));
        let engine = QueryEngine::from_persons(vec![only.clone()]);

        assert_eq!(engine.oldest_person().unwrap(), Some(only));
    }

    #[test]
    fn test_days_older() {
        assert_eq!(engine().days_older("Jill", "Jade").unwrap(), 1765);
    }

    #[test]
    fn test_days_older_minus() {
        assert_eq!(engine().days_older("Jade", "Jill").unwrap(), -1765);
    }

    #[test]
    fn test_days_older_is_antisymmetric() {
        let engine = engine();
        let forward = engine.days_older("Guybrush", "Lara").unwrap();
        let backward = engine.days_older("Lara", "Guybrush").unwrap();

        assert!(forward > 0);
        assert_eq!(forward, -backward);
    }

    #[test]
    fn test_days_older_matches_substrings() {
        // "Island" and "Raider" are surname fragments
        let days = engine().days_older("Island", "Raider").unwrap();
        let expected = (date(1997, 3, 3) - date(1917, 1, 1)).num_days();

        assert_eq!(days, expected);
    }

    #[test]
    fn test_days_older_is_case_sensitive() {
        let err = engine().days_older("jill", "Jade").unwrap_err();
        assert!(matches!(err, AddressBookError::AmbiguousOrMissingMatch { .. }));
    }

    #[test]
    fn test_days_older_no_match() {
        let err = engine().days_older("Bill", "Paul").unwrap_err();
        assert!(matches!(err, AddressBookError::AmbiguousOrMissingMatch { .. }));
    }

    #[test]
    fn test_days_older_three_matches() {
        // "a" appears in Jade, Lara and Guybrush Island
        let err = engine().days_older("Jill", "a").unwrap_err();
        assert!(matches!(err, AddressBookError::AmbiguousOrMissingMatch { .. }));
    }

    #[test]
    fn test_days_older_one_name_found_twice() {
        let mut slots = sample_slots();
        slots.push(Some(Person::new(
            "Jill SecondPersonWithName",
            Gender::Female,
            date(1999, 1, 1),
        )));
        let engine = QueryEngine::with_persons(slots);

        let err = engine.days_older("Jill", "Garrett").unwrap_err();
        assert!(matches!(err, AddressBookError::AmbiguousOrMissingMatch { .. }));
    }

    #[test]
    fn test_days_older_blank_names() {
        let engine = engine();

        assert!(matches!(
            engine.days_older("   ", "Jade").unwrap_err(),
            AddressBookError::InvalidInput(_)
        ));
        assert!(matches!(
            engine.days_older("Jade", "").unwrap_err(),
            AddressBookError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_empty_collection() {
        let engine = QueryEngine::with_persons(Vec::new());

        assert_eq!(engine.count_persons_of_gender(Gender::Female).unwrap(), 0);
        assert_eq!(engine.oldest_person().unwrap(), None);
        assert!(matches!(
            engine.days_older("Jill", "Jade").unwrap_err(),
            AddressBookError::AmbiguousOrMissingMatch { .. }
        ));
    }

    #[test]
    fn test_only_absent_slots() {
        let engine = QueryEngine::with_persons(vec![None, None, None]);

        assert_eq!(engine.count_persons_of_gender(Gender::Male).unwrap(), 0);
        assert_eq!(engine.oldest_person().unwrap(), None);
    }

    #[test]
    fn test_uninitialized_engine() {
        let engine = QueryEngine::new();

        assert!(!engine.is_initialized());
        assert!(matches!(
            engine.count_persons_of_gender(Gender::Female).unwrap_err(),
            AddressBookError::NotInitialized
        ));
        assert!(matches!(
            engine.oldest_person().unwrap_err(),
            AddressBookError::NotInitialized
        ));
        assert!(matches!(
            engine.days_older("", "").unwrap_err(),
            AddressBookError::NotInitialized
        ));
    }

    #[test]
    fn test_set_persons_replaces_collection() {
        let mut engine = QueryEngine::new();
        engine.set_persons(sample_slots());
        assert!(engine.is_initialized());
        assert_eq!(engine.count_persons_of_gender(Gender::Female).unwrap(), 3);

        engine.set_persons(vec![Some(Person::new("Solo", Gender::Male, date(1960, 1, 1)))]);
        assert_eq!(engine.count_persons_of_gender(Gender::Female).unwrap(), 0);
        assert_eq!(engine.oldest_person().unwrap().unwrap().name(), "Solo");
    }
}
