// Entity Models
//
// Immutable values produced by the parser and read by the query engine.

pub mod person;

pub use person::{Gender, Person, UnknownGender};
