//! Input-shape errors raised by the scoring core and its loaders.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PoolError>;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from a table header.
    #[error("{table}: missing required column `{column}`")]
    MissingColumn { table: &'static str, column: String },

    /// A row has fewer fields than the table layout needs.
    #[error("{table} row {row}: expected at least {expected} fields, found {found}")]
    ShortRow {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A numeric field failed to parse.
    #[error("{table} row {row}: invalid {field} `{value}`")]
    InvalidNumber {
        table: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Fixture numbers must run 1..=n in schedule order.
    #[error("schedule position {position} carries match number {number}")]
    MisnumberedFixture { position: usize, number: u32 },

    #[error("results table has {results} rows but the schedule has {fixtures} matches")]
    ResultsMismatch { results: usize, fixtures: usize },

    #[error("participant `{0}` appears more than once")]
    DuplicateParticipant(String),

    /// A rectangular grid was requested over prediction sequences of different lengths.
    #[error("prediction lengths differ: `{participant}` has {found}, expected {expected}")]
    UnevenPredictions {
        participant: String,
        expected: usize,
        found: usize,
    },

    #[error("{remaining} undecided matches exceed the countable outcome range")]
    OutcomeOverflow { remaining: usize },
}
