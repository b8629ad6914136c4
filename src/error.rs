/* crate use */
use thiserror::Error;

/// Crate-level error type (section 7).
///
/// `Io` and `Gfa` are the non-fatal categories from section 7 ("I/O" and "inconsistent
/// evidence"); callers are expected to log and continue rather than abort the whole run.
/// `Overflow` is the one fatal, programmer-error category: it should never occur for any
/// graph that fits in memory, and indicates a bug rather than bad input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed input: {0}")]
    Gfa(String),

    #[error("identifier space exhausted")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, Error>;
