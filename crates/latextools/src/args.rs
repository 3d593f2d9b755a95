/// Counted-options checks for calls that accept alternative content sources

use crate::error::{LatexError, Result};

/// Fail with `message` unless exactly one of `given` is true.
pub fn require_exactly_one(message: &str, given: &[bool]) -> Result<()> {
    if count_given(given) != 1 {
        return Err(LatexError::argument(message));
    }
    Ok(())
}

/// Fail with `message` unless at least one of `given` is true.
pub fn require_at_least_one(message: &str, given: &[bool]) -> Result<()> {
    if count_given(given) < 1 {
        return Err(LatexError::argument(message));
    }
    Ok(())
}

fn count_given(given: &[bool]) -> usize {
    given.iter().filter(|g| **g).count()
}
