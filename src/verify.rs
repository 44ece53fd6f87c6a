//! Round-trip correctness gate.
//!
//! Runs once per codec on one representative round trip, outside the
//! timed loop. A codec that silently drops records would otherwise look
//! fast; exact count equality is the minimum bar for trusting its
//! timings.

use crate::dataset::Dataset;
use crate::error::VerificationError;

pub fn check(original: &Dataset, decoded: &Dataset) -> Result<(), VerificationError> {
    if decoded.len() != original.len() {
        return Err(VerificationError::CountMismatch {
            expected: original.len(),
            actual: decoded.len(),
        });
    }
    Ok(())
}
