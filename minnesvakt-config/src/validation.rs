//! Custom validation functions for configuration.
//!
//! Shared validation logic used by the configuration structs.

use validator::ValidationError;

/// Validate that a byte count is a multiple of the 8-byte alignment unit.
pub fn validate_multiple_of_eight(value: usize) -> Result<(), ValidationError> {
    if value % 8 == 0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_multiple_of_eight"))
    }
}
