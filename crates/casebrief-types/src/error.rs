use thiserror::Error;

/// A value that deserialized but violates the result schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

pub(crate) fn check_unit(field: &'static str, value: f64) -> Result<(), SchemaError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::OutOfRange { field, value })
    }
}
