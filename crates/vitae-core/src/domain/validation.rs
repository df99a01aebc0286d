use std::borrow::Cow;

use crate::domain::{
    error::DomainError,
    record::{Record, SUBJECT_NAME_PATH},
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// The record must name its subject before anything is rendered.
    pub fn validate_subject(record: &Record) -> Result<Cow<'_, str>, DomainError> {
        record
            .subject_name()
            .ok_or(DomainError::MissingSubjectName {
                field: SUBJECT_NAME_PATH,
            })
    }
}
