pub mod errors;
pub mod record;

pub use errors::{LoadError, ReportError, Result};
pub use record::{
    non_finite_literal, FieldValue, Record, BUILD_ID_FIELD, BUILD_URL_FIELD, COMMIT_SHA_FIELD,
    DATE_FIELD, DEFAULT_DATE_FORMAT, MODEL_ID_FIELD, SOURCE_FILE_FIELD,
};
