// Import module - legacy JSON migration and record validation

pub mod legacy_json;
pub mod validation;

pub use legacy_json::{import_into, load_files, ImportSummary, LegacyData};
pub use validation::{amount_issues, record_issues, ValidationIssue};
