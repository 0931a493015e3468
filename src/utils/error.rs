use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Student not found: {id}")]
    StudentNotFound { id: String },

    #[error("Course not found: {code}")]
    CourseNotFound { code: String },

    #[error("Course {code} is full (capacity {capacity})")]
    CapacityExceeded { code: String, capacity: usize },

    #[error("Student {student_id} is already registered for {code}")]
    DuplicateRegistration { student_id: String, code: String },

    #[error("Student {student_id} is not registered for {code}")]
    NotRegistered { student_id: String, code: String },

    #[error("Invalid menu choice: {input:?}")]
    InvalidMenuChoice { input: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate key {key:?} in {field}")]
    DuplicateKeyError { field: String, key: String },
}

impl RegistryError {
    /// The line shown to the person at the menu.
    ///
    /// A full course and a repeated registration share one message, as do the
    /// drop failures; the precise variant only shows up in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            RegistryError::StudentNotFound { .. } => "Student not found.".to_string(),
            RegistryError::CourseNotFound { .. } => "Course not found.".to_string(),
            RegistryError::CapacityExceeded { .. } | RegistryError::DuplicateRegistration { .. } => {
                "Failed to register for the course. It may be full or already registered."
                    .to_string()
            }
            RegistryError::NotRegistered { .. } => {
                "Failed to drop the course. It may not be registered.".to_string()
            }
            RegistryError::InvalidMenuChoice { .. } => {
                "Invalid choice. Please try again.".to_string()
            }
            RegistryError::IoError(e) => format!("Console I/O failed: {}", e),
            RegistryError::ConfigValidationError { field, message } => {
                format!("Catalog configuration problem ({}): {}", field, message)
            }
            RegistryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Catalog value for {} is invalid: {}", field, reason)
            }
            RegistryError::DuplicateKeyError { field, key } => {
                format!("Catalog lists {} more than once in {}", key, field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::IoError(_) => "Check that the catalog file exists and is readable",
            RegistryError::ConfigValidationError { .. } => {
                "Make sure the catalog is valid TOML with [[courses]] and [[students]] tables"
            }
            RegistryError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the catalog file"
            }
            RegistryError::DuplicateKeyError { .. } => {
                "Course codes and student ids must be unique"
            }
            _ => "Pick another option from the menu",
        }
    }

    /// Recoverable errors are reported at the menu and the session carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RegistryError::StudentNotFound { .. }
                | RegistryError::CourseNotFound { .. }
                | RegistryError::CapacityExceeded { .. }
                | RegistryError::DuplicateRegistration { .. }
                | RegistryError::NotRegistered { .. }
                | RegistryError::InvalidMenuChoice { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
