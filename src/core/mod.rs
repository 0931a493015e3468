pub mod menu;
pub mod registry;

pub use crate::domain::model::{Course, CourseRecord, Student, StudentRecord};
pub use crate::domain::ports::CatalogProvider;
pub use crate::utils::error::Result;
