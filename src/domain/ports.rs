use crate::domain::model::{CourseRecord, StudentRecord};

/// Source of the courses and students a registry is seeded with.
pub trait CatalogProvider {
    fn courses(&self) -> &[CourseRecord];
    fn students(&self) -> &[StudentRecord];
}
