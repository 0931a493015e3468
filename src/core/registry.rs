use crate::config::catalog::CatalogConfig;
use crate::domain::model::{Course, Student};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{RegistryError, Result};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// All courses keyed by code and all students keyed by id.
///
/// Cross references live on both sides as keys (course -> enrolled student ids,
/// student -> registered course codes) and are only changed together through
/// [`Registry::register`] and [`Registry::drop_course`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    courses: BTreeMap<String, Course>,
    students: BTreeMap<String, Student>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog<C: CatalogProvider>(catalog: &C) -> Result<Self> {
        let mut registry = Self::new();
        for record in catalog.courses() {
            registry.add_course(Course::from(record))?;
        }
        for record in catalog.students() {
            registry.add_student(Student::from(record))?;
        }
        tracing::debug!(
            "Seeded registry with {} courses and {} students",
            registry.courses.len(),
            registry.students.len()
        );
        Ok(registry)
    }

    /// Registry seeded with the built-in sample catalog.
    pub fn sample() -> Self {
        let catalog = CatalogConfig::sample();
        let mut registry = Self::new();
        for record in &catalog.courses {
            registry
                .courses
                .insert(record.code.clone(), Course::from(record));
        }
        for record in &catalog.students {
            registry
                .students
                .insert(record.id.clone(), Student::from(record));
        }
        registry
    }

    pub fn add_course(&mut self, course: Course) -> Result<()> {
        if self.courses.contains_key(course.code()) {
            return Err(RegistryError::DuplicateKeyError {
                field: "courses.code".to_string(),
                key: course.code().to_string(),
            });
        }
        self.courses.insert(course.code().to_string(), course);
        Ok(())
    }

    pub fn add_student(&mut self, student: Student) -> Result<()> {
        if self.students.contains_key(student.id()) {
            return Err(RegistryError::DuplicateKeyError {
                field: "students.id".to_string(),
                key: student.id().to_string(),
            });
        }
        self.students.insert(student.id().to_string(), student);
        Ok(())
    }

    pub fn course(&self, code: &str) -> Result<&Course> {
        self.courses
            .get(code)
            .ok_or_else(|| RegistryError::CourseNotFound {
                code: code.to_string(),
            })
    }

    pub fn student(&self, id: &str) -> Result<&Student> {
        self.students
            .get(id)
            .ok_or_else(|| RegistryError::StudentNotFound { id: id.to_string() })
    }

    /// Courses in ascending code order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn register(&mut self, student_id: &str, course_code: &str) -> Result<()> {
        let (student, course) = self.entry_pair(student_id, course_code)?;
        student.register_course(course)?;
        tracing::info!(
            "{} registered for {} ({} slots left)",
            student_id,
            course_code,
            course.available_slots()
        );
        Ok(())
    }

    pub fn drop_course(&mut self, student_id: &str, course_code: &str) -> Result<()> {
        let (student, course) = self.entry_pair(student_id, course_code)?;
        student.drop_course(course)?;
        tracing::info!(
            "{} dropped {} ({} slots left)",
            student_id,
            course_code,
            course.available_slots()
        );
        Ok(())
    }

    /// Registered courses of one student, in registration order.
    pub fn registered_courses(&self, student_id: &str) -> Result<Vec<&Course>> {
        let student = self.student(student_id)?;
        Ok(student
            .registered_courses()
            .iter()
            .filter_map(|code| self.courses.get(code))
            .collect())
    }

    pub fn display_courses(&self, out: &mut impl Write) -> io::Result<()> {
        for course in self.courses() {
            course.display_details(out)?;
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn display_registered_courses(&self, student_id: &str, out: &mut impl Write) -> Result<()> {
        let student = self.student(student_id)?;
        student.display_registered_courses(&self.courses, out)?;
        Ok(())
    }

    // Student first, then course: the menu reports whichever is missing in that order.
    fn entry_pair(&mut self, student_id: &str, course_code: &str) -> Result<(&mut Student, &mut Course)> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound {
                id: student_id.to_string(),
            })?;
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound {
                code: course_code.to_string(),
            })?;
        Ok((student, course))
    }
}
