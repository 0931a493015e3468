use crate::utils::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Seed data for one course, as it appears in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    pub title: String,
    pub description: String,
    pub capacity: usize,
    pub schedule: String,
}

/// Seed data for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
}

/// A course offering. Keeps the ids of its enrolled students in enrollment order.
#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    title: String,
    description: String,
    capacity: usize,
    schedule: String,
    enrolled: Vec<String>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: usize,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            capacity,
            schedule: schedule.into(),
            enrolled: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    pub fn enrolled(&self) -> &[String] {
        &self.enrolled
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    pub fn available_slots(&self) -> usize {
        self.capacity.saturating_sub(self.enrolled.len())
    }

    pub fn is_full(&self) -> bool {
        self.enrolled.len() >= self.capacity
    }

    /// Adds the student if a seat is free. Duplicates are the caller's concern.
    pub fn enroll(&mut self, student_id: &str) -> bool {
        if self.is_full() {
            return false;
        }
        self.enrolled.push(student_id.to_string());
        true
    }

    pub fn drop(&mut self, student_id: &str) -> bool {
        match self.enrolled.iter().position(|id| id == student_id) {
            Some(index) => {
                self.enrolled.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn display_details(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl From<&CourseRecord> for Course {
    fn from(record: &CourseRecord) -> Self {
        Course::new(
            record.code.clone(),
            record.title.clone(),
            record.description.clone(),
            record.capacity,
            record.schedule.clone(),
        )
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course Code: {}", self.code)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Capacity: {}", self.capacity)?;
        writeln!(f, "Schedule: {}", self.schedule)?;
        writeln!(f, "Available Slots: {}", self.available_slots())
    }
}

/// A student. Holds course codes rather than courses so the two sides never own each other.
#[derive(Debug, Clone)]
pub struct Student {
    id: String,
    name: String,
    registered: Vec<String>,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            registered: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registered_courses(&self) -> &[String] {
        &self.registered
    }

    pub fn is_registered(&self, code: &str) -> bool {
        self.registered.iter().any(|c| c == code)
    }

    /// Membership is checked before the course is touched, so a repeat
    /// registration never takes a seat.
    pub fn register_course(&mut self, course: &mut Course) -> Result<()> {
        if self.is_registered(course.code()) {
            return Err(RegistryError::DuplicateRegistration {
                student_id: self.id.clone(),
                code: course.code().to_string(),
            });
        }
        if !course.enroll(&self.id) {
            return Err(RegistryError::CapacityExceeded {
                code: course.code().to_string(),
                capacity: course.capacity(),
            });
        }
        self.registered.push(course.code().to_string());
        Ok(())
    }

    pub fn drop_course(&mut self, course: &mut Course) -> Result<()> {
        if !self.is_registered(course.code()) || !course.drop(&self.id) {
            return Err(RegistryError::NotRegistered {
                student_id: self.id.clone(),
                code: course.code().to_string(),
            });
        }
        self.registered.retain(|c| c != course.code());
        Ok(())
    }

    /// Prints the header then every registered course, in registration order.
    pub fn display_registered_courses(
        &self,
        courses: &BTreeMap<String, Course>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(out, "Registered Courses for {} (ID: {}):", self.name, self.id)?;
        for course in self.registered.iter().filter_map(|code| courses.get(code)) {
            course.display_details(out)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl From<&StudentRecord> for Student {
    fn from(record: &StudentRecord) -> Self {
        Student::new(record.id.clone(), record.name.clone())
    }
}
