use crate::domain::model::{CourseRecord, StudentRecord};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seed catalog loaded from TOML:
///
/// ```toml
/// [[courses]]
/// code = "CS101"
/// title = "Introduction to Computer Science"
/// description = "Basic concepts of computer science"
/// capacity = 3
/// schedule = "MWF 10-11 AM"
///
/// [[students]]
/// id = "S001"
/// name = "Alice"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
}

impl CatalogConfig {
    /// Built-in sample data used when no catalog file is given.
    pub fn sample() -> Self {
        let course = |code: &str, title: &str, description: &str, capacity, schedule: &str| {
            CourseRecord {
                code: code.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                capacity,
                schedule: schedule.to_string(),
            }
        };
        let student = |id: &str, name: &str| StudentRecord {
            id: id.to_string(),
            name: name.to_string(),
        };

        Self {
            courses: vec![
                course(
                    "CS101",
                    "Introduction to Computer Science",
                    "Basic concepts of computer science",
                    3,
                    "MWF 10-11 AM",
                ),
                course(
                    "MATH101",
                    "Calculus I",
                    "Introduction to differential calculus",
                    2,
                    "TTh 2-3:30 PM",
                ),
                course(
                    "PHYS101",
                    "General Physics I",
                    "Basic principles of physics",
                    2,
                    "MWF 1-2 PM",
                ),
            ],
            students: vec![student("S001", "Alice"), student("S002", "Bob")],
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl CatalogProvider for CatalogConfig {
    fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    fn students(&self) -> &[StudentRecord] {
        &self.students
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        for course in &self.courses {
            validation::validate_key("courses.code", &course.code)?;
            validation::validate_non_empty_string("courses.title", &course.title)?;
            validation::validate_positive_number("courses.capacity", course.capacity, 1)?;
        }
        validation::validate_unique_keys(
            "courses.code",
            self.courses.iter().map(|c| c.code.as_str()),
        )?;

        for student in &self.students {
            validation::validate_key("students.id", &student.id)?;
            validation::validate_non_empty_string("students.name", &student.name)?;
        }
        validation::validate_unique_keys(
            "students.id",
            self.students.iter().map(|s| s.id.as_str()),
        )?;

        Ok(())
    }
}
