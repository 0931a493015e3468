use crate::core::registry::Registry;
use crate::utils::error::{RegistryError, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListCourses,
    Register,
    Drop,
    View,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = RegistryError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = || RegistryError::InvalidMenuChoice {
            input: input.to_string(),
        };
        match input.trim().parse::<i64>().map_err(|_| invalid())? {
            1 => Ok(MenuChoice::ListCourses),
            2 => Ok(MenuChoice::Register),
            3 => Ok(MenuChoice::Drop),
            4 => Ok(MenuChoice::View),
            5 => Ok(MenuChoice::Exit),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exiting,
}

/// Whitespace-separated tokens pulled from a line-oriented reader.
struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// `None` once the input is exhausted.
    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// The interactive loop: print the menu, read a choice, dispatch, repeat until exit.
pub struct MenuSession<R, W> {
    registry: Registry,
    input: TokenReader<R>,
    out: W,
    state: MenuState,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(registry: Registry, input: R, out: W) -> Self {
        Self {
            registry,
            input: TokenReader::new(input),
            out,
            state: MenuState::Running,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs until the user exits or input ends, handing back the final registry.
    pub fn run(mut self) -> Result<Registry> {
        while self.state == MenuState::Running {
            self.step()?;
        }
        self.out.flush()?;
        Ok(self.registry)
    }

    /// One pass through the menu.
    pub fn step(&mut self) -> Result<()> {
        self.print_menu()?;
        let Some(token) = self.input.next_token()? else {
            tracing::info!("Input closed, leaving the menu");
            self.state = MenuState::Exiting;
            return Ok(());
        };

        let outcome = match token.parse::<MenuChoice>() {
            Ok(MenuChoice::ListCourses) => self.list_courses(),
            Ok(MenuChoice::Register) => self.register(),
            Ok(MenuChoice::Drop) => self.drop_course(),
            Ok(MenuChoice::View) => self.view_registered(),
            Ok(MenuChoice::Exit) => {
                self.state = MenuState::Exiting;
                writeln!(
                    self.out,
                    "Exiting... Thank you for using the Course Registration System."
                )?;
                Ok(())
            }
            Err(e) => Err(e),
        };

        match outcome {
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Menu operation rejected: {}", e);
                writeln!(self.out, "{}", e.user_friendly_message())?;
                Ok(())
            }
            other => other,
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\nCourse Registration System Menu:")?;
        writeln!(self.out, "1. List available courses")?;
        writeln!(self.out, "2. Register for a course")?;
        writeln!(self.out, "3. Drop a course")?;
        writeln!(self.out, "4. View registered courses")?;
        writeln!(self.out, "5. Exit")?;
        write!(self.out, "Choose an option: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        let token = self.input.next_token()?;
        if token.is_none() {
            tracing::info!("Input closed at prompt, leaving the menu");
            self.state = MenuState::Exiting;
        }
        Ok(token)
    }

    fn list_courses(&mut self) -> Result<()> {
        writeln!(self.out, "\nAvailable Courses:")?;
        self.registry.display_courses(&mut self.out)?;
        Ok(())
    }

    /// Reads a student id (checked right away) and then a course code.
    fn read_student_and_course(&mut self) -> Result<Option<(String, String)>> {
        let Some(student_id) = self.prompt("\nEnter Student ID: ")? else {
            return Ok(None);
        };
        self.registry.student(&student_id)?;
        let Some(course_code) = self.prompt("Enter Course Code: ")? else {
            return Ok(None);
        };
        Ok(Some((student_id, course_code)))
    }

    fn register(&mut self) -> Result<()> {
        if let Some((student_id, course_code)) = self.read_student_and_course()? {
            self.registry.register(&student_id, &course_code)?;
            writeln!(self.out, "Successfully registered for the course.")?;
        }
        Ok(())
    }

    fn drop_course(&mut self) -> Result<()> {
        if let Some((student_id, course_code)) = self.read_student_and_course()? {
            self.registry.drop_course(&student_id, &course_code)?;
            writeln!(self.out, "Successfully dropped the course.")?;
        }
        Ok(())
    }

    fn view_registered(&mut self) -> Result<()> {
        if let Some(student_id) = self.prompt("\nEnter Student ID: ")? {
            self.registry
                .display_registered_courses(&student_id, &mut self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Registry, String) {
        let mut out = Vec::new();
        let registry = MenuSession::new(Registry::sample(), Cursor::new(script), &mut out)
            .run()
            .unwrap();
        (registry, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::ListCourses);
        assert_eq!("5".parse::<MenuChoice>().unwrap(), MenuChoice::Exit);
        assert!("0".parse::<MenuChoice>().is_err());
        assert!("six".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_exit_prints_farewell() {
        let (_, output) = run("5\n");
        assert!(output.starts_with("\nCourse Registration System Menu:\n1. List available courses"));
        assert!(output.ends_with(
            "Choose an option: Exiting... Thank you for using the Course Registration System.\n"
        ));
    }

    #[test]
    fn test_invalid_and_malformed_choices_reloop() {
        let (_, output) = run("9\nabc\n5\n");
        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
        assert_eq!(output.matches("Choose an option: ").count(), 3);
    }

    #[test]
    fn test_end_of_input_stops_without_farewell() {
        let (_, output) = run("1\n");
        assert!(output.contains("Available Courses:"));
        assert!(!output.contains("Exiting..."));
    }

    #[test]
    fn test_unknown_student_aborts_before_course_prompt() {
        let (_, output) = run("2\nS999\n5\n");
        assert!(output.contains("Student not found."));
        assert!(!output.contains("Enter Course Code: "));
    }

    #[test]
    fn test_tokens_on_one_line() {
        let (registry, output) = run("2 S001 CS101 5");
        assert!(output.contains("Successfully registered for the course."));
        assert_eq!(registry.course("CS101").unwrap().available_slots(), 2);
    }

    #[test]
    fn test_step_tracks_state() {
        let mut out = Vec::new();
        let mut session = MenuSession::new(Registry::sample(), Cursor::new("4\nS002\n5\n"), &mut out);
        session.step().unwrap();
        assert_eq!(session.state(), MenuState::Running);
        session.step().unwrap();
        assert_eq!(session.state(), MenuState::Exiting);
        assert!(session.registry().registered_courses("S002").unwrap().is_empty());
    }
}
