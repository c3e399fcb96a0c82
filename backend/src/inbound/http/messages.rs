//! User-facing message catalogue.

pub const TITLE_INPUT: &str = "Registration form";
pub const TITLE_UPDATE: &str = "Update form";
pub const NO_LIST: &str = "No quizzes are registered.";
pub const COMPLETE_INPUT: &str = "Registration completed.";
pub const COMPLETE_UPDATE: &str = "Update completed.";
pub const COMPLETE_DELETE: &str = "Deletion completed.";
pub const NO_QUIZ: &str = "No quiz available...";
pub const CORRECT: &str = "Correct!!!";
pub const INCORRECT: &str = "Sorry! Incorrect!!!";

/// Field-level message for a blank or absent required input.
pub fn required(label: &str) -> String {
    format!("{label} is required.")
}
