//! Numbered menu and validation of typed input.
//!
//! Everything the user types is checked here, so the data layer only ever
//! sees well-formed arguments.

use std::fmt;

use thiserror::Error;

pub const MENU: &str = "\
1. Show all data
2. Filter by category
3. Filter by minimum count
4. Generate report
5. Visualize data
6. Upload & classify image
7. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowAll,
    FilterCategory,
    FilterMinCount,
    Report,
    Visualize,
    Classify,
    Exit,
}

impl MenuChoice {
    /// Parse the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ShowAll),
            "2" => Some(MenuChoice::FilterCategory),
            "3" => Some(MenuChoice::FilterMinCount),
            "4" => Some(MenuChoice::Report),
            "5" => Some(MenuChoice::Visualize),
            "6" => Some(MenuChoice::Classify),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MenuChoice::ShowAll => "show all",
            MenuChoice::FilterCategory => "filter by category",
            MenuChoice::FilterMinCount => "filter by minimum count",
            MenuChoice::Report => "generate report",
            MenuChoice::Visualize => "visualize",
            MenuChoice::Classify => "upload & classify",
            MenuChoice::Exit => "exit",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter a whole number, got '{0}'")]
    NotANumber(String),

    #[error("no category entered")]
    EmptyCategory,

    #[error("unknown category '{given}'; available: {}", .available.join(", "))]
    UnknownCategory {
        given: String,
        available: Vec<String>,
    },
}

/// Parse a minimum-count threshold. Negative values are allowed and act as
/// "no constraint" once they reach the filter.
pub fn parse_min_count(input: &str) -> Result<i64, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Check a typed category against the categories present in the dataset.
/// Matching is exact; only surrounding whitespace is removed.
pub fn parse_category(input: &str, known: &[&str]) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyCategory);
    }
    if known.contains(&trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(InputError::UnknownCategory {
            given: trimmed.to_string(),
            available: known.iter().map(|s| s.to_string()).collect(),
        })
    }
}
