use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::AppError;

/// Fixed input format for every user-supplied timestamp: `DD-MM-YYYY HH:MM`.
/// The stored seconds item is satisfied by appending `:00` before parsing,
/// since the input format carries no seconds.
const INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year] [hour]:[minute]:[second]");

/// Canonical text form written to the store; round-trips `INPUT_FORMAT` exactly.
const RAW_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year] [hour]:[minute]");

/// Locale-independent long date with a bracketed 12-hour time,
/// e.g. `Tuesday, 10 October 2000 [10:10 AM]`.
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:long], [day padding:none] [month repr:long] [year] [[[hour repr:12 padding:none]:[minute] [period]]"
);

/// A unit of tracked work. Mutable only in its completion flag; every other
/// field is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Todo {
        description: String,
        completed: bool,
    },
    Deadline {
        description: String,
        due: PrimitiveDateTime,
        completed: bool,
    },
    Event {
        description: String,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        completed: bool,
    },
}

impl Task {
    pub fn todo(description: &str) -> Result<Self, AppError> {
        let description = required(description, "description of a todo")?;
        Ok(Self::Todo {
            description,
            completed: false,
        })
    }

    pub fn deadline(description: &str, due_text: &str) -> Result<Self, AppError> {
        let field = "description or date of a deadline";
        let description = required(description, field)?;
        if due_text.trim().is_empty() {
            return Err(AppError::BlankField(field));
        }
        Ok(Self::Deadline {
            description,
            due: parse_date_time(due_text)?,
            completed: false,
        })
    }

    /// No ordering constraint is enforced between `start` and `end`.
    pub fn event(description: &str, start_text: &str, end_text: &str) -> Result<Self, AppError> {
        let field = "description or dates of an event";
        let description = required(description, field)?;
        if start_text.trim().is_empty() || end_text.trim().is_empty() {
            return Err(AppError::BlankField(field));
        }
        Ok(Self::Event {
            description,
            start: parse_date_time(start_text)?,
            end: parse_date_time(end_text)?,
            completed: false,
        })
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Todo { description, .. }
            | Self::Deadline { description, .. }
            | Self::Event { description, .. } => description,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::Todo { completed, .. }
            | Self::Deadline { completed, .. }
            | Self::Event { completed, .. } => *completed,
        }
    }

    pub fn mark_complete(&mut self) {
        self.set_completed(true);
    }

    pub fn mark_incomplete(&mut self) {
        self.set_completed(false);
    }

    fn set_completed(&mut self, value: bool) {
        match self {
            Self::Todo { completed, .. }
            | Self::Deadline { completed, .. }
            | Self::Event { completed, .. } => *completed = value,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Todo { .. } => "T",
            Self::Deadline { .. } => "D",
            Self::Event { .. } => "E",
        }
    }

    /// Case-sensitive substring check against the raw description only; the
    /// rendered status line and dates are not searched.
    pub fn matches(&self, query: &str) -> bool {
        self.description().contains(query)
    }

    /// One-line rendering: `[<T|D|E>][<X or space>] <description>` plus the
    /// formatted date segment(s).
    pub fn status(&self) -> String {
        let check = if self.is_complete() { "X" } else { " " };
        match self {
            Self::Todo { description, .. } => format!("[T][{check}] {description}"),
            Self::Deadline {
                description, due, ..
            } => {
                format!("[D][{check}] {description} (by: {})", display(due))
            }
            Self::Event {
                description,
                start,
                end,
                ..
            } => format!(
                "[E][{check}] {description} (from: {} to: {})",
                display(start),
                display(end)
            ),
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        match self {
            Self::Todo {
                description,
                completed,
            } => TaskRecord::Todo {
                completed: *completed,
                description: description.clone(),
            },
            Self::Deadline {
                description,
                due,
                completed,
            } => TaskRecord::Deadline {
                completed: *completed,
                description: description.clone(),
                due: raw(due),
            },
            Self::Event {
                description,
                start,
                end,
                completed,
            } => TaskRecord::Event {
                completed: *completed,
                description: description.clone(),
                start: raw(start),
                end: raw(end),
            },
        }
    }

    pub fn from_record(record: TaskRecord) -> Result<Self, AppError> {
        let (mut task, completed) = match record {
            TaskRecord::Todo {
                completed,
                description,
            } => (Self::todo(&description)?, completed),
            TaskRecord::Deadline {
                completed,
                description,
                due,
            } => (Self::deadline(&description, &due)?, completed),
            TaskRecord::Event {
                completed,
                description,
                start,
                end,
            } => (Self::event(&description, &start, &end)?, completed),
        };
        if completed {
            task.mark_complete();
        }
        Ok(task)
    }
}

/// Serialized form of a task: type tag, completion flag, description, and
/// the raw timestamp text. Round-trips exactly through `to_record` /
/// `from_record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskRecord {
    #[serde(rename = "T")]
    Todo { completed: bool, description: String },
    #[serde(rename = "D")]
    Deadline {
        completed: bool,
        description: String,
        due: String,
    },
    #[serde(rename = "E")]
    Event {
        completed: bool,
        description: String,
        start: String,
        end: String,
    },
}

fn required(text: &str, field: &'static str) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

fn parse_date_time(text: &str) -> Result<PrimitiveDateTime, AppError> {
    let padded = format!("{}:00", text.trim());
    PrimitiveDateTime::parse(&padded, INPUT_FORMAT).map_err(|_| AppError::InvalidDate)
}

fn raw(moment: &PrimitiveDateTime) -> String {
    moment
        .format(RAW_FORMAT)
        .unwrap_or_else(|_| moment.to_string())
}

fn display(moment: &PrimitiveDateTime) -> String {
    moment
        .format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| moment.to_string())
}
