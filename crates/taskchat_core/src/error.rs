use std::fmt;

/// Everything a command session can reject. All variants are recoverable
/// and user-facing; only a `Persistence` failure at startup is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    BlankField(&'static str),
    MissingByMarker,
    MissingFromToMarkers,
    InvalidDate,
    TaskNotFound,
    UnknownCommand(String),
    NoCommandBody,
    NothingToUndo,
    Persistence(String),
}

impl AppError {
    pub fn persistence<M: Into<String>>(message: M) -> Self {
        Self::Persistence(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankField(_) => "blank_field",
            Self::MissingByMarker => "missing_by_marker",
            Self::MissingFromToMarkers => "missing_from_to_markers",
            Self::InvalidDate => "invalid_date",
            Self::TaskNotFound => "task_not_found",
            Self::UnknownCommand(_) => "unknown_command",
            Self::NoCommandBody => "no_command_body",
            Self::NothingToUndo => "nothing_to_undo",
            Self::Persistence(_) => "persistence",
        }
    }

    /// The reply text shown to the user when the command is rejected.
    pub fn message(&self) -> String {
        match self {
            Self::BlankField(field) => {
                format!("The {field} cannot be empty.")
            }
            Self::MissingByMarker => {
                "A deadline needs a /by marker before its date.".to_string()
            }
            Self::MissingFromToMarkers => {
                "An event needs a /from marker and then a /to marker around its dates."
                    .to_string()
            }
            Self::InvalidDate => {
                "I can't understand that date. Please use DD-MM-YYYY HH:MM.".to_string()
            }
            Self::TaskNotFound => {
                "No task with that number exists in the list.".to_string()
            }
            Self::UnknownCommand(keyword) => {
                format!("I don't know what \"{keyword}\" means.")
            }
            Self::NoCommandBody => {
                "That command needs more details after the keyword.".to_string()
            }
            Self::NothingToUndo => "There is nothing left to undo.".to_string(),
            Self::Persistence(detail) => {
                format!("The task store could not be read or written: {detail}")
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
