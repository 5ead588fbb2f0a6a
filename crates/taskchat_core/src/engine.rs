use std::path::PathBuf;

use log::{debug, info, warn};

use crate::commands::{Flow, Outcome};
use crate::error::AppError;
use crate::model::Task;
use crate::parser;
use crate::storage::json_store;
use crate::tasklist::TaskList;
use crate::undo::UndoStack;

/// What the boundary delivers for one input line: the reply text plus
/// whether the session keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub flow: Flow,
}

/// The control loop binding parser, task list, and undo stack together.
/// Owns both collections exclusively; single-threaded, one line at a time.
#[derive(Debug)]
pub struct Engine {
    tasks: TaskList,
    undo: UndoStack,
    store_path: PathBuf,
}

impl Engine {
    /// Loads the persisted list from `store_path`. An unreadable or corrupt
    /// store is fatal here, before any input is accepted.
    pub fn load(store_path: PathBuf) -> Result<Self, AppError> {
        let records = json_store::load_records(&store_path)?;
        let mut tasks = TaskList::new();
        for record in records {
            let task = Task::from_record(record).map_err(|err| {
                AppError::persistence(format!("corrupt task record: {}", err.message()))
            })?;
            tasks.add(task);
        }

        info!(
            "loaded {} tasks from {}",
            tasks.len(),
            store_path.display()
        );
        Ok(Self {
            tasks,
            undo: UndoStack::new(),
            store_path,
        })
    }

    /// Executes one input line. Never panics and never propagates an error:
    /// every failure becomes its user-facing message, with the task list
    /// and undo stack left untouched.
    pub fn run_line(&mut self, input: &str) -> Reply {
        let command = match parser::parse(input, self.tasks.len()) {
            Ok(command) => command,
            Err(err) => {
                warn!("rejected input: {err}");
                return Reply {
                    text: err.message(),
                    flow: Flow::Running,
                };
            }
        };
        debug!("executing {command:?}");

        match command.execute(&mut self.tasks, &mut self.undo, true) {
            Ok(Outcome { response, flow }) => {
                if flow == Flow::Stopped
                    && let Err(err) = self.save()
                {
                    warn!("save on shutdown failed: {err}");
                    return Reply {
                        text: err.message(),
                        flow,
                    };
                }
                Reply {
                    text: response,
                    flow,
                }
            }
            Err(err) => {
                warn!("command failed: {err}");
                Reply {
                    text: err.message(),
                    flow: Flow::Running,
                }
            }
        }
    }

    fn save(&self) -> Result<(), AppError> {
        let records: Vec<_> = self.tasks.tasks().iter().map(Task::to_record).collect();
        json_store::save_records(&self.store_path, &records)?;
        info!(
            "saved {} tasks to {}",
            records.len(),
            self.store_path.display()
        );
        Ok(())
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::commands::Flow;
    use crate::storage::json_store;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskchat-{nanos}-{file_name}"))
    }

    #[test]
    fn run_line_adds_lists_and_stops_on_bye() {
        let path = temp_path("engine-session.json");
        let mut engine = Engine::load(path.clone()).unwrap();

        let reply = engine.run_line("todo read book");
        assert_eq!(reply.flow, Flow::Running);
        assert!(reply.text.contains("[T][ ] read book"));

        let reply = engine.run_line("list");
        assert_eq!(reply.text, "1. [T][ ] read book");

        let reply = engine.run_line("bye");
        assert_eq!(reply.flow, Flow::Stopped);
        assert!(reply.text.contains("Bye"));

        let saved = json_store::load_records(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn run_line_turns_errors_into_reply_text() {
        let path = temp_path("engine-errors.json");
        let mut engine = Engine::load(path).unwrap();

        let reply = engine.run_line("mark 5");
        assert_eq!(reply.flow, Flow::Running);
        assert!(reply.text.contains("No task with that number"));

        let reply = engine.run_line("gibberish here");
        assert!(reply.text.contains("I don't know what"));
        assert_eq!(engine.tasks().len(), 0);
    }

    #[test]
    fn failed_command_leaves_state_for_later_undo() {
        let path = temp_path("engine-failed.json");
        let mut engine = Engine::load(path).unwrap();

        engine.run_line("todo read book");
        engine.run_line("delete 7");
        assert_eq!(engine.tasks().len(), 1);

        // the failed delete pushed nothing, so undo removes the add
        let reply = engine.run_line("undo");
        assert!(reply.text.contains("removed"));
        assert_eq!(engine.tasks().len(), 0);
    }

    #[test]
    fn session_round_trips_through_the_store() {
        let path = temp_path("engine-roundtrip.json");

        let mut engine = Engine::load(path.clone()).unwrap();
        engine.run_line("deadline return book /by 02-01-2024 18:00");
        engine.run_line("mark 1");
        engine.run_line("bye");

        let mut engine = Engine::load(path.clone()).unwrap();
        let reply = engine.run_line("list");
        std::fs::remove_file(&path).ok();

        assert_eq!(
            reply.text,
            "1. [D][X] return book (by: Tuesday, 2 January 2024 [6:00 PM])"
        );
    }

    #[test]
    fn load_rejects_a_corrupt_store() {
        let path = temp_path("engine-corrupt.json");
        let content = "{\"schema_version\":1,\"tasks\":[\
                       {\"type\":\"D\",\"completed\":false,\
                       \"description\":\"x\",\"due\":\"not a date\"}]}";
        std::fs::write(&path, content).unwrap();

        let err = Engine::load(path.clone()).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.code(), "persistence");
    }

    #[test]
    fn undo_without_history_replies_with_the_message() {
        let path = temp_path("engine-undo-empty.json");
        let mut engine = Engine::load(path).unwrap();

        let reply = engine.run_line("undo");
        assert_eq!(reply.text, "There is nothing left to undo.");
        assert_eq!(reply.flow, Flow::Running);
    }
}
