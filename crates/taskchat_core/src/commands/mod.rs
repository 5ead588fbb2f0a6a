use crate::error::AppError;
use crate::model::Task;
use crate::tasklist::TaskList;
use crate::undo::UndoStack;

/// Whether the session keeps accepting input after a command. Only `Bye`
/// produces `Stopped`; the state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    Stopped,
}

/// The result of a successful command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub response: String,
    pub flow: Flow,
}

impl Outcome {
    fn running(response: String) -> Self {
        Self {
            response,
            flow: Flow::Running,
        }
    }
}

/// A parsed, executable user intent. Add-family variants carry the exact
/// task value (completion state included) so an inverse reconstruction
/// restores identical state; index-based variants carry the 1-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTodo(Task),
    AddDeadline(Task),
    AddEvent(Task),
    Delete(usize),
    Mark(usize),
    Unmark(usize),
    List,
    Find(String),
    Undo,
    Bye,
}

impl Command {
    /// Runs the command against the list. Validation precedes mutation in
    /// every arm: a returned error leaves both the list and the undo stack
    /// exactly as they were. With `generate_inverse` set, each mutating
    /// command pushes exactly one inverse; `List`, `Find`, `Bye`, and
    /// `Undo` push nothing.
    pub fn execute(
        self,
        tasks: &mut TaskList,
        undo: &mut UndoStack,
        generate_inverse: bool,
    ) -> Result<Outcome, AppError> {
        match self {
            Self::AddTodo(task) | Self::AddDeadline(task) | Self::AddEvent(task) => {
                execute_add(task, tasks, undo, generate_inverse)
            }
            Self::Delete(number) => execute_delete(number, tasks, undo, generate_inverse),
            Self::Mark(number) => execute_toggle(number, true, tasks, undo, generate_inverse),
            Self::Unmark(number) => execute_toggle(number, false, tasks, undo, generate_inverse),
            Self::List => Ok(Outcome::running(render_list(tasks))),
            Self::Find(query) => Ok(Outcome::running(render_matches(tasks, &query))),
            Self::Undo => execute_undo(tasks, undo),
            Self::Bye => Ok(Outcome {
                response: "Bye. Hope to see you again soon!".to_string(),
                flow: Flow::Stopped,
            }),
        }
    }
}

fn execute_add(
    task: Task,
    tasks: &mut TaskList,
    undo: &mut UndoStack,
    generate_inverse: bool,
) -> Result<Outcome, AppError> {
    let line = task.status();
    tasks.add(task);
    if generate_inverse {
        undo.push(Command::Delete(tasks.len()));
    }
    Ok(Outcome::running(format!(
        "Got it. I've added this task:\n  {line}\nNow you have {} tasks in the list.",
        tasks.len()
    )))
}

fn execute_delete(
    number: usize,
    tasks: &mut TaskList,
    undo: &mut UndoStack,
    generate_inverse: bool,
) -> Result<Outcome, AppError> {
    let removed = tasks.delete(number)?;
    let line = removed.status();
    if generate_inverse {
        undo.push(inverse_add(removed));
    }
    Ok(Outcome::running(format!(
        "Noted. I've removed this task:\n  {line}\nNow you have {} tasks in the list.",
        tasks.len()
    )))
}

/// The inverse of a delete is the add variant matching the removed task's
/// type, carrying the task verbatim.
fn inverse_add(task: Task) -> Command {
    match task {
        Task::Todo { .. } => Command::AddTodo(task),
        Task::Deadline { .. } => Command::AddDeadline(task),
        Task::Event { .. } => Command::AddEvent(task),
    }
}

fn execute_toggle(
    number: usize,
    complete: bool,
    tasks: &mut TaskList,
    undo: &mut UndoStack,
    generate_inverse: bool,
) -> Result<Outcome, AppError> {
    let task = tasks.get_mut(number)?;
    if complete {
        task.mark_complete();
    } else {
        task.mark_incomplete();
    }
    let line = task.status();

    if generate_inverse {
        undo.push(if complete {
            Command::Unmark(number)
        } else {
            Command::Mark(number)
        });
    }

    let response = if complete {
        format!("Nice! I've marked this task as done:\n  {line}")
    } else {
        format!("OK, I've marked this task as not done yet:\n  {line}")
    };
    Ok(Outcome::running(response))
}

fn render_list(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "There are no tasks in the list.".to_string();
    }
    tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{}. {}", index + 1, task.status()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Matches are re-numbered from 1, not shown at their original positions.
fn render_matches(tasks: &TaskList, query: &str) -> String {
    let lines: Vec<String> = tasks
        .tasks()
        .iter()
        .filter(|task| task.matches(query))
        .enumerate()
        .map(|(index, task)| format!("{}. {}", index + 1, task.status()))
        .collect();
    if lines.is_empty() {
        return "No matching tasks found.".to_string();
    }
    lines.join("\n")
}

/// Undo is one-shot: the popped command runs with inverse generation off,
/// so undoing an undo is not possible.
fn execute_undo(tasks: &mut TaskList, undo: &mut UndoStack) -> Result<Outcome, AppError> {
    let inverse = undo.pop().ok_or(AppError::NothingToUndo)?;
    inverse.execute(tasks, undo, false)
}
