use crate::commands::Command;
use crate::error::AppError;
use crate::model::Task;

/// Accumulation state while scanning an `event` body. `/from` transitions
/// only out of `Description` and `/to` only out of `Start`; either token
/// seen in any other state is ordinary text. The asymmetry is intentional:
/// a `/to` ahead of `/from` belongs to the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventField {
    Description,
    Start,
    End,
}

/// Turns one raw input line into a command. Pure and stateless: the only
/// context is the current list length, used to bound-check task numbers.
pub fn parse(input: &str, list_len: usize) -> Result<Command, AppError> {
    match input {
        "list" => return Ok(Command::List),
        "bye" => return Ok(Command::Bye),
        "undo" => return Ok(Command::Undo),
        _ => {}
    }

    let Some((keyword, body)) = input.split_once(' ') else {
        return Err(AppError::NoCommandBody);
    };

    match keyword {
        "mark" => Ok(Command::Mark(parse_task_number(body, list_len)?)),
        "unmark" => Ok(Command::Unmark(parse_task_number(body, list_len)?)),
        "delete" => Ok(Command::Delete(parse_task_number(body, list_len)?)),
        "todo" => Ok(Command::AddTodo(Task::todo(body)?)),
        "deadline" => parse_deadline(body),
        "event" => parse_event(body),
        "find" => Ok(Command::Find(body.to_string())),
        other => Err(AppError::UnknownCommand(other.to_string())),
    }
}

/// Any parse failure or out-of-range value is reported as the task not
/// being found, exactly like a well-formed number past the end.
fn parse_task_number(body: &str, list_len: usize) -> Result<usize, AppError> {
    let number: usize = body.parse().map_err(|_| AppError::TaskNotFound)?;
    if number < 1 || number > list_len {
        return Err(AppError::TaskNotFound);
    }
    Ok(number)
}

fn parse_deadline(body: &str) -> Result<Command, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::BlankField("description or date of a deadline"));
    }

    // Every literal `/by` token is consumed; the first one switches sides.
    let mut saw_by = false;
    let mut description = Vec::new();
    let mut due = Vec::new();
    for token in body.split(' ') {
        if token == "/by" {
            saw_by = true;
        } else if saw_by {
            due.push(token);
        } else {
            description.push(token);
        }
    }

    if !saw_by {
        return Err(AppError::MissingByMarker);
    }

    let task = Task::deadline(&description.join(" "), &due.join(" "))?;
    Ok(Command::AddDeadline(task))
}

fn parse_event(body: &str) -> Result<Command, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::BlankField("description or dates of an event"));
    }

    let mut state = EventField::Description;
    let mut description = Vec::new();
    let mut start = Vec::new();
    let mut end = Vec::new();

    for token in body.split(' ') {
        match (state, token) {
            (EventField::Description, "/from") => state = EventField::Start,
            (EventField::Start, "/to") => state = EventField::End,
            (EventField::Description, _) => description.push(token),
            (EventField::Start, _) => start.push(token),
            (EventField::End, _) => end.push(token),
        }
    }

    if state != EventField::End {
        return Err(AppError::MissingFromToMarkers);
    }

    let task = Task::event(&description.join(" "), &start.join(" "), &end.join(" "))?;
    Ok(Command::AddEvent(task))
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::commands::Command;
    use crate::error::AppError;

    #[test]
    fn zero_argument_keywords_are_exact_matches() {
        assert_eq!(parse("list", 0).unwrap(), Command::List);
        assert_eq!(parse("bye", 0).unwrap(), Command::Bye);
        assert_eq!(parse("undo", 0).unwrap(), Command::Undo);
    }

    #[test]
    fn keyword_without_body_is_rejected() {
        assert_eq!(parse("mark", 3).unwrap_err(), AppError::NoCommandBody);
        assert_eq!(parse("todo", 3).unwrap_err(), AppError::NoCommandBody);
        assert_eq!(parse("", 3).unwrap_err(), AppError::NoCommandBody);
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        assert_eq!(
            parse("blah blah", 3).unwrap_err(),
            AppError::UnknownCommand("blah".to_string())
        );
    }

    #[test]
    fn zero_argument_keyword_with_a_body_is_unknown() {
        assert_eq!(
            parse("list everything", 3).unwrap_err(),
            AppError::UnknownCommand("list".to_string())
        );
    }

    #[test]
    fn mark_parses_a_number_within_bounds() {
        assert_eq!(parse("mark 2", 3).unwrap(), Command::Mark(2));
        assert_eq!(parse("unmark 3", 3).unwrap(), Command::Unmark(3));
        assert_eq!(parse("delete 1", 3).unwrap(), Command::Delete(1));
    }

    #[test]
    fn mark_past_the_end_is_task_not_found() {
        assert_eq!(parse("mark 5", 3).unwrap_err(), AppError::TaskNotFound);
    }

    #[test]
    fn mark_rejects_zero_and_non_numeric_bodies() {
        assert_eq!(parse("mark 0", 3).unwrap_err(), AppError::TaskNotFound);
        assert_eq!(parse("mark two", 3).unwrap_err(), AppError::TaskNotFound);
        assert_eq!(parse("delete -1", 3).unwrap_err(), AppError::TaskNotFound);
    }

    #[test]
    fn todo_keeps_the_trimmed_description() {
        match parse("todo read book", 0).unwrap() {
            Command::AddTodo(task) => assert_eq!(task.description(), "read book"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn todo_with_blank_body_is_rejected() {
        assert_eq!(parse("todo    ", 0).unwrap_err().code(), "blank_field");
    }

    #[test]
    fn deadline_splits_on_the_by_marker() {
        match parse("deadline return book /by 02-01-2024 18:00", 0).unwrap() {
            Command::AddDeadline(task) => {
                assert_eq!(task.description(), "return book");
                assert!(task.status().contains("2 January 2024 [6:00 PM]"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn deadline_without_by_marker_is_rejected() {
        assert_eq!(
            parse("deadline return book 18:00", 0).unwrap_err(),
            AppError::MissingByMarker
        );
    }

    #[test]
    fn deadline_with_blank_description_is_rejected() {
        assert_eq!(
            parse("deadline /by 02-01-2024 18:00", 0).unwrap_err().code(),
            "blank_field"
        );
    }

    #[test]
    fn deadline_with_blank_date_is_rejected() {
        assert_eq!(
            parse("deadline return book /by ", 0).unwrap_err().code(),
            "blank_field"
        );
    }

    #[test]
    fn deadline_with_bad_date_is_rejected_lazily() {
        assert_eq!(
            parse("deadline return book /by tomorrow", 0).unwrap_err(),
            AppError::InvalidDate
        );
    }

    #[test]
    fn event_walks_the_three_states() {
        match parse("event proj /from 01-01-2024 10:00 /to 02-01-2024 10:00", 0).unwrap() {
            Command::AddEvent(task) => {
                assert_eq!(task.description(), "proj");
                assert!(task.status().contains("from: Monday, 1 January 2024"));
                assert!(task.status().contains("to: Tuesday, 2 January 2024"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn event_missing_from_is_rejected() {
        assert_eq!(
            parse("event proj /to 01-01-2024 10:00", 0).unwrap_err(),
            AppError::MissingFromToMarkers
        );
    }

    #[test]
    fn event_missing_to_is_rejected() {
        assert_eq!(
            parse("event proj /from 01-01-2024 10:00", 0).unwrap_err(),
            AppError::MissingFromToMarkers
        );
    }

    #[test]
    fn event_to_before_from_is_ordinary_text() {
        // The early `/to` lands in the description; the machine still needs
        // a `/to` after `/from` to finish.
        assert_eq!(
            parse("event proj /to x /from 01-01-2024 10:00", 0).unwrap_err(),
            AppError::MissingFromToMarkers
        );
    }

    #[test]
    fn event_second_from_is_kept_as_start_text() {
        let err = parse("event proj /from /from /to 02-01-2024 10:00", 0).unwrap_err();
        // start accumulates the literal "/from", which is not a date
        assert_eq!(err, AppError::InvalidDate);
    }

    #[test]
    fn event_with_blank_field_is_rejected() {
        assert_eq!(
            parse("event  /from 01-01-2024 10:00 /to 02-01-2024 10:00", 0)
                .unwrap_err()
                .code(),
            "blank_field"
        );
    }

    #[test]
    fn find_keeps_the_body_verbatim() {
        assert_eq!(
            parse("find return book", 0).unwrap(),
            Command::Find("return book".to_string())
        );
    }
}
