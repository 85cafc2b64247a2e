use std::sync::Arc;

use chrono::Local;
use log::{error, info};
use rusqlite::Connection;
use teloxide::prelude::*;

use crate::internal_error::InternalResult;
use crate::parser;
use crate::records::data::UserID;
use crate::records::helpers::{add_goal_to_db, add_study_entry_to_db, add_task_to_db};
use crate::reports;
use crate::session::{AwaitMode, SessionMap};
use crate::AppState;

/// Free-text messages only matter while the sender has a pending input
/// mode; anything else is dropped without a reply.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> InternalResult<()> {
    let user_id = match msg.from() {
        Some(user) => user.id.0 as UserID,
        None => return Ok(()),
    };
    let text = match msg.text() {
        Some(text) => text,
        None => return Ok(()),
    };

    let reply = {
        let db = state.db.lock()?;
        let today = Local::now().format("%Y-%m-%d").to_string();
        reply_for_text(user_id, text, &today, &db, &state.sessions)?
    };

    if let Some(reply) = reply {
        bot.send_message(msg.chat.id, reply).await?;
    }

    Ok(())
}

/// Decides the reply to one free-text line and transitions the sender's
/// pending mode: cancel clears it, a malformed line keeps it active for
/// retry, a stored record clears it. `None` means the line is ignored.
fn reply_for_text(
    user_id: UserID,
    text: &str,
    today: &str,
    db: &Connection,
    sessions: &SessionMap,
) -> InternalResult<Option<String>> {
    // Commands are routed elsewhere; a stray one must not be swallowed
    // as record input.
    if text.starts_with('/') {
        return Ok(None);
    }

    if parser::is_cancel(text) {
        sessions.clear_awaiting(user_id)?;
        return Ok(Some(reports::CANCELLED.to_string()));
    }

    let mode = match sessions.get_awaiting(user_id)? {
        Some(mode) => mode,
        None => return Ok(None),
    };

    let reply = match mode {
        AwaitMode::Task => add_task_from_line(user_id, text, db, sessions)?,
        AwaitMode::Study => add_study_from_line(user_id, text, today, db, sessions)?,
        AwaitMode::Goal => add_goal_from_line(user_id, text, db, sessions)?,
    };

    Ok(Some(reply))
}

fn add_task_from_line(
    user_id: UserID,
    text: &str,
    db: &Connection,
    sessions: &SessionMap,
) -> InternalResult<String> {
    let task = match parser::parse_task_line(text) {
        Some(task) => task,
        None => return Ok(reports::TASK_FORMAT_ERROR.to_string()),
    };

    match add_task_to_db(user_id, &task, db) {
        Ok(_) => {
            info!("User {} added task '{}'", user_id, task.description);
            sessions.clear_awaiting(user_id)?;
            Ok(reports::task_added_text(&task))
        }
        Err(e) => {
            error!("Failed to add task for user {}: {}", user_id, e);
            Ok(reports::GENERIC_ERROR.to_string())
        }
    }
}

fn add_study_from_line(
    user_id: UserID,
    text: &str,
    today: &str,
    db: &Connection,
    sessions: &SessionMap,
) -> InternalResult<String> {
    let entry = match parser::parse_study_line(text) {
        Some(entry) => entry,
        None => return Ok(reports::STUDY_FORMAT_ERROR.to_string()),
    };

    match add_study_entry_to_db(user_id, &entry, today, db) {
        Ok(_) => {
            info!(
                "User {} logged {} hours of {}",
                user_id, entry.hours, entry.subject
            );
            sessions.clear_awaiting(user_id)?;
            Ok(reports::study_added_text(&entry))
        }
        Err(e) => {
            error!("Failed to add study entry for user {}: {}", user_id, e);
            Ok(reports::GENERIC_ERROR.to_string())
        }
    }
}

fn add_goal_from_line(
    user_id: UserID,
    text: &str,
    db: &Connection,
    sessions: &SessionMap,
) -> InternalResult<String> {
    let goal = match parser::parse_goal_line(text) {
        Some(goal) => goal,
        None => return Ok(reports::GOAL_FORMAT_ERROR.to_string()),
    };

    match add_goal_to_db(user_id, &goal, db) {
        Ok(_) => {
            info!("User {} added goal '{}'", user_id, goal.description);
            sessions.clear_awaiting(user_id)?;
            Ok(reports::goal_added_text(&goal))
        }
        Err(e) => {
            error!("Failed to add goal for user {}: {}", user_id, e);
            Ok(reports::GENERIC_ERROR.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::records::helpers::{
        get_goals_from_db, get_subject_totals, get_tasks_on_date, init_schema,
    };

    const TODAY: &str = "2024-01-20";

    fn test_db() -> Connection {
        let db = Connection::open_in_memory().unwrap();
        init_schema(&db).unwrap();
        db
    }

    fn sessions_awaiting(mode: AwaitMode) -> SessionMap {
        let sessions = SessionMap::new();
        sessions.set_awaiting(1, mode).unwrap();
        sessions
    }

    #[test]
    fn malformed_line_keeps_the_mode_active_and_stores_nothing() {
        let db = test_db();
        let sessions = sessions_awaiting(AwaitMode::Task);

        let reply = reply_for_text(1, "homework;2024-01-20", TODAY, &db, &sessions).unwrap();

        assert_eq!(reply.as_deref(), Some(reports::TASK_FORMAT_ERROR));
        assert_eq!(sessions.get_awaiting(1).unwrap(), Some(AwaitMode::Task));
        assert!(get_tasks_on_date(1, TODAY, &db).unwrap().is_empty());
    }

    #[test]
    fn valid_task_line_stores_the_task_and_clears_the_mode() {
        let db = test_db();
        let sessions = sessions_awaiting(AwaitMode::Task);

        let reply =
            reply_for_text(1, "homework;2024-01-20;18:00", TODAY, &db, &sessions).unwrap();

        assert!(reply.unwrap().contains("Task added"));
        assert_eq!(sessions.get_awaiting(1).unwrap(), None);
        let tasks = get_tasks_on_date(1, TODAY, &db).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn valid_study_line_is_stamped_with_today_and_clears_the_mode() {
        let db = test_db();
        let sessions = sessions_awaiting(AwaitMode::Study);

        let reply = reply_for_text(1, "Math;Integrals;2.5", TODAY, &db, &sessions).unwrap();

        assert!(reply.unwrap().contains("Study time added"));
        assert_eq!(sessions.get_awaiting(1).unwrap(), None);
        let totals = get_subject_totals(1, &db).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].subject, "Math");
    }

    #[test]
    fn cancel_clears_the_mode_without_storing_a_record() {
        let db = test_db();
        let sessions = sessions_awaiting(AwaitMode::Goal);

        let reply = reply_for_text(1, "Cancel", TODAY, &db, &sessions).unwrap();

        assert_eq!(reply.as_deref(), Some(reports::CANCELLED));
        assert_eq!(sessions.get_awaiting(1).unwrap(), None);
        assert!(get_goals_from_db(1, &db).unwrap().is_empty());
    }

    #[test]
    fn idle_text_is_ignored() {
        let db = test_db();
        let sessions = SessionMap::new();

        let reply = reply_for_text(1, "hello there", TODAY, &db, &sessions).unwrap();

        assert_eq!(reply, None);
    }

    #[test]
    fn slash_text_is_ignored_even_while_awaiting() {
        let db = test_db();
        let sessions = sessions_awaiting(AwaitMode::Task);

        let reply = reply_for_text(1, "/start", TODAY, &db, &sessions).unwrap();

        assert_eq!(reply, None);
        assert_eq!(sessions.get_awaiting(1).unwrap(), Some(AwaitMode::Task));
    }
}
