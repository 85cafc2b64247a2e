use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};

use crate::internal_error::InternalResult;

use super::data::*;

pub fn init_schema(db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            task TEXT,
            date TEXT,
            time TEXT,
            completed INTEGER DEFAULT 0
        )",
        params![],
    )?;
    db_connection.execute(
        "CREATE TABLE IF NOT EXISTS study_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            subject TEXT,
            topic TEXT,
            hours REAL,
            date TEXT
        )",
        params![],
    )?;
    db_connection.execute(
        "CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            goal TEXT,
            deadline TEXT,
            progress INTEGER DEFAULT 0,
            completed INTEGER DEFAULT 0
        )",
        params![],
    )?;

    Ok(())
}

/// First day of the trailing week: today and the six days before it.
pub fn trailing_window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(6)
}

pub fn add_task_to_db(
    user_id: UserID,
    task: &NewTask,
    db_connection: &Connection,
) -> InternalResult<TaskID> {
    db_connection.execute(
        "INSERT INTO tasks (user_id, task, date, time, completed) VALUES (?1, ?2, ?3, ?4, 0)",
        params![user_id, task.description, task.date, task.time],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn get_tasks_on_date(
    user_id: UserID,
    date: &str,
    db_connection: &Connection,
) -> InternalResult<Vec<Task>> {
    let mut statement = db_connection.prepare(
        "SELECT id, task, time, completed FROM tasks
         WHERE user_id = ?1 AND date = ?2
         ORDER BY time",
    )?;

    let rows = statement.query_map(params![user_id, date], |row| {
        Ok(Task {
            id: row.get(0)?,
            description: row.get(1)?,
            time: row.get(2)?,
            completed: row.get(3)?,
        })
    })?;

    let mut tasks = vec![];
    for row_result in rows {
        tasks.push(row_result?);
    }

    Ok(tasks)
}

pub fn set_task_completed(
    task_id: TaskID,
    user_id: UserID,
    db_connection: &Connection,
) -> InternalResult<usize> {
    let affected = db_connection.execute(
        "UPDATE tasks SET completed = 1 WHERE id = ?1 AND user_id = ?2",
        params![task_id, user_id],
    )?;

    Ok(affected)
}

pub fn delete_task_from_db(
    task_id: TaskID,
    user_id: UserID,
    db_connection: &Connection,
) -> InternalResult<usize> {
    let affected = db_connection.execute(
        "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
        params![task_id, user_id],
    )?;

    Ok(affected)
}

pub fn add_study_entry_to_db(
    user_id: UserID,
    entry: &NewStudyEntry,
    date: &str,
    db_connection: &Connection,
) -> InternalResult<StudyEntryID> {
    db_connection.execute(
        "INSERT INTO study_entries (user_id, subject, topic, hours, date) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, entry.subject, entry.topic, entry.hours, date],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn get_subject_totals(
    user_id: UserID,
    db_connection: &Connection,
) -> InternalResult<Vec<SubjectHours>> {
    let mut statement = db_connection.prepare(
        "SELECT subject, SUM(hours) FROM study_entries
         WHERE user_id = ?1
         GROUP BY subject
         ORDER BY subject",
    )?;

    let rows = statement.query_map(params![user_id], |row| {
        Ok(SubjectHours {
            subject: row.get(0)?,
            hours: row.get(1)?,
        })
    })?;

    let mut totals = vec![];
    for row_result in rows {
        totals.push(row_result?);
    }

    Ok(totals)
}

pub fn add_goal_to_db(
    user_id: UserID,
    goal: &NewGoal,
    db_connection: &Connection,
) -> InternalResult<GoalID> {
    db_connection.execute(
        "INSERT INTO goals (user_id, goal, deadline, progress, completed) VALUES (?1, ?2, ?3, 0, 0)",
        params![user_id, goal.description, goal.deadline],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn get_goals_from_db(
    user_id: UserID,
    db_connection: &Connection,
) -> InternalResult<Vec<Goal>> {
    let mut statement = db_connection.prepare(
        "SELECT id, goal, deadline, progress, completed FROM goals
         WHERE user_id = ?1
         ORDER BY deadline",
    )?;

    let rows = statement.query_map(params![user_id], |row| {
        Ok(Goal {
            id: row.get(0)?,
            description: row.get(1)?,
            deadline: row.get(2)?,
            progress: row.get(3)?,
            completed: row.get(4)?,
        })
    })?;

    let mut goals = vec![];
    for row_result in rows {
        goals.push(row_result?);
    }

    Ok(goals)
}

/// Task and study numbers are restricted to dates on or after `window_start`;
/// goal counts are all-time.
pub fn get_weekly_stats(
    user_id: UserID,
    window_start: &str,
    db_connection: &Connection,
) -> InternalResult<WeeklyStats> {
    let (tasks_total, tasks_completed) = db_connection.query_row(
        "SELECT COUNT(*), SUM(CASE WHEN completed = 1 THEN 1 ELSE 0 END) FROM tasks
         WHERE user_id = ?1 AND date >= ?2",
        params![user_id, window_start],
        |row| {
            Ok((
                row.get::<usize, i64>(0)?,
                row.get::<usize, Option<i64>>(1)?.unwrap_or(0),
            ))
        },
    )?;

    let study_hours = db_connection
        .query_row(
            "SELECT SUM(hours) FROM study_entries WHERE user_id = ?1 AND date >= ?2",
            params![user_id, window_start],
            |row| row.get::<usize, Option<f64>>(0),
        )?
        .unwrap_or(0.0);

    let (goals_total, goals_completed) = db_connection.query_row(
        "SELECT COUNT(*), SUM(CASE WHEN completed = 1 THEN 1 ELSE 0 END) FROM goals
         WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok((
                row.get::<usize, i64>(0)?,
                row.get::<usize, Option<i64>>(1)?.unwrap_or(0),
            ))
        },
    )?;

    Ok(WeeklyStats {
        tasks_total,
        tasks_completed,
        goals_total,
        goals_completed,
        study_hours,
    })
}
