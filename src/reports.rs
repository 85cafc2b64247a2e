use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::records::data::{Goal, NewGoal, NewStudyEntry, NewTask, SubjectHours, Task, WeeklyStats};

pub const CANCELLED: &str = "❌ Operation cancelled.";
pub const GENERIC_ERROR: &str = "❌ Something went wrong. Try again, or send 'cancel'.";
pub const CHART_SENT: &str = "📊 The analytics chart was sent above ⬆️";

pub const TASK_PROMPT: &str = "📝 Adding a task\n\n\
    Send it as:\n\
    Task;Date(YYYY-MM-DD);Time(HH:MM)\n\n\
    Example:\n\
    Do math homework;2024-01-20;18:00\n\n\
    Or send 'cancel' to abort.";

pub const STUDY_PROMPT: &str = "📚 Adding study time\n\n\
    Send it as:\n\
    Subject;Topic;Hours\n\n\
    Example:\n\
    Math;Integrals;2.5\n\n\
    Or send 'cancel' to abort.";

pub const GOAL_PROMPT: &str = "🎯 Adding a goal\n\n\
    Send it as:\n\
    Goal;Deadline(YYYY-MM-DD)\n\n\
    Example:\n\
    Learn Rust;2024-02-28\n\n\
    Or send 'cancel' to abort.";

pub const TASK_FORMAT_ERROR: &str = "❌ Wrong format!\n\n\
    Expected:\n\
    Task;Date(YYYY-MM-DD);Time(HH:MM)\n\n\
    Example:\n\
    Do math homework;2024-01-20;18:00";

pub const STUDY_FORMAT_ERROR: &str = "❌ Wrong format!\n\n\
    Expected:\n\
    Subject;Topic;Hours\n\n\
    Example:\n\
    Math;Integrals;2.5";

pub const GOAL_FORMAT_ERROR: &str = "❌ Wrong format!\n\n\
    Expected:\n\
    Goal;Deadline(YYYY-MM-DD)\n\n\
    Example:\n\
    Learn Rust;2024-02-28";

fn status_glyph(completed: bool) -> &'static str {
    if completed {
        "✅"
    } else {
        "⏳"
    }
}

pub fn menu_text(first_name: &str) -> String {
    format!(
        "Hi, {}! 👋\n\n\
         I am your personal assistant for:\n\
         1. 📅 Planning your schedule\n\
         2. 📚 Tracking your studying\n\
         3. 🎯 Following up on goals\n\
         4. 📊 Progress analytics\n\n\
         Pick a section:",
        first_name
    )
}

pub fn menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📅 Schedule", "schedule")],
        vec![InlineKeyboardButton::callback("📚 Study", "study")],
        vec![InlineKeyboardButton::callback("🎯 Goals", "goals")],
        vec![InlineKeyboardButton::callback("📊 Analytics", "analytics")],
        vec![InlineKeyboardButton::callback("➕ Add task", "add_task")],
    ])
}

pub fn help_text() -> &'static str {
    "📋 Available commands:\n\n\
     /start - Main menu\n\
     /help - This help text\n\n\
     Adding a task:\n\
     1. Press '➕ Add task'\n\
     2. Send: Task;Date;Time\n\
     3. Example: Math class;2024-01-20;14:00\n\n\
     Adding study time:\n\
     1. In '📚 Study', press '➕ Add study time'\n\
     2. Send: Subject;Topic;Hours\n\
     3. Example: Physics;Optics;1.5\n\n\
     Adding a goal:\n\
     1. In '🎯 Goals', press '➕ Add goal'\n\
     2. Send: Goal;Deadline\n\
     3. Example: Finish the book;2024-02-15"
}

pub fn schedule_text(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "📅 No tasks for today!\nAdd a new one from the menu.".to_string();
    }

    let mut text = "📅 Tasks for today:\n\n".to_string();
    for task in tasks {
        text.push_str(&format!(
            "{} {} - {}\n",
            status_glyph(task.completed),
            task.time,
            task.description
        ));
    }

    text
}

pub fn schedule_keyboard(tasks: &[Task]) -> InlineKeyboardMarkup {
    let mut rows = vec![];

    for task in tasks {
        rows.push(vec![
            InlineKeyboardButton::callback(
                format!("✅ Done ({})", task.time),
                format!("complete_{}", task.id),
            ),
            InlineKeyboardButton::callback("🗑 Delete", format!("delete_{}", task.id)),
        ]);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        "➕ Add task",
        "add_task",
    )]);
    rows.push(vec![InlineKeyboardButton::callback("Back to menu", "back")]);

    InlineKeyboardMarkup::new(rows)
}

pub fn study_text(subjects: &[SubjectHours]) -> String {
    if subjects.is_empty() {
        return "📚 No study data yet.".to_string();
    }

    let mut text = "📚 Hours by subject:\n\n".to_string();
    let mut total_hours = 0.0;
    for subject in subjects {
        text.push_str(&format!("{}: {:.1} h\n", subject.subject, subject.hours));
        total_hours += subject.hours;
    }
    text.push_str(&format!("\nTotal hours: {:.1}", total_hours));

    text
}

pub fn study_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "➕ Add study time",
            "add_study",
        )],
        vec![InlineKeyboardButton::callback("Back to menu", "back")],
    ])
}

pub fn goals_text(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "🎯 No goals set.".to_string();
    }

    let mut text = "🎯 Your goals:\n\n".to_string();
    for goal in goals {
        text.push_str(&format!(
            "{} {}\n   📅 Deadline: {}\n   📊 Progress: {}%\n\n",
            status_glyph(goal.completed),
            goal.description,
            goal.deadline,
            goal.progress
        ));
    }

    text
}

pub fn goals_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➕ Add goal", "add_goal")],
        vec![InlineKeyboardButton::callback("Back to menu", "back")],
    ])
}

pub fn back_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Back to menu",
        "back",
    )]])
}

pub fn analytics_caption(stats: &WeeklyStats) -> String {
    format!(
        "📊 Your productivity overview:\n\n\
         ✅ Tasks completed this week: {}/{}\n\
         🎯 Goals achieved: {}/{}\n\
         📚 Study hours this week: {:.1}\n\n\
         📈 Activity chart:",
        stats.tasks_completed,
        stats.tasks_total,
        stats.goals_completed,
        stats.goals_total,
        stats.study_hours
    )
}

pub fn task_added_text(task: &NewTask) -> String {
    format!(
        "✅ Task added!\n\n📝 Task: {}\n📅 Date: {}\n⏰ Time: {}",
        task.description, task.date, task.time
    )
}

pub fn study_added_text(entry: &NewStudyEntry) -> String {
    format!(
        "✅ Study time added!\n\n📚 Subject: {}\n📖 Topic: {}\n⏱ Hours: {}",
        entry.subject, entry.topic, entry.hours
    )
}

pub fn goal_added_text(goal: &NewGoal) -> String {
    format!(
        "🎯 Goal added!\n\n🎯 Goal: {}\n📅 Deadline: {}\n📊 Progress: 0%",
        goal.description, goal.deadline
    )
}
