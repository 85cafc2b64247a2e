use chrono::{NaiveDate, NaiveTime};

use crate::records::data::{NewGoal, NewStudyEntry, NewTask};

/// Checked before any mode dispatch; aborts whatever input was awaited.
pub fn is_cancel(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("cancel")
}

/// `description;YYYY-MM-DD;HH:MM`, fields trimmed. Returns `None` on a
/// wrong field count or an unparseable date or time. Date and time are
/// re-formatted to zero-padded text so stored values compare and sort
/// correctly.
pub fn parse_task_line(text: &str) -> Option<NewTask> {
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() != 3 {
        return None;
    }

    let date = NaiveDate::parse_from_str(parts[1].trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(parts[2].trim(), "%H:%M").ok()?;

    Some(NewTask {
        description: parts[0].trim().to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        time: time.format("%H:%M").to_string(),
    })
}

/// `subject;topic;hours`, fields trimmed. The entry date is stamped by the
/// caller, not parsed from input.
pub fn parse_study_line(text: &str) -> Option<NewStudyEntry> {
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() != 3 {
        return None;
    }

    let (subject, topic) = (parts[0].trim(), parts[1].trim());
    let hours = parts[2].trim().parse::<f64>().ok()?;

    Some(NewStudyEntry {
        subject: subject.to_string(),
        topic: topic.to_string(),
        hours,
    })
}

/// `description;YYYY-MM-DD`, fields trimmed. The deadline is stored in
/// zero-padded form.
pub fn parse_goal_line(text: &str) -> Option<NewGoal> {
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() != 2 {
        return None;
    }

    let deadline = NaiveDate::parse_from_str(parts[1].trim(), "%Y-%m-%d").ok()?;

    Some(NewGoal {
        description: parts[0].trim().to_string(),
        deadline: deadline.format("%Y-%m-%d").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("cancel")]
    #[case("CANCEL")]
    #[case("  Cancel  ")]
    fn cancel_is_case_insensitive_and_trimmed(#[case] text: &str) {
        assert!(is_cancel(text));
    }

    #[rstest]
    #[case("cancel please")]
    #[case("do homework;2024-01-20;18:00")]
    fn other_text_is_not_a_cancellation(#[case] text: &str) {
        assert!(!is_cancel(text));
    }

    #[test]
    fn task_line_with_three_valid_fields_parses() {
        let task = parse_task_line("Do math homework ; 2024-01-20 ;18:00").unwrap();

        assert_eq!(
            task,
            NewTask {
                description: "Do math homework".to_string(),
                date: "2024-01-20".to_string(),
                time: "18:00".to_string(),
            }
        );
    }

    #[test]
    fn task_date_and_time_are_zero_padded_on_the_way_in() {
        let task = parse_task_line("Do homework;2024-1-5;8:05").unwrap();

        assert_eq!(task.date, "2024-01-05");
        assert_eq!(task.time, "08:05");
    }

    #[rstest]
    #[case::missing_field("Do homework;2024-01-20")]
    #[case::extra_field("Do homework;2024-01-20;18:00;again")]
    #[case::bad_date("Do homework;someday;18:00")]
    #[case::swapped_date("Do homework;20-01-2024;18:00")]
    #[case::bad_time("Do homework;2024-01-20;6pm")]
    #[case::empty("")]
    fn malformed_task_lines_are_rejected(#[case] line: &str) {
        assert!(parse_task_line(line).is_none());
    }

    #[test]
    fn study_line_with_fractional_hours_parses() {
        let entry = parse_study_line("Math;Integrals;2.5").unwrap();

        assert_eq!(entry.subject, "Math");
        assert_eq!(entry.topic, "Integrals");
        assert!((entry.hours - 2.5).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::missing_field("Math;2.5")]
    #[case::extra_field("Math;Integrals;2.5;more")]
    #[case::non_numeric_hours("Math;Integrals;two and a half")]
    fn malformed_study_lines_are_rejected(#[case] line: &str) {
        assert!(parse_study_line(line).is_none());
    }

    #[test]
    fn goal_line_with_two_valid_fields_parses() {
        let goal = parse_goal_line("Learn Rust;2024-02-28").unwrap();

        assert_eq!(goal.description, "Learn Rust");
        assert_eq!(goal.deadline, "2024-02-28");
    }

    #[test]
    fn goal_deadline_is_zero_padded_on_the_way_in() {
        let goal = parse_goal_line("Learn Rust;2024-2-8").unwrap();
        assert_eq!(goal.deadline, "2024-02-08");
    }

    #[rstest]
    #[case::missing_field("Learn Rust")]
    #[case::extra_field("Learn Rust;2024-02-28;100")]
    #[case::bad_deadline("Learn Rust;February 28th")]
    fn malformed_goal_lines_are_rejected(#[case] line: &str) {
        assert!(parse_goal_line(line).is_none());
    }
}
