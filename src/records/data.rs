pub type UserID = i64;
pub type TaskID = i64;
pub type StudyEntryID = i64;
pub type GoalID = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskID,
    pub description: String,
    pub time: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub description: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudyEntry {
    pub subject: String,
    pub topic: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectHours {
    pub subject: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub description: String,
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: GoalID,
    pub description: String,
    pub deadline: String,
    pub progress: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeeklyStats {
    pub tasks_total: i64,
    pub tasks_completed: i64,
    pub goals_total: i64,
    pub goals_completed: i64,
    pub study_hours: f64,
}
