use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub enrolled_courses: Vec<String>,
    pub learning_streak: u32,
    pub longest_streak: u32,
    pub total_hours_studied: u32,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub notifications: NotificationPreferences,
    pub study_times: StudyTimePreferences,
    pub privacy: PrivacyPreferences,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub assignments: bool,
    pub course_updates: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTimePreferences {
    pub morning: bool,
    pub afternoon: bool,
    pub evening: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPreferences {
    pub profile_visible: bool,
    pub progress_visible: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CourseCategory {
    Programming,
    Design,
    Business,
    #[serde(rename = "Data Science")]
    DataScience,
    Marketing,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub instructor_rating: f32,
    pub category: CourseCategory,
    pub difficulty: Difficulty,
    pub thumbnail: String,
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub estimated_hours: u32,
    pub enrolled: bool,
    /// 0-100.
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quizzes: Option<Vec<Quiz>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    pub max_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    NotStarted,
    InProgress,
    Submitted,
    Graded,
}

/// What the tracker shows for an assignment: submitted and graded work keeps its
/// status, everything else is ranked by how close the due date is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStatus {
    NotStarted,
    InProgress,
    Submitted,
    Graded,
    Overdue,
    DueToday,
    DueThisWeek,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub points: u32,
    pub max_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_scores: Option<Vec<RubricScore>>,
    pub attachments: Vec<String>,
    pub resources: Vec<Resource>,
}

impl Assignment {
    pub fn display_status(&self, now: DateTime<Utc>) -> DisplayStatus {
        match self.status {
            AssignmentStatus::Submitted => return DisplayStatus::Submitted,
            AssignmentStatus::Graded => return DisplayStatus::Graded,
            AssignmentStatus::NotStarted | AssignmentStatus::InProgress => {}
        }

        if self.due_date < now {
            return DisplayStatus::Overdue;
        }
        if self.due_date.date_naive() == now.date_naive() {
            return DisplayStatus::DueToday;
        }
        if in_same_week(self.due_date.date_naive(), now.date_naive()) {
            return DisplayStatus::DueThisWeek;
        }

        match self.status {
            AssignmentStatus::NotStarted => DisplayStatus::NotStarted,
            AssignmentStatus::InProgress => DisplayStatus::InProgress,
            AssignmentStatus::Submitted => DisplayStatus::Submitted,
            AssignmentStatus::Graded => DisplayStatus::Graded,
        }
    }
}

// Calendar weeks start on Sunday.
pub(crate) fn in_same_week(date: NaiveDate, reference: NaiveDate) -> bool {
    let week_start = reference - Duration::days(reference.weekday().num_days_from_sunday() as i64);
    date >= week_start && date < week_start + Duration::days(7)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricScore {
    pub criterion: String,
    pub score: u32,
    pub max_score: u32,
    pub feedback: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Document,
    Link,
    Quiz,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub course_id: String,
    pub date: NaiveDate,
    /// Minutes.
    pub duration: u32,
    pub lessons_completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Completion,
    Streak,
    Performance,
    Engagement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
    pub category: AchievementCategory,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRequirementKind {
    Assignments,
    Hours,
    Courses,
    Streak,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRequirements {
    #[serde(rename = "type")]
    pub kind: BadgeRequirementKind,
    pub target: u32,
    pub current: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub variant: BadgeVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    /// 0-100, progress towards unlocking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<BadgeRequirements>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalUnit {
    Hours,
    Courses,
    Assignments,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningGoal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_date: DateTime<Utc>,
    pub current_progress: u32,
    pub target_value: u32,
    pub unit: GoalUnit,
    pub is_completed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub total_hours: f32,
    pub completed_courses: u32,
    pub average_quiz_score: f32,
    pub current_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(status: AssignmentStatus, due_date: DateTime<Utc>) -> Assignment {
        Assignment {
            id: "1".to_owned(),
            course_id: "1".to_owned(),
            course_name: "React Fundamentals".to_owned(),
            title: "Build a Todo App".to_owned(),
            description: String::new(),
            due_date,
            status,
            points: 0,
            max_points: 100,
            grade: None,
            submitted_at: None,
            feedback: None,
            rubric_scores: None,
            attachments: Vec::new(),
            resources: Vec::new(),
        }
    }

    #[test]
    fn submitted_and_graded_keep_their_status() {
        let now = Utc.with_ymd_and_hms(2025, 8, 23, 10, 0, 0).unwrap();
        let overdue = now - Duration::days(3);
        assert_eq!(
            assignment(AssignmentStatus::Submitted, overdue).display_status(now),
            DisplayStatus::Submitted
        );
        assert_eq!(
            assignment(AssignmentStatus::Graded, overdue).display_status(now),
            DisplayStatus::Graded
        );
    }

    #[test]
    fn open_assignments_rank_by_due_date() {
        // A Saturday, so the Sunday-started week ends the next day.
        let now = Utc.with_ymd_and_hms(2025, 8, 23, 10, 0, 0).unwrap();

        let past = now - Duration::hours(1);
        assert_eq!(
            assignment(AssignmentStatus::InProgress, past).display_status(now),
            DisplayStatus::Overdue
        );

        let tonight = Utc.with_ymd_and_hms(2025, 8, 23, 23, 59, 59).unwrap();
        assert_eq!(
            assignment(AssignmentStatus::NotStarted, tonight).display_status(now),
            DisplayStatus::DueToday
        );

        let next_week = now + Duration::days(5);
        assert_eq!(
            assignment(AssignmentStatus::NotStarted, next_week).display_status(now),
            DisplayStatus::NotStarted
        );

        // A Wednesday; Saturday is still inside the same Sunday-started week.
        let midweek = Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2025, 8, 23, 23, 59, 59).unwrap();
        assert_eq!(
            assignment(AssignmentStatus::InProgress, saturday).display_status(midweek),
            DisplayStatus::DueThisWeek
        );
    }

    #[test]
    fn status_json_uses_the_original_casing() {
        let json = serde_json::to_string(&AssignmentStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in-progress\"");
        let parsed: AssignmentStatus = serde_json::from_str("\"not-started\"").expect("parse");
        assert_eq!(parsed, AssignmentStatus::NotStarted);
    }

    #[test]
    fn category_json_uses_the_original_casing() {
        let json = serde_json::to_string(&CourseCategory::DataScience).expect("serialize");
        assert_eq!(json, "\"Data Science\"");
    }

    #[test]
    fn user_round_trips_through_camel_case_json() {
        let user = User {
            id: "1".to_owned(),
            email: "john.doe@example.com".to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            avatar: None,
            enrolled_courses: vec!["1".to_owned(), "2".to_owned()],
            learning_streak: 7,
            longest_streak: 23,
            total_hours_studied: 45,
            preferences: UserPreferences::default(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            last_login_at: Utc.with_ymd_and_hms(2025, 8, 23, 10, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["firstName"], "John");
        assert!(json["preferences"]["notifications"]["courseUpdates"].is_boolean());
        let back: User = serde_json::from_value(json).expect("parse");
        assert_eq!(back, user);
    }
}
