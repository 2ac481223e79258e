use chrono::{DateTime, Duration, Utc};

use super::MockState;
use crate::model::{
    Achievement, AchievementCategory, Assignment, AssignmentStatus, Badge, BadgeRequirementKind,
    BadgeRequirements, BadgeVariant, Course, CourseCategory, Difficulty, GoalUnit, LearningGoal,
    NotificationPreferences, PrivacyPreferences, Resource, ResourceType, RubricScore,
    StudySession, StudyTimePreferences, User, UserPreferences, WeeklyStats,
};

/// Demo data, laid out relative to `origin` so due-today and overdue flows stay
/// meaningful whenever the mock is created.
pub(super) fn seed(origin: DateTime<Utc>) -> MockState {
    MockState {
        user: seed_user(origin),
        courses: seed_courses(origin),
        assignments: seed_assignments(origin),
        study_sessions: seed_study_sessions(origin),
        achievements: seed_achievements(origin),
        badges: seed_badges(origin),
        learning_goals: seed_learning_goals(origin),
        weekly_stats: WeeklyStats {
            total_hours: 15.5,
            completed_courses: 1,
            average_quiz_score: 85.0,
            current_streak: 7,
        },
    }
}

fn seed_user(origin: DateTime<Utc>) -> User {
    User {
        id: "1".to_owned(),
        email: "john.doe@example.com".to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        avatar: Some("https://example.com/avatars/john-doe.jpg".to_owned()),
        enrolled_courses: vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
        learning_streak: 7,
        longest_streak: 23,
        total_hours_studied: 45,
        preferences: UserPreferences {
            notifications: NotificationPreferences {
                email: true,
                push: false,
                assignments: true,
                course_updates: true,
            },
            study_times: StudyTimePreferences {
                morning: true,
                afternoon: false,
                evening: true,
            },
            privacy: PrivacyPreferences {
                profile_visible: true,
                progress_visible: false,
            },
        },
        created_at: origin - Duration::days(586),
        last_login_at: origin,
    }
}

fn seed_courses(origin: DateTime<Utc>) -> Vec<Course> {
    vec![
        Course {
            id: "1".to_owned(),
            title: "React Fundamentals".to_owned(),
            description: "Learn the basics of React development".to_owned(),
            instructor: "Sarah Johnson".to_owned(),
            instructor_rating: 4.8,
            category: CourseCategory::Programming,
            difficulty: Difficulty::Beginner,
            thumbnail: "https://example.com/thumbs/react-fundamentals.jpg".to_owned(),
            total_lessons: 12,
            completed_lessons: 7,
            estimated_hours: 8,
            enrolled: true,
            progress: 58,
            last_accessed_at: Some(origin - Duration::days(1)),
            created_at: origin - Duration::days(600),
            quizzes: None,
        },
        Course {
            id: "2".to_owned(),
            title: "UI/UX Design Principles".to_owned(),
            description: "Master the art of user interface and experience design".to_owned(),
            instructor: "Michael Chen".to_owned(),
            instructor_rating: 4.6,
            category: CourseCategory::Design,
            difficulty: Difficulty::Intermediate,
            thumbnail: "https://example.com/thumbs/uiux-design.jpg".to_owned(),
            total_lessons: 15,
            completed_lessons: 3,
            estimated_hours: 12,
            enrolled: true,
            progress: 20,
            last_accessed_at: Some(origin - Duration::days(2)),
            created_at: origin - Duration::days(570),
            quizzes: None,
        },
        Course {
            id: "3".to_owned(),
            title: "Business Strategy".to_owned(),
            description: "Learn strategic thinking for business success".to_owned(),
            instructor: "Emma Wilson".to_owned(),
            instructor_rating: 4.9,
            category: CourseCategory::Business,
            difficulty: Difficulty::Advanced,
            thumbnail: "https://example.com/thumbs/business-strategy.jpg".to_owned(),
            total_lessons: 20,
            completed_lessons: 12,
            estimated_hours: 15,
            enrolled: true,
            progress: 60,
            last_accessed_at: Some(origin - Duration::days(3)),
            created_at: origin - Duration::days(540),
            quizzes: None,
        },
        Course {
            id: "4".to_owned(),
            title: "Python for Data Science".to_owned(),
            description: "Use Python for data analysis and machine learning".to_owned(),
            instructor: "David Park".to_owned(),
            instructor_rating: 4.7,
            category: CourseCategory::DataScience,
            difficulty: Difficulty::Intermediate,
            thumbnail: "https://example.com/thumbs/python-data-science.jpg".to_owned(),
            total_lessons: 18,
            completed_lessons: 0,
            estimated_hours: 20,
            enrolled: false,
            progress: 0,
            last_accessed_at: None,
            created_at: origin - Duration::days(510),
            quizzes: None,
        },
    ]
}

fn seed_assignments(origin: DateTime<Utc>) -> Vec<Assignment> {
    vec![
        Assignment {
            id: "1".to_owned(),
            course_id: "1".to_owned(),
            course_name: "React Fundamentals".to_owned(),
            title: "Build a Todo App".to_owned(),
            description: "Create a fully functional todo application using React hooks".to_owned(),
            due_date: origin + Duration::days(9),
            status: AssignmentStatus::InProgress,
            points: 85,
            max_points: 100,
            grade: None,
            submitted_at: None,
            feedback: None,
            rubric_scores: None,
            attachments: Vec::new(),
            resources: vec![Resource {
                id: "1".to_owned(),
                title: "React Hooks Documentation".to_owned(),
                resource_type: ResourceType::Link,
                url: "https://react.dev/reference/react".to_owned(),
            }],
        },
        Assignment {
            id: "2".to_owned(),
            course_id: "2".to_owned(),
            course_name: "UI/UX Design Principles".to_owned(),
            title: "Design System Creation".to_owned(),
            description: "Create a comprehensive design system for a mobile app".to_owned(),
            due_date: origin + Duration::days(2),
            status: AssignmentStatus::NotStarted,
            points: 0,
            max_points: 100,
            grade: None,
            submitted_at: None,
            feedback: None,
            rubric_scores: None,
            attachments: Vec::new(),
            resources: Vec::new(),
        },
        Assignment {
            id: "3".to_owned(),
            course_id: "1".to_owned(),
            course_name: "React Fundamentals".to_owned(),
            title: "Component Library".to_owned(),
            description: "Build reusable React components".to_owned(),
            due_date: origin + Duration::days(1),
            status: AssignmentStatus::Submitted,
            points: 92,
            max_points: 100,
            grade: None,
            submitted_at: Some(origin - Duration::hours(18)),
            feedback: Some("Excellent work! Clean code and good component structure.".to_owned()),
            rubric_scores: None,
            attachments: vec!["component-library.zip".to_owned()],
            resources: Vec::new(),
        },
        Assignment {
            id: "4".to_owned(),
            course_id: "3".to_owned(),
            course_name: "Business Strategy".to_owned(),
            title: "Market Analysis Report".to_owned(),
            description: "Analyze market trends and competitive landscape".to_owned(),
            due_date: origin - Duration::days(3),
            status: AssignmentStatus::Graded,
            points: 88,
            max_points: 100,
            grade: Some(88),
            submitted_at: Some(origin - Duration::days(4)),
            feedback: Some("Good analysis, but could use more specific data points.".to_owned()),
            rubric_scores: Some(vec![
                RubricScore {
                    criterion: "Research Quality".to_owned(),
                    score: 18,
                    max_score: 20,
                    feedback: "Solid research with credible sources".to_owned(),
                },
                RubricScore {
                    criterion: "Analysis Depth".to_owned(),
                    score: 35,
                    max_score: 40,
                    feedback: "Good insights but could go deeper".to_owned(),
                },
            ]),
            attachments: vec!["market-analysis.pdf".to_owned()],
            resources: Vec::new(),
        },
    ]
}

fn seed_study_sessions(origin: DateTime<Utc>) -> Vec<StudySession> {
    let day = |offset: i64| (origin - Duration::days(offset)).date_naive();
    vec![
        StudySession {
            id: "1".to_owned(),
            course_id: "1".to_owned(),
            date: day(0),
            duration: 45,
            lessons_completed: 1,
            quiz_score: Some(85),
        },
        StudySession {
            id: "2".to_owned(),
            course_id: "2".to_owned(),
            date: day(1),
            duration: 30,
            lessons_completed: 1,
            quiz_score: None,
        },
        StudySession {
            id: "3".to_owned(),
            course_id: "1".to_owned(),
            date: day(2),
            duration: 60,
            lessons_completed: 2,
            quiz_score: Some(92),
        },
        StudySession {
            id: "4".to_owned(),
            course_id: "3".to_owned(),
            date: day(3),
            duration: 90,
            lessons_completed: 1,
            quiz_score: Some(78),
        },
    ]
}

fn seed_achievements(origin: DateTime<Utc>) -> Vec<Achievement> {
    vec![
        Achievement {
            id: "1".to_owned(),
            title: "First Course Completed".to_owned(),
            description: "Completed your first course".to_owned(),
            icon: "graduation-cap".to_owned(),
            unlocked_at: origin - Duration::days(8),
            category: AchievementCategory::Completion,
        },
        Achievement {
            id: "2".to_owned(),
            title: "7-Day Streak".to_owned(),
            description: "Studied for 7 consecutive days".to_owned(),
            icon: "flame".to_owned(),
            unlocked_at: origin,
            category: AchievementCategory::Streak,
        },
        Achievement {
            id: "3".to_owned(),
            title: "High Scorer".to_owned(),
            description: "Achieved 90%+ on 5 quizzes".to_owned(),
            icon: "star".to_owned(),
            unlocked_at: origin - Duration::days(3),
            category: AchievementCategory::Performance,
        },
    ]
}

fn seed_badges(origin: DateTime<Utc>) -> Vec<Badge> {
    vec![
        Badge {
            id: "1".to_owned(),
            title: "Course Master".to_owned(),
            description: "Complete 5 courses with 90%+ average".to_owned(),
            icon: "trophy".to_owned(),
            variant: BadgeVariant::Gold,
            unlocked_at: Some(origin - Duration::days(8)),
            progress: Some(100),
            requirements: Some(BadgeRequirements {
                kind: BadgeRequirementKind::Courses,
                target: 5,
                current: 5,
            }),
        },
        Badge {
            id: "2".to_owned(),
            title: "Study Streak Champion".to_owned(),
            description: "Maintain a 30-day learning streak".to_owned(),
            icon: "flame".to_owned(),
            variant: BadgeVariant::Platinum,
            unlocked_at: None,
            progress: Some(77),
            requirements: Some(BadgeRequirements {
                kind: BadgeRequirementKind::Streak,
                target: 30,
                current: 23,
            }),
        },
        Badge {
            id: "3".to_owned(),
            title: "Assignment Ace".to_owned(),
            description: "Submit 25 assignments on time".to_owned(),
            icon: "memo".to_owned(),
            variant: BadgeVariant::Silver,
            unlocked_at: Some(origin - Duration::days(13)),
            progress: Some(100),
            requirements: Some(BadgeRequirements {
                kind: BadgeRequirementKind::Assignments,
                target: 25,
                current: 25,
            }),
        },
        Badge {
            id: "4".to_owned(),
            title: "Study Marathon".to_owned(),
            description: "Study for 100+ hours total".to_owned(),
            icon: "alarm-clock".to_owned(),
            variant: BadgeVariant::Bronze,
            unlocked_at: None,
            progress: Some(85),
            requirements: Some(BadgeRequirements {
                kind: BadgeRequirementKind::Hours,
                target: 100,
                current: 85,
            }),
        },
        Badge {
            id: "5".to_owned(),
            title: "Perfect Score Legend".to_owned(),
            description: "Achieve 100% on 10 assignments".to_owned(),
            icon: "gem".to_owned(),
            variant: BadgeVariant::Diamond,
            unlocked_at: None,
            progress: Some(40),
            requirements: Some(BadgeRequirements {
                kind: BadgeRequirementKind::Assignments,
                target: 10,
                current: 4,
            }),
        },
    ]
}

fn seed_learning_goals(origin: DateTime<Utc>) -> Vec<LearningGoal> {
    vec![
        LearningGoal {
            id: "1".to_owned(),
            title: "Complete 3 Courses".to_owned(),
            description: "Finish 3 courses by the end of the month".to_owned(),
            target_date: origin + Duration::days(8),
            current_progress: 1,
            target_value: 3,
            unit: GoalUnit::Courses,
            is_completed: false,
        },
        LearningGoal {
            id: "2".to_owned(),
            title: "Study 50 Hours".to_owned(),
            description: "Accumulate 50 hours of study time".to_owned(),
            target_date: origin + Duration::days(38),
            current_progress: 45,
            target_value: 50,
            unit: GoalUnit::Hours,
            is_completed: false,
        },
    ]
}
