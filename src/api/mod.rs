mod data;

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_timer::Delay;

use crate::model::{
    Achievement, Assignment, AssignmentStatus, Badge, Course, LearningGoal, StudySession, User,
    UserPreferences, WeeklyStats,
};

const VALID_VERIFICATION_CODE: &str = "123456";
const EXPIRED_TOKEN: &str = "expired-token";
const VERIFICATION_TOKEN_PREFIX: &str = "mock-verification-";
const SESSION_TOKEN: &str = "mock-jwt-token";
const VERIFIED_SESSION_TOKEN: &str = "mock-jwt-token-verified";
const SEED_PASSWORD: &str = "password";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApiError {
    InvalidCredentials,
    InvalidVerificationCode,
    InvalidVerificationToken,
    ExpiredVerificationLink,
    UnknownCourse(String),
    UnknownAssignment(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidCredentials => f.write_str("Invalid credentials"),
            ApiError::InvalidVerificationCode => f.write_str("Invalid verification code"),
            ApiError::InvalidVerificationToken => f.write_str("Invalid verification token"),
            ApiError::ExpiredVerificationLink => f.write_str("Verification link has expired"),
            ApiError::UnknownCourse(id) => write!(f, "Course {id} not found"),
            ApiError::UnknownAssignment(id) => write!(f, "Assignment {id} not found"),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

/// Fixed artificial delays standing in for network time. Reads and writes use
/// different delays, as the original mock did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Latency {
    pub read: Duration,
    pub write: Duration,
}

impl Latency {
    pub const fn simulated() -> Self {
        Self {
            read: Duration::from_millis(500),
            write: Duration::from_millis(300),
        }
    }

    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewAssignment {
    pub course_id: String,
    pub course_name: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct AssignmentUpdate {
    pub status: Option<AssignmentStatus>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub attachments: Option<Vec<String>>,
}

pub(crate) struct MockState {
    pub(crate) user: User,
    pub(crate) courses: Vec<Course>,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) study_sessions: Vec<StudySession>,
    pub(crate) achievements: Vec<Achievement>,
    pub(crate) badges: Vec<Badge>,
    pub(crate) learning_goals: Vec<LearningGoal>,
    pub(crate) weekly_stats: WeeklyStats,
}

/// In-memory stand-in for the backend. Every method waits out the configured
/// latency, then resolves against the seed data. No cancellation or timeout
/// semantics; callers await to completion.
#[derive(Clone)]
pub struct MockApi {
    latency: Latency,
    state: Arc<RwLock<MockState>>,
    next_assignment_id: Arc<AtomicU64>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::with_latency(Latency::simulated())
    }

    pub fn with_latency(latency: Latency) -> Self {
        Self::seeded(latency, Utc::now())
    }

    /// Seeds the fixtures relative to `origin`, which becomes "now" for demo
    /// data: recent study sessions, an assignment due tomorrow, one overdue.
    pub fn seeded(latency: Latency, origin: DateTime<Utc>) -> Self {
        let state = data::seed(origin);
        let next_assignment_id = state.assignments.len() as u64 + 1;
        Self {
            latency,
            state: Arc::new(RwLock::new(state)),
            next_assignment_id: Arc::new(AtomicU64::new(next_assignment_id)),
        }
    }

    async fn read_delay(&self) {
        if !self.latency.read.is_zero() {
            Delay::new(self.latency.read).await;
        }
    }

    async fn write_delay(&self) {
        if !self.latency.write.is_zero() {
            Delay::new(self.latency.write).await;
        }
    }

    fn state(&self) -> RwLockReadGuard<'_, MockState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, MockState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub async fn me(&self) -> ApiResult<User> {
        self.read_delay().await;
        Ok(self.state().user.clone())
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        self.write_delay().await;
        let user = self.state().user.clone();
        if email == user.email && password == SEED_PASSWORD {
            Ok(AuthSession {
                user,
                token: SESSION_TOKEN.to_owned(),
            })
        } else {
            Err(ApiError::InvalidCredentials)
        }
    }

    pub async fn register(&self, account: NewAccount) -> ApiResult<AuthSession> {
        self.write_delay().await;
        let mut user = self.state().user.clone();
        user.email = account.email;
        user.first_name = account.first_name;
        user.last_name = account.last_name;
        Ok(AuthSession {
            user,
            token: SESSION_TOKEN.to_owned(),
        })
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.write_delay().await;
        Ok(())
    }

    pub async fn forgot_password(&self, _email: &str) -> ApiResult<Ack> {
        self.write_delay().await;
        Ok(Ack::new("Password reset email sent"))
    }

    pub async fn change_password(&self, _current: &str, _new: &str) -> ApiResult<Ack> {
        self.write_delay().await;
        Ok(Ack::new("Password updated successfully"))
    }

    pub async fn send_verification_code(&self, _email: &str) -> ApiResult<Ack> {
        self.write_delay().await;
        Ok(Ack::new("Verification code sent"))
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> ApiResult<AuthSession> {
        self.write_delay().await;
        if code != VALID_VERIFICATION_CODE {
            return Err(ApiError::InvalidVerificationCode);
        }
        let mut user = self.state().user.clone();
        user.email = email.to_owned();
        Ok(AuthSession {
            user,
            token: VERIFIED_SESSION_TOKEN.to_owned(),
        })
    }

    pub async fn verify_email_token(&self, token: &str) -> ApiResult<Ack> {
        self.read_delay().await;
        if token == EXPIRED_TOKEN {
            Err(ApiError::ExpiredVerificationLink)
        } else if token.starts_with(VERIFICATION_TOKEN_PREFIX) {
            Ok(Ack::new("Email verified successfully"))
        } else {
            Err(ApiError::InvalidVerificationToken)
        }
    }

    pub async fn resend_verification(&self, _email: &str) -> ApiResult<Ack> {
        self.write_delay().await;
        Ok(Ack::new("Verification email resent"))
    }

    pub async fn courses(&self) -> ApiResult<Vec<Course>> {
        self.read_delay().await;
        Ok(self.state().courses.clone())
    }

    pub async fn enrolled_courses(&self) -> ApiResult<Vec<Course>> {
        self.read_delay().await;
        Ok(self
            .state()
            .courses
            .iter()
            .filter(|course| course.enrolled)
            .cloned()
            .collect())
    }

    pub async fn recommended_courses(&self) -> ApiResult<Vec<Course>> {
        self.read_delay().await;
        Ok(self
            .state()
            .courses
            .iter()
            .filter(|course| !course.enrolled)
            .cloned()
            .collect())
    }

    /// The three most recently opened enrolled courses.
    pub async fn recent_courses(&self) -> ApiResult<Vec<Course>> {
        self.read_delay().await;
        let mut recent = self
            .state()
            .courses
            .iter()
            .filter(|course| course.enrolled && course.last_accessed_at.is_some())
            .cloned()
            .collect::<Vec<_>>();
        recent.sort_by(|a, b| b.last_accessed_at.cmp(&a.last_accessed_at));
        recent.truncate(3);
        Ok(recent)
    }

    pub async fn enroll(&self, course_id: &str) -> ApiResult<()> {
        self.write_delay().await;
        let mut state = self.state_mut();
        let Some(course) = state.courses.iter_mut().find(|course| course.id == course_id) else {
            return Err(ApiError::UnknownCourse(course_id.to_owned()));
        };
        course.enrolled = true;
        let course_id = course.id.clone();
        if !state.user.enrolled_courses.contains(&course_id) {
            state.user.enrolled_courses.push(course_id);
        }
        Ok(())
    }

    pub async fn assignments(&self) -> ApiResult<Vec<Assignment>> {
        self.read_delay().await;
        Ok(self.state().assignments.clone())
    }

    pub async fn create_assignment(&self, draft: NewAssignment) -> ApiResult<Assignment> {
        self.write_delay().await;
        let id = self.next_assignment_id.fetch_add(1, Ordering::SeqCst);
        let assignment = Assignment {
            id: id.to_string(),
            course_id: draft.course_id,
            course_name: draft.course_name,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            status: AssignmentStatus::NotStarted,
            points: 0,
            max_points: 100,
            grade: None,
            submitted_at: None,
            feedback: None,
            rubric_scores: None,
            attachments: Vec::new(),
            resources: Vec::new(),
        };
        self.state_mut().assignments.push(assignment.clone());
        Ok(assignment)
    }

    pub async fn update_assignment(
        &self,
        assignment_id: &str,
        update: AssignmentUpdate,
    ) -> ApiResult<Assignment> {
        self.write_delay().await;
        let mut state = self.state_mut();
        let Some(assignment) = state
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == assignment_id)
        else {
            return Err(ApiError::UnknownAssignment(assignment_id.to_owned()));
        };
        if let Some(status) = update.status {
            assignment.status = status;
        }
        if let Some(submitted_at) = update.submitted_at {
            assignment.submitted_at = Some(submitted_at);
        }
        if let Some(attachments) = update.attachments {
            assignment.attachments = attachments;
        }
        Ok(assignment.clone())
    }

    pub async fn delete_assignment(&self, assignment_id: &str) -> ApiResult<()> {
        self.write_delay().await;
        let mut state = self.state_mut();
        let before = state.assignments.len();
        state
            .assignments
            .retain(|assignment| assignment.id != assignment_id);
        if state.assignments.len() == before {
            return Err(ApiError::UnknownAssignment(assignment_id.to_owned()));
        }
        Ok(())
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<User> {
        self.write_delay().await;
        let mut state = self.state_mut();
        if let Some(first_name) = update.first_name {
            state.user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            state.user.last_name = last_name;
        }
        if let Some(email) = update.email {
            state.user.email = email;
        }
        if let Some(avatar) = update.avatar {
            state.user.avatar = Some(avatar);
        }
        Ok(state.user.clone())
    }

    pub async fn update_preferences(&self, preferences: UserPreferences) -> ApiResult<User> {
        self.write_delay().await;
        let mut state = self.state_mut();
        state.user.preferences = preferences;
        Ok(state.user.clone())
    }

    pub async fn study_sessions(&self) -> ApiResult<Vec<StudySession>> {
        self.read_delay().await;
        Ok(self.state().study_sessions.clone())
    }

    pub async fn achievements(&self) -> ApiResult<Vec<Achievement>> {
        self.read_delay().await;
        Ok(self.state().achievements.clone())
    }

    pub async fn badges(&self) -> ApiResult<Vec<Badge>> {
        self.read_delay().await;
        Ok(self.state().badges.clone())
    }

    pub async fn learning_goals(&self) -> ApiResult<Vec<LearningGoal>> {
        self.read_delay().await;
        Ok(self.state().learning_goals.clone())
    }

    pub async fn weekly_stats(&self) -> ApiResult<WeeklyStats> {
        self.read_delay().await;
        Ok(self.state().weekly_stats)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use futures::executor::block_on;

    fn api() -> MockApi {
        MockApi::seeded(
            Latency::none(),
            Utc.with_ymd_and_hms(2025, 8, 23, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn seed_credentials_log_in_and_others_do_not() {
        let api = api();
        let session =
            block_on(api.login("john.doe@example.com", "password")).expect("seed login succeeds");
        assert_eq!(session.token, "mock-jwt-token");
        assert_eq!(session.user.first_name, "John");

        let rejected = block_on(api.login("john.doe@example.com", "wrong"));
        assert_eq!(rejected, Err(ApiError::InvalidCredentials));
        assert_eq!(
            ApiError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn verification_code_and_token_rules_match_the_mock() {
        let api = api();
        let session =
            block_on(api.verify_code("new@example.com", "123456")).expect("valid code verifies");
        assert_eq!(session.token, "mock-jwt-token-verified");
        assert_eq!(session.user.email, "new@example.com");

        assert_eq!(
            block_on(api.verify_code("new@example.com", "000000")),
            Err(ApiError::InvalidVerificationCode)
        );
        assert_eq!(
            block_on(api.verify_email_token("expired-token")),
            Err(ApiError::ExpiredVerificationLink)
        );
        assert!(block_on(api.verify_email_token("mock-verification-abc")).is_ok());
        assert_eq!(
            block_on(api.verify_email_token("garbage")),
            Err(ApiError::InvalidVerificationToken)
        );
    }

    #[test]
    fn recent_courses_are_the_three_most_recently_accessed() {
        let api = api();
        let recent = block_on(api.recent_courses()).expect("recent courses load");
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|course| course.enrolled));
        assert!(
            recent
                .windows(2)
                .all(|pair| pair[0].last_accessed_at >= pair[1].last_accessed_at)
        );
    }

    #[test]
    fn enrollment_moves_a_course_out_of_recommendations() {
        let api = api();
        let recommended = block_on(api.recommended_courses()).expect("recommended load");
        assert_eq!(recommended.len(), 1);
        let target = recommended[0].id.clone();

        block_on(api.enroll(&target)).expect("enroll succeeds");
        let recommended = block_on(api.recommended_courses()).expect("recommended reload");
        assert!(recommended.is_empty());
        let user = block_on(api.me()).expect("me loads");
        assert!(user.enrolled_courses.contains(&target));

        assert_eq!(
            block_on(api.enroll("999")),
            Err(ApiError::UnknownCourse("999".to_owned()))
        );
    }

    #[test]
    fn assignments_can_be_created_updated_and_deleted() {
        let api = api();
        let origin = Utc.with_ymd_and_hms(2025, 8, 23, 10, 0, 0).unwrap();
        let created = block_on(api.create_assignment(NewAssignment {
            course_id: "1".to_owned(),
            course_name: "React Fundamentals".to_owned(),
            title: "Hooks Quiz".to_owned(),
            description: String::new(),
            due_date: origin + chrono::Duration::days(14),
        }))
        .expect("create succeeds");
        assert_eq!(created.status, AssignmentStatus::NotStarted);
        assert_eq!(created.points, 0);

        let updated = block_on(api.update_assignment(
            &created.id,
            AssignmentUpdate {
                status: Some(AssignmentStatus::Submitted),
                submitted_at: Some(origin),
                attachments: Some(vec!["hooks.zip".to_owned()]),
            },
        ))
        .expect("update succeeds");
        assert_eq!(updated.status, AssignmentStatus::Submitted);
        assert_eq!(updated.attachments, vec!["hooks.zip".to_owned()]);

        block_on(api.delete_assignment(&created.id)).expect("delete succeeds");
        assert_eq!(
            block_on(api.delete_assignment(&created.id)),
            Err(ApiError::UnknownAssignment(created.id))
        );
    }

    #[test]
    fn profile_updates_stick_for_subsequent_reads() {
        let api = api();
        let updated = block_on(api.update_profile(ProfileUpdate {
            first_name: Some("Jane".to_owned()),
            ..ProfileUpdate::default()
        }))
        .expect("update succeeds");
        assert_eq!(updated.first_name, "Jane");

        let me = block_on(api.me()).expect("me loads");
        assert_eq!(me.first_name, "Jane");
    }
}
