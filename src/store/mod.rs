use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::api::{ApiResult, AssignmentUpdate, AuthSession, MockApi, NewAccount, ProfileUpdate};
use crate::model::{
    Achievement, Assignment, AssignmentStatus, Badge, Course, LearningGoal, StudySession, User,
    WeeklyStats,
};
use crate::storage::StorageBackend;

const TOKEN_KEY: &str = "token";
const SNAPSHOT_KEY: &str = "coursedesk-store";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSlice {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseSlice {
    pub courses: Vec<Course>,
    pub enrolled: Vec<Course>,
    pub recommended: Vec<Course>,
    pub recently_accessed: Vec<Course>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentSlice {
    pub assignments: Vec<Assignment>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsSlice {
    pub study_sessions: Vec<StudySession>,
    pub achievements: Vec<Achievement>,
    pub badges: Vec<Badge>,
    pub learning_goals: Vec<LearningGoal>,
    pub weekly_stats: WeeklyStats,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct StoreState {
    auth: AuthSlice,
    courses: CourseSlice,
    assignments: AssignmentSlice,
    analytics: AnalyticsSlice,
}

/// The slice of state that survives restarts: who was signed in.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSnapshot {
    user: Option<User>,
    is_authenticated: bool,
}

/// Application state for the signed-in client. One instance is constructed at
/// startup and handed to the screens that need it; construction hydrates the
/// persisted auth snapshot, `logout` tears it down. Actions sequence
/// loading -> result and record failures as state rather than returning them.
pub struct AppStore {
    api: MockApi,
    storage: Arc<dyn StorageBackend>,
    state: Arc<RwLock<StoreState>>,
}

impl AppStore {
    pub fn new(api: MockApi, storage: Arc<dyn StorageBackend>) -> Self {
        let store = Self {
            api,
            storage,
            state: Arc::new(RwLock::new(StoreState::default())),
        };
        store.hydrate();
        store
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn auth(&self) -> AuthSlice {
        self.read_state().auth.clone()
    }

    pub fn courses(&self) -> CourseSlice {
        self.read_state().courses.clone()
    }

    pub fn assignments(&self) -> AssignmentSlice {
        self.read_state().assignments.clone()
    }

    pub fn analytics(&self) -> AnalyticsSlice {
        self.read_state().analytics.clone()
    }

    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                warn!("failed to read session token: {error}");
                None
            }
        }
    }

    fn hydrate(&self) {
        let raw = match self.storage.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(error) => {
                warn!("failed to read persisted store snapshot: {error}");
                return;
            }
        };
        match serde_json::from_str::<PersistedSnapshot>(&raw) {
            Ok(snapshot) => {
                let mut state = self.write_state();
                state.auth.user = snapshot.user;
                state.auth.is_authenticated = snapshot.is_authenticated;
            }
            Err(error) => warn!("discarding unreadable store snapshot: {error}"),
        }
    }

    fn persist_snapshot(&self) {
        let snapshot = {
            let state = self.read_state();
            PersistedSnapshot {
                user: state.auth.user.clone(),
                is_authenticated: state.auth.is_authenticated,
            }
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => {
                if let Err(error) = self.storage.set(SNAPSHOT_KEY, &raw) {
                    warn!("failed to persist store snapshot: {error}");
                }
            }
            Err(error) => warn!("failed to encode store snapshot: {error}"),
        }
    }

    fn put_token(&self, token: &str) {
        if let Err(error) = self.storage.set(TOKEN_KEY, token) {
            warn!("failed to store session token: {error}");
        }
    }

    fn clear_token(&self) {
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            warn!("failed to clear session token: {error}");
        }
    }

    pub async fn login(&self, email: &str, password: &str) {
        {
            let mut state = self.write_state();
            state.auth.is_loading = true;
            state.auth.error = None;
        }
        match self.api.login(email, password).await {
            Ok(session) => {
                self.put_token(&session.token);
                {
                    let mut state = self.write_state();
                    state.auth.user = Some(session.user);
                    state.auth.is_authenticated = true;
                    state.auth.is_loading = false;
                }
                self.persist_snapshot();
                debug!("signed in as {email}");
            }
            Err(error) => {
                let mut state = self.write_state();
                state.auth.error = Some(error.to_string());
                state.auth.is_loading = false;
            }
        }
    }

    /// Registration does not sign the user in; the account still has to be
    /// verified. The session is handed back for the verification screen.
    pub async fn register(&self, account: NewAccount) -> ApiResult<AuthSession> {
        {
            let mut state = self.write_state();
            state.auth.is_loading = true;
            state.auth.error = None;
        }
        match self.api.register(account).await {
            Ok(session) => {
                self.write_state().auth.is_loading = false;
                Ok(session)
            }
            Err(error) => {
                let mut state = self.write_state();
                state.auth.error = Some(error.to_string());
                state.auth.is_loading = false;
                Err(error)
            }
        }
    }

    pub async fn verify_email(&self, email: &str, code: &str) -> ApiResult<()> {
        {
            let mut state = self.write_state();
            state.auth.is_loading = true;
            state.auth.error = None;
        }
        match self.api.verify_code(email, code).await {
            Ok(session) => {
                self.put_token(&session.token);
                {
                    let mut state = self.write_state();
                    state.auth.user = Some(session.user);
                    state.auth.is_authenticated = true;
                    state.auth.is_loading = false;
                }
                self.persist_snapshot();
                Ok(())
            }
            Err(error) => {
                {
                    let mut state = self.write_state();
                    state.auth.error = Some(error.to_string());
                    state.auth.is_loading = false;
                }
                Err(error)
            }
        }
    }

    pub fn logout(&self) {
        self.clear_token();
        {
            let mut state = self.write_state();
            state.auth.user = None;
            state.auth.is_authenticated = false;
            state.courses.courses.clear();
            state.courses.enrolled.clear();
            state.assignments.assignments.clear();
        }
        self.persist_snapshot();
        debug!("signed out");
    }

    pub async fn load_user(&self) {
        if self.token().is_none() {
            return;
        }

        self.write_state().auth.is_loading = true;
        match self.api.me().await {
            Ok(user) => {
                let mut state = self.write_state();
                state.auth.user = Some(user);
                state.auth.is_authenticated = true;
                state.auth.is_loading = false;
            }
            Err(error) => {
                self.clear_token();
                let mut state = self.write_state();
                state.auth.error = Some(error.to_string());
                state.auth.is_loading = false;
            }
        }
    }

    pub async fn update_profile(&self, update: ProfileUpdate) {
        {
            let mut state = self.write_state();
            state.auth.is_loading = true;
            state.auth.error = None;
        }
        match self.api.update_profile(update).await {
            Ok(user) => {
                {
                    let mut state = self.write_state();
                    state.auth.user = Some(user);
                    state.auth.is_loading = false;
                }
                self.persist_snapshot();
            }
            Err(error) => {
                let mut state = self.write_state();
                state.auth.error = Some(error.to_string());
                state.auth.is_loading = false;
            }
        }
    }

    pub async fn load_courses(&self) {
        {
            let mut state = self.write_state();
            state.courses.is_loading = true;
            state.courses.error = None;
        }
        match self.api.courses().await {
            Ok(courses) => {
                let mut state = self.write_state();
                state.courses.courses = courses;
                state.courses.is_loading = false;
            }
            Err(error) => {
                let mut state = self.write_state();
                state.courses.error = Some(error.to_string());
                state.courses.is_loading = false;
            }
        }
    }

    pub async fn load_enrolled_courses(&self) {
        match self.api.enrolled_courses().await {
            Ok(enrolled) => self.write_state().courses.enrolled = enrolled,
            Err(error) => self.write_state().courses.error = Some(error.to_string()),
        }
    }

    pub async fn load_recommended_courses(&self) {
        match self.api.recommended_courses().await {
            Ok(recommended) => self.write_state().courses.recommended = recommended,
            Err(error) => self.write_state().courses.error = Some(error.to_string()),
        }
    }

    pub async fn load_recently_accessed(&self) {
        match self.api.recent_courses().await {
            Ok(recent) => self.write_state().courses.recently_accessed = recent,
            Err(error) => self.write_state().courses.error = Some(error.to_string()),
        }
    }

    pub async fn enroll_in_course(&self, course_id: &str) {
        {
            let mut state = self.write_state();
            state.courses.is_loading = true;
            state.courses.error = None;
        }
        match self.api.enroll(course_id).await {
            Ok(()) => {
                self.load_enrolled_courses().await;
                self.load_recommended_courses().await;
                self.write_state().courses.is_loading = false;
            }
            Err(error) => {
                let mut state = self.write_state();
                state.courses.error = Some(error.to_string());
                state.courses.is_loading = false;
            }
        }
    }

    pub async fn load_assignments(&self) {
        {
            let mut state = self.write_state();
            state.assignments.is_loading = true;
            state.assignments.error = None;
        }
        match self.api.assignments().await {
            Ok(assignments) => {
                let mut state = self.write_state();
                state.assignments.assignments = assignments;
                state.assignments.is_loading = false;
            }
            Err(error) => {
                let mut state = self.write_state();
                state.assignments.error = Some(error.to_string());
                state.assignments.is_loading = false;
            }
        }
    }

    pub async fn submit_assignment(
        &self,
        assignment_id: &str,
        files: Vec<String>,
        now: DateTime<Utc>,
    ) {
        {
            let mut state = self.write_state();
            state.assignments.is_loading = true;
            state.assignments.error = None;
        }
        let update = AssignmentUpdate {
            status: Some(AssignmentStatus::Submitted),
            submitted_at: Some(now),
            attachments: Some(files),
        };
        match self.api.update_assignment(assignment_id, update).await {
            Ok(_) => {
                self.load_assignments().await;
                self.write_state().assignments.is_loading = false;
            }
            Err(error) => {
                let mut state = self.write_state();
                state.assignments.error = Some(error.to_string());
                state.assignments.is_loading = false;
            }
        }
    }

    pub async fn update_assignment_status(&self, assignment_id: &str, status: AssignmentStatus) {
        let update = AssignmentUpdate {
            status: Some(status),
            ..AssignmentUpdate::default()
        };
        match self.api.update_assignment(assignment_id, update).await {
            Ok(_) => {
                let mut state = self.write_state();
                for assignment in &mut state.assignments.assignments {
                    if assignment.id == assignment_id {
                        assignment.status = status;
                    }
                }
            }
            Err(error) => self.write_state().assignments.error = Some(error.to_string()),
        }
    }

    pub async fn load_analytics(&self) {
        self.load_study_sessions().await;
        self.load_achievements().await;
        self.load_badges().await;
        self.load_learning_goals().await;
        self.load_weekly_stats().await;
    }

    pub async fn load_study_sessions(&self) {
        match self.api.study_sessions().await {
            Ok(sessions) => self.write_state().analytics.study_sessions = sessions,
            Err(error) => self.write_state().analytics.error = Some(error.to_string()),
        }
    }

    pub async fn load_achievements(&self) {
        match self.api.achievements().await {
            Ok(achievements) => self.write_state().analytics.achievements = achievements,
            Err(error) => self.write_state().analytics.error = Some(error.to_string()),
        }
    }

    pub async fn load_badges(&self) {
        match self.api.badges().await {
            Ok(badges) => self.write_state().analytics.badges = badges,
            Err(error) => self.write_state().analytics.error = Some(error.to_string()),
        }
    }

    pub async fn load_learning_goals(&self) {
        match self.api.learning_goals().await {
            Ok(goals) => self.write_state().analytics.learning_goals = goals,
            Err(error) => self.write_state().analytics.error = Some(error.to_string()),
        }
    }

    pub async fn load_weekly_stats(&self) {
        match self.api.weekly_stats().await {
            Ok(stats) => self.write_state().analytics.weekly_stats = stats,
            Err(error) => self.write_state().analytics.error = Some(error.to_string()),
        }
    }
}
