use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30 * 60);
const DEFAULT_WARNING_LEAD: Duration = Duration::from_secs(5 * 60);
// Activity bursts (mouse moves, key repeats) within this window count once.
const ACTIVITY_COALESCE: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionPhase {
    Active,
    Warning { remaining: Duration },
    Expired,
}

/// Inactivity tracker for the signed-in session. The caller feeds it activity
/// and polls it from whatever clock drives the UI; when it reports `Expired`
/// the caller logs the user out.
#[derive(Clone, Copy, Debug)]
pub struct SessionTimeout {
    timeout: Duration,
    warning_lead: Duration,
    last_activity: Instant,
}

impl SessionTimeout {
    pub fn new(now: Instant) -> Self {
        Self::with_durations(now, DEFAULT_TIMEOUT, DEFAULT_WARNING_LEAD)
    }

    pub fn with_durations(now: Instant, timeout: Duration, warning_lead: Duration) -> Self {
        Self {
            timeout,
            warning_lead: warning_lead.min(timeout),
            last_activity: now,
        }
    }

    /// Rearms the timers. Returns false when the event was coalesced into the
    /// previous one and nothing changed.
    pub fn record_activity(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_activity) <= ACTIVITY_COALESCE {
            return false;
        }
        self.last_activity = now;
        true
    }

    pub fn poll(&self, now: Instant) -> SessionPhase {
        let idle = now.duration_since(self.last_activity);
        if idle >= self.timeout {
            return SessionPhase::Expired;
        }
        let warning_at = self.timeout - self.warning_lead;
        if idle >= warning_at {
            return SessionPhase::Warning {
                remaining: self.timeout - idle,
            };
        }
        SessionPhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_idle_time() {
        let start = Instant::now();
        let session = SessionTimeout::with_durations(
            start,
            Duration::from_secs(60),
            Duration::from_secs(10),
        );

        assert_eq!(session.poll(start), SessionPhase::Active);
        assert_eq!(
            session.poll(start + Duration::from_secs(49)),
            SessionPhase::Active
        );
        assert_eq!(
            session.poll(start + Duration::from_secs(55)),
            SessionPhase::Warning {
                remaining: Duration::from_secs(5)
            }
        );
        assert_eq!(
            session.poll(start + Duration::from_secs(60)),
            SessionPhase::Expired
        );
        assert_eq!(
            session.poll(start + Duration::from_secs(90)),
            SessionPhase::Expired
        );
    }

    #[test]
    fn activity_rearms_the_timers() {
        let start = Instant::now();
        let mut session = SessionTimeout::with_durations(
            start,
            Duration::from_secs(60),
            Duration::from_secs(10),
        );

        assert!(session.record_activity(start + Duration::from_secs(55)));
        assert_eq!(
            session.poll(start + Duration::from_secs(60)),
            SessionPhase::Active
        );
        assert_eq!(
            session.poll(start + Duration::from_secs(115)),
            SessionPhase::Expired
        );
    }

    #[test]
    fn sub_second_bursts_coalesce() {
        let start = Instant::now();
        let mut session = SessionTimeout::new(start);

        assert!(!session.record_activity(start + Duration::from_millis(400)));
        assert!(!session.record_activity(start + Duration::from_millis(900)));
        assert!(session.record_activity(start + Duration::from_secs(2)));
    }

    #[test]
    fn warning_lead_is_clamped_to_the_timeout() {
        let start = Instant::now();
        let session = SessionTimeout::with_durations(
            start,
            Duration::from_secs(10),
            Duration::from_secs(60),
        );
        assert!(matches!(
            session.poll(start + Duration::from_secs(1)),
            SessionPhase::Warning { .. }
        ));
    }
}
