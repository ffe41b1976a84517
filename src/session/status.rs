/// Status definitions for the client's view of a scraping job
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the lifecycle status of a scraping session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No job requested
    #[default]
    Idle,

    /// Start request sent, not yet acknowledged
    Starting,

    /// Backend acknowledged the job
    Running,

    // ===== Terminal States =====
    /// Job halted on request
    Stopped,

    /// Start failed or the backend reported a failure
    Error,

    /// Job finished on its own
    Done,
}

impl SessionStatus {
    /// Returns true while a job is requested or running
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }

    /// Returns true for statuses only `reset` leaves
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Error | Self::Done)
    }

    /// Whether `next` follows `self` on the forward path
    ///
    /// `idle → starting → running → {stopped, error, done}`, plus
    /// `starting → error` for a failed start. Staying put is allowed.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Idle, Self::Starting)
                | (Self::Starting, Self::Running)
                | (Self::Starting, Self::Error)
                | (Self::Running, Self::Stopped)
                | (Self::Running, Self::Error)
                | (Self::Running, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Error => "error",
            Self::Done => "done",
        }
    }

    /// Maps a status string reported by the backend
    ///
    /// The backend speaks its own vocabulary (`pending`, `completed`,
    /// `failed`, ...). Returns None for anything unrecognised.
    pub fn from_backend(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(Self::Idle),
            "pending" | "started" | "starting" => Some(Self::Starting),
            "running" => Some(Self::Running),
            "stopped" => Some(Self::Stopped),
            "completed" | "done" => Some(Self::Done),
            "failed" | "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> Vec<Self> {
        vec![
            Self::Idle,
            Self::Starting,
            Self::Running,
            Self::Stopped,
            Self::Error,
            Self::Done,
        ]
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(SessionStatus::Starting.is_active());
        assert!(SessionStatus::Running.is_active());

        assert!(!SessionStatus::Idle.is_active());
        assert!(!SessionStatus::Stopped.is_active());
        assert!(!SessionStatus::Error.is_active());
        assert!(!SessionStatus::Done.is_active());
    }

    #[test]
    fn test_is_terminal() {
        assert!(SessionStatus::Stopped.is_terminal());
        assert!(SessionStatus::Error.is_terminal());
        assert!(SessionStatus::Done.is_terminal());

        assert!(!SessionStatus::Idle.is_terminal());
        assert!(!SessionStatus::Running.is_terminal());
    }

    #[test]
    fn test_forward_path() {
        use SessionStatus::*;

        assert!(Idle.can_transition_to(Starting));
        assert!(Starting.can_transition_to(Running));
        assert!(Starting.can_transition_to(Error));
        assert!(Running.can_transition_to(Stopped));
        assert!(Running.can_transition_to(Error));
        assert!(Running.can_transition_to(Done));

        assert!(!Idle.can_transition_to(Running));
        assert!(!Done.can_transition_to(Running));
        assert!(!Stopped.can_transition_to(Starting));
        assert!(!Running.can_transition_to(Idle));
    }

    #[test]
    fn test_from_backend() {
        assert_eq!(SessionStatus::from_backend("idle"), Some(SessionStatus::Idle));
        assert_eq!(SessionStatus::from_backend("pending"), Some(SessionStatus::Starting));
        assert_eq!(SessionStatus::from_backend("started"), Some(SessionStatus::Starting));
        assert_eq!(SessionStatus::from_backend("Running"), Some(SessionStatus::Running));
        assert_eq!(SessionStatus::from_backend("stopped"), Some(SessionStatus::Stopped));
        assert_eq!(SessionStatus::from_backend("completed"), Some(SessionStatus::Done));
        assert_eq!(SessionStatus::from_backend("failed"), Some(SessionStatus::Error));
        assert_eq!(SessionStatus::from_backend("paused"), None);
    }

    #[test]
    fn test_own_names_map_back() {
        for status in SessionStatus::all_statuses() {
            assert_eq!(SessionStatus::from_backend(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SessionStatus::Running).unwrap(), "\"running\"");
        let parsed: SessionStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, SessionStatus::Done);
        assert_eq!(format!("{}", SessionStatus::Stopped), "stopped");
    }
}
