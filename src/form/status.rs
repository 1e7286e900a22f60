use std::fmt;

/// Lifecycle state of the current form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionStatus {
    /// Idle and editable.
    #[default]
    Default,
    /// A submit handler is running.
    Pending,
    /// The last submit handler resolved.
    Success,
    /// The last submit handler rejected.
    Error,
}

impl SubmissionStatus {
    /// Returns `true` while a submission is in flight.
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    /// Returns `true` when fields and the submit control accept input.
    pub fn is_interactive(self) -> bool {
        self == Self::Default
    }

    /// Returns `true` when a new submission may start from this state.
    pub fn can_begin(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Default,
        SubmissionStatus::Pending,
        SubmissionStatus::Success,
        SubmissionStatus::Error,
    ];

    #[test]
    fn default_is_default() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Default);
    }

    #[test]
    fn only_default_is_interactive() {
        for status in ALL {
            assert_eq!(
                status.is_interactive(),
                status == SubmissionStatus::Default,
                "{status:?}"
            );
        }
    }

    #[test]
    fn every_state_but_pending_can_begin() {
        for status in ALL {
            assert_eq!(status.can_begin(), !status.is_pending(), "{status:?}");
        }
    }

    #[test]
    fn display_is_lowercase() {
        let rendered: Vec<String> = ALL.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["default", "pending", "success", "error"]);
    }
}
