//! Closed set of screen states and their pure rendering.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Locating,
    Loading,
    /// At least one place is shown.
    Results(usize),
    /// The search succeeded but found nothing.
    Empty,
    Failed {
        message: String,
        /// `true` when a retry of the same query is offered.
        retryable: bool,
    },
}

impl ViewState {
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Results(count)
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Locating | Self::Loading)
    }
}

/// Status text for a state. Pure: no rendering surface needed.
#[must_use]
pub fn status_line(state: &ViewState) -> String {
    match state {
        ViewState::Idle => "Ready to search".to_owned(),
        ViewState::Locating => "Getting your location…".to_owned(),
        ViewState::Loading => "Searching nearby places…".to_owned(),
        ViewState::Results(count) => format!("{count} found"),
        ViewState::Empty => "No places found nearby".to_owned(),
        ViewState::Failed {
            message,
            retryable: true,
        } => format!("{message} (type `retry` to try again)"),
        ViewState::Failed { message, .. } => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_reads_n_found() {
        assert_eq!(status_line(&ViewState::Results(3)), "3 found");
    }

    #[test]
    fn zero_places_is_the_empty_state() {
        assert_eq!(ViewState::for_count(0), ViewState::Empty);
        assert_eq!(ViewState::for_count(2), ViewState::Results(2));
        assert_eq!(status_line(&ViewState::Empty), "No places found nearby");
    }

    #[test]
    fn retryable_failure_offers_retry() {
        let state = ViewState::Failed {
            message: "Could not load places".to_owned(),
            retryable: true,
        };
        assert!(status_line(&state).contains("retry"));

        let state = ViewState::Failed {
            message: "Location blocked".to_owned(),
            retryable: false,
        };
        assert_eq!(status_line(&state), "Location blocked");
    }

    #[test]
    fn busy_states() {
        assert!(ViewState::Locating.is_busy());
        assert!(ViewState::Loading.is_busy());
        assert!(!ViewState::Empty.is_busy());
    }
}
