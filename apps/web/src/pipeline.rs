#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Search,
    Scoring,
    Aggregation,
    Card,
}

impl Step {
    pub const ALL: [Self; 4] = [Self::Search, Self::Scoring, Self::Aggregation, Self::Card];

    /// Value of the node's `data-step` attribute.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Scoring => "scoring",
            Self::Aggregation => "aggregation",
            Self::Card => "card",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "search" => Some(Self::Search),
            "scoring" => Some(Self::Scoring),
            "aggregation" => Some(Self::Aggregation),
            "card" => Some(Self::Card),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Active,
    Done,
    Error,
}

impl StepState {
    /// Value written to the node's `data-state` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

pub const HINT_SEARCHING: &str = "Ищем источники и факты через web-search...";
pub const HINT_CARD_EXISTS: &str = "Карточка уже готова, открываем...";
pub const HINT_SCORED: &str = "Расчёт индекса завершён, формируем карточку";
pub const HINT_FAILED: &str = "Не удалось завершить расчёт";

pub const ALERT_ANALYSIS_FAILED: &str = "Ошибка анализа";
pub const ALERT_NETWORK_FAILED: &str = "Ошибка сети или сервера";

/// State of every step right after a reset: the first one is running.
pub fn initial_states() -> [(Step, StepState); 4] {
    Step::ALL.map(|step| {
        let state = if step == Step::Search {
            StepState::Active
        } else {
            StepState::Pending
        };
        (step, state)
    })
}

/// Steps completed one after another once a reply arrives, with their delay
/// in multiples of the stagger interval.
pub const STAGGERED_COMPLETION: [(Step, u32); 3] =
    [(Step::Scoring, 1), (Step::Aggregation, 2), (Step::Card, 3)];

#[cfg(test)]
mod tests {
    use super::{initial_states, Step, StepState};

    #[test]
    fn reset_activates_only_the_first_step() {
        let states = initial_states();
        assert_eq!(states[0], (Step::Search, StepState::Active));
        assert!(states[1..]
            .iter()
            .all(|(_, state)| *state == StepState::Pending));
    }

    #[test]
    fn step_keys_parse_back() {
        for step in Step::ALL {
            assert_eq!(Step::parse(step.key()), Some(step));
        }
        assert_eq!(Step::parse(" Scoring "), Some(Step::Scoring));
        assert_eq!(Step::parse("publish"), None);
    }
}
