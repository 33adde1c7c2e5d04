use crate::score::{label_for_score, parse_attribute, progress_percent};

/// A card element that carries a score and shows it as a badge.
pub trait ScoreCard {
    fn score_attribute(&self) -> Option<String>;
    fn set_badge(&self, text: &str);
    /// Returns `false` when the card has no progress bar.
    fn set_progress_width(&self, percent: f64) -> bool;
}

pub fn decorate_card(card: &impl ScoreCard) {
    let score = parse_attribute(card.score_attribute().as_deref());
    card.set_badge(label_for_score(score));
    card.set_progress_width(progress_percent(score));
}

/// Decorates every card, returning how many were touched.
pub fn decorate_cards<C: ScoreCard>(cards: impl IntoIterator<Item = C>) -> usize {
    cards.into_iter().fold(0, |seen, card| {
        decorate_card(&card);
        seen + 1
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{decorate_cards, ScoreCard};

    struct FakeCard {
        score: Option<&'static str>,
        has_progress: bool,
        badge: RefCell<Option<String>>,
        width: RefCell<Option<f64>>,
    }

    impl FakeCard {
        fn new(score: Option<&'static str>, has_progress: bool) -> Self {
            Self {
                score,
                has_progress,
                badge: RefCell::new(None),
                width: RefCell::new(None),
            }
        }
    }

    impl ScoreCard for &FakeCard {
        fn score_attribute(&self) -> Option<String> {
            self.score.map(str::to_string)
        }

        fn set_badge(&self, text: &str) {
            *self.badge.borrow_mut() = Some(text.to_string());
        }

        fn set_progress_width(&self, percent: f64) -> bool {
            if self.has_progress {
                *self.width.borrow_mut() = Some(percent);
            }
            self.has_progress
        }
    }

    #[test]
    fn badges_follow_scores() {
        let cards = [
            FakeCard::new(Some("9.4"), false),
            FakeCard::new(Some("7"), false),
            FakeCard::new(Some("abc"), false),
            FakeCard::new(None, false),
        ];

        assert_eq!(decorate_cards(cards.iter()), 4);

        let badges = cards
            .iter()
            .map(|card| card.badge.borrow().clone().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(badges, ["топ", "выше среднего", "низкий", "низкий"]);
    }

    #[test]
    fn progress_bar_width_is_set_only_where_present() {
        let with_bar = FakeCard::new(Some("12"), true);
        let without_bar = FakeCard::new(Some("6"), false);

        decorate_cards([&with_bar, &without_bar]);

        assert_eq!(*with_bar.width.borrow(), Some(100.0));
        assert_eq!(*without_bar.width.borrow(), None);
        assert_eq!(without_bar.badge.borrow().as_deref(), Some("средний"));
    }

    #[test]
    fn no_cards_is_a_no_op() {
        assert_eq!(decorate_cards(Vec::<&FakeCard>::new()), 0);
    }
}
