/// Emoji tier for a mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoodIndicator {
    Ecstatic,
    Happy,
    Good,
    Neutral,
    Low,
    Bad,
    Unknown,
}

impl MoodIndicator {
    /// Thresholds are inclusive and checked from the top down.
    pub(crate) fn from_value(score: f64) -> Self {
        if score >= 10.0 {
            MoodIndicator::Ecstatic
        } else if score >= 8.0 {
            MoodIndicator::Happy
        } else if score >= 6.0 {
            MoodIndicator::Good
        } else if score >= 4.0 {
            MoodIndicator::Neutral
        } else if score >= 2.0 {
            MoodIndicator::Low
        } else {
            MoodIndicator::Bad
        }
    }

    /// Unparseable scores map to `Unknown`.
    pub(crate) fn from_score(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(Self::from_value)
            .unwrap_or(MoodIndicator::Unknown)
    }

    pub(crate) fn emoji(self) -> &'static str {
        match self {
            MoodIndicator::Ecstatic => ":star-struck:",
            MoodIndicator::Happy => ":grinning:",
            MoodIndicator::Good => ":slightly_smiling_face:",
            MoodIndicator::Neutral => ":neutral_face:",
            MoodIndicator::Low => ":slightly_frowning_face:",
            MoodIndicator::Bad => ":disappointed:",
            MoodIndicator::Unknown => ":grey_question:",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(MoodIndicator::from_score("10"), MoodIndicator::Ecstatic);
        assert_eq!(MoodIndicator::from_score("8"), MoodIndicator::Happy);
        assert_eq!(MoodIndicator::from_score("6"), MoodIndicator::Good);
        assert_eq!(MoodIndicator::from_score("4"), MoodIndicator::Neutral);
        assert_eq!(MoodIndicator::from_score("2"), MoodIndicator::Low);
    }

    #[test]
    fn values_just_below_thresholds_drop_a_tier() {
        assert_eq!(MoodIndicator::from_value(9.99), MoodIndicator::Happy);
        assert_eq!(MoodIndicator::from_value(7.99), MoodIndicator::Good);
        assert_eq!(MoodIndicator::from_value(5.99), MoodIndicator::Neutral);
        assert_eq!(MoodIndicator::from_value(3.99), MoodIndicator::Low);
        assert_eq!(MoodIndicator::from_value(1.99), MoodIndicator::Bad);
    }

    #[test]
    fn extremes() {
        assert_eq!(MoodIndicator::from_score("11"), MoodIndicator::Ecstatic);
        assert_eq!(MoodIndicator::from_score("-3"), MoodIndicator::Bad);
        assert_eq!(MoodIndicator::from_score("0"), MoodIndicator::Bad);
        assert_eq!(MoodIndicator::from_score("inf"), MoodIndicator::Ecstatic);
        assert_eq!(MoodIndicator::from_score("NaN"), MoodIndicator::Bad);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(MoodIndicator::from_score(" 7.5 \n"), MoodIndicator::Good);
    }

    #[test]
    fn unparseable_is_unknown() {
        assert_eq!(MoodIndicator::from_score(""), MoodIndicator::Unknown);
        assert_eq!(MoodIndicator::from_score("great"), MoodIndicator::Unknown);
        assert_eq!(MoodIndicator::from_score("7,5"), MoodIndicator::Unknown);
    }

    #[test]
    fn seven_distinct_emoji() {
        let all = [
            MoodIndicator::Ecstatic,
            MoodIndicator::Happy,
            MoodIndicator::Good,
            MoodIndicator::Neutral,
            MoodIndicator::Low,
            MoodIndicator::Bad,
            MoodIndicator::Unknown,
        ];
        let mut emoji: Vec<_> = all.iter().map(|m| m.emoji()).collect();
        emoji.sort_unstable();
        emoji.dedup();
        assert_eq!(emoji.len(), 7);
        assert_eq!(MoodIndicator::Good.emoji(), ":slightly_smiling_face:");
        assert_eq!(MoodIndicator::Unknown.emoji(), ":grey_question:");
    }
}
