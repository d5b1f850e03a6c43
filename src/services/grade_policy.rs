use crate::db::types::GradeLetter;

/// Inclusive lower bounds, checked top-down.
const THRESHOLDS: [(f64, GradeLetter); 4] = [
    (85.0, GradeLetter::A),
    (70.0, GradeLetter::B),
    (55.0, GradeLetter::C),
    (40.0, GradeLetter::D),
];

/// Derives the letter for a numeric score. Total: anything that does not reach the lowest
/// threshold (including NaN and negative scores) is an E.
pub(crate) fn letter_of(score: f64) -> GradeLetter {
    THRESHOLDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map(|(_, letter)| *letter)
        .unwrap_or(GradeLetter::E)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        let cases = [
            (85.0, GradeLetter::A),
            (84.99, GradeLetter::B),
            (70.0, GradeLetter::B),
            (69.0, GradeLetter::C),
            (55.0, GradeLetter::C),
            (54.0, GradeLetter::D),
            (40.0, GradeLetter::D),
            (39.0, GradeLetter::E),
            (0.0, GradeLetter::E),
            (100.0, GradeLetter::A),
        ];
        for (score, expected) in cases {
            assert_eq!(letter_of(score), expected, "score {score}");
        }
    }

    #[test]
    fn out_of_range_inputs_do_not_panic() {
        assert_eq!(letter_of(f64::NAN), GradeLetter::E);
        assert_eq!(letter_of(-5.0), GradeLetter::E);
        assert_eq!(letter_of(140.0), GradeLetter::A);
    }

    #[test]
    fn higher_score_never_yields_lower_letter() {
        // GradeLetter orders A < B < ... < E, so "better" is smaller.
        let mut previous = letter_of(0.0);
        for step in 1..=1000 {
            let current = letter_of(f64::from(step) / 10.0);
            assert!(current <= previous, "{current:?} after {previous:?} at {step}");
            previous = current;
        }
    }
}
