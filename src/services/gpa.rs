use serde::Serialize;

use crate::db::types::GradeLetter;

/// One graded course as far as the GPA is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CreditedGrade {
    pub(crate) letter: GradeLetter,
    pub(crate) credits: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct TranscriptSummary {
    pub(crate) gpa: f64,
    pub(crate) total_credits: i64,
    pub(crate) graded_courses: usize,
}

pub(crate) fn grade_points(letter: GradeLetter) -> i64 {
    match letter {
        GradeLetter::A => 4,
        GradeLetter::B => 3,
        GradeLetter::C => 2,
        GradeLetter::D => 1,
        GradeLetter::E => 0,
    }
}

/// Credit-weighted mean of grade points, rounded to two decimals. An empty record set or a
/// non-positive credit sum is 0.0 rather than an error.
pub(crate) fn gpa(records: &[CreditedGrade]) -> f64 {
    let (weighted, credits) = records.iter().fold((0_i64, 0_i64), |(weighted, credits), record| {
        let record_credits = i64::from(record.credits);
        (weighted + grade_points(record.letter) * record_credits, credits + record_credits)
    });
    if credits <= 0 {
        return 0.0;
    }
    round2(weighted as f64 / credits as f64)
}

pub(crate) fn total_credits(records: &[CreditedGrade]) -> i64 {
    records.iter().map(|record| i64::from(record.credits)).sum()
}

pub(crate) fn summarize(records: &[CreditedGrade]) -> TranscriptSummary {
    TranscriptSummary {
        gpa: gpa(records),
        total_credits: total_credits(records),
        graded_courses: records.len(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
