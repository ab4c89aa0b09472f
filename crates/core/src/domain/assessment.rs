use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// The fixed, fully weighted set of assessments. Maximum scores sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssessmentKind {
    FinalExam,
    MidExam,
    Lab,
    Quiz,
}

impl AssessmentKind {
    pub const ALL: [AssessmentKind; 4] = [
        AssessmentKind::FinalExam,
        AssessmentKind::MidExam,
        AssessmentKind::Lab,
        AssessmentKind::Quiz,
    ];

    pub fn max_score(self) -> f64 {
        match self {
            AssessmentKind::FinalExam => 50.0,
            AssessmentKind::MidExam => 20.0,
            AssessmentKind::Lab => 20.0,
            AssessmentKind::Quiz => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentKind::FinalExam => "FINAL_EXAM",
            AssessmentKind::MidExam => "MID_EXAM",
            AssessmentKind::Lab => "LAB",
            AssessmentKind::Quiz => "QUIZ",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AssessmentKind::FinalExam => "FINAL EXAM",
            AssessmentKind::MidExam => "MID EXAM",
            AssessmentKind::Lab => "LAB",
            AssessmentKind::Quiz => "QUIZ",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownAssessmentKind(s.to_string()))
    }
}

/// Scores entered for one student in one course. Kinds that were never
/// entered are absent and do not count towards the total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentSheet {
    scores: BTreeMap<AssessmentKind, f64>,
}

impl AssessmentSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: AssessmentKind, value: f64) -> Result<(), DomainError> {
        let max = kind.max_score();
        if !value.is_finite() || !(0.0..=max).contains(&value) {
            return Err(DomainError::InvalidScore { kind, value, max });
        }

        self.scores.insert(kind, value);
        Ok(())
    }

    pub fn with(mut self, kind: AssessmentKind, value: f64) -> Result<Self, DomainError> {
        self.record(kind, value)?;
        Ok(self)
    }

    pub fn get(&self, kind: AssessmentKind) -> Option<f64> {
        self.scores.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssessmentKind, f64)> + '_ {
        self.scores.iter().map(|(kind, value)| (*kind, *value))
    }

    /// Sum of the entered scores, rounded to hundredths so a total that is
    /// exactly on a letter threshold in decimal is not read as just below it.
    pub fn total(&self) -> f64 {
        let sum: f64 = self.scores.values().sum();
        (sum * 100.0).round() / 100.0
    }

    /// Free-text summary stored next to a submitted grade.
    pub fn comments(&self) -> String {
        let total = self.total();
        let breakdown: String = self
            .iter()
            .map(|(kind, value)| format!("{}: {}; ", kind.label(), value))
            .collect();

        let remark = if total >= 90.0 {
            "Excellent performance!"
        } else if total >= 80.0 {
            "Very good performance."
        } else if total >= 70.0 {
            "Good performance."
        } else if total >= 60.0 {
            "Satisfactory performance."
        } else {
            "Needs improvement."
        };

        format!("Total Score: {total:.1}\nAssessments: {breakdown}\n{remark}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LetterGrade;

    #[test]
    fn max_scores_sum_to_one_hundred() {
        let total: f64 = AssessmentKind::ALL.iter().map(|k| k.max_score()).sum();

        assert_eq!(total, 100.0);
    }

    #[test]
    fn kind_parses_wire_names() {
        assert_eq!("FINAL_EXAM".parse::<AssessmentKind>(), Ok(AssessmentKind::FinalExam));
        assert_eq!("mid exam".parse::<AssessmentKind>(), Ok(AssessmentKind::MidExam));
        assert_eq!(
            "PROJECT".parse::<AssessmentKind>(),
            Err(DomainError::UnknownAssessmentKind("PROJECT".to_string()))
        );
    }

    #[test]
    fn missing_assessments_are_excluded_from_total() {
        let sheet = AssessmentSheet::new()
            .with(AssessmentKind::FinalExam, 40.0)
            .and_then(|s| s.with(AssessmentKind::Quiz, 8.5))
            .expect("scores are within range");

        assert_eq!(sheet.total(), 48.5);
        assert_eq!(sheet.get(AssessmentKind::Lab), None);
    }

    #[test]
    fn decimal_scores_on_a_threshold_total_exactly() {
        let sheet = AssessmentSheet::new()
            .with(AssessmentKind::FinalExam, 16.2)
            .and_then(|s| s.with(AssessmentKind::MidExam, 18.9))
            .and_then(|s| s.with(AssessmentKind::Quiz, 9.9))
            .expect("scores are within range");

        assert_eq!(sheet.total(), 45.0);
        assert_eq!(LetterGrade::from_total(sheet.total()), LetterGrade::D);
        assert!(sheet.comments().starts_with("Total Score: 45.0\n"));
    }

    #[test]
    fn hundredths_are_kept_below_a_threshold() {
        let sheet = AssessmentSheet::new()
            .with(AssessmentKind::FinalExam, 40.0)
            .and_then(|s| s.with(AssessmentKind::MidExam, 4.99))
            .expect("scores are within range");

        assert_eq!(sheet.total(), 44.99);
        assert_eq!(LetterGrade::from_total(sheet.total()), LetterGrade::F);
    }

    #[test]
    fn score_above_maximum_is_rejected() {
        let err = AssessmentSheet::new()
            .with(AssessmentKind::Quiz, 10.5)
            .expect_err("quiz is out of 10");

        assert_eq!(err.to_string(), "invalid QUIZ score: 10.5. score must be in [0, 10]");
    }

    #[test]
    fn negative_score_is_rejected() {
        assert!(AssessmentSheet::new().with(AssessmentKind::Lab, -1.0).is_err());
    }

    #[test]
    fn comments_include_breakdown_and_remark() {
        let sheet = AssessmentSheet::new()
            .with(AssessmentKind::FinalExam, 45.0)
            .and_then(|s| s.with(AssessmentKind::MidExam, 18.0))
            .and_then(|s| s.with(AssessmentKind::Lab, 19.0))
            .and_then(|s| s.with(AssessmentKind::Quiz, 9.0))
            .expect("scores are within range");

        let comments = sheet.comments();

        assert!(comments.starts_with("Total Score: 91.0\n"));
        assert!(comments.contains("FINAL EXAM: 45; "));
        assert!(comments.ends_with("Excellent performance!"));
    }
}
