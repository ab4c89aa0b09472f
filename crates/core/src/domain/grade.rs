use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
}

impl LetterGrade {
    /// Inclusive lower bounds of each letter, highest first.
    const THRESHOLDS: [(f64, LetterGrade); 10] = [
        (90.0, LetterGrade::APlus),
        (85.0, LetterGrade::A),
        (80.0, LetterGrade::AMinus),
        (75.0, LetterGrade::BPlus),
        (70.0, LetterGrade::B),
        (65.0, LetterGrade::BMinus),
        (60.0, LetterGrade::CPlus),
        (55.0, LetterGrade::C),
        (50.0, LetterGrade::CMinus),
        (45.0, LetterGrade::D),
    ];

    const ALL: [LetterGrade; 11] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Maps a total out of 100 to its letter.
    pub fn from_total(total: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(lower, _)| total >= *lower)
            .map(|(_, letter)| *letter)
            .unwrap_or(LetterGrade::F)
    }

    pub fn grade_point(self) -> f64 {
        match self {
            LetterGrade::APlus | LetterGrade::A => 4.0,
            LetterGrade::AMinus => 3.7,
            LetterGrade::BPlus => 3.3,
            LetterGrade::B => 3.0,
            LetterGrade::BMinus => 2.7,
            LetterGrade::CPlus => 2.3,
            LetterGrade::C => 2.0,
            LetterGrade::CMinus => 1.7,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|letter| letter.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownLetterGrade(s.to_string()))
    }
}

/// Grade point for a stored letter, `None` when the letter is not recognized.
pub fn grade_point_for(letter: &str) -> Option<f64> {
    letter.parse::<LetterGrade>().ok().map(LetterGrade::grade_point)
}

/// Renders a grade point the way transcripts show it: `4.0`, or `N/A`.
pub fn display_grade_point(point: Option<f64>) -> String {
    match point {
        Some(point) => format!("{point:.1}"),
        None => "N/A".to_string(),
    }
}
