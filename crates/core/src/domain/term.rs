use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn number(self) -> i16 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }

    pub fn from_number(number: i16) -> Result<Self, DomainError> {
        match number {
            1 => Ok(Semester::First),
            2 => Ok(Semester::Second),
            _ => Err(DomainError::InvalidSemester(number.to_string())),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semester {}", self.number())
    }
}

/// Accepts `1`, `2`, `Semester 1` and `Semester 2`, case-insensitively.
impl FromStr for Semester {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let digits = normalized
            .strip_prefix("semester")
            .map(str::trim)
            .unwrap_or(normalized.as_str());

        match digits {
            "1" => Ok(Semester::First),
            "2" => Ok(Semester::Second),
            _ => Err(DomainError::InvalidSemester(s.to_string())),
        }
    }
}

/// An academic calendar year such as `2024/2025`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AcademicYear(String);

impl AcademicYear {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        let parsed = trimmed
            .split_once('/')
            .and_then(|(start, end)| Some((parse_year(start)?, parse_year(end)?)));

        match parsed {
            Some((start, end)) if end == start + 1 => Ok(Self(trimmed.to_string())),
            _ => Err(DomainError::InvalidAcademicYear(value)),
        }
    }

    pub fn starting(year: i32) -> Self {
        Self(format!("{}/{}", year, year + 1))
    }

    pub fn start_year(&self) -> i32 {
        self.0
            .split_once('/')
            .and_then(|(start, _)| parse_year(start))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_year(value: &str) -> Option<i32> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        value.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AcademicYear {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A registration period. Credit ceilings and registration uniqueness are
/// scoped to one term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub academic_year: AcademicYear,
    pub semester: Semester,
}

impl Term {
    pub fn new(academic_year: AcademicYear, semester: Semester) -> Self {
        Self {
            academic_year,
            semester,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.academic_year, self.semester)
    }
}

/// Level of a course in the curriculum, `First Year` through `Fifth Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearOfStudy(u8);

impl YearOfStudy {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const FIRST: Self = Self(1);
    pub const SECOND: Self = Self(2);
    pub const THIRD: Self = Self(3);
    pub const FOURTH: Self = Self(4);

    const LABELS: [&'static str; 5] = [
        "First Year",
        "Second Year",
        "Third Year",
        "Fourth Year",
        "Fifth Year",
    ];

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidYearOfStudy(value.to_string()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for YearOfStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for YearOfStudy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Self::new(value);
        }

        Self::LABELS
            .iter()
            .position(|label| label.eq_ignore_ascii_case(trimmed))
            .map(|index| Self(index as u8 + 1))
            .ok_or_else(|| DomainError::InvalidYearOfStudy(s.to_string()))
    }
}
