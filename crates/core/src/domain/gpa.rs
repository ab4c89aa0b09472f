use std::fmt;

use super::{CreditHours, LetterGrade};

/// How grade points are combined. The registrar has always used a plain
/// average; credit weighting is available but must be opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpaPolicy {
    #[default]
    Unweighted,
    CreditWeighted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradedCourse {
    pub letter: LetterGrade,
    pub credit_hours: CreditHours,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Gpa(f64);

impl Gpa {
    /// `None` when nothing has been graded yet.
    pub fn compute(
        policy: GpaPolicy,
        courses: impl IntoIterator<Item = GradedCourse>,
    ) -> Option<Self> {
        let (points, weight) = courses
            .into_iter()
            .map(|course| match policy {
                GpaPolicy::Unweighted => (course.letter.grade_point(), 1.0),
                GpaPolicy::CreditWeighted => {
                    let hours = f64::from(course.credit_hours.value());
                    (course.letter.grade_point() * hours, hours)
                }
            })
            .fold((0.0, 0.0), |(points, weight), (p, w)| (points + p, weight + w));

        (weight > 0.0).then(|| Self(points / weight))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub fn display_gpa(gpa: Option<Gpa>) -> String {
    gpa.map(|gpa| gpa.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(letter: LetterGrade, hours: i64) -> GradedCourse {
        GradedCourse {
            letter,
            credit_hours: CreditHours::new(hours).expect("valid hours"),
        }
    }

    #[test]
    fn empty_transcript_has_no_gpa() {
        let gpa = Gpa::compute(GpaPolicy::Unweighted, []);

        assert_eq!(gpa, None);
        assert_eq!(display_gpa(gpa), "N/A");
    }

    #[test]
    fn unweighted_gpa_is_plain_average() {
        let gpa = Gpa::compute(
            GpaPolicy::Unweighted,
            [course(LetterGrade::A, 5), course(LetterGrade::B, 3)],
        )
        .expect("graded courses exist");

        assert_eq!(gpa.value(), 3.5);
        assert_eq!(gpa.to_string(), "3.50");
    }

    #[test]
    fn credit_weighted_gpa_uses_hours() {
        let gpa = Gpa::compute(
            GpaPolicy::CreditWeighted,
            [course(LetterGrade::A, 3), course(LetterGrade::B, 1)],
        )
        .expect("graded courses exist");

        assert_eq!(gpa.value(), 3.75);
    }

    #[test]
    fn credit_weighted_gpa_over_zero_hours_is_absent() {
        let gpa = Gpa::compute(GpaPolicy::CreditWeighted, [course(LetterGrade::A, 0)]);

        assert_eq!(gpa, None);
    }
}
