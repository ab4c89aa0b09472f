use std::collections::HashSet;

use super::{
    CourseCode, CourseId, CourseOffering, CourseSelection, CreditHours, CreditLoadGuard,
    DomainError, Term,
};

/// Where a registration batch is in its lifecycle.
///
/// `Validating -> (CreditCheckFailed | SeedingCourses* -> Inserting) -> Committed | RolledBack`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationPhase {
    Validating,
    CreditCheckFailed,
    SeedingCourses,
    Inserting,
    Committed,
    RolledBack,
}

impl RegistrationPhase {
    pub fn can_advance_to(self, next: RegistrationPhase) -> bool {
        use RegistrationPhase::*;

        matches!(
            (self, next),
            (Validating, CreditCheckFailed)
                | (Validating, SeedingCourses)
                | (Validating, Inserting)
                | (Validating, Committed)
                | (SeedingCourses, SeedingCourses)
                | (SeedingCourses, Inserting)
                | (Inserting, SeedingCourses)
                | (Inserting, Inserting)
                | (Inserting, Committed)
                | (SeedingCourses, RolledBack)
                | (Inserting, RolledBack)
                | (Validating, RolledBack)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RegistrationPhase::CreditCheckFailed
                | RegistrationPhase::Committed
                | RegistrationPhase::RolledBack
        )
    }
}

/// A selected course. `course_id` is set when the catalog table already
/// holds it; otherwise the course is seeded from the curriculum first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCourse {
    pub offering: CourseOffering,
    pub course_id: Option<CourseId>,
}

impl ResolvedCourse {
    pub fn is_catalogued(&self) -> bool {
        self.course_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub term: Term,
    pub inserted: u64,
    pub already_registered: Vec<CourseCode>,
    pub seeded: Vec<CourseCode>,
    pub total_credits: u16,
}

#[derive(Debug, Clone)]
pub struct RegistrationBatch {
    term: Term,
    phase: RegistrationPhase,
    pending: Vec<ResolvedCourse>,
    already_registered: Vec<CourseCode>,
    seeded: Vec<CourseCode>,
    inserted: u64,
    inserted_credits: u16,
    total_credits: u16,
    guard: CreditLoadGuard,
}

impl RegistrationBatch {
    /// Validates the selection and applies the credit ceiling.
    ///
    /// Courses the student already holds in `term` are set aside and do not
    /// count towards the ceiling. The selection is drained either way.
    pub fn plan<F>(
        term: Term,
        selection: &mut CourseSelection,
        registered: &HashSet<CourseCode>,
        registered_credits: CreditHours,
        guard: CreditLoadGuard,
        mut resolve: F,
    ) -> Result<Self, DomainError>
    where
        F: FnMut(&CourseCode) -> Option<ResolvedCourse>,
    {
        let codes = selection.take();
        if codes.is_empty() {
            return Err(DomainError::EmptySelection);
        }

        let (already_registered, new_codes): (Vec<_>, Vec<_>) =
            codes.into_iter().partition(|code| registered.contains(code));

        let pending = new_codes
            .into_iter()
            .map(|code| resolve(&code).ok_or(DomainError::UnknownCourse(code)))
            .collect::<Result<Vec<_>, _>>()?;

        let total_credits = guard.admit(
            registered_credits,
            pending.iter().map(|course| course.offering.credit_hours),
        )?;

        Ok(Self {
            term,
            phase: RegistrationPhase::Validating,
            pending,
            already_registered,
            seeded: Vec::new(),
            inserted: 0,
            inserted_credits: 0,
            total_credits,
            guard,
        })
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn phase(&self) -> RegistrationPhase {
        self.phase
    }

    pub fn pending(&self) -> &[ResolvedCourse] {
        &self.pending
    }

    pub fn begin_seeding(&mut self) {
        self.advance(RegistrationPhase::SeedingCourses);
    }

    pub fn begin_inserting(&mut self) {
        self.advance(RegistrationPhase::Inserting);
    }

    pub fn record_seeded(&mut self, code: CourseCode) {
        self.seeded.push(code);
    }

    pub fn record_inserted(&mut self, credit_hours: CreditHours) {
        self.inserted += 1;
        self.inserted_credits = self.inserted_credits.saturating_add(credit_hours.value());
    }

    /// A uniqueness conflict at insert time counts as already registered
    /// and its hours leave the planned total.
    pub fn record_duplicate(&mut self, code: CourseCode, credit_hours: CreditHours) {
        self.already_registered.push(code);
        self.total_credits = self.total_credits.saturating_sub(credit_hours.value());
    }

    /// Re-applies the ceiling to the term load read back after inserting.
    /// That load includes batches committed since the plan was made.
    pub fn confirm_term_credits(&mut self, term_credits: u16) -> Result<u16, DomainError> {
        let registered = term_credits.saturating_sub(self.inserted_credits);
        let total = self.guard.check(registered, self.inserted_credits)?;
        self.total_credits = total;
        Ok(total)
    }

    pub fn roll_back(&mut self) {
        self.advance(RegistrationPhase::RolledBack);
    }

    pub fn commit(mut self) -> RegistrationOutcome {
        self.advance(RegistrationPhase::Committed);

        self.already_registered.sort();
        RegistrationOutcome {
            term: self.term,
            inserted: self.inserted,
            already_registered: self.already_registered,
            seeded: self.seeded,
            total_credits: self.total_credits,
        }
    }

    fn advance(&mut self, next: RegistrationPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid registration transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AcademicYear, Semester, YearOfStudy};

    fn code(value: &str) -> CourseCode {
        CourseCode::new(value).expect("valid code")
    }

    fn offering(value: &str, hours: i64) -> CourseOffering {
        CourseOffering {
            code: code(value),
            name: format!("Course {value}"),
            ects: 5,
            credit_hours: CreditHours::new(hours).expect("valid hours"),
            lecture_hours: 2,
            lab_hours: 3,
            tutorial_hours: 0,
            department: "Computer Science".to_string(),
            year_of_study: YearOfStudy::new(2).expect("valid year"),
            semester: Semester::First,
            prerequisite: None,
        }
    }

    fn term() -> Term {
        Term::new(AcademicYear::starting(2024), Semester::First)
    }

    fn resolver(courses: Vec<CourseOffering>) -> impl FnMut(&CourseCode) -> Option<ResolvedCourse> {
        move |code| {
            courses
                .iter()
                .find(|offering| &offering.code == code)
                .map(|offering| ResolvedCourse {
                    offering: offering.clone(),
                    course_id: Some(CourseId::new()),
                })
        }
    }

    fn hours(value: i64) -> CreditHours {
        CreditHours::new(value).expect("valid hours")
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut selection = CourseSelection::new();

        let err = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            CreditHours::default(),
            CreditLoadGuard::default(),
            resolver(vec![]),
        )
        .expect_err("nothing selected");

        assert_eq!(err, DomainError::EmptySelection);
    }

    #[test]
    fn over_ceiling_batch_is_rejected_as_a_whole() {
        let mut selection: CourseSelection = [code("AAA1"), code("BBB1")].into_iter().collect();

        let err = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            hours(18),
            CreditLoadGuard::default(),
            resolver(vec![offering("AAA1", 5), offering("BBB1", 5)]),
        )
        .expect_err("28 > 21");

        assert!(matches!(err, DomainError::CreditLimitExceeded { .. }));
        assert!(selection.is_empty());
    }

    #[test]
    fn already_registered_courses_do_not_count_against_ceiling() {
        let mut selection: CourseSelection = [code("AAA1"), code("BBB1")].into_iter().collect();
        let registered: HashSet<_> = [code("AAA1")].into_iter().collect();

        let batch = RegistrationBatch::plan(
            term(),
            &mut selection,
            &registered,
            hours(15),
            CreditLoadGuard::default(),
            resolver(vec![offering("AAA1", 5), offering("BBB1", 5)]),
        )
        .expect("15 + 5 fits");

        assert_eq!(batch.pending().len(), 1);
        assert_eq!(batch.pending()[0].offering.code, code("BBB1"));

        let outcome = batch.commit();
        assert_eq!(outcome.total_credits, 20);
        assert_eq!(outcome.already_registered, vec![code("AAA1")]);
    }

    #[test]
    fn unknown_course_fails_validation() {
        let mut selection: CourseSelection = [code("ZZZ9")].into_iter().collect();

        let err = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            CreditHours::default(),
            CreditLoadGuard::default(),
            resolver(vec![]),
        )
        .expect_err("course is not offered");

        assert_eq!(err, DomainError::UnknownCourse(code("ZZZ9")));
    }

    #[test]
    fn duplicate_at_insert_time_is_reported_and_not_counted() {
        let mut selection: CourseSelection = [code("AAA1"), code("BBB1")].into_iter().collect();
        let mut batch = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            hours(3),
            CreditLoadGuard::default(),
            resolver(vec![offering("AAA1", 5), offering("BBB1", 4)]),
        )
        .expect("fits");

        batch.begin_inserting();
        batch.record_inserted(hours(5));
        batch.record_duplicate(code("BBB1"), hours(4));
        let outcome = batch.commit();

        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.already_registered, vec![code("BBB1")]);
        assert_eq!(outcome.total_credits, 8);
    }

    #[test]
    fn load_committed_after_planning_fails_confirmation() {
        let mut selection: CourseSelection = [code("AAA1")].into_iter().collect();
        let mut batch = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            CreditHours::default(),
            CreditLoadGuard::default(),
            resolver(vec![offering("AAA1", 15)]),
        )
        .expect("15 fits an empty term");

        batch.begin_inserting();
        batch.record_inserted(hours(15));

        assert_eq!(
            batch.confirm_term_credits(30),
            Err(DomainError::CreditLimitExceeded {
                registered: 15,
                requested: 15,
                ceiling: 21,
            })
        );
        batch.roll_back();
        assert_eq!(batch.phase(), RegistrationPhase::RolledBack);
    }

    #[test]
    fn confirmed_load_becomes_the_reported_total() {
        let mut selection: CourseSelection = [code("AAA1")].into_iter().collect();
        let mut batch = RegistrationBatch::plan(
            term(),
            &mut selection,
            &HashSet::new(),
            hours(3),
            CreditLoadGuard::default(),
            resolver(vec![offering("AAA1", 5)]),
        )
        .expect("fits");

        batch.begin_inserting();
        batch.record_inserted(hours(5));

        assert_eq!(batch.confirm_term_credits(11), Ok(11));
        assert_eq!(batch.commit().total_credits, 11);
    }

    #[test]
    fn phase_transitions_follow_lifecycle() {
        use RegistrationPhase::*;

        assert!(Validating.can_advance_to(CreditCheckFailed));
        assert!(SeedingCourses.can_advance_to(Inserting));
        assert!(Inserting.can_advance_to(RolledBack));
        assert!(!Committed.can_advance_to(Inserting));
        assert!(!CreditCheckFailed.can_advance_to(Inserting));
        assert!(Committed.is_terminal());
        assert!(!Inserting.is_terminal());
    }
}
