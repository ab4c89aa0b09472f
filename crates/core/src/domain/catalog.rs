//! The built-in Computer Science curriculum.
//!
//! Used to seed the course table and to resolve codes the table does not
//! hold yet at registration time.

use super::Semester::{First as S1, Second as S2};
use super::{CourseCode, CourseOffering, CreditHours, Semester, YearOfStudy};

pub const DEFAULT_DEPARTMENT: &str = "Computer Science";

struct Listing {
    code: &'static str,
    name: &'static str,
    ects: u16,
    credit_hours: u16,
    lecture_hours: u16,
    lab_hours: u16,
    tutorial_hours: u16,
    year_of_study: YearOfStudy,
    semester: Semester,
    prerequisite: Option<&'static str>,
}

const fn listing(
    code: &'static str,
    name: &'static str,
    hours: [u16; 5],
    year_of_study: YearOfStudy,
    semester: Semester,
    prerequisite: Option<&'static str>,
) -> Listing {
    let [ects, credit_hours, lecture_hours, lab_hours, tutorial_hours] = hours;
    Listing {
        code,
        name,
        ects,
        credit_hours,
        lecture_hours,
        lab_hours,
        tutorial_hours,
        year_of_study,
        semester,
        prerequisite,
    }
}

const Y1: YearOfStudy = YearOfStudy::FIRST;
const Y2: YearOfStudy = YearOfStudy::SECOND;
const Y3: YearOfStudy = YearOfStudy::THIRD;
const Y4: YearOfStudy = YearOfStudy::FOURTH;

// hours: [ects, credit, lecture, lab, tutorial]
const LISTINGS: &[Listing] = &[
    listing("CoSc2064", "Computer Programming", [5, 3, 2, 3, 0], Y1, S2, None),
    listing("CoSc2021", "Digital Logic Design", [5, 3, 2, 3, 0], Y2, S1, None),
    listing("CoSc2011", "Computer Programming II", [5, 3, 2, 3, 2], Y2, S1, Some("CoSc2064")),
    listing("MATH2011", "Linear Algebra", [5, 3, 3, 0, 0], Y2, S1, None),
    listing("CoSc2041", "Fundamentals of Database Systems", [5, 3, 2, 3, 2], Y2, S1, None),
    listing("ECON2103", "Economics", [4, 2, 2, 0, 0], Y2, S1, None),
    listing("MATH2053", "Discrete Mathematics", [5, 3, 3, 0, 0], Y2, S1, None),
    listing("SINE2011", "Inclusiveness", [3, 2, 2, 0, 0], Y2, S1, None),
    listing("CoSc2034", "Data Communication and Computer Networks", [5, 3, 2, 3, 2], Y2, S2, None),
    listing("CoSc2052", "Object Oriented Programming", [5, 3, 2, 3, 2], Y2, S2, Some("CoSc2011")),
    listing("MATH2082", "Numerical Analysis", [5, 3, 2, 3, 0], Y2, S2, Some("Math1044")),
    listing("STAT2016", "Probability and Statistics", [5, 3, 3, 0, 1], Y2, S2, None),
    listing("CoSc2092", "Data Structures and Algorithms", [5, 3, 2, 3, 2], Y2, S2, Some("CoSc2011")),
    listing("CoSc2022", "Computer Organization and Architecture", [5, 3, 2, 3, 2], Y2, S2, Some("CoSc2021")),
    listing("CoSc3025", "Microprocessor and Assembly Language Programming", [5, 3, 2, 3, 1], Y3, S1, Some("CoSc2011")),
    listing("CoSc3023", "Operating Systems", [5, 3, 2, 3, 2], Y3, S1, Some("CoSc2022")),
    listing("CoSc3045", "Advanced Database Systems", [5, 3, 2, 3, 2], Y3, S1, Some("CoSc2041")),
    listing("CoSc3053", "Java Programming", [5, 3, 2, 3, 2], Y3, S1, Some("CoSc2052")),
    listing("CoSc3061", "Software Engineering", [5, 3, 3, 0, 2], Y3, S1, None),
    listing("CoSc3101", "Automata and Complexity Theory", [5, 3, 3, 0, 2], Y3, S1, None),
    listing("CoSc3034", "Wireless Communication and Mobile Computing", [5, 3, 2, 3, 1], Y3, S2, Some("CoSc2034")),
    listing("CoSc3072", "Computer Graphics", [5, 3, 2, 3, 1], Y3, S2, Some("CoSc2011")),
    listing("CoSc3086", "Web Programming", [7, 4, 3, 3, 1], Y3, S2, None),
    listing("CoSc3094", "Design and Analysis of Algorithms", [5, 3, 3, 0, 0], Y3, S2, Some("CoSc2092")),
    listing("CoSc3112", "Introduction to Artificial Intelligence", [5, 3, 2, 3, 2], Y3, S2, Some("CoSc2092")),
    listing("CoSc3122", "Industrial Practice", [3, 2, 0, 0, 0], Y3, S2, None),
    listing("CoSc3128", "Research Methods in Computer Science", [3, 2, 2, 0, 0], Y3, S2, None),
    listing("CoSc4021", "Real Time and Embedded Systems", [5, 3, 2, 3, 2], Y4, S1, Some("CoSc2022")),
    listing("CoSc4031", "Computer Security", [5, 3, 2, 3, 1], Y4, S1, Some("CoSc2034")),
    listing("CoSc4113", "Computer Vision and Image Processing", [5, 3, 2, 3, 2], Y4, S1, Some("CoSc3072")),
    listing("CoSc4125", "Final Year Project I", [5, 3, 0, 0, 0], Y4, S1, Some("CoSc3061")),
    listing("CoSc4036", "Network and System Administration", [5, 3, 2, 3, 1], Y4, S2, Some("CoSc2034")),
    listing("CoSc4038", "Introduction to Distributed Systems", [5, 3, 2, 3, 2], Y4, S2, Some("CoSc2034")),
    listing("CoSc4104", "Compiler Design", [5, 3, 2, 3, 2], Y4, S2, Some("CoSc3101")),
    listing("CoSc4126", "Final Year Project II", [5, 3, 0, 0, 0], Y4, S2, Some("CoSc4125")),
    listing("CoSc4132", "Selected Topics in Computer Science", [5, 3, 3, 0, 0], Y4, S2, None),
];

impl Listing {
    fn to_offering(&self) -> CourseOffering {
        CourseOffering {
            code: CourseCode::from_static(self.code),
            name: self.name.to_string(),
            ects: self.ects,
            credit_hours: CreditHours::from_static(self.credit_hours),
            lecture_hours: self.lecture_hours,
            lab_hours: self.lab_hours,
            tutorial_hours: self.tutorial_hours,
            department: DEFAULT_DEPARTMENT.to_string(),
            year_of_study: self.year_of_study,
            semester: self.semester,
            prerequisite: self.prerequisite.map(CourseCode::from_static),
        }
    }
}

/// Every course in the curriculum, ordered by year, semester then listing.
pub fn curriculum() -> Vec<CourseOffering> {
    LISTINGS.iter().map(Listing::to_offering).collect()
}

/// The listing for one department, level and semester.
pub fn offerings_for(
    department: &str,
    year_of_study: YearOfStudy,
    semester: Semester,
) -> Vec<CourseOffering> {
    if !department.trim().eq_ignore_ascii_case(DEFAULT_DEPARTMENT) {
        return Vec::new();
    }

    LISTINGS
        .iter()
        .filter(|listing| listing.year_of_study == year_of_study && listing.semester == semester)
        .map(Listing::to_offering)
        .collect()
}

pub fn find(code: &CourseCode) -> Option<CourseOffering> {
    LISTINGS
        .iter()
        .find(|listing| listing.code == code.as_str())
        .map(Listing::to_offering)
}
