use std::collections::BTreeSet;

use super::CourseCode;

/// Courses a student has ticked during one visit, keyed by course code.
/// Nothing here is persisted; a registration batch drains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseSelection {
    selected: BTreeSet<CourseCode>,
}

impl CourseSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.selected.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the selected codes in order and leaves the selection empty.
    pub fn take(&mut self) -> Vec<CourseCode> {
        std::mem::take(&mut self.selected).into_iter().collect()
    }
}

impl FromIterator<CourseCode> for CourseSelection {
    fn from_iter<I: IntoIterator<Item = CourseCode>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
