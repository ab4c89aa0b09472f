use super::{CreditHours, DomainError};

/// Caps the credit hours a student may carry in one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditLoadGuard {
    ceiling: u16,
}

impl CreditLoadGuard {
    pub const DEFAULT_CEILING: u16 = 21;

    pub fn new(ceiling: u16) -> Self {
        Self { ceiling }
    }

    pub fn ceiling(self) -> u16 {
        self.ceiling
    }

    /// Admits the whole batch or none of it. Returns the resulting term total.
    pub fn admit(
        self,
        registered: CreditHours,
        requested: impl IntoIterator<Item = CreditHours>,
    ) -> Result<u16, DomainError> {
        let requested: u16 = requested.into_iter().map(CreditHours::value).sum();
        self.check(registered.value(), requested)
    }

    /// Same rule over raw term sums, which may exceed a single course's hours.
    pub fn check(self, registered: u16, requested: u16) -> Result<u16, DomainError> {
        let total = registered.saturating_add(requested);

        if total > self.ceiling {
            return Err(DomainError::CreditLimitExceeded {
                registered,
                requested,
                ceiling: self.ceiling,
            });
        }

        Ok(total)
    }
}

impl Default for CreditLoadGuard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CEILING)
    }
}
