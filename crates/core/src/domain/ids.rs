use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::DomainError;

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            pub fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self::from_uuid(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.into_inner()
            }
        }
    };
}

define_id_type!(UserId);
define_id_type!(CourseId);
define_id_type!(RegistrationId);
define_id_type!(GradeId);
define_id_type!(AssignmentId);
define_id_type!(ReportId);

/// Human-facing identifiers of the form `<PREFIX>-<year>-<sequence>`.
macro_rules! define_business_id {
    ($name:ident, $kind:literal, $prefix:literal, $width:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn generate(year: i32, sequence: u32) -> Self {
                Self(format!("{}-{}-{:0width$}", $prefix, year, sequence, width = $width))
            }

            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();

                if !is_business_id(trimmed, $prefix) {
                    return Err(DomainError::InvalidBusinessId {
                        kind: $kind,
                        value,
                    });
                }

                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_business_id!(StudentNumber, "student", "DU", 5);
define_business_id!(TeacherNumber, "teacher", "T", 3);
define_business_id!(DeanNumber, "dean", "D", 3);

fn is_business_id(value: &str, prefix: &str) -> bool {
    let mut parts = value.splitn(3, '-');
    let (Some(head), Some(year), Some(sequence)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    head == prefix
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && !sequence.is_empty()
        && sequence.chars().all(|c| c.is_ascii_digit())
}
