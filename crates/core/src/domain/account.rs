use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use super::{AcademicYear, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
    Dean,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Dean => "dean",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "dean" => Ok(Role::Dean),
            "admin" => Ok(Role::Admin),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeanType {
    Department,
    College,
}

impl DeanType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeanType::Department => "Department Dean",
            DeanType::College => "College Dean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a form, reported next to the field it concerns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 4;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'))
        && !domain.is_empty()
}

fn is_valid_phone(value: &str) -> bool {
    (9..=10).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileForm {
    Student {
        registration_number: String,
        academic_year: Option<String>,
        department: Option<String>,
    },
    Teacher {
        employee_id: String,
        department: Option<String>,
        qualification: String,
    },
    Dean {
        department: Option<String>,
        appointment_date: Option<NaiveDate>,
        office_location: String,
        dean_type: Option<DeanType>,
    },
    Admin,
}

impl ProfileForm {
    pub fn role(&self) -> Role {
        match self {
            ProfileForm::Student { .. } => Role::Student,
            ProfileForm::Teacher { .. } => Role::Teacher,
            ProfileForm::Dean { .. } => Role::Dean,
            ProfileForm::Admin => Role::Admin,
        }
    }
}

/// Raw account registration input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub region: Option<String>,
    pub zone: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub profile: ProfileForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Student {
        registration_number: String,
        academic_year: AcademicYear,
        department: String,
    },
    Teacher {
        employee_id: String,
        department: String,
        qualification: String,
    },
    Dean {
        department: String,
        appointment_date: NaiveDate,
        office_location: String,
        dean_type: DeanType,
    },
    Admin,
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Student { .. } => Role::Student,
            Profile::Teacher { .. } => Role::Teacher,
            Profile::Dean { .. } => Role::Dean,
            Profile::Admin => Role::Admin,
        }
    }
}

/// An account form that passed every field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub password: String,
    pub full_name: String,
    pub gender: Option<Gender>,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub region: String,
    pub zone: Option<String>,
    pub profile: Profile,
}

fn required(errors: &mut FieldErrors, field: &'static str, value: Option<&str>, label: &str) -> Option<String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Some(value.to_string()),
        None => {
            errors.push(field, format!("{label} is required"));
            None
        }
    }
}

impl AccountForm {
    pub fn validate(&self, today: NaiveDate) -> Result<NewAccount, DomainError> {
        let mut errors = FieldErrors::new();

        let first_name = required(&mut errors, "first_name", Some(self.first_name.as_str()), "First name");
        let last_name = required(&mut errors, "last_name", Some(self.last_name.as_str()), "Last name");

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push("phone", "Phone number is required");
        } else if !is_valid_phone(phone) {
            errors.push("phone", "Phone number must be 9-10 digits");
        }

        match self.date_of_birth {
            None => errors.push("date_of_birth", "Date of birth is required"),
            Some(dob) => {
                let age = age_on(dob, today);
                if age < 18 {
                    errors.push("date_of_birth", "Must be at least 18 years old");
                } else if age > 100 {
                    errors.push("date_of_birth", "Age must be between 18 and 100");
                }
            }
        }

        let region = required(&mut errors, "region", self.region.as_deref(), "Region");

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.push("email", "Invalid email format");
        }

        let username = self.username.trim();
        if username.is_empty() {
            errors.push("username", "Username is required");
        } else if username.chars().count() < Username::MIN_LEN {
            errors.push("username", "Username must be at least 4 characters");
        }

        if self.password.is_empty() {
            errors.push("password", "Password is required");
        } else if self.password.chars().count() < 8 {
            errors.push("password", "Password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }

        let profile = self.validate_profile(&mut errors);

        errors.into_result()?;

        // Every Option below is Some once no field error was recorded.
        match (first_name, last_name, region, self.date_of_birth, profile) {
            (Some(first), Some(last), Some(region), Some(date_of_birth), Some(profile)) => {
                Ok(NewAccount {
                    username: Username(username.to_string()),
                    email: Email(email.to_string()),
                    password: self.password.clone(),
                    full_name: format!("{first} {last}"),
                    gender: self.gender,
                    phone: phone.to_string(),
                    date_of_birth,
                    region,
                    zone: self
                        .zone
                        .as_deref()
                        .map(str::trim)
                        .filter(|z| !z.is_empty())
                        .map(str::to_string),
                    profile,
                })
            }
            _ => Err(DomainError::InvalidFields(FieldErrors::single(
                "form",
                "incomplete account form",
            ))),
        }
    }

    fn validate_profile(&self, errors: &mut FieldErrors) -> Option<Profile> {
        match &self.profile {
            ProfileForm::Student {
                registration_number,
                academic_year,
                department,
            } => {
                let registration_number = required(
                    errors,
                    "registration_number",
                    Some(registration_number.as_str()),
                    "Registration number",
                );
                let academic_year = match academic_year.as_deref().map(str::trim) {
                    None | Some("") => {
                        errors.push("academic_year", "Academic year is required");
                        None
                    }
                    Some(value) => match AcademicYear::new(value) {
                        Ok(year) => Some(year),
                        Err(_) => {
                            errors.push("academic_year", "Academic year must look like 2024/2025");
                            None
                        }
                    },
                };
                let department = required(errors, "department", department.as_deref(), "Department");

                Some(Profile::Student {
                    registration_number: registration_number?,
                    academic_year: academic_year?,
                    department: department?,
                })
            }
            ProfileForm::Teacher {
                employee_id,
                department,
                qualification,
            } => {
                let employee_id = required(errors, "employee_id", Some(employee_id.as_str()), "Employee ID");
                let department = required(errors, "department", department.as_deref(), "Department");
                let qualification =
                    required(errors, "qualification", Some(qualification.as_str()), "Qualification");

                Some(Profile::Teacher {
                    employee_id: employee_id?,
                    department: department?,
                    qualification: qualification?,
                })
            }
            ProfileForm::Dean {
                department,
                appointment_date,
                office_location,
                dean_type,
            } => {
                let department = required(errors, "department", department.as_deref(), "Department");
                if appointment_date.is_none() {
                    errors.push("appointment_date", "Appointment date is required");
                }
                let office_location =
                    required(errors, "office_location", Some(office_location.as_str()), "Office location");
                if dean_type.is_none() {
                    errors.push("dean_type", "Dean type is required");
                }

                Some(Profile::Dean {
                    department: department?,
                    appointment_date: (*appointment_date)?,
                    office_location: office_location?,
                    dean_type: (*dean_type)?,
                })
            }
            ProfileForm::Admin => Some(Profile::Admin),
        }
    }
}
