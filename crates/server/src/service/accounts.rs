use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use registrar_core::domain::{
    AccountForm, DeanNumber, NewAccount, Profile, Role, StudentNumber, TeacherNumber,
};
use tracing::{info, warn};

use super::{Passwords, ServiceResult};
use crate::error::{ServiceError, unique_violation};
use crate::repository::{NewProfile, NewUser, UserRecord, UserRepository};

#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub user: UserRecord,
    pub business_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: UserRecord,
    pub business_id: Option<String>,
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Passwords,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Passwords) -> Self {
        Self { users, passwords }
    }

    /// Validates the form, rejects taken usernames, emails and employee ids,
    /// then stores the user with a freshly numbered role profile.
    pub async fn register(&self, form: AccountForm, today: NaiveDate) -> ServiceResult<CreatedAccount> {
        let account = form.validate(today)?;
        self.ensure_unique(&account).await?;

        let role = account.profile.role();
        let sequence = self.users.last_sequence(role, today.year()).await? + 1;
        let password_hash = self.passwords.hash(&account.password)?;

        let new_user = NewUser {
            username: account.username.as_str().to_string(),
            password_hash,
            email: account.email.as_str().to_string(),
            full_name: account.full_name,
            date_of_birth: account.date_of_birth,
            gender: account.gender,
            phone: account.phone,
            region: account.region,
            zone: account.zone,
            profile: numbered_profile(account.profile, today.year(), sequence),
        };

        let user = match self.users.create(new_user).await {
            Ok(user) => user,
            Err(err) => {
                return Err(match unique_violation(&err) {
                    Some(detail) => conflict_from_detail(&detail),
                    None => err.into(),
                });
            }
        };
        let business_id = self.users.business_id(&user).await?;

        info!(
            user_id = %user.id,
            role = %user.role,
            business_id = business_id.as_deref().unwrap_or("-"),
            "account registered"
        );
        Ok(CreatedAccount { user, business_id })
    }

    pub async fn login(&self, username: &str, password: &str, role: Role) -> ServiceResult<LoginSession> {
        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            warn!(username, "login rejected: unknown username");
            return Err(ServiceError::InvalidCredentials);
        };
        if user.role != role || !self.passwords.verify(password, &user.password_hash)? {
            warn!(username, role = %role, "login rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        let business_id = self.users.business_id(&user).await?;
        info!(user_id = %user.id, role = %role, "login succeeded");
        Ok(LoginSession { user, business_id })
    }

    /// Removes the student together with their registrations and grades.
    pub async fn delete_student(&self, student_id: &StudentNumber) -> ServiceResult<()> {
        if !self.users.delete_student(student_id).await? {
            return Err(ServiceError::not_found("student", student_id));
        }

        info!(student_id = %student_id, "student deleted");
        Ok(())
    }

    async fn ensure_unique(&self, account: &NewAccount) -> ServiceResult<()> {
        if self
            .users
            .find_by_username(account.username.as_str())
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("username", "Username already exists"));
        }
        if self.users.email_exists(account.email.as_str()).await? {
            return Err(ServiceError::conflict("email", "Email already exists"));
        }
        if let Profile::Teacher { employee_id, .. } = &account.profile {
            if self.users.employee_id_exists(employee_id).await? {
                return Err(ServiceError::conflict(
                    "employee_id",
                    "Employee ID already exists",
                ));
            }
        }

        Ok(())
    }
}

fn numbered_profile(profile: Profile, year: i32, sequence: u32) -> NewProfile {
    match profile {
        Profile::Student {
            registration_number,
            academic_year,
            department,
        } => NewProfile::Student {
            student_id: StudentNumber::generate(year, sequence),
            registration_number,
            department,
            academic_year,
        },
        Profile::Teacher {
            employee_id,
            department,
            qualification,
        } => NewProfile::Teacher {
            teacher_id: TeacherNumber::generate(year, sequence),
            employee_id,
            department,
            qualification,
        },
        Profile::Dean {
            department,
            appointment_date,
            office_location,
            dean_type,
        } => NewProfile::Dean {
            dean_id: DeanNumber::generate(year, sequence),
            department,
            appointment_date,
            office_location,
            dean_type,
        },
        Profile::Admin => NewProfile::Admin,
    }
}

/// Maps a unique constraint that fired after the pre-checks (a concurrent
/// registration) back to the field the user can fix.
fn conflict_from_detail(detail: &str) -> ServiceError {
    let detail = detail.to_ascii_lowercase();
    if detail.contains("username") {
        ServiceError::conflict("username", "Username already exists")
    } else if detail.contains("email") {
        ServiceError::conflict("email", "Email already exists")
    } else if detail.contains("employee_id") {
        ServiceError::conflict("employee_id", "Employee ID already exists")
    } else {
        ServiceError::conflict("username", "Account could not be created, please retry")
    }
}
