//! User DTOs and their validation rules
//!
//! Three payload shapes reach this module:
//! - signup (`username`, `email`) with the idempotent registration policy
//! - token request (`username`, `confirmation_code`)
//! - profile writes (admin `/users` and self-service `/users/me`)

use super::model::User;
use crate::core::auth::Role;
use crate::core::error::{ApiResult, ValidationError};
use crate::core::repository::Repository;
use crate::core::validation::validators::is_reserved_username;
use crate::core::validation::{ReservedNameCheck, USERNAME_RE};
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Signup
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "Обязательное поле."),
        length(max = 150, message = "Значение превышает допустимую длину."),
        regex(path = *USERNAME_RE, message = "Допустимы только буквы, цифры и символы @/./+/-/_")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Обязательное поле."),
        length(max = 128, message = "Значение превышает допустимую длину."),
        email(message = "Введите правильный адрес электронной почты.")
    )]
    pub email: Option<String>,
}

/// Registration data that passed the conflict policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupData {
    pub username: String,
    pub email: String,
}

impl SignupRequest {
    /// Apply the registration conflict policy
    ///
    /// 1. `"me"` is reserved
    /// 2. an exact (username, email) match is accepted and reused
    /// 3. username taken by someone with another email fails
    /// 4. email taken by someone with another username fails
    pub async fn validate_against(self, users: &dyn Repository<User>) -> ApiResult<SignupData> {
        let username = self.username.unwrap_or_default();
        let email = self.email.unwrap_or_default();

        if is_reserved_username(&username) {
            return Err(ValidationError::ReservedUsername.into());
        }

        let exact = users
            .exists(&|u: &User| u.username == username && u.email == email)
            .await?;
        if !exact {
            if users.exists(&|u: &User| u.username == username).await? {
                return Err(ValidationError::UsernameTaken.into());
            }
            if users.exists(&|u: &User| u.email == email).await? {
                return Err(ValidationError::EmailTaken.into());
            }
        }

        Ok(SignupData { username, email })
    }
}

impl SignupData {
    /// Return the existing user with this exact pair, or create one
    pub async fn save(self, users: &dyn Repository<User>) -> ApiResult<(User, bool)> {
        let (user, created) = users
            .get_or_create(
                &|u: &User| u.username == self.username && u.email == self.email,
                User::new(self.username.clone(), self.email.clone()),
            )
            .await?;
        Ok((user, created))
    }
}

/// Signup response body
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
    pub email: String,
}

// =============================================================================
// Token request
// =============================================================================

/// Exchange of a confirmation code for an access token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(
        required(message = "Обязательное поле."),
        length(max = 150, message = "Значение превышает допустимую длину."),
        regex(path = *USERNAME_RE, message = "Допустимы только буквы, цифры и символы @/./+/-/_")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Обязательное поле."),
        length(max = 150, message = "Значение превышает допустимую длину.")
    )]
    pub confirmation_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// =============================================================================
// Profile
// =============================================================================

/// Public representation of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserOut {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: Role,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            role: user.role,
        }
    }
}

/// Admin-side user creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(
        required(message = "Обязательное поле."),
        length(max = 150, message = "Значение превышает допустимую длину."),
        regex(path = *USERNAME_RE, message = "Допустимы только буквы, цифры и символы @/./+/-/_")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Обязательное поле."),
        length(max = 128, message = "Значение превышает допустимую длину."),
        email(message = "Введите правильный адрес электронной почты.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "Значение превышает допустимую длину."))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Значение превышает допустимую длину."))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    pub role: Option<Role>,
}

impl UserCreate {
    /// Field-level reserved-name rule, then build the record
    pub fn into_user(self, check: ReservedNameCheck) -> ApiResult<User> {
        let username = self.username.unwrap_or_default();
        validate_profile_username(check, &username)?;

        let mut user = User::new(username, self.email.unwrap_or_default());
        user.first_name = self.first_name.unwrap_or_default();
        user.last_name = self.last_name.unwrap_or_default();
        user.bio = self.bio.unwrap_or_default();
        user.role = self.role.unwrap_or_default();
        Ok(user)
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(
        length(max = 150, message = "Значение превышает допустимую длину."),
        regex(path = *USERNAME_RE, message = "Допустимы только буквы, цифры и символы @/./+/-/_")
    )]
    pub username: Option<String>,

    #[validate(
        length(max = 128, message = "Значение превышает допустимую длину."),
        email(message = "Введите правильный адрес электронной почты.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "Значение превышает допустимую длину."))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Значение превышает допустимую длину."))]
    pub last_name: Option<String>,

    pub bio: Option<String>,

    pub role: Option<Role>,
}

impl UserPatch {
    /// Apply the patch onto `user`
    ///
    /// `role` is only honoured when `allow_role` is set (admin endpoints).
    pub fn apply(self, mut user: User, check: ReservedNameCheck, allow_role: bool) -> ApiResult<User> {
        if let Some(username) = self.username {
            validate_profile_username(check, &username)?;
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(bio) = self.bio {
            user.bio = bio;
        }
        if let (true, Some(role)) = (allow_role, self.role) {
            user.role = role;
        }
        Ok(user)
    }
}

/// Reserved-name rule of the profile endpoints
pub fn validate_profile_username(check: ReservedNameCheck, username: &str) -> Result<(), ValidationError> {
    if check.is_reserved(username) {
        Err(ValidationError::ReservedUsername)
    } else {
        Ok(())
    }
}
