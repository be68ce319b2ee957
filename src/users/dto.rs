use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::User;
use crate::validation::{is_valid_email, is_valid_url};

/// Request body for POST /signup. Fields are optional on the wire so a
/// missing one gets its own message instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated signup payload.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub avatar: String,
    pub email: String,
    pub password: String,
}

/// Request body for POST /signin.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Request body for PATCH /users/me. Only name and avatar are mutable.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
            email: user.email,
        }
    }
}

fn validate_signup_name(name: Option<String>) -> Result<String, ApiError> {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(ApiError::BadRequest("Name is required.")),
    };
    match name.chars().count() {
        0..=1 => Err(ApiError::BadRequest(
            "Name must be at least 2 characters long.",
        )),
        2..=30 => Ok(name),
        _ => Err(ApiError::BadRequest("Name must not exceed 30 characters.")),
    }
}

fn validate_email(email: Option<String>) -> Result<String, ApiError> {
    let email = match email {
        Some(e) if !e.is_empty() => e.trim().to_lowercase(),
        _ => return Err(ApiError::BadRequest("Email is required.")),
    };
    if !is_valid_email(&email) {
        return Err(ApiError::BadRequest(
            "Please provide a valid email address.",
        ));
    }
    Ok(email)
}

fn validate_avatar(avatar: Option<String>) -> Result<String, ApiError> {
    match avatar {
        Some(a) if a.is_empty() => Err(ApiError::BadRequest(
            "The \"avatar\" field must be filled in.",
        )),
        Some(a) if !is_valid_url(&a) => Err(ApiError::BadRequest(
            "The \"avatar\" field must be a valid URL.",
        )),
        Some(a) => Ok(a),
        None => Err(ApiError::BadRequest(
            "The \"avatar\" field must be filled in.",
        )),
    }
}

impl SignupRequest {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let name = validate_signup_name(self.name)?;
        let avatar = validate_avatar(self.avatar)?;
        let email = validate_email(self.email)?;
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ApiError::BadRequest("Password is required.")),
        };
        Ok(NewUser {
            name,
            avatar,
            email,
            password,
        })
    }
}

impl SigninRequest {
    pub fn validate(self) -> Result<Credentials, ApiError> {
        let email = validate_email(self.email)?;
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => return Err(ApiError::BadRequest("Password is required.")),
        };
        Ok(Credentials { email, password })
    }
}

impl UpdateProfileRequest {
    pub fn validate(self) -> Result<ProfileUpdate, ApiError> {
        if self.name.is_none() && self.avatar.is_none() {
            return Err(ApiError::BadRequest("No valid fields provided for update."));
        }
        let name = match self.name {
            Some(n) => Some(validate_signup_name(Some(n))?),
            None => None,
        };
        let avatar = match self.avatar {
            Some(a) => Some(validate_avatar(Some(a))?),
            None => None,
        };
        Ok(ProfileUpdate { name, avatar })
    }
}
