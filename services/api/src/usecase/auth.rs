use chrono::Utc;
use ratehub_domain::Role;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    User, normalize_email, validate_address, validate_email, validate_name, validate_password,
};
use crate::error::ApiError;
use crate::password;
use crate::token;

fn validate_profile(name: &str, email: &str, address: &str) -> Result<(), ApiError> {
    if !validate_name(name) {
        return Err(ApiError::InvalidName);
    }
    if !validate_email(email) {
        return Err(ApiError::InvalidEmail);
    }
    if !validate_address(address) {
        return Err(ApiError::InvalidAddress);
    }
    Ok(())
}

/// Builds a new account row with a freshly hashed password.
pub(crate) fn new_user(
    name: String,
    email: &str,
    address: String,
    plain_password: &str,
    role: Role,
) -> Result<User, ApiError> {
    let now = Utc::now();
    Ok(User {
        id: Uuid::now_v7(),
        name,
        email: normalize_email(email),
        password_hash: password::hash_password(plain_password)?,
        address,
        role,
        created_at: now,
        updated_at: now,
    })
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
}

/// Self-registration. The role is always NormalUser; privileged accounts
/// only come from the admin path.
pub struct SignupUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> SignupUseCase<R> {
    pub async fn execute(&self, input: SignupInput) -> Result<(User, String), ApiError> {
        validate_profile(&input.name, &input.email, &input.address)?;
        if !validate_password(&input.password) {
            return Err(ApiError::InvalidPassword);
        }
        let user = new_user(
            input.name,
            &input.email,
            input.address,
            &input.password,
            Role::NormalUser,
        )?;
        self.repo.create(&user).await?;
        let token = token::issue_token(user.id, user.role, &self.jwt_secret)?;
        Ok((user, token))
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

/// Credential check and token issuance. Unknown email and wrong password
/// fail identically so the response does not reveal which emails exist.
pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, email: &str, plain_password: &str) -> Result<(User, String), ApiError> {
        let user = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(ApiError::Unauthenticated)?;
        if !password::verify_password(plain_password, &user.password_hash) {
            return Err(ApiError::Unauthenticated);
        }
        let token = token::issue_token(user.id, user.role, &self.jwt_secret)?;
        Ok((user, token))
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdatePassword ───────────────────────────────────────────────────────────

pub struct UpdatePasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdatePasswordUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, new_password: &str) -> Result<(), ApiError> {
        if !validate_password(new_password) {
            return Err(ApiError::InvalidPassword);
        }
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        let hash = password::hash_password(new_password)?;
        self.repo.update_password_hash(user_id, &hash).await
    }
}
