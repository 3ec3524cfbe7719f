use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::user::{ProfileUpdate, SignUpPayload, StoredAuthData, UserProfile};
use crate::error::{AppError, AppResult};
use crate::infra::kv::KeyValueStore;
use crate::infra::store::PersistentStore;

const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 128;

/// The single on-device account. A stored record means a signed-in user;
/// logging out drops the record.
#[derive(Clone)]
pub struct AuthStore {
    store: PersistentStore<Option<StoredAuthData>>,
}

impl AuthStore {
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store: PersistentStore::load(kv, key, None).await,
        }
    }

    pub fn store(&self) -> &PersistentStore<Option<StoredAuthData>> {
        &self.store
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.store
            .read(|record| record.as_ref().map(|record| record.user.clone()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.read(Option::is_some)
    }

    /// Creates the account, replacing any existing one, and signs it in.
    pub fn signup(&self, payload: SignUpPayload) -> AppResult<UserProfile> {
        let email = normalize_email(&payload.email);
        let username = payload.username.trim().to_string();
        let display_name = payload.display_name.trim().to_string();

        if email.is_empty()
            || payload.password.is_empty()
            || username.is_empty()
            || display_name.is_empty()
        {
            return Err(AppError::invalid("please fill in all required fields"));
        }
        let password_len = payload.password.chars().count();
        if password_len < MIN_PASSWORD_LEN {
            return Err(AppError::invalid(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if password_len > MAX_PASSWORD_LEN {
            return Err(AppError::invalid(format!(
                "password must be at most {} characters",
                MAX_PASSWORD_LEN
            )));
        }

        let password = hash_password(&payload.password).map_err(|err| {
            error!(error = ?err, "failed to hash password");
            AppError::internal("could not save your account")
        })?;

        let user = UserProfile {
            id: Uuid::new_v4().to_string(),
            email,
            username,
            display_name,
            cooking_level: payload.cooking_level,
            dietary_preferences: payload.dietary_preferences,
            profile_photo_uri: None,
            preferred_spaces: None,
        };

        self.store.mutate(|record| {
            *record = Some(StoredAuthData {
                user: user.clone(),
                password,
            });
        });
        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Checks credentials against the stored account.
    pub fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let record = self.store.get().ok_or(AppError::NoAccount)?;

        if record.user.email != normalize_email(email) {
            return Err(AppError::InvalidCredentials);
        }
        match verify_password(password, &record.password) {
            Ok(true) => Ok(record.user),
            Ok(false) => Err(AppError::InvalidCredentials),
            Err(err) => {
                error!(error = ?err, "stored password hash is unreadable");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    pub fn logout(&self) {
        self.store.reset();
    }

    /// Shallow merge into the signed-in profile. The password is kept.
    pub fn update_profile(&self, update: ProfileUpdate) -> AppResult<UserProfile> {
        if !self.is_signed_in() {
            return Err(AppError::Unauthenticated);
        }

        let username = trimmed_required(update.username, "username")?;
        let display_name = trimmed_required(update.display_name, "display name")?;

        self.store.mutate(|record| {
            let record = record.as_mut().ok_or(AppError::Unauthenticated)?;
            let user = &mut record.user;
            if let Some(username) = username {
                user.username = username;
            }
            if let Some(display_name) = display_name {
                user.display_name = display_name;
            }
            if let Some(level) = update.cooking_level {
                user.cooking_level = level;
            }
            if let Some(preferences) = update.dietary_preferences {
                user.dietary_preferences = preferences;
            }
            if let Some(uri) = update.profile_photo_uri {
                user.profile_photo_uri = Some(uri);
            }
            if let Some(spaces) = update.preferred_spaces {
                user.preferred_spaces = Some(spaces);
            }
            Ok(user.clone())
        })
    }

    pub async fn flush(&self) {
        self.store.flush().await;
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn trimmed_required(value: Option<String>, field: &str) -> AppResult<Option<String>> {
    match value {
        Some(value) => {
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(AppError::invalid(format!("{} cannot be empty", field)));
            }
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {}", err))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| anyhow!("failed to parse password hash: {}", err))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
