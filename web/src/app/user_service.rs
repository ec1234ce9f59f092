//! User service
//!
//! Handles registration, session-token authentication and session lookup.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{is_valid_username, NewUser, User, UserId, USERNAME_MAX_LEN};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// Service for managing users
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user
    ///
    /// Returns the user and their session token. The token is only shown
    /// once; the store keeps its hash.
    pub async fn register(&self, username: &str) -> Result<(User, String), AppError> {
        let username = username.trim();
        if !is_valid_username(username) {
            return Err(AppError::BadRequest(format!(
                "Username must be 1 to {} letters, digits or @/./+/-/_ characters",
                USERNAME_MAX_LEN
            )));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with username '{}' already exists",
                username
            ))));
        }

        let token = generate_session_token();
        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                token_hash: hash_session_token(&token),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok((user, token))
    }

    /// Resolve a raw session token to its user
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .users
            .find_by_token_hash(&hash_session_token(token))
            .await?)
    }

    /// Look up the user a session belongs to
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(id).await?)
    }
}

/// Generate a random session token
fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("yt-{}", hex::encode(bytes))
}

/// Hash a session token for storage
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
