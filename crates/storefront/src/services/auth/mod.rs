//! Authentication service.
//!
//! Provides username/password registration and login on top of a
//! [`UserRepository`]. Passwords are hashed with Argon2id and a fresh salt per
//! call.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::db::{RepositoryError, UserRepository};
use crate::models::{NewUser, User};

/// Hash checked against when the username is unknown, so both login failure
/// paths pay for one Argon2 verification.
static UNKNOWN_USER_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("unknown-user-placeholder").unwrap_or_else(|e| {
        tracing::error!("Failed to build unknown-user hash: {}", e);
        String::new()
    })
});

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user.
    ///
    /// The username pre-check gives a friendly error in the common case; the
    /// store rejects a duplicate that slips past it between check and insert.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the username or password is blank.
    /// Returns `AuthError::DuplicateUsername` if the username is already registered.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<User, AuthError> {
        require("username", username)?;
        require("password", password)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .insert(NewUser {
                username: username.to_owned(),
                password_hash,
                email: email.to_owned(),
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the user does not exist or
    /// the password is wrong. The two cases are indistinguishable to callers,
    /// in result and in cost: an unknown user is still verified against
    /// [`UNKNOWN_USER_HASH`].
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            verify_password(password, &UNKNOWN_USER_HASH)?;
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match or
/// the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use super::*;
    use crate::db::MemoryStore;

    /// Store whose username lookup always misses but whose insert reports a
    /// uniqueness conflict, as when another registration wins the race.
    struct RacingUserStore;

    #[async_trait]
    impl UserRepository for RacingUserStore {
        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<User>, RepositoryError> {
            Ok(None)
        }

        async fn insert(&self, _user: NewUser) -> Result<User, RepositoryError> {
            Err(RepositoryError::Conflict("username already exists".to_owned()))
        }
    }

    async fn time_failed_login(auth: &AuthService<'_>, username: &str) -> Duration {
        let start = Instant::now();
        let err = auth.login(username, "wrong").await.unwrap_err();
        let elapsed = start.elapsed();
        assert!(matches!(err, AuthError::InvalidCredentials));
        elapsed
    }

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw1", &hash).is_ok());
        assert!(matches!(
            verify_password("pw2", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_is_salted_per_call() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a).is_ok());
        assert!(verify_password("same", &b).is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let user = auth.register("alice", "pw1", "alice@mail.test").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@mail.test");
        assert_ne!(user.password_hash, "pw1");

        let logged_in = auth.login("alice", "pw1").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        auth.register("alice", "pw1", "a@mail.test").await.unwrap();
        let err = auth
            .register("alice", "other", "b@mail.test")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_register_requires_username_and_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.register("  ", "pw1", "a@mail.test").await,
            Err(AuthError::MissingField("username"))
        ));
        assert!(matches!(
            auth.register("alice", "", "a@mail.test").await,
            Err(AuthError::MissingField("password"))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register("alice", "pw1", "a@mail.test").await.unwrap();

        let wrong_password = auth.login("alice", "wrong").await.unwrap_err();
        let unknown_user = auth.login("bob", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_register_store_conflict_is_duplicate_username() {
        let store = RacingUserStore;
        let auth = AuthService::new(&store);

        let err = auth
            .register("alice", "pw1", "a@mail.test")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    #[test]
    fn test_unknown_user_hash_is_a_real_argon2id_hash() {
        assert!(UNKNOWN_USER_HASH.starts_with("$argon2id$"));
        assert!(PasswordHash::new(&UNKNOWN_USER_HASH).is_ok());
        assert!(matches!(
            verify_password("wrong", &UNKNOWN_USER_HASH),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_costs_a_password_verification() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register("alice", "pw1", "a@mail.test").await.unwrap();

        // First use builds the unknown-user hash; keep it out of the timing.
        time_failed_login(&auth, "bob").await;

        let wrong_password = time_failed_login(&auth, "alice").await;
        let unknown_user = time_failed_login(&auth, "bob").await;

        // Both paths run one Argon2 verification with the same parameters.
        assert!(
            unknown_user * 4 >= wrong_password,
            "unknown user {unknown_user:?} vs wrong password {wrong_password:?}"
        );
    }
}
