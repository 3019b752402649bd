//! Mock auth provider for testing.
//!
//! Keeps registered users in memory and issues predictable tokens of the
//! form `token-for-{user_id}`, so tests never need a hosted auth backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthToken, AuthenticatedUser, UserId};
use crate::ports::AuthProvider;

struct MockAccount {
    user: AuthenticatedUser,
    password: String,
}

/// In-memory AuthProvider for tests.
#[derive(Default)]
pub struct MockAuthProvider {
    /// email -> account
    accounts: RwLock<HashMap<String, MockAccount>>,
    /// token -> user
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockAuthProvider {
    /// Creates an empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with a known token, without going through sign_up.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Registers a simple test user reachable with token `token-for-{id}`.
    pub fn with_test_user(self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            format!("{}@test.example.com", user_id),
            None,
        );
        let token = format!("token-for-{}", user_id);
        self.with_user(token, user)
    }

    /// Forces all operations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Number of live tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }

    fn check_forced_error(&self) -> Result<(), AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError> {
        self.check_forced_error()?;

        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::RegistrationRejected(
                "User already registered".to_string(),
            ));
        }

        let user_id = format!("user-{}", accounts.len() + 1);
        let user = AuthenticatedUser::new(UserId::new(&user_id).unwrap(), email, None);
        accounts.insert(
            email.to_string(),
            MockAccount {
                user: user.clone(),
                password: password.to_string(),
            },
        );

        let token = format!("token-for-{}", user_id);
        self.tokens
            .write()
            .unwrap()
            .insert(token.clone(), user.clone());

        Ok((user, AuthToken::new(token)))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, AuthToken), AuthError> {
        self.check_forced_error()?;

        let accounts = self.accounts.read().unwrap();
        let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
        if account.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        let user = account.user.clone();
        let token = format!("token-for-{}", user.id);
        self.tokens
            .write()
            .unwrap()
            .insert(token.clone(), user.clone());

        Ok((user, AuthToken::new(token)))
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.check_forced_error()?;

        match self.tokens.write().unwrap().remove(token) {
            Some(_) => Ok(()),
            None => Err(AuthError::InvalidToken),
        }
    }

    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced_error()?;

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
