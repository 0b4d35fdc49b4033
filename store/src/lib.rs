// Crate that keeps the persistent user table and answers credential checks

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single row of the user table
/// The username column is the unique key; uniqueness is enforced on insert
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

/// Outcome of an authentication or registration attempt
/// Immutable once produced; the message is shown to the user verbatim
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthResult {
    pub succeeded: bool,
    pub message: String,
}

impl AuthResult {
    fn ok(message: &str) -> Self {
        Self {
            succeeded: true,
            message: String::from(message),
        }
    }

    fn err(error: &AuthError) -> Self {
        Self {
            succeeded: false,
            message: error.to_string(),
        }
    }
}

/// Reasons an attempt can fail
/// The login message does not reveal whether the username exists
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUser,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// The interface the gate window authenticates against
/// Failures are converted to an [AuthResult] here and never propagate further
pub trait CredentialStore {
    fn try_register(&self, username: &str, password: &str) -> AuthResult;
    fn try_login(&self, username: &str, password: &str) -> AuthResult;
}

/// File-backed user table, one JSON document holding all rows
/// The file is opened per call and never held across frames
#[derive(Clone, Debug)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new user, failing if the username is already taken
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let mut rows = self.load()?;

        // Username needs to be unique to act as the table key
        if rows.iter().any(|r| r.username == username) {
            return Err(AuthError::DuplicateUser);
        }

        // Add to the end and save the whole table again
        rows.push(UserRecord {
            username: String::from(username),
            password: String::from(password),
        });
        self.save(&rows)
    }

    /// Check a username & password pair against the table
    /// Both columns are compared by exact byte equality
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let rows = self.load()?;

        if rows
            .iter()
            .any(|r| r.username == username && r.password == password)
        {
            Ok(())
        } else {
            // Same error for an unknown user and a wrong password
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Load all rows from the table file
    fn load(&self) -> Result<Vec<UserRecord>, AuthError> {
        match File::open(&self.path) {
            // A table that doesn't exist yet reads as empty
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AuthError::StoreUnavailable(e.to_string())),
            Ok(f) => {
                serde_json::from_reader(f).map_err(|e| AuthError::StoreUnavailable(e.to_string()))
            }
        }
    }

    /// Write all rows back to the table file
    fn save(&self, rows: &Vec<UserRecord>) -> Result<(), AuthError> {
        let file =
            File::create(&self.path).map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        serde_json::to_writer_pretty(file, rows)
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))
    }
}

impl CredentialStore for UserStore {
    fn try_register(&self, username: &str, password: &str) -> AuthResult {
        tracing::info!(username, "registration attempt");
        match self.register(username, password) {
            Ok(()) => {
                tracing::info!(username, "new user registered");
                AuthResult::ok("registration successful")
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "registration failed");
                AuthResult::err(&e)
            }
        }
    }

    fn try_login(&self, username: &str, password: &str) -> AuthResult {
        tracing::info!(username, "login attempt");
        match self.login(username, password) {
            Ok(()) => {
                tracing::info!(username, "login succeeded");
                AuthResult::ok("login successful")
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "login failed");
                AuthResult::err(&e)
            }
        }
    }
}
