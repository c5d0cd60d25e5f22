//! User directory persistence.
//!
//! One table mapping a platform user id to a registered email and display
//! name. Raw SQL with rusqlite, no ORM. All access goes through a single
//! connection behind a mutex so registrations are serialized.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use thiserror::Error;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user {0} is already registered")]
    DuplicateUserId(String),
    #[error("email {0} is already registered")]
    DuplicateEmail(String),
    #[error("directory storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Persistent mapping from platform user id to registered email.
///
/// Records are insert-only: there is no update or unregister operation, and a
/// registration that collides on either key is rejected without touching the
/// existing row.
pub struct UserDirectory {
    conn: Mutex<Connection>,
}

impl UserDirectory {
    /// Open the directory at the default database location.
    pub fn open() -> Result<Self> {
        let conn = super::init_db()?;
        Ok(Self::new(conn))
    }

    /// Wrap an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// In-memory directory, used by tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        super::migrate(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn register(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> Result<(), DirectoryError> {
        let mut conn = self.conn.lock().expect("directory mutex poisoned");
        let tx = conn.transaction()?;

        let id_taken: Option<String> = tx
            .query_row(
                "SELECT user_id FROM users WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        if id_taken.is_some() {
            return Err(DirectoryError::DuplicateUserId(user_id.to_string()));
        }

        let email_taken: Option<String> = tx
            .query_row(
                "SELECT email FROM users WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if email_taken.is_some() {
            return Err(DirectoryError::DuplicateEmail(email.to_string()));
        }

        tx.execute(
            "INSERT INTO users (user_id, email, name) VALUES (?1, ?2, ?3)",
            params![user_id, email, name],
        )?;
        tx.commit()?;

        Ok(())
    }

    pub fn lookup_email(&self, user_id: &str) -> Result<Option<String>, DirectoryError> {
        let conn = self.conn.lock().expect("directory mutex poisoned");
        let email = conn
            .query_row(
                "SELECT email FROM users WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(email)
    }

    /// All registered users, ordered by id.
    pub fn list(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let conn = self.conn.lock().expect("directory mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT user_id, email, name FROM users ORDER BY user_id")?;

        let users = stmt
            .query_map([], |row| {
                Ok(UserRecord {
                    user_id: row.get(0)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }
}
