//! Calorie Tracker Storage
//!
//! `SQLite` persistence for user accounts and their food logs.
//!
//! The user record is stored document-style: scalar account columns plus
//! the entire food log in a single JSON column. Food-log mutations load
//! the record, mutate it in memory, and rewrite the whole log column.
//! There is no locking around that read-modify-write sequence, so two
//! concurrent mutations of the same user race and the last write wins at
//! the record level.
//!
//! # Example
//!
//! ```rust,no_run
//! use calorie_core::{NewUser, UserStore};
//! use calorie_storage::Database;
//!
//! # async fn example() -> calorie_core::Result<()> {
//! let db = Database::new("sqlite://./data/calorie.db").await?;
//!
//! let user = db
//!     .create_user(NewUser {
//!         username: "alice".to_string(),
//!         password_hash: "$2b$12$...".to_string(),
//!         email: "alice@example.com".to_string(),
//!     })
//!     .await?;
//!
//! assert!(db.find_user(&user.username).await?.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod database;

pub use database::Database;
