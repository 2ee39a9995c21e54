//! Calorie Tracker Core
//!
//! Platform-agnostic domain types, traits, and error handling for the
//! calorie tracker.
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `DailyLog`, `MealEntry` and their id newtypes
//! - **Food-Log Operations**: date-keyed lookup, filtering, and mutation of
//!   a user's embedded food log
//! - **Core Traits**: `UserStore`, the persistence boundary
//! - **Error Handling**: unified `CalorieError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use calorie_core::types::{NewMealEntry, NewUser, User};
//! use calorie_core::types::parse_date_key;
//!
//! let mut user = User::new(NewUser {
//!     username: "alice".to_string(),
//!     password_hash: "$2b$12$...".to_string(),
//!     email: "alice@example.com".to_string(),
//! });
//!
//! let date = parse_date_key("2019-06-30").unwrap();
//! user.add_meal(date, NewMealEntry {
//!     meal: "breakfast".to_string(),
//!     item: "apple".to_string(),
//!     calories: 25.0,
//! });
//! assert_eq!(user.food_log.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CalorieError, Result};
pub use traits::UserStore;
pub use types::{
    // User
    NewUser, UpdateUser, User,
    // Food log
    parse_date_key, DailyLog, MealEntry, MealEntryPatch, NewMealEntry,
    // Ids
    EntryId, UserId,
};
