/// Domain types for the calorie tracker
pub mod food_log;
pub mod ids;
pub mod user;

pub use food_log::{parse_date_key, DailyLog, MealEntry, MealEntryPatch, NewMealEntry};
pub use ids::{EntryId, UserId};
pub use user::{NewUser, UpdateUser, User};
