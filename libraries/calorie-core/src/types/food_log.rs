/// Food log domain types and mutation logic
use crate::error::{CalorieError, Result};
use crate::types::{EntryId, User};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// All meal entries recorded for one date key
///
/// Date keys are epoch milliseconds and compare by exact equality: two
/// timestamps differing by any amount (including a timezone offset) are
/// distinct dates. A daily log is created lazily by the first meal added
/// for its key and is never removed, even when its meals empty out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Epoch-millisecond date key
    pub date: i64,

    /// Meal entries in insertion order
    pub meals: Vec<MealEntry>,
}

impl DailyLog {
    /// Meal entries matching the given filters
    ///
    /// Filters compose as an intersection: an entry is kept only when it
    /// matches every filter that is present. Matching is exact string
    /// equality on the `meal` and `item` fields.
    pub fn entries_matching(&self, meal: Option<&str>, item: Option<&str>) -> Vec<MealEntry> {
        self.meals
            .iter()
            .filter(|entry| match meal {
                Some(meal) => entry.meal == meal,
                None => true,
            })
            .filter(|entry| match item {
                Some(item) => entry.item == item,
                None => true,
            })
            .cloned()
            .collect()
    }
}

/// A single food item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Store-assigned identifier, immutable after creation
    pub id: EntryId,

    /// Meal category, e.g. "breakfast"
    pub meal: String,

    /// Food item description, e.g. "apple"
    pub item: String,

    /// Calorie count
    pub calories: f64,
}

/// Fields for a meal entry about to be created
#[derive(Debug, Clone, Deserialize)]
pub struct NewMealEntry {
    /// Meal category
    pub meal: String,

    /// Food item description
    pub item: String,

    /// Calorie count
    pub calories: f64,
}

/// Partial update of a meal entry
///
/// Absent fields leave the stored value unchanged; the entry id is
/// always preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealEntryPatch {
    /// New meal category
    pub meal: Option<String>,

    /// New item description
    pub item: Option<String>,

    /// New calorie count
    pub calories: Option<f64>,
}

/// Parse a date path parameter into an epoch-millisecond key
///
/// Accepts a raw epoch-millisecond integer, an RFC 3339 timestamp, or a
/// `YYYY-MM-DD` date (interpreted as UTC midnight). Anything else fails
/// with [`CalorieError::InvalidDate`].
pub fn parse_date_key(raw: &str) -> Result<i64> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.timestamp_millis());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().timestamp_millis());
    }
    Err(CalorieError::InvalidDate(raw.to_string()))
}

/// Food-log operations on a loaded user record
///
/// These mutate the in-memory record only; persisting the result is the
/// caller's responsibility.
impl User {
    /// The daily log with the exactly-equal date key, if any
    pub fn daily_log(&self, date: i64) -> Option<&DailyLog> {
        self.food_log.iter().find(|log| log.date == date)
    }

    fn daily_log_mut(&mut self, date: i64) -> Option<&mut DailyLog> {
        self.food_log.iter_mut().find(|log| log.date == date)
    }

    /// Add a meal entry under the given date key
    ///
    /// Creates the daily log lazily when no log exists for the key,
    /// otherwise appends to the existing one. Returns the id assigned to
    /// the new entry.
    pub fn add_meal(&mut self, date: i64, new_entry: NewMealEntry) -> EntryId {
        let entry = MealEntry {
            id: EntryId::generate(),
            meal: new_entry.meal,
            item: new_entry.item,
            calories: new_entry.calories,
        };
        let id = entry.id.clone();
        match self.daily_log_mut(date) {
            Some(log) => log.meals.push(entry),
            None => self.food_log.push(DailyLog {
                date,
                meals: vec![entry],
            }),
        }
        id
    }

    /// Apply a partial update to the meal entry with the given id
    ///
    /// Fails with [`CalorieError::LogNotFound`] when no daily log exists
    /// for the date key, and [`CalorieError::EntryNotFound`] when the day
    /// holds no entry with the id. The entry keeps its id; only fields
    /// present in the patch are overwritten.
    pub fn update_meal(&mut self, date: i64, id: &str, patch: MealEntryPatch) -> Result<()> {
        let log = self
            .daily_log_mut(date)
            .ok_or(CalorieError::LogNotFound(date))?;
        let entry = log
            .meals
            .iter_mut()
            .find(|entry| entry.id.as_str() == id)
            .ok_or_else(|| CalorieError::EntryNotFound(id.to_string()))?;

        if let Some(meal) = patch.meal {
            entry.meal = meal;
        }
        if let Some(item) = patch.item {
            entry.item = item;
        }
        if let Some(calories) = patch.calories {
            entry.calories = calories;
        }
        Ok(())
    }

    /// Remove the meal entry with the given id, returning it
    ///
    /// The remaining entries keep their original order. Fails like
    /// [`User::update_meal`] when the date or id cannot be located.
    pub fn remove_meal(&mut self, date: i64, id: &str) -> Result<MealEntry> {
        let log = self
            .daily_log_mut(date)
            .ok_or(CalorieError::LogNotFound(date))?;
        let index = log
            .meals
            .iter()
            .position(|entry| entry.id.as_str() == id)
            .ok_or_else(|| CalorieError::EntryNotFound(id.to_string()))?;
        Ok(log.meals.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewUser;

    fn test_user() -> User {
        User::new(NewUser {
            username: "fakeUser1".to_string(),
            password_hash: "hash".to_string(),
            email: "fakeUser1@gmail.com".to_string(),
        })
    }

    fn entry(meal: &str, item: &str, calories: f64) -> NewMealEntry {
        NewMealEntry {
            meal: meal.to_string(),
            item: item.to_string(),
            calories,
        }
    }

    #[test]
    fn new_user_starts_with_empty_food_log() {
        assert!(test_user().food_log.is_empty());
    }

    #[test]
    fn add_meal_creates_daily_log_lazily() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();

        user.add_meal(date, entry("breakfast", "apple", 25.0));

        assert_eq!(user.food_log.len(), 1);
        assert_eq!(user.food_log[0].date, date);
        assert_eq!(user.food_log[0].meals.len(), 1);
    }

    #[test]
    fn second_meal_for_same_date_appends_to_existing_log() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();

        user.add_meal(date, entry("breakfast", "apple", 25.0));
        user.add_meal(date, entry("breakfast", "banana", 50.0));

        assert_eq!(user.food_log.len(), 1);
        assert_eq!(user.food_log[0].meals.len(), 2);
    }

    #[test]
    fn date_keys_compare_by_exact_equality() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();

        user.add_meal(date, entry("breakfast", "apple", 25.0));
        // One millisecond later is a different date key entirely.
        user.add_meal(date + 1, entry("breakfast", "banana", 50.0));

        assert_eq!(user.food_log.len(), 2);
        assert!(user.daily_log(date).is_some());
        assert!(user.daily_log(date + 1).is_some());
    }

    #[test]
    fn filters_intersect() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        user.add_meal(date, entry("breakfast", "apple", 25.0));
        user.add_meal(date, entry("breakfast", "banana", 50.0));
        user.add_meal(date, entry("lunch", "cereal", 120.0));

        let log = user.daily_log(date).unwrap();

        assert_eq!(log.entries_matching(None, None).len(), 3);
        assert_eq!(log.entries_matching(Some("breakfast"), None).len(), 2);
        assert_eq!(
            log.entries_matching(Some("breakfast"), Some("apple")).len(),
            1
        );
        assert_eq!(
            log.entries_matching(Some("lunch"), Some("apple")).len(),
            0
        );
    }

    #[test]
    fn update_meal_preserves_id_and_untouched_fields() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        let id = user.add_meal(date, entry("breakfast", "apple", 25.0));

        user.update_meal(
            date,
            id.as_str(),
            MealEntryPatch {
                item: Some("pear".to_string()),
                ..MealEntryPatch::default()
            },
        )
        .unwrap();

        let updated = &user.daily_log(date).unwrap().meals[0];
        assert_eq!(updated.id, id);
        assert_eq!(updated.meal, "breakfast");
        assert_eq!(updated.item, "pear");
        assert_eq!(updated.calories, 25.0);
    }

    #[test]
    fn update_meal_unknown_date_fails() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        let id = user.add_meal(date, entry("breakfast", "apple", 25.0));

        let result = user.update_meal(date + 1, id.as_str(), MealEntryPatch::default());
        assert!(matches!(result, Err(CalorieError::LogNotFound(_))));
    }

    #[test]
    fn update_meal_unknown_id_fails() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        user.add_meal(date, entry("breakfast", "apple", 25.0));

        let result = user.update_meal(date, "bogus", MealEntryPatch::default());
        assert!(matches!(result, Err(CalorieError::EntryNotFound(_))));
    }

    #[test]
    fn remove_meal_deletes_exactly_one_and_keeps_order() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        let first = user.add_meal(date, entry("breakfast", "apple", 25.0));
        user.add_meal(date, entry("breakfast", "banana", 50.0));
        user.add_meal(date, entry("lunch", "cereal", 120.0));

        let removed = user.remove_meal(date, first.as_str()).unwrap();
        assert_eq!(removed.item, "apple");

        let remaining = &user.daily_log(date).unwrap().meals;
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].item, "banana");
        assert_eq!(remaining[1].item, "cereal");
    }

    #[test]
    fn remove_meal_leaves_empty_daily_log_in_place() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        let id = user.add_meal(date, entry("breakfast", "apple", 25.0));

        user.remove_meal(date, id.as_str()).unwrap();

        // The day persists with an empty meals list.
        assert_eq!(user.food_log.len(), 1);
        assert!(user.daily_log(date).unwrap().meals.is_empty());
    }

    #[test]
    fn parse_date_key_accepts_date_only() {
        // 2019-06-30T00:00:00Z
        assert_eq!(parse_date_key("2019-06-30").unwrap(), 1_561_852_800_000);
    }

    #[test]
    fn parse_date_key_accepts_rfc3339() {
        assert_eq!(
            parse_date_key("2019-06-30T00:00:00Z").unwrap(),
            1_561_852_800_000
        );
        // Offsets shift the key; they are not truncated away.
        assert_eq!(
            parse_date_key("2019-06-30T00:00:00+02:00").unwrap(),
            1_561_852_800_000 - 2 * 3600 * 1000
        );
    }

    #[test]
    fn parse_date_key_accepts_raw_millis() {
        assert_eq!(parse_date_key("1561852800000").unwrap(), 1_561_852_800_000);
    }

    #[test]
    fn parse_date_key_rejects_garbage() {
        assert!(matches!(
            parse_date_key("notadate"),
            Err(CalorieError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date_key(""),
            Err(CalorieError::InvalidDate(_))
        ));
    }

    #[test]
    fn food_log_serializes_round_trip() {
        let mut user = test_user();
        let date = parse_date_key("2019-06-30").unwrap();
        user.add_meal(date, entry("breakfast", "apple", 25.0));

        let json = serde_json::to_string(&user.food_log).unwrap();
        let parsed: Vec<DailyLog> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user.food_log);
    }

    #[test]
    fn user_serialization_omits_password_hash() {
        let value = serde_json::to_value(test_user()).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert!(value.get("username").is_some());
        assert!(value.get("foodLog").is_some());
    }
}
