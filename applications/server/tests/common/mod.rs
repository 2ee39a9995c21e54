/// Common test utilities and fixtures
use anyhow::Result;
use calorie_storage::Database;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a file-backed test database with migrations applied
///
/// The returned `TempDir` must stay alive for the database file to
/// persist through the test.
pub async fn create_test_database() -> Result<(Arc<Database>, TempDir)> {
    let dir = TempDir::new()?;
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let db = Database::new(&url).await?;
    Ok((Arc::new(db), dir))
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_SECRET: &str = "test-secret-key";

    pub const TEST_USERNAME: &str = "fakeUser1";
    pub const TEST_PASSWORD: &str = "password1";

    pub const OTHER_USERNAME: &str = "fakeUser2";
    pub const OTHER_PASSWORD: &str = "password2";
}
