pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";
