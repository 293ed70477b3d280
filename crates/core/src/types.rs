/// Primary key type for persisted rows (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Instant type used for cooldown bookkeeping and row audit columns (UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
