/// Identifiers of bible sheets, sequences, shots and reference images.
///
/// Stored as opaque text so ids minted by the editor (UUIDs, slugs) pass
/// through unchanged.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
