/// Metadata value type. JSON values cover everything the loaders attach and
/// everything the store backends can persist.
pub type Value = serde_json::Value;
