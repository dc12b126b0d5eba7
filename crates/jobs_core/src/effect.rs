/// Side effects requested by [`crate::update`], executed by the shell in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the filter record to the durable key-value slot.
    PersistFilters { key: String, json: String },
    /// Replace the page's query string (without the leading `?`).
    ReplaceQuery { query: String },
}
