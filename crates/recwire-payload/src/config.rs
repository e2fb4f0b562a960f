/// Controls how JSON is imported into [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// When true, objects shaped `{"type":"Buffer","data":[..]}` with every
    /// element in `0..=255` are imported as raw bytes.
    pub revive_buffers: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            revive_buffers: true,
        }
    }
}
