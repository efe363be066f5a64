use serde::Deserialize;

/// Options controlling a single validation run.
///
/// Can be deserialized from configuration, missing keys fall back to the defaults:
///
/// ```
/// # use micro_schema::ValidateOptions;
/// let options: ValidateOptions = serde_json::from_str(r#"{ "abort_early": true }"#).unwrap();
/// assert!(options.is_abort_early());
///
/// let options: ValidateOptions = serde_json::from_str("{}").unwrap();
/// assert!(!options.is_abort_early());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    abort_early: bool,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// stop at the first failing field instead of reporting all of them
    #[must_use]
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    #[inline]
    pub fn is_abort_early(&self) -> bool {
        self.abort_early
    }
}
