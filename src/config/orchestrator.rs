//! Request orchestration settings.

/// Settings for a [`RequestOrchestrator`](crate::orchestrator::RequestOrchestrator).
///
/// ## Default Values
///
/// - `max_fields`: 256
/// - `include_relationships`: true
/// - `log_denials`: true
///
/// ## Example
///
/// ```rust
/// use resource_access::config::OrchestratorConfig;
///
/// // Reads return attributes only, denials are not logged
/// let config = OrchestratorConfig::builder()
///     .include_relationships(false)
///     .log_denials(false)
///     .build();
///
/// assert_eq!(config.max_fields, 256);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct OrchestratorConfig {
    /// Maximum number of field names in a read list or write set.
    ///
    /// Larger requests are rejected with
    /// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).
    #[builder(default = 256)]
    pub max_fields: usize,

    /// Whether reads without an explicit field list include relationships.
    ///
    /// Explicitly requested relationships are always considered.
    #[builder(default = true)]
    pub include_relationships: bool,

    /// Whether denials are logged as `access_denied` records.
    #[builder(default = true)]
    pub log_denials: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl OrchestratorConfig {
    /// Returns `true` if a request naming `count` fields is within bounds.
    pub fn accepts_field_count(&self, count: usize) -> bool {
        count <= self.max_fields
    }
}
