use std::time::Duration;

use serde::Deserialize;

/// Registrar configuration, usually the `[registrar]` section of the app config.
#[derive(Debug, Deserialize, Clone)]
pub struct RegistrarConfig {
    /// Serialize registrations that target the same file or location. Default: true.
    #[serde(default = "default_serialize_by_identity")]
    pub serialize_by_identity: bool,
    /// Deadline for a single registration in seconds; 0 disables it. Default: 30.
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,
}

fn default_serialize_by_identity() -> bool {
    true
}
fn default_operation_timeout_secs() -> u64 {
    30
}

impl RegistrarConfig {
    /// The per-registration deadline, if one is configured.
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_secs > 0).then(|| Duration::from_secs(self.operation_timeout_secs))
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            serialize_by_identity: default_serialize_by_identity(),
            operation_timeout_secs: default_operation_timeout_secs(),
        }
    }
}
