use std::sync::Arc;

use registrar_core::Registrar;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<Registrar>,
    pub config: AppConfig,
    /// Cancelled on shutdown; in-flight registrations derive their context from it.
    pub shutdown: CancellationToken,
}
