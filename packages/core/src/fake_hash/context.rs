use std::future::{Future, pending};
use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use super::error::RegistrarError;
use crate::repository::RepositoryError;

/// Cancellation and deadline for one registration.
///
/// Every repository call made by the registrar goes through [`run`](Self::run).
#[derive(Clone, Debug)]
pub struct OperationContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: None,
        }
    }

    /// Fail calls that start or finish after `timeout` from now.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Await a repository call unless the context is cancelled or expires first.
    pub async fn run<T, F>(&self, call: F) -> Result<T, RegistrarError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(at) => sleep_until(at).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RegistrarError::Cancelled),
            _ = deadline => Err(RegistrarError::DeadlineExceeded),
            result = call => result.map_err(RegistrarError::from),
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}
