use super::service::DbManager;
use crate::shared::config::DbConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use crate::{log_info, log_warn};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Where the access layer is in its startup/shutdown sequence
#[derive(Debug, Clone)]
pub enum ConnectionState {
    /// Not started, or shut down cleanly
    Uninitialized,
    /// Connection attempt in progress
    Connecting,
    /// Both stores reachable and the facade is usable
    Ready(Arc<DbManager>),
    /// Startup failed; the host is expected to abort
    Failed { reason: String, failed_at: Instant },
}

impl ConnectionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConnectionState::Ready(_))
    }

    pub fn manager(&self) -> AppResult<Arc<DbManager>> {
        match self {
            ConnectionState::Ready(manager) => Ok(Arc::clone(manager)),
            ConnectionState::Failed { reason, .. } => Err(AppError::ServiceUnavailable(format!(
                "Database access failed to start: {}",
                reason
            ))),
            ConnectionState::Connecting => Err(AppError::ServiceUnavailable(
                "Database access is connecting, please try again".to_string(),
            )),
            ConnectionState::Uninitialized => Err(AppError::ServiceUnavailable(
                "Database access has not been started".to_string(),
            )),
        }
    }

    pub fn status_message(&self) -> String {
        match self {
            ConnectionState::Uninitialized => "Database access not started".to_string(),
            ConnectionState::Connecting => "Database access connecting...".to_string(),
            ConnectionState::Ready(_) => "Database access ready".to_string(),
            ConnectionState::Failed { reason, failed_at } => format!(
                "Database access failed {}s ago: {}",
                failed_at.elapsed().as_secs(),
                reason
            ),
        }
    }
}

/// Owns the facade for the lifetime of the hosting service.
///
/// `Uninitialized -> Connecting -> Ready | Failed`, and `Ready -> Uninitialized`
/// on shutdown. `Failed` is terminal. The state lock is never held across an
/// await point.
pub struct ServiceLifecycle {
    state: RwLock<ConnectionState>,
}

impl Default for ServiceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves a `Connecting` lifecycle to `Failed` if the startup future is
/// dropped before it settles.
struct ConnectingGuard<'a> {
    lifecycle: &'a ServiceLifecycle,
    settled: bool,
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.lifecycle.write_state();
        if matches!(*state, ConnectionState::Connecting) {
            log_warn!("Database access startup was cancelled while connecting");
            *state = ConnectionState::Failed {
                reason: "startup was cancelled before both stores connected".to_string(),
                failed_at: Instant::now(),
            };
        }
    }
}

impl ServiceLifecycle {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ConnectionState::Uninitialized),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ConnectionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ConnectionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Connect both stores and move to `Ready`.
    ///
    /// A connection failure leaves the lifecycle in `Failed` and is returned
    /// so the host can abort startup.
    pub async fn start(&self, config: &DbConfig) -> AppResult<Arc<DbManager>> {
        self.start_with(DbManager::connect(config)).await
    }

    /// Like [`start`](Self::start), with the facade built by `connect`.
    ///
    /// Dropping the returned future mid-connect leaves the lifecycle `Failed`.
    pub async fn start_with<F>(&self, connect: F) -> AppResult<Arc<DbManager>>
    where
        F: Future<Output = AppResult<DbManager>>,
    {
        {
            let mut state = self.write_state();
            if !matches!(*state, ConnectionState::Uninitialized) {
                return Err(AppError::ServiceUnavailable(format!(
                    "Cannot start database access: {}",
                    state.status_message()
                )));
            }
            *state = ConnectionState::Connecting;
        }
        let mut guard = ConnectingGuard {
            lifecycle: self,
            settled: false,
        };

        let result = connect.await;

        let mut state = self.write_state();
        guard.settled = true;
        match result {
            Ok(manager) => {
                let manager = Arc::new(manager);
                *state = ConnectionState::Ready(Arc::clone(&manager));
                log_info!("Database access started");
                Ok(manager)
            }
            Err(e) => {
                LogContext::error_with_context(&e, "Database access startup");
                *state = ConnectionState::Failed {
                    reason: e.to_string(),
                    failed_at: Instant::now(),
                };
                Err(e)
            }
        }
    }

    /// The facade, or `ServiceUnavailable` unless the lifecycle is `Ready`.
    pub fn manager(&self) -> AppResult<Arc<DbManager>> {
        self.read_state().manager()
    }

    pub fn state(&self) -> ConnectionState {
        self.read_state().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.read_state().is_ready()
    }

    /// Close both stores and return to `Uninitialized`. No-op unless `Ready`.
    pub async fn shutdown(&self) {
        let manager = {
            let mut state = self.write_state();
            let manager = match &*state {
                ConnectionState::Ready(manager) => Arc::clone(manager),
                other => {
                    log_warn!("Shutdown requested while {}", other.status_message());
                    return;
                }
            };
            *state = ConnectionState::Uninitialized;
            manager
        };

        manager.close().await;
        log_info!("Database access stopped");
    }
}
