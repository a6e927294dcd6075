//! Application state management.

use domain_parking::InMemoryLotRepository;

/// Shared application state.
///
/// Cloning is cheap: the catalog is held behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Lot catalog, loaded once at startup
    pub catalog: InMemoryLotRepository,
}
