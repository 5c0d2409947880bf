use std::sync::Arc;

use paperlens_core::Controller;

/// Shared application state accessible from all handlers.
///
/// A single controller serves every browser tab, so there is one
/// analysis in flight at a time server-wide.
pub struct AppState {
    pub controller: Arc<Controller>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}
