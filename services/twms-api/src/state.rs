//! Application state shared across request handlers.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::endpoint_config::{load_endpoints, Endpoint};

/// Shared application state.
///
/// Endpoints are built once at startup and never mutated, so handlers
/// read them concurrently with no locking.
pub struct AppState {
    pub endpoints: HashMap<String, Endpoint>,
}

impl AppState {
    pub fn new(config_dir: &Path) -> Result<Self> {
        let endpoints = load_endpoints(config_dir)?;
        Ok(Self { endpoints })
    }
}
