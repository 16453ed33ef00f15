//! Spec set for the documentation site at runtime.
//!
//! Built once while the application starts and handed to whatever serves the
//! pages. It never fails: an unreadable content root just means no specs.

use tracing::{debug, warn};

use crate::discover::{self, ContentRoot};
use crate::generate::OpenApiSource;

/// Every spec file under `root`, flattened across projects.
pub fn load_openapi(root: &ContentRoot) -> OpenApiSource {
    match discover::find_all_specs(root) {
        Ok(specs) => {
            debug!("loaded {} spec(s) from {}", specs.len(), root.path().display());
            OpenApiSource::new(specs)
        }
        Err(e) => {
            warn!("Could not scan for OpenAPI specs, using empty list: {}", e);
            OpenApiSource::default()
        }
    }
}
