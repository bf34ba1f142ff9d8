//! Name environment: the session-scoped lookup engine.

mod cancel;
mod environment;
mod options;
mod overlay;

pub use cancel::{CancellableEnvironment, CancellationSource};
pub use environment::NameEnvironment;
pub use options::{EnvironmentOptions, ScanPolicy};
pub use overlay::WorkingCopyOverlay;
