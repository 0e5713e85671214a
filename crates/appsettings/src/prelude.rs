pub use appsettings_types::error::{AppResult, Error};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
