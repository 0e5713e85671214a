pub use crate::error::{AppResult, Error};

// vim: ts=4
