//! Deterministic headless host and media handles for tests and previews.

pub(crate) mod host;
pub(crate) mod media;

pub use host::{SimHost, SimStats};
pub use media::{AutoplayPolicy, SimMedia};
