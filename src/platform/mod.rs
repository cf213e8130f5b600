pub(crate) mod host;
pub(crate) mod profile;
pub(crate) mod session;
