pub(crate) mod controller;
pub(crate) mod direction;
pub(crate) mod presentation;
