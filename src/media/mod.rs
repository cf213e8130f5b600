pub(crate) mod controller;
pub(crate) mod handle;
pub(crate) mod lightbox;
pub(crate) mod player;
