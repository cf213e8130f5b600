pub(crate) mod options;
