pub(crate) mod preflight;
pub(crate) mod resolver;
