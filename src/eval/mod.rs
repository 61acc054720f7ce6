pub(crate) mod context;
pub(crate) mod evaluator;
pub(crate) mod fingerprint;
pub(crate) mod parallel;
