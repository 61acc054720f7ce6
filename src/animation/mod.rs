pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod noise;
pub(crate) mod remap;
pub(crate) mod spring;
