pub(crate) mod cycle;
pub(crate) mod interpolate;
pub(crate) mod outline;
pub(crate) mod visual;
