pub(crate) mod ledger;
pub(crate) mod params;
pub(crate) mod pattern;
pub(crate) mod spline;
pub(crate) mod tracer;
