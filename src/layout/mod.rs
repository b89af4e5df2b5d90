pub(crate) mod constraint;
pub(crate) mod guide;
pub(crate) mod layouter;
pub(crate) mod resolution;
pub(crate) mod resolve;
pub(crate) mod solver;
