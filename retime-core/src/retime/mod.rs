pub(crate) mod assign;
pub(crate) mod frame;
pub(crate) mod plan;
pub(crate) mod session;
