pub(crate) mod bubble;
pub(crate) mod preview;
pub(crate) mod surface;
