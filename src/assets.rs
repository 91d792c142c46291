pub(crate) mod adjust;
pub(crate) mod decode;
pub(crate) mod encode;
