pub(crate) mod builder;
pub(crate) mod color_grid;
