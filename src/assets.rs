pub(crate) mod color;
mod hero;
pub(crate) mod shape_set;
