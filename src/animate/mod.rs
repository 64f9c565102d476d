pub(crate) mod animator;
pub(crate) mod canvas;
pub(crate) mod config;
pub(crate) mod palette;
pub(crate) mod stroke;
