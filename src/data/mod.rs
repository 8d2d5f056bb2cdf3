pub mod collection;
pub mod curve;
pub mod loader;
