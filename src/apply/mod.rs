pub mod container;
pub mod engine;
pub mod locator;
pub mod normalize;
pub mod strategy;
