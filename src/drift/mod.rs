pub mod compare;
pub mod drift_model;
pub mod signature;
