pub mod extractors;
pub mod services;
pub mod validation;
