// Library exports for testing
pub mod actuator;
pub mod config;
pub mod constants;
pub mod intent;
pub mod notes;
pub mod reactor;
pub mod results;
pub mod session;
pub mod smoothing;
pub mod trial;
pub mod voice;
pub mod zone;
