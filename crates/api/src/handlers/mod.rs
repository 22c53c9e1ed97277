pub mod enrollment;
pub mod progress;
