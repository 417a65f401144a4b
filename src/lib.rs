pub mod airfoil;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod logger;
pub mod pipeline;
pub mod serialize;

pub use errors::{AirfoilError, ErrorClass, Result};
pub use pipeline::{convert_bytes, convert_path, convert_text, generate_profile, ConvertOptions, ProfileOutput};
pub use serialize::SerializationFormat;
