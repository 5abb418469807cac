//! Error types for the simulation host.
//!
//! [`SimError`] wraps every failure mode of start-up and the tick loop so
//! `main` can propagate with `?`.

/// Top-level error for the `verdant-sim` binary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: verdant_crops::ConfigError,
    },

    /// The crop engine rejected an operation.
    #[error("crop error: {source}")]
    Crop {
        /// The underlying crop error.
        #[from]
        source: verdant_crops::CropError,
    },

    /// A field species is not written as `owner:name`.
    #[error("invalid species reference {value:?}, expected owner:name")]
    InvalidSpecies {
        /// The rejected reference.
        value: String,
    },

    /// The field lists no species to plant.
    #[error("field config lists no species")]
    NoSpecies,
}
