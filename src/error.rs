// --- File: error.rs ---
use thiserror::Error;

/// Errors raised while validating a simulation configuration.
///
/// Every variant is a construction-time failure; a `Simulation` that was built
/// successfully has no error path while stepping.
#[derive(Debug, Error, PartialEq)]
pub enum PhysarumError {
    #[error("grid dimensions {width}x{height} must both be non-zero and fit in memory")]
    InvalidDimensions { width: usize, height: usize },
    #[error("at least one species config is required")]
    NoSpecies,
    #[error("particle count must be non-zero")]
    NoParticles,
    #[error("particle count {0} overflows once rounded up per species")]
    TooManyParticles(usize),
    #[error("species {species} steps {step} per iteration, must be shorter than {limit}")]
    StepTooLong { species: usize, step: f32, limit: f32 },
    #[error("attraction matrix is {actual}x{actual} but there are {expected} species")]
    AttractionMismatch { expected: usize, actual: usize },
    #[error("attraction matrix row {row} has {actual} entries, expected {expected}")]
    RaggedAttraction {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("trig table size {0} must be a non-zero power of two")]
    TrigTableSize(usize),
    #[error("blur pass count must be at least 1")]
    NoBlurPasses,
    #[error("zoom factor {0} must be finite and positive")]
    InvalidZoom(f32),
    #[error("worker count must be non-zero")]
    NoWorkers,
    #[error("unknown init pattern: {0}")]
    UnknownPattern(String),
}

pub type Result<T> = std::result::Result<T, PhysarumError>;
