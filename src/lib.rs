// --- File: lib.rs ---
//! Multi-species Physarum (slime mould) trail simulation on a toroidal grid.
//!
//! Each species owns a trail grid and a block of particles. Every step
//! combines the grids through the attraction matrix, moves the particles
//! against the combined field, then deposits, blurs and decays the trails.

pub mod attraction;
pub mod blur;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod motion;
pub mod particle;
pub mod simulation;
pub mod trig;
pub mod utils;

pub use attraction::AttractionMatrix;
pub use config::{SimulationConfig, SpeciesConfig};
pub use error::{PhysarumError, Result};
pub use grid::{Interpolation, PheromoneGrid};
pub use motion::TurnRule;
pub use particle::{InitPattern, Particle};
pub use simulation::Simulation;
pub use trig::TrigTable;
