//! # sg-engine: Scratch Game Engine
//!
//! Generates scratch-card matrices from weighted probability tables and
//! computes the payout of a matrix for a given wager.
//!
//! ## Features
//!
//! - **Weighted generation**: per-cell standard weights, global bonus weights
//! - **Win combinations**: same-symbol counts and linear patterns, exclusive per group
//! - **Bonus symbols**: multiply, flat extra or miss, applied to winning rounds only
//! - **Configuration**: JSON or YAML, validated before play
//!
//! ## Architecture
//!
//! ```text
//! ScratchEngine
//!     │
//!     ├── GameConfig (symbols, probabilities, win combinations)
//!     └── MatrixGenerator (seedable ChaCha8 RNG)
//!           │
//!           v
//!     Grid → RewardEvaluator → CalculationResult
//! ```

pub mod combinations;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod grid;
pub mod parser;
pub mod probability;
pub mod symbols;

pub use combinations::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use grid::*;
pub use parser::*;
pub use probability::*;
pub use symbols::*;
