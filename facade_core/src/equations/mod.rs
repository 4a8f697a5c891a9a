//! # Indicator Formulas
//!
//! Metadata for every formula the pipeline evaluates, kept in one place so
//! the heuristics can be reviewed without reading the stage code.
//!
//! - [`registry`] - `Equation` enum, metadata and markdown generation

pub mod registry;

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
