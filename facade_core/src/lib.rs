//! # facade_core - Facade Module Indicator Engine
//!
//! `facade_core` turns a small set of facade-module parameters into derived
//! engineering indicators: parameter integrity, module geometry, a sampled
//! stress profile, a dimensional correction series and design-to-field
//! correlations. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every pipeline stage is a pure function
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Deterministic**: identical input gives identical serialized output
//!
//! ## Quick Start
//!
//! ```rust
//! use facade_core::dataset::fallback_dataset;
//! use facade_core::calculations::analyze;
//!
//! let dataset = fallback_dataset();
//! let profile = dataset.active_profile().unwrap();
//! let report = analyze(&profile.parameters);
//!
//! assert_eq!(report.geometry.projected_area, 4.313);
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`parameters`] - Parameter names, materials and the parameter set
//! - [`rules`] - Static design rule table
//! - [`calculations`] - The five pipeline stages and the report
//! - [`dataset`] - Dataset file load/save with built-in fallback
//! - [`history`] - Bounded rolling analysis history
//! - [`session`] - Active profile, latest report and history
//! - [`equations`] - Formula registry and reference generation
//! - [`units`] - Angle wrappers and rounding helpers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod dataset;
pub mod equations;
pub mod errors;
pub mod history;
pub mod parameters;
pub mod rules;
pub mod session;
pub mod units;

pub use calculations::{analyze, calculate, AnalysisReport};
pub use dataset::{load_dataset, load_or_fallback, save_dataset, Dataset, DesignProfile, LoadedDataset};
pub use errors::{FacadeError, FacadeResult};
pub use parameters::{Material, ParamName, ParameterSet};
pub use session::AnalysisSession;
