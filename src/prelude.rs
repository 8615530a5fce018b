//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so callers can pull
//! in the core API with a single `use`.
//!
//! # Example
//!
//! ```rust
//! use kaifuku::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let document = self_healing_workflow(&OrchestratorOptions::default())?;
//! let report = validate(&document.to_value()?);
//! println!("valid: {}, score: {}", report.is_valid(), report.score());
//! # Ok(())
//! # }
//! ```

// Document model and builder
pub use crate::workflow::{
    ConnectionTarget, Node, NodeParameters, NodeType, Position, WorkflowBuilder, WorkflowDocument,
};

// The canonical self-healing orchestrator
pub use crate::orchestrator::{OrchestratorOptions, actions, self_healing_workflow};

// Validation
pub use crate::validator::{ValidationIssue, ValidationReport, render_graph, validate};

// Error types
pub use crate::error::{BuildError, DocumentError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
