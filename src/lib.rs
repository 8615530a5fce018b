//! # Kaifuku - Typed n8n Workflow Generation and Validation
//!
//! **Kaifuku** builds, validates, and serializes n8n workflow documents with
//! a strongly typed data model. Its centerpiece is the self-healing
//! orchestrator: a fixed thirteen-node workflow that receives incident
//! reports over a webhook, routes them through an approval gate and an
//! action router, fires one of five HTTP remediation calls, and reports the
//! outcome back to the caller.
//!
//! ## Core Workflow
//!
//! 1. **Build**: assemble a [`workflow::WorkflowDocument`] through the pure
//!    [`workflow::WorkflowBuilder`], or call
//!    [`orchestrator::self_healing_workflow`] for the canonical topology.
//!    Node parameters are a tagged union per node type, so malformed
//!    parameter literals fail at construction instead of at engine load.
//! 2. **Validate**: run [`validator::validate`] over any workflow JSON value
//!    (generated or foreign) and inspect the resulting report.
//! 3. **Serialize**: emit pretty-printed JSON with insertion-order keys,
//!    ready for import into the engine.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaifuku::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let options = OrchestratorOptions::default();
//! let document = self_healing_workflow(&options)?;
//!
//! assert_eq!(document.nodes.len(), 13);
//!
//! let report = validate(&document.to_value()?);
//! assert!(report.is_valid());
//!
//! println!("{}", document.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! The execution semantics of the workflow (trigger dispatch, conditional
//! branching, HTTP retries, credential resolution) belong to the external
//! engine; this crate only guarantees that the document it hands over is
//! structurally sound.

pub mod error;
pub mod orchestrator;
pub mod prelude;
pub mod validator;
pub mod workflow;
