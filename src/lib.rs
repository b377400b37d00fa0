//! mathsolver-rs routes a natural-language math question through an LLM
//! agent that can call a calculator pipeline and a Wikipedia lookup, and
//! returns a step-by-step explanation plus a final numeric result.
//!
//! The agent is a bounded reason-then-act loop over the registered tools; a
//! response normalizer falls back to the direct calculation pipeline when
//! the routed answer lacks the structured description block. Every failure
//! mode degrades to a well-formed report, never an error to the caller.
//!
//! ## Example usage:
//!
//! ```no_run
//! use mathsolver_rs::solver::{Solver, SolverConfig};
//!
//! let config = SolverConfig {
//!     api_key: Some("gsk-...".to_string()),
//!     ..SolverConfig::default()
//! };
//! let mut solver = Solver::from_config(config).unwrap();
//! let report = solver.answer("What is 5 + 3 * 2?");
//! println!("{}", report.body());
//! ```
//!
//! The one-shot entry point mirrors the web-form behavior, including the
//! fixed prompts for blank input:
//!
//! ```no_run
//! use mathsolver_rs::solver::respond;
//!
//! let body = respond("What is k + 5 if k=2?", "gsk-...");
//! println!("{}", body);
//! ```

pub mod agents;
pub mod chain;
pub mod errors;
pub mod evaluator;
pub mod logger;
pub mod models;
pub mod parsing;
pub mod prompts;
pub mod report;
pub mod solver;
pub mod tools;

pub use report::AnswerReport;
pub use solver::{respond, Solver, SolverConfig};
