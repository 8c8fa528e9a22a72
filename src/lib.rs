//! # Hornlog
//!
//! A minimal backward-chaining prover over Horn clauses with atomic arguments.
//!
//! ## Features
//!
//! - Asymmetric unification of flat literals with universal variables (`*x`)
//! - Two-strategy resolution of a denial against a rule or fact
//! - Depth-first, leftmost-rule proof search returning the resolution trace
//!
//! ## Example
//!
//! ```rust
//! use hornlog::Engine;
//!
//! let engine = Engine::new(["lucky(john)<-", "happy(*X)<-lucky(*X)"])?;
//! let proof = engine.proof("<-happy(john)")?.expect("provable");
//! assert_eq!(proof.len(), 2);
//! assert!(engine.proof("<-rich(john)")?.is_none());
//! # Ok::<(), hornlog::GrammarError>(())
//! ```

/// Horn clauses and resolution.
pub mod clause;
/// Proof search.
pub mod engine;
/// Grammar errors.
pub mod error;
/// Literals, substitutions and unification.
pub mod literal;
/// Clause text grammar.
pub mod parser;

pub use clause::{Clause, ClauseKind};
pub use engine::{Engine, Proof, Step};
pub use error::GrammarError;
pub use literal::{Arg, Literal, Substitution, Unifier};
