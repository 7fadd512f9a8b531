//! Mamdani fuzzy inference with typed linguistic variables, plus a device
//! usage advisor built on top of it.
//!
//! Terms of each variable are plain enums. The enums of one system are
//! gathered into a single term type with [`term_union!`], variables are
//! registered in [`Variables`] and rules are written with the
//! [`Variable::is`] / [`Expr::and`] / [`Expr::or`] builders:
//!
//! ```ignore
//! let mut rules = Rules::new();
//!
//! rules.add(
//!     consumption.is(Consumption::High).and(cost.is(Cost::High)),
//!     usage.is(Usage::Low),
//! );
//!
//! let system = FuzzySystem::new(vars, rules, MamdaniInference::default())?;
//! let outputs = system.eval(&inputs)?;
//! ```

mod dsl;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub mod device;
pub mod error;

pub use dsl::Expr;
pub use error::{AdvisorError, ConfigError, FuzzyError, Result};
pub use inference::{MamdaniInference, UniversePolicy};
pub use inputs::Inputs;
pub use membership::Triangle;
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use system::FuzzySystem;
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, Universe, Variable, VariableKey, Variables, MAX_UNIVERSE_POINTS};
