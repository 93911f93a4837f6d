//! Form domain layer
//!
//! Typed field values, declarative step definitions, the step policy and the
//! stepped-form controller that composes them.

pub mod catalog;
mod controller;
mod definition;
mod error;
mod field;
pub mod policy;
mod store;
mod sync;

pub use controller::{NavigationView, SteppedForm};
pub use definition::{FormDefinition, StepCondition, StepDefinition};
pub use error::FormError;
pub use field::{FieldKind, FieldSpec, FieldValue};
pub use policy::Revalidation;
pub use store::FormState;
pub use sync::SyncRule;
