//! In-memory form state and the controller that drives it.

pub mod controller;
pub mod derive;
pub mod state;

pub use controller::{FormController, FormEvent, FormStatus, SubmitHandler, SubmitOutcome};
pub use derive::Derivation;
pub use state::{ErrorPolicy, ErrorState, FormState};
