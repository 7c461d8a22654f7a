pub mod app;
pub mod command;
pub mod focus;
pub mod key_bindings;
pub mod runner;

pub use app::FormApp;
pub use runner::Runtime;
