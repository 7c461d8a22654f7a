pub mod core;
pub mod form;
pub mod runtime;
pub mod schema;
pub mod terminal;
pub mod ui;
pub mod widgets;
