pub mod renderer;
pub mod span;
pub mod style;
pub mod theme;

pub use renderer::{FormView, RenderFrame, Renderer, StatusKind, StatusLine};
