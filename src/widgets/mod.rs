pub mod base;
pub mod dispatch;
pub mod inputs;
pub mod text_edit;
pub mod traits;

pub use dispatch::{WidgetKind, build_widget, build_widgets};
pub use traits::{
    DrawOutput, Drawable, FieldWidget, InteractionResult, Interactive, RenderContext, WidgetAction,
};
