use crate::core::date::Date;
use crate::core::value::{FieldInput, Value};
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub focused: bool,
    /// Current form-state value of the field being drawn.
    pub value: Option<&'a Value>,
    pub today: Date,
    pub theme: &'a Theme,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cursor position relative to the first line, when the widget wants one.
    pub cursor: Option<CursorPos>,
}

impl DrawOutput {
    pub fn line(spans: SpanLine) -> Self {
        Self {
            lines: vec![spans],
            cursor: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

pub trait Drawable: Send {
    /// Name of the field this widget edits.
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

/// Actions emitted by widgets; the runtime forwards them to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    Changed(FieldInput),
    /// Widget is done with its value; navigation moves on.
    InputDone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }

    pub fn changed(input: FieldInput) -> Self {
        Self::with_action(WidgetAction::Changed(input))
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    /// `current` is the field's value in form state; widgets never own it.
    fn on_key(&mut self, key: KeyEvent, current: Option<&Value>) -> InteractionResult;

    /// True while the widget wants navigation keys (Tab, Esc, arrows) for itself.
    fn captures_navigation(&self) -> bool {
        false
    }

    fn on_blur(&mut self) {}
}

pub trait FieldWidget: Drawable + Interactive {}
impl<T> FieldWidget for T where T: Drawable + Interactive {}
