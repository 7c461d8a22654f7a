use crate::core::date::Date;
use crate::core::text::format_field_name;
use crate::form::FormController;
use crate::runtime::focus::Focus;
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::traits::{FieldWidget, RenderContext};

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    pub show_cursor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Everything the renderer reads for one frame.
pub struct FormView<'a> {
    pub title: &'a str,
    pub controller: &'a FormController,
    pub widgets: &'a [Box<dyn FieldWidget>],
    pub focus: Focus,
    pub status: Option<&'a StatusLine>,
    pub today: Date,
    pub theme: &'a Theme,
}

pub struct Renderer;

impl Renderer {
    pub fn render(view: &FormView<'_>) -> RenderFrame {
        let theme = view.theme;
        let controller = view.controller;
        let mut frame = RenderFrame::default();

        frame
            .lines
            .push(vec![Span::styled(view.title.to_string(), theme.title)]);
        frame.lines.push(Vec::new());

        for message in controller.errors().general() {
            frame
                .lines
                .push(vec![Span::styled(format!("! {message}"), theme.error)]);
        }

        for (index, widget) in view.widgets.iter().enumerate() {
            let focused = view.focus == Focus::Field(index);
            let optional = controller
                .descriptor(widget.id())
                .is_some_and(|descriptor| descriptor.optional);

            frame.lines.push(label_line(widget.label(), focused, optional, theme));

            let ctx = RenderContext {
                focused,
                value: controller.value(widget.id()),
                today: view.today,
                theme,
            };
            let out = widget.draw(&ctx);
            if focused && let Some(local) = out.cursor {
                frame.cursor = Some(CursorPos {
                    col: local.col,
                    row: (frame.lines.len() as u16).saturating_add(local.row),
                });
            }
            frame.lines.extend(out.lines);

            if let Some(error) = controller.error(widget.id()) {
                frame
                    .lines
                    .push(vec![Span::styled(format!("  {error}"), theme.error)]);
            }
            frame.lines.push(Vec::new());
        }

        let submit_style = if view.focus == Focus::Submit {
            theme.focused
        } else {
            theme.label
        };
        let marker = if view.focus == Focus::Submit { "> " } else { "  " };
        frame.lines.push(vec![
            Span::new(marker),
            Span::styled("[ Submit ]", submit_style),
        ]);

        if let Some(status) = view.status {
            let style = match status.kind {
                StatusKind::Info => theme.hint,
                StatusKind::Success => theme.success,
                StatusKind::Error => theme.error,
            };
            frame.lines.push(Vec::new());
            frame
                .lines
                .push(vec![Span::styled(status.text.clone(), style)]);
        }

        frame.lines.push(Vec::new());
        frame.lines.push(vec![Span::styled(
            "Tab/↑↓ move  Enter open/submit  Ctrl+S submit  Esc quit",
            theme.hint,
        )]);

        frame.show_cursor = frame.cursor.is_some();
        frame
    }
}

fn label_line(label: &str, focused: bool, optional: bool, theme: &Theme) -> SpanLine {
    let marker = if focused { "> " } else { "  " };
    let style = if focused { theme.focused } else { theme.label };
    let mut line = vec![
        Span::new(marker),
        Span::styled(format_field_name(label), style),
    ];
    if !optional {
        line.push(Span::styled(" *", theme.required));
    }
    line
}
