use crate::core::date::{Date, Weekday, days_in_month, month_name};
use crate::core::value::{FieldInput, Value};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::widgets::base::InputBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

const EMPTY_PROMPT: &str = "Select a date";

/// Popup month grid. Days before today are shown but cannot be picked.
pub struct DatePicker {
    base: InputBase,
    open: bool,
    cursor: Date,
    today: Option<Date>,
}

impl DatePicker {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            open: false,
            cursor: Date::today(),
            today: None,
        }
    }

    /// Pins "today" instead of reading the system clock.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self.cursor = today;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> Date {
        self.cursor
    }

    fn today(&self) -> Date {
        self.today.unwrap_or_else(Date::today)
    }

    fn is_disabled(&self, date: Date, today: Date) -> bool {
        date < today
    }

    fn open_at(&mut self, current: Option<&Value>) {
        let today = self.today();
        let stored = current
            .and_then(Value::as_text)
            .and_then(|text| Date::parse_iso(text).ok());
        self.cursor = match stored {
            Some(date) if date >= today => date,
            _ => today,
        };
        self.open = true;
    }

    fn on_grid_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => self.cursor = self.cursor.add_days(-1),
            KeyCode::Right => self.cursor = self.cursor.add_days(1),
            KeyCode::Up => self.cursor = self.cursor.add_days(-7),
            KeyCode::Down => self.cursor = self.cursor.add_days(7),
            KeyCode::PageUp => self.cursor = self.cursor.add_months(-1),
            KeyCode::PageDown => self.cursor = self.cursor.add_months(1),
            KeyCode::Home => self.cursor = self.today(),
            KeyCode::Esc => self.open = false,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.is_disabled(self.cursor, self.today()) {
                    return InteractionResult::handled();
                }
                self.open = false;
                return InteractionResult::changed(FieldInput::Date(self.cursor));
            }
            _ => return InteractionResult::ignored(),
        }
        InteractionResult::handled()
    }

    fn grid_lines(&self, ctx: &RenderContext<'_>, today: Date) -> Vec<SpanLine> {
        let theme = ctx.theme;
        let selected = ctx
            .value
            .and_then(Value::as_text)
            .and_then(|text| Date::parse_iso(text).ok());

        let mut lines = vec![
            vec![Span::styled(
                format!("  {} {}", month_name(self.cursor.month), self.cursor.year),
                theme.title,
            )],
            vec![Span::styled(
                format!(
                    "  {}",
                    (0..7)
                        .map(|idx| format!(" {} ", Weekday(idx).short_name()))
                        .collect::<Vec<_>>()
                        .join(" ")
                ),
                theme.hint,
            )],
        ];

        let first = self.cursor.first_of_month();
        let lead = first.weekday().index();
        let total = days_in_month(first.year, first.month) as usize;

        let mut row: SpanLine = vec![Span::new("  ")];
        row.extend((0..lead).map(|_| Span::new("    ")));
        for day in 1..=total {
            let date = Date::new(first.year, first.month, day as u8);
            let is_cursor = date == self.cursor;
            let style = if is_cursor {
                theme.cursor
            } else if self.is_disabled(date, today) {
                theme.disabled
            } else if selected == Some(date) {
                theme.selected
            } else {
                Default::default()
            };
            let (left, right) = if is_cursor { ("[", "]") } else { (" ", " ") };
            row.push(Span::styled(format!("{left}{day:2}{right}"), style));

            if (lead + day).is_multiple_of(7) && day != total {
                lines.push(std::mem::replace(&mut row, vec![Span::new("  ")]));
            }
        }
        lines.push(row);
        lines.push(vec![Span::styled(
            "  ←→ day  ↑↓ week  PgUp/PgDn month  Home today  Enter pick  Esc close",
            theme.hint,
        )]);
        lines
    }
}

impl Drawable for DatePicker {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let summary = match ctx.value.and_then(Value::as_text) {
            Some(text) if !text.is_empty() => Span::new(text),
            _ => Span::styled(EMPTY_PROMPT, ctx.theme.placeholder),
        };
        let mut lines = vec![vec![Span::new("  "), summary]];
        if self.open && ctx.focused {
            let today = self.today.unwrap_or(ctx.today);
            lines.extend(self.grid_lines(ctx, today));
        }
        DrawOutput {
            lines,
            cursor: None,
        }
    }
}

impl Interactive for DatePicker {
    fn on_key(&mut self, key: KeyEvent, current: Option<&Value>) -> InteractionResult {
        if self.open {
            return self.on_grid_key(key);
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.open_at(current);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn captures_navigation(&self) -> bool {
        self.open
    }

    fn on_blur(&mut self) {
        self.open = false;
    }
}
