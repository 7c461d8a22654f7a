use crate::core::date::Date;
use crate::form::{ErrorPolicy, FormController, SubmitOutcome};
use crate::runtime::command::Command;
use crate::runtime::focus::{Focus, FocusRing};
use crate::runtime::key_bindings::KeyBindings;
use crate::schema::{Schema, ValidatedData};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::renderer::{FormView, RenderFrame, Renderer, StatusLine};
use crate::ui::theme::Theme;
use crate::widgets::traits::{FieldWidget, WidgetAction};
use crate::widgets::build_widgets;
use std::sync::mpsc::{self, Receiver};
use tracing::debug;

/// One form on screen: the controller, one widget per field, and focus.
pub struct FormApp {
    title: String,
    controller: FormController,
    widgets: Vec<Box<dyn FieldWidget>>,
    focus: FocusRing,
    key_bindings: KeyBindings,
    theme: Theme,
    today: Option<Date>,
    status: Option<StatusLine>,
    submitted: Receiver<ValidatedData>,
    submissions: Vec<ValidatedData>,
    should_exit: bool,
}

impl FormApp {
    pub fn new(schema: Schema) -> Self {
        let (tx, rx) = mpsc::channel();
        let controller = FormController::new(schema, move |data| {
            // The receiver lives as long as the app; a failed send means it is gone.
            let _ = tx.send(data);
        });
        let widgets = build_widgets(controller.descriptors(), None);
        let focus = FocusRing::new(widgets.len());

        Self {
            title: "New entry".to_string(),
            controller,
            widgets,
            focus,
            key_bindings: KeyBindings::new(),
            theme: Theme::default(),
            today: None,
            status: None,
            submitted: rx,
            submissions: Vec::new(),
            should_exit: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.controller.set_error_policy(policy);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    /// Pins the current day, for date pickers and rendering.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self.widgets = build_widgets(self.controller.descriptors(), Some(today));
        self
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn focus(&self) -> Focus {
        self.focus.current()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn submissions(&self) -> &[ValidatedData] {
        &self.submissions
    }

    pub fn into_submissions(self) -> Vec<ValidatedData> {
        self.submissions
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn render(&self) -> RenderFrame {
        let view = FormView {
            title: &self.title,
            controller: &self.controller,
            widgets: &self.widgets,
            focus: self.focus.current(),
            status: self.status.as_ref(),
            today: self.today.unwrap_or_else(Date::today),
            theme: &self.theme,
        };
        Renderer::render(&view)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let captured = self
            .focused_widget()
            .is_some_and(|widget| widget.captures_navigation());

        let command = if captured && !key.is_ctrl('c') {
            Command::InputKey(key)
        } else {
            self.key_bindings
                .resolve(key)
                .unwrap_or(Command::InputKey(key))
        };
        self.dispatch(command);
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Exit => self.should_exit = true,
            Command::Submit => self.submit(),
            Command::NextFocus => self.move_focus(true),
            Command::PrevFocus => self.move_focus(false),
            Command::InputKey(key) => self.input_key(key),
        }
    }

    fn focused_widget(&self) -> Option<&dyn FieldWidget> {
        let index = self.focus.focused_field()?;
        self.widgets.get(index).map(|widget| widget.as_ref())
    }

    fn move_focus(&mut self, forward: bool) {
        if let Some(index) = self.focus.focused_field()
            && let Some(widget) = self.widgets.get_mut(index)
        {
            widget.on_blur();
        }
        if forward {
            self.focus.next();
        } else {
            self.focus.prev();
        }
    }

    fn input_key(&mut self, key: KeyEvent) {
        let Some(index) = self.focus.focused_field() else {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                self.submit();
            }
            return;
        };
        let Some(widget) = self.widgets.get_mut(index) else {
            return;
        };

        let name = widget.id().to_string();
        let result = widget.on_key(key, self.controller.value(&name));
        for action in result.actions {
            match action {
                WidgetAction::Changed(input) => {
                    self.controller.apply(&name, input);
                }
                WidgetAction::InputDone => self.move_focus(true),
            }
        }
    }

    fn submit(&mut self) {
        match self.controller.submit() {
            SubmitOutcome::Submitted => {
                for data in self.submitted.try_iter() {
                    let json = data.to_json();
                    debug!(%json, "submission received");
                    self.status = Some(StatusLine::success(format!("Submitted: {json}")));
                    self.submissions.push(data);
                }
                for widget in &mut self.widgets {
                    widget.on_blur();
                }
                self.focus.first();
            }
            SubmitOutcome::Invalid { errors } => {
                let noun = if errors == 1 { "error" } else { "errors" };
                self.status = Some(StatusLine::error(format!(
                    "Fix {errors} {noun} before submitting"
                )));
            }
        }
    }
}
