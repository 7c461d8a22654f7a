use crate::runtime::app::FormApp;
use crate::terminal::{Terminal, TerminalEvent};
use std::io;
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct Runtime {
    app: FormApp,
    terminal: Terminal,
}

impl Runtime {
    pub fn new(app: FormApp, terminal: Terminal) -> Self {
        Self { app, terminal }
    }

    pub fn app(&self) -> &FormApp {
        &self.app
    }

    pub fn into_app(self) -> FormApp {
        self.app
    }

    /// Runs until the user quits. The terminal is restored even when the loop fails.
    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.app.should_exit() {
                match self.terminal.poll_event(POLL_INTERVAL)? {
                    TerminalEvent::Key(key) => {
                        debug!(?key, "key");
                        self.app.handle_key(key);
                        self.render()?;
                    }
                    TerminalEvent::Resize(_) => self.render()?,
                    TerminalEvent::Tick => {}
                }
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.app.render();
        self.terminal.render_frame(&frame)
    }
}
