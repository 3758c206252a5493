//! The TUI shell: terminal lifecycle, event loop, and the async
//! generation handoff.
//!
//! The wizard core stays synchronous; this layer spawns the generation
//! future when the session submits, polls the task handle once per
//! tick, and feeds the outcome back into the session. Routing happens
//! exactly once, guarded by the session's complete-once contract.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::generate::{
    GenerateError, GenerationService, ScriptId, ScriptRequest, ScriptStore, TemplateScriptService,
};
use crate::router::ScriptRouter;
use crate::ui::{OutputView, WizardInput, WizardScreen};
use crate::wizard::WizardSession;

/// Routing surface backed by the shell: remembers the artifact the
/// session completed with so the loop can swap in the output view.
#[derive(Debug, Default)]
struct ViewRouter {
    target: Option<ScriptId>,
}

impl ScriptRouter for ViewRouter {
    fn route_to(&mut self, id: &ScriptId) {
        self.target = Some(id.clone());
    }
}

pub struct App {
    config: Config,
    session: WizardSession,
    screen: WizardScreen,
    service: Arc<TemplateScriptService>,
    store: ScriptStore,
    router: ViewRouter,
    /// At most one outstanding generation per session
    pending: Option<JoinHandle<Result<ScriptId, GenerateError>>>,
    output: Option<OutputView>,
    exit_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = ScriptStore::new(config.scripts_path());
        let service = Arc::new(TemplateScriptService::new(store.clone()));
        Self {
            config,
            session: WizardSession::new(),
            screen: WizardScreen::new(),
            service,
            store,
            router: ViewRouter::default(),
            pending: None,
            output: None,
            exit_message: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| {
                if let Some(ref output) = self.output {
                    output.render(f);
                } else {
                    self.screen.render(f, &self.session);
                }
            })?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            self.poll_generation().await;
            self.screen.tick();
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Some(message) = &self.exit_message {
            eprintln!("{message}");
            std::process::exit(1);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: crossterm::event::KeyCode) {
        if let Some(ref mut output) = self.output {
            if output.handle_key(key) {
                self.should_quit = true;
            }
            return;
        }

        match self.screen.handle_key(&mut self.session, key) {
            WizardInput::Submit => self.start_generation(),
            WizardInput::Cancel => self.should_quit = true,
            WizardInput::Handled => {}
        }
    }

    /// Kick off the async generation for a freshly submitted session.
    fn start_generation(&mut self) {
        let request = match ScriptRequest::from_form(self.session.form()) {
            Ok(request) => request,
            // The gate makes this unreachable through the UI; fail the
            // session rather than crash if it ever happens.
            Err(err) => {
                self.session.fail(err.to_string());
                return;
            }
        };

        let service = Arc::clone(&self.service);
        let timeout = Duration::from_secs(self.config.generation.timeout_secs);
        self.pending = Some(tokio::spawn(async move {
            match tokio::time::timeout(timeout, service.generate(&request)).await {
                Ok(result) => result,
                Err(_) => Err(GenerateError::TimedOut(timeout.as_secs())),
            }
        }));
    }

    /// Feed a finished generation back into the session: complete and
    /// route on success, return to the final step on failure.
    async fn poll_generation(&mut self) {
        let finished = self.pending.as_ref().is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };

        match handle.await {
            Ok(Ok(id)) => {
                if self.session.complete() {
                    self.router.route_to(&id);
                    self.resolve_route();
                }
            }
            Ok(Err(err)) => self.session.fail(err.to_string()),
            Err(join_err) => {
                tracing::error!(error = %join_err, "generation task aborted");
                self.session.fail("generation task aborted unexpectedly");
            }
        }
    }

    /// Swap the routed artifact's display view in.
    fn resolve_route(&mut self) {
        let Some(id) = self.router.target.take() else {
            return;
        };
        match self.store.load(&id) {
            Ok(script) => self.output = Some(OutputView::new(script)),
            Err(err) => {
                // The artifact vanished between save and display; there
                // is nothing left to show.
                tracing::error!(%id, error = %err, "generated script could not be loaded");
                self.exit_message = Some(format!("Generated script {id} could not be loaded"));
                self.should_quit = true;
            }
        }
    }
}
