use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc::{self, UnboundedSender};

use super::action::UiAction;
use super::components::Component;
use super::components::action_bar::ActionBar;
use super::components::results_view::ResultsView;
use super::components::status_bar::StatusBar;
use super::components::vault_input::VaultInput;
use super::event::{Event, EventHandler};
use super::terminal::TerminalGuard;
use super::theme;
use crate::api::Backend;
use crate::config::PanelConfig;
use crate::engine::progress::IDLE_TEXT;
use crate::engine::{EngineEvent, HealthIndicator, HealthMonitor, Panel, Phase};
use crate::error::PanelError;

const RENDER_RATE: Duration = Duration::from_millis(50);

/// Which pane receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Vault,
    Controls,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Vault => Focus::Controls,
            Focus::Controls => Focus::Vault,
        }
    }

    // two panes, so backwards is the same hop
    fn prev(self) -> Focus {
        self.next()
    }
}

/// Root application state for the TUI.
pub struct App<B> {
    focus: Focus,
    should_quit: bool,
    vault_input: VaultInput,
    action_bar: ActionBar,
    results_view: ResultsView,
    status_bar: StatusBar,
    health: HealthIndicator,
    panel: Panel<B>,
    /// Kept alive for the lifetime of the app; dropping it stops polling.
    _monitor: HealthMonitor,
    last_failed: bool,
}

impl<B: Backend> App<B> {
    /// Build the app and start health polling. Must run inside a tokio runtime.
    pub fn new(backend: Arc<B>, config: &PanelConfig, events: UnboundedSender<EngineEvent>) -> Self {
        let monitor =
            HealthMonitor::init(Arc::clone(&backend), config.health_interval(), events.clone());
        let mut panel = Panel::new(backend, config.progress_interval(), events);
        let vault_input = VaultInput::new(config.vault.as_deref());
        panel.on_vault_input(vault_input.text());

        let mut app = Self {
            focus: Focus::Vault,
            should_quit: false,
            vault_input,
            action_bar: ActionBar::new(),
            results_view: ResultsView::new(),
            status_bar: StatusBar::new(),
            health: HealthIndicator::new(),
            panel,
            _monitor: monitor,
            last_failed: false,
        };
        app.set_focus(Focus::Vault);
        app.sync_view();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a key event at the app level.
    ///
    /// Global keys (quit, focus switching) are handled here first; the rest
    /// go to the focused pane and the resulting action is applied.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> UiAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => UiAction::Quit,
            KeyCode::Tab => UiAction::FocusNext,
            KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                UiAction::Noop
            }
            _ => match self.focus {
                Focus::Vault => self.vault_input.handle_key_event(key),
                Focus::Controls => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
                    KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                        self.results_view.handle_key_event(key)
                    }
                    _ => self.action_bar.handle_key_event(key),
                },
            },
        };
        self.apply(action);
        action
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Quit => self.should_quit = true,
            UiAction::FocusNext => self.set_focus(self.focus.next()),
            UiAction::InputChanged => self.panel.on_vault_input(self.vault_input.text()),
            UiAction::Trigger(action) => {
                self.panel.trigger(action, self.vault_input.text());
            }
            UiAction::Noop | UiAction::ScrollUp | UiAction::ScrollDown => {}
        }
        self.sync_view();
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.vault_input.set_focused(focus == Focus::Vault);
        self.action_bar.set_focused(focus == Focus::Controls);
    }

    /// Apply one message from the engine tasks.
    pub fn on_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::ProgressTick { generation } => {
                self.panel.on_progress_tick(generation);
            }
            EngineEvent::Health(check) => {
                self.health.apply(check);
                self.status_bar
                    .set_health(self.health.status(), self.health.label());
            }
            EngineEvent::Settled(settled) => {
                let settlement = self.panel.settle(settled);
                tracing::info!(action = %settlement.action, status = %settlement.status, "Action settled");
                self.last_failed = !settlement.succeeded();
            }
        }
        self.sync_view();
    }

    fn sync_view(&mut self) {
        self.action_bar.set_phase(self.panel.phase());
        self.results_view.sync_from(self.panel.results());
    }

    fn status_style(&self) -> Style {
        if self.panel.phase() == Phase::InFlight {
            theme::PROGRESS
        } else if self.last_failed {
            theme::ERROR
        } else if self.panel.status_text() == IDLE_TEXT {
            Style::default()
        } else {
            theme::SUCCESS
        }
    }

    /// Render the entire application UI.
    pub fn render(&self, frame: &mut Frame) {
        let [vault_area, actions_area, status_area, results_area, bar_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.vault_input.render(frame, vault_area);
        self.action_bar.render(frame, actions_area);

        let status = Line::from(vec![
            Span::styled(" status: ", theme::HEADER),
            Span::styled(self.panel.status_text(), self.status_style()),
        ]);
        frame.render_widget(Paragraph::new(status), status_area);

        self.results_view.render(frame, results_area);
        self.status_bar.render(frame, bar_area);
    }
}

/// Run the main TUI event loop.
///
/// Initializes the terminal, creates the event handler and app,
/// then loops: receiving events, updating state, and rendering.
/// Terminal is restored on exit, including when drawing fails.
pub async fn run_app<B: Backend>(backend: Arc<B>, config: &PanelConfig) -> Result<(), PanelError> {
    let (engine_tx, engine_rx) = mpsc::unbounded_channel();
    let mut app = App::new(backend, config, engine_tx);
    let mut events = EventHandler::new(RENDER_RATE, engine_rx);

    let mut guard = TerminalGuard::enter()?;
    event_loop(guard.terminal_mut(), &mut app, &mut events).await
}

async fn event_loop<B: Backend>(
    terminal: &mut DefaultTerminal,
    app: &mut App<B>,
    events: &mut EventHandler,
) -> Result<(), PanelError> {
    while !app.should_quit() {
        match events.next().await {
            Event::Render => {
                terminal.draw(|frame| app.render(frame))?;
            }
            Event::Key(key) => {
                app.handle_key_event(key);
            }
            Event::Engine(event) => app.on_engine_event(event),
            // picked up by the next draw
            Event::Resize => {}
            Event::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBackend, Reply};
    use crate::api::HealthReport;
    use crate::tui::components::{ctrl_key, test_key};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn app_with(
        backend: FakeBackend,
        vault: Option<&str>,
    ) -> (App<FakeBackend>, Arc<FakeBackend>, UnboundedReceiver<EngineEvent>) {
        let backend = Arc::new(backend);
        let config = PanelConfig {
            vault: vault.map(str::to_string),
            ..PanelConfig::default()
        };
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(Arc::clone(&backend), &config, tx), backend, rx)
    }

    /// Feed engine events to the app until the in-flight action settles.
    async fn drain_until_settled(app: &mut App<FakeBackend>, rx: &mut UnboundedReceiver<EngineEvent>) {
        while let Some(event) = rx.recv().await {
            let settled = matches!(event, EngineEvent::Settled(_));
            app.on_engine_event(event);
            if settled {
                return;
            }
        }
        panic!("engine channel closed before settlement");
    }

    fn screen(app: &App<FakeBackend>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 16)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn starts_focused_on_vault_and_disabled() {
        let (app, _, _rx) = app_with(FakeBackend::new(), None);
        assert_eq!(app.focus, Focus::Vault);
        assert_eq!(app.panel.phase(), Phase::Idle);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn configured_vault_prefills_and_arms() {
        let (app, _, _rx) = app_with(FakeBackend::new(), Some("/notes"));
        assert_eq!(app.vault_input.text(), "/notes");
        assert_eq!(app.panel.phase(), Phase::Armed);
    }

    #[tokio::test]
    async fn q_types_in_vault_but_quits_from_controls() {
        let (mut app, _, _rx) = app_with(FakeBackend::new(), None);
        assert_eq!(app.handle_key_event(test_key(KeyCode::Char('q'))), UiAction::InputChanged);
        assert!(!app.should_quit());
        assert_eq!(app.vault_input.text(), "q");

        app.handle_key_event(test_key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Controls);
        assert_eq!(app.handle_key_event(test_key(KeyCode::Char('q'))), UiAction::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_vault() {
        let (mut app, _, _rx) = app_with(FakeBackend::new(), None);
        app.handle_key_event(ctrl_key('c'));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn tab_and_backtab_toggle_focus() {
        let (mut app, _, _rx) = app_with(FakeBackend::new(), None);
        app.handle_key_event(test_key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::Controls);
        app.handle_key_event(test_key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Vault);
        app.handle_key_event(test_key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Controls);
    }

    #[tokio::test]
    async fn typing_enables_and_clearing_disables() {
        let (mut app, backend, _rx) = app_with(FakeBackend::new(), None);
        app.handle_key_event(test_key(KeyCode::Char('v')));
        assert_eq!(app.panel.phase(), Phase::Armed);
        app.handle_key_event(test_key(KeyCode::Backspace));
        assert_eq!(app.panel.phase(), Phase::Idle);

        app.handle_key_event(test_key(KeyCode::Tab));
        app.handle_key_event(test_key(KeyCode::Char('s')));
        assert_eq!(app.panel.phase(), Phase::Idle);
        assert_eq!(backend.action_calls(), 0);
    }

    #[tokio::test]
    async fn scan_shortcut_fills_results() {
        let (mut app, backend, mut rx) = app_with(FakeBackend::new(), Some("/notes"));
        app.handle_key_event(test_key(KeyCode::Tab));
        app.handle_key_event(test_key(KeyCode::Char('s')));
        assert_eq!(app.panel.phase(), Phase::InFlight);

        // second trigger while in flight is dropped
        app.handle_key_event(test_key(KeyCode::Char('y')));

        drain_until_settled(&mut app, &mut rx).await;
        assert_eq!(app.panel.phase(), Phase::Armed);
        assert_eq!(backend.action_calls(), 1);
        assert_eq!(backend.payloads()[0].vault.as_deref(), Some("/notes"));
        assert!(app.panel.status_text().starts_with("new 3, dupes 2"));
        assert!(!app.last_failed);
        assert_eq!(app.panel.results().len(), 2);
    }

    #[tokio::test]
    async fn enter_runs_the_highlighted_action() {
        let (mut app, backend, mut rx) = app_with(FakeBackend::new(), Some("/notes"));
        app.handle_key_event(test_key(KeyCode::Tab));
        app.handle_key_event(test_key(KeyCode::Right));
        app.handle_key_event(test_key(KeyCode::Enter));
        assert_eq!(app.panel.phase(), Phase::InFlight);

        drain_until_settled(&mut app, &mut rx).await;
        assert_eq!(backend.action_calls(), 1);
        assert_eq!(backend.payloads()[0].dry_run, None);
        assert_eq!(app.panel.status_text(), "synced: 4 add, 1 update");
    }

    #[tokio::test]
    async fn engine_events_alone_refresh_the_screen() {
        let (mut app, _, mut rx) = app_with(FakeBackend::new(), Some("/notes"));
        app.handle_key_event(test_key(KeyCode::Tab));
        app.handle_key_event(test_key(KeyCode::Char('s')));
        assert!(!screen(&app).contains("Question 1"));

        drain_until_settled(&mut app, &mut rx).await;
        let text = screen(&app);
        assert!(text.contains("status: new 3, dupes 2"));
        assert!(text.contains("Question 1"));
        assert!(text.contains("Cards (2)"));
    }

    #[tokio::test]
    async fn failed_sync_marks_status() {
        let backend = FakeBackend::new();
        backend.set_sync(Reply::Remote("vault locked".into()));
        let (mut app, _, mut rx) = app_with(backend, Some("/notes"));
        app.handle_key_event(test_key(KeyCode::Tab));
        app.handle_key_event(test_key(KeyCode::Char('d')));

        drain_until_settled(&mut app, &mut rx).await;
        assert_eq!(app.panel.status_text(), "vault locked");
        assert!(app.last_failed);
    }

    #[tokio::test]
    async fn health_event_updates_status_bar() {
        let backend = FakeBackend::new();
        backend.set_health(Reply::Ok(HealthReport { anki_online: false }));
        let (mut app, _, mut rx) = app_with(backend, None);
        loop {
            match rx.recv().await {
                Some(event @ EngineEvent::Health(_)) => {
                    app.on_engine_event(event);
                    break;
                }
                Some(event) => app.on_engine_event(event),
                None => panic!("engine channel closed"),
            }
        }
        assert!(app.health.label().starts_with("offline"));
        assert!(screen(&app).contains("● offline"));
    }

    #[tokio::test]
    async fn renders_initial_layout() {
        let (app, _, _rx) = app_with(FakeBackend::new(), None);
        let text = screen(&app);
        assert!(text.contains("Vault"));
        assert!(text.contains("Dry run"));
        assert!(text.contains("status: ready"));
        assert!(text.contains("checking…"));
        assert!(text.contains("---"));
    }
}
