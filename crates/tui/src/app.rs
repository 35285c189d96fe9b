use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use solar_p2p_core::{Action, AppConfig, AppState, Command, Route, Screen, Services};
use tokio::{
    spawn,
    sync::mpsc,
    time::{interval_at, Instant as TokioInstant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    fields::{self, Control, ControlKind, Focus, FocusScope},
    render::{Renderer, Theme},
};

const TICK_RATE: Duration = Duration::from_millis(250);
const COUNTDOWN_RATE: Duration = Duration::from_secs(1);

enum AppEvent {
    Input(Event),
    Tick,
    Completed(Action),
}

/// Terminal frontend: owns the state and feeds it actions.
pub struct SolarApp {
    state: AppState,
    services: Services,
    ui: UiState,
    theme: Theme,
    event_tx: Option<mpsc::Sender<AppEvent>>,
}

impl SolarApp {
    pub fn new(config: &AppConfig, services: Services) -> Self {
        Self {
            state: AppState::new(config),
            services,
            ui: UiState::default(),
            theme: Theme::default(),
            event_tx: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(support_url = %self.services.support_url(), "Starting client");

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let mut countdown = interval_at(TokioInstant::now() + COUNTDOWN_RATE, COUNTDOWN_RATE);
        countdown.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            self.sync_focus();
            terminal.draw(|frame| self.draw(frame))?;
            if self.ui.should_quit {
                break;
            }

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    if !self.process_app_event(maybe_event) {
                        break;
                    }
                }
                _ = countdown.tick() => self.dispatch(Action::Tick),
            }
            if std::mem::take(&mut self.ui.countdown_restarted) {
                countdown.reset();
            }

            if self.ui.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        info!("Client closed");
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => self.handle_input(event),
            Some(AppEvent::Tick) => {}
            Some(AppEvent::Completed(action)) => self.dispatch(action),
            None => return false,
        }
        // Toasts expire after every event, not only on idle ticks.
        self.dispatch(Action::ExpireToast);
        true
    }

    fn dispatch(&mut self, action: Action) {
        let before_screen = self.state.screen();
        let before_remaining = self.state.countdown().remaining();

        let commands = self.state.apply(action, std::time::Instant::now());

        if self.state.screen() == Screen::Otp
            && (before_screen != Screen::Otp
                || self.state.countdown().remaining() > before_remaining)
        {
            self.ui.countdown_restarted = true;
        }
        for command in commands {
            self.spawn_command(command);
        }
    }

    fn spawn_command(&mut self, command: Command) {
        let Some(sender) = self.event_tx.clone() else {
            debug!(?command, "Event loop not running; dropping command");
            return;
        };
        debug!(?command, "Running command");
        let services = self.services.clone();
        spawn(async move {
            if let Some(action) = services.execute(command).await {
                let _ = sender.send(AppEvent::Completed(action)).await;
            }
        });
    }

    fn sync_focus(&mut self) {
        let scope = fields::scope(&self.state);
        let len = fields::controls(&self.state).len();
        self.ui.focus.sync(scope, len);
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.ui.should_quit = true;
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('x') {
            self.dispatch(Action::DismissToast);
            return;
        }

        match fields::scope(&self.state) {
            FocusScope::Alert => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.dispatch(Action::DismissAlert);
                }
            }
            FocusScope::Notifications => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
                    self.dispatch(Action::CloseNotifications);
                }
            }
            scope => self.handle_control_key(scope, key),
        }
    }

    fn handle_control_key(&mut self, scope: FocusScope, key: KeyEvent) {
        let controls = fields::controls(&self.state);
        self.ui.focus.sync(scope, controls.len());
        let focused = controls.get(self.ui.focus.index()).copied();
        let len = controls.len();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.ui.focus.move_by(1, len),
            KeyCode::BackTab | KeyCode::Up => self.ui.focus.move_by(-1, len),
            KeyCode::Esc => self.handle_escape(scope),
            KeyCode::Left => self.cycle(focused, -1),
            KeyCode::Right => self.cycle(focused, 1),
            KeyCode::Enter => match focused {
                Some(control) if matches!(control.kind(), ControlKind::Text | ControlKind::Choice) => {
                    self.ui.focus.move_by(1, len)
                }
                Some(control) => self.activate(control),
                None => {}
            },
            KeyCode::Backspace => {
                if let Some(action) = focused.and_then(|control| control.backspace(&self.state)) {
                    self.dispatch(action);
                }
            }
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                match focused {
                    Some(control) if control.kind() == ControlKind::Text => {
                        if let Some(action) = control.type_char(&self.state, ch) {
                            self.dispatch(action);
                        }
                    }
                    Some(control) if ch == ' ' => self.activate(control),
                    _ => self.handle_shortcut(scope, ch),
                }
            }
            _ => {}
        }
    }

    fn handle_shortcut(&mut self, scope: FocusScope, ch: char) {
        match (scope, ch) {
            (FocusScope::Screen(Screen::Welcome), 'q') => self.ui.should_quit = true,
            (FocusScope::Screen(Screen::Dashboard) | FocusScope::Menu, 'm') => {
                self.dispatch(Action::ToggleMenu)
            }
            (FocusScope::Screen(Screen::Dashboard), 'n') => self.dispatch(Action::OpenNotifications),
            _ => {}
        }
    }

    fn handle_escape(&mut self, scope: FocusScope) {
        let action = match scope {
            FocusScope::LogoutConfirm => Action::CancelLogout,
            FocusScope::Menu => Action::CloseMenu,
            FocusScope::BuyModal | FocusScope::RedeemModal => Action::CloseTokenModal,
            FocusScope::Screen(Screen::Welcome) => {
                self.ui.should_quit = true;
                return;
            }
            _ => Action::Navigate(Route::Back),
        };
        self.dispatch(action);
    }

    fn cycle(&mut self, focused: Option<Control>, delta: isize) {
        let today = Local::now().date_naive();
        if let Some(action) = focused.and_then(|control| control.cycle(&self.state, today, delta)) {
            self.dispatch(action);
        }
    }

    fn activate(&mut self, control: Control) {
        match control.activate(&self.state) {
            Some(action) => self.dispatch(action),
            None => debug!(?control, "Control is disabled"),
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let today = Local::now().date_naive();
        Renderer::new(&self.state, &self.theme, self.ui.focus.index(), today).draw(frame);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[derive(Default)]
struct UiState {
    focus: Focus,
    should_quit: bool,
    /// The one-second interval must restart its phase.
    countdown_restarted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(toast_ttl_ms: u64) -> SolarApp {
        let config = AppConfig {
            toast_ttl_ms,
            ..AppConfig::default()
        };
        let services = Services::from_config(&config).expect("services");
        SolarApp::new(&config, services)
    }

    fn key(code: KeyCode) -> Option<AppEvent> {
        Some(AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))))
    }

    #[test]
    fn entering_otp_and_resending_restart_the_countdown_phase() {
        let mut app = app(3000);
        app.dispatch(Action::Navigate(Route::Login));
        app.dispatch(Action::SetPhone("9876543210".to_string()));
        app.dispatch(Action::SetTermsAccepted(true));
        assert!(!app.ui.countdown_restarted);

        app.dispatch(Action::RequestOtp);
        assert!(std::mem::take(&mut app.ui.countdown_restarted));

        for _ in 0..30 {
            app.dispatch(Action::Tick);
        }
        assert!(!app.ui.countdown_restarted);
        assert!(app.state.countdown().can_resend());

        app.dispatch(Action::ResendOtp);
        assert!(app.ui.countdown_restarted);
    }

    #[test]
    fn key_presses_also_expire_toasts() {
        let mut app = app(0);
        app.state.show_error("Something went wrong", std::time::Instant::now());
        assert!(app.state.toast().is_some());

        assert!(app.process_app_event(key(KeyCode::Tab)));
        assert!(app.state.toast().is_none());
    }

    #[test]
    fn closed_channel_stops_the_loop() {
        let mut app = app(3000);
        assert!(!app.process_app_event(None));
    }
}
