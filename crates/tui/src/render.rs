//! Drawing of screens, overlays and the status bar.

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use solar_p2p_core::{
    forms::{bid::next_day_label, BidCategory, BidField, RegistrationField},
    models::{SupplyStats, UserType, ACCOUNT_DETAILS, PLATFORM_STATS, USER_STATS},
    toast::ToastKind,
    AppState, MenuItem, Screen, View, WalletError,
};

use crate::fields::{self, Control, ControlKind, FocusScope};

const MENU_WIDTH: u16 = 30;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_bg: Color,
    pub primary_fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_bg: Color::Black,
            primary_fg: Color::White,
            accent: Color::Yellow,
            accent_alt: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::LightYellow,
            danger: Color::Red,
            on_accent: Color::Black,
        }
    }
}

/// Draws one frame of the client.
pub struct Renderer<'a> {
    state: &'a AppState,
    theme: &'a Theme,
    scope: FocusScope,
    focus: usize,
    today: NaiveDate,
}

impl<'a> Renderer<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme, focus: usize, today: NaiveDate) -> Self {
        Self {
            state,
            theme,
            scope: fields::scope(state),
            focus,
            today,
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(self.theme.primary_bg)
                    .fg(self.theme.primary_fg),
            ),
            area,
        );

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let view = self.state.navigator().view();
        self.render_header(frame, layout[0], view);
        match view {
            View::Notifications => self.render_notifications(frame, layout[1]),
            View::Screen(screen) => {
                self.render_screen(frame, layout[1], screen);
                let overlays = self.state.navigator().overlays();
                if overlays.menu {
                    self.render_menu(frame, layout[1]);
                }
                if overlays.buy_modal || overlays.redeem_modal {
                    self.render_token_modal(frame, area, overlays.redeem_modal);
                }
                if overlays.logout_confirm {
                    self.render_logout_confirm(frame, area);
                }
            }
        }
        self.render_status(frame, layout[2]);

        if let Some(message) = self.state.alert() {
            self.render_alert(frame, area, message);
        }
    }

    fn focus_in(&self, scope: FocusScope) -> Option<usize> {
        (self.scope == scope).then_some(self.focus)
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, view: View) {
        let title = match view {
            View::Notifications => "Notifications",
            View::Screen(screen) => screen.title(),
        };
        let header = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Solar P2P"));
        frame.render_widget(header, area);
    }

    fn render_screen(&self, frame: &mut Frame, area: Rect, screen: Screen) {
        let mut lines = self.screen_intro(screen);
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let controls = fields::screen_controls(self.state, screen);
        lines.extend(self.control_lines(&controls, self.focus_in(FocusScope::Screen(screen))));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(screen.title()))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn screen_intro(&self, screen: Screen) -> Vec<Line<'static>> {
        let state = self.state;
        match screen {
            Screen::Welcome => vec![
                self.heading("Welcome to Solar P2P"),
                self.muted("Trade the surplus energy of your rooftop solar with your neighbours."),
            ],
            Screen::Login => vec![self.muted("Enter your mobile number to receive a one-time password.")],
            Screen::Otp => {
                let countdown = state.countdown();
                let resend = if countdown.can_resend() {
                    self.muted("Didn't receive the code? You can resend it now.")
                } else {
                    self.muted(&format!("Resend OTP in 00:{:02}", countdown.remaining()))
                };
                vec![
                    Line::from(format!("A 6 digit code was sent to +91 {}", state.credentials().phone())),
                    resend,
                ]
            }
            Screen::UserType => {
                let mut lines = vec![self.muted("How will you use the platform?")];
                if matches!(state.user_type(), Some(kind) if kind != UserType::Prosumer) {
                    lines.push(self.warning("Only prosumer registration is available for now."));
                }
                lines
            }
            Screen::ProsumerRegistration => {
                if state.registration_pending() {
                    vec![self.warning("Submitting registration...")]
                } else {
                    vec![self.muted("All fields are required.")]
                }
            }
            Screen::RegistrationConfirmation => vec![
                self.heading("Registration submitted"),
                Line::from("Your prosumer registration has been received."),
            ],
            Screen::Dashboard => {
                let mut lines = vec![self.heading("Your Stats")];
                lines.extend(USER_STATS.iter().map(stat_line));
                lines.push(Line::from(""));
                lines.push(self.heading("Platform Stats"));
                lines.extend(PLATFORM_STATS.iter().map(stat_line));
                lines
            }
            Screen::Bidding => {
                let mut lines = vec![self.heading("Bid Type - Sell")];
                if state.bid().category() == Some(BidCategory::DayAhead) {
                    lines.push(Line::from(format!(
                        "Delivery date: {}",
                        next_day_label(self.today)
                    )));
                }
                lines
            }
            Screen::Account => {
                let mut lines: Vec<Line> = ACCOUNT_DETAILS
                    .iter()
                    .map(|detail| {
                        Line::from(vec![
                            Span::styled(
                                format!("{}: ", detail.label),
                                Style::default().fg(self.theme.muted),
                            ),
                            Span::raw(detail.value),
                        ])
                    })
                    .collect();
                if state.vpa_exists() {
                    lines.push(Line::from(format!("VPA: {}", state.vpa().vpa)));
                }
                lines
            }
            Screen::BidHistory => vec![self.muted("No bid history available yet")],
            Screen::Wallet => {
                let tokens = state.tokens();
                vec![
                    self.heading("My Tokens"),
                    Line::from(format!("{:.2}", tokens.balance())),
                    self.muted("1 Token = 1₹"),
                ]
            }
            Screen::EditAccountDetails => {
                let mut lines = vec![self.muted("Describe the changes you need on your account.")];
                if state.change_request().draft_saved {
                    lines.push(self.success("Draft saved"));
                }
                lines
            }
            Screen::UpdateVpa => Vec::new(),
        }
    }

    fn control_lines(&self, controls: &[Control], focused: Option<usize>) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(controls.len());
        for (index, control) in controls.iter().enumerate() {
            lines.push(self.control_line(*control, focused == Some(index)));
            if let Some(error) = self.field_error(*control) {
                lines.push(Line::from(Span::styled(
                    format!("    {error}"),
                    Style::default().fg(self.theme.danger),
                )));
            }
        }
        lines
    }

    fn control_line(&self, control: Control, focused: bool) -> Line<'static> {
        let theme = self.theme;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.primary_fg)
        };

        match control.kind() {
            ControlKind::Text => {
                let caret = if focused { "_" } else { "" };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{}: ", control.label()), label_style),
                    Span::styled(
                        format!("{}{caret}", control.value(self.state)),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                ])
            }
            ControlKind::Choice => {
                let value = control.value(self.state);
                let shown = if value.is_empty() {
                    "Select".to_string()
                } else {
                    value
                };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{}: ", control.label()), label_style),
                    Span::styled(format!("◀ {shown} ▶"), Style::default().fg(theme.accent_alt)),
                ])
            }
            ControlKind::Toggle => {
                let checked = control.checked(self.state);
                let mark = match (control, checked) {
                    (Control::UserType(_), true) => "(•) ",
                    (Control::UserType(_), false) => "( ) ",
                    (_, true) => "[x] ",
                    (_, false) => "[ ] ",
                };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{mark}{}", control.label()), label_style),
                ])
            }
            ControlKind::Button => {
                let active_menu = matches!(control, Control::Menu(item) if item == self.state.active_menu());
                let style = if !control.enabled(self.state) {
                    Style::default().fg(theme.muted)
                } else if focused {
                    Style::default()
                        .bg(theme.selection_bg)
                        .fg(theme.selection_fg)
                        .add_modifier(Modifier::BOLD)
                } else if active_menu {
                    Style::default()
                        .bg(theme.accent)
                        .fg(theme.on_accent)
                } else {
                    Style::default().fg(theme.accent)
                };
                let text = match control {
                    Control::Menu(_) => control.label().to_string(),
                    _ => format!("[ {} ]", control.label()),
                };
                Line::from(vec![Span::styled(marker, label_style), Span::styled(text, style)])
            }
        }
    }

    fn field_error(&self, control: Control) -> Option<String> {
        let state = self.state;
        match control {
            Control::Phone => state.credentials().phone_error().map(|err| err.to_string()),
            Control::Registration(RegistrationField::SolarCapacity) => {
                state.registration().capacity_error().map(|err| err.to_string())
            }
            Control::Bid(BidField::Units) => state.bid().errors().units.map(|err| err.to_string()),
            Control::Bid(BidField::BidRate) => {
                state.bid().errors().bid_rate.map(|err| err.to_string())
            }
            Control::Vpa => state.vpa().vpa_hint().map(str::to_string),
            _ => None,
        }
    }

    fn render_menu(&self, frame: &mut Frame, body: Rect) {
        let width = MENU_WIDTH.min(body.width);
        let area = Rect::new(body.x, body.y, width, body.height);
        frame.render_widget(Clear, area);

        let controls: Vec<Control> = MenuItem::ALL.into_iter().map(Control::Menu).collect();
        let items: Vec<ListItem> = self
            .control_lines(&controls, self.focus_in(FocusScope::Menu))
            .into_iter()
            .map(ListItem::new)
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Menu")
                .border_style(Style::default().fg(self.theme.accent)),
        );
        frame.render_widget(list, area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .state
            .notifications()
            .iter()
            .map(|notification| {
                let marker = if notification.is_read { "  " } else { "● " };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(self.theme.accent)),
                        Span::styled(
                            notification.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", notification.preview()),
                        Style::default().fg(self.theme.muted),
                    )),
                    Line::from(""),
                ])
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Notifications"));
        frame.render_widget(list, area);
    }

    fn render_logout_confirm(&self, frame: &mut Frame, area: Rect) {
        let area = centered_rect(44, 8, area);
        frame.render_widget(Clear, area);

        let mut lines = vec![Line::from("Are you sure you want to logout?"), Line::from("")];
        let controls = [
            Control::Button(fields::Button::ConfirmLogout),
            Control::Button(fields::Button::CancelLogout),
        ];
        lines.extend(self.control_lines(&controls, self.focus_in(FocusScope::LogoutConfirm)));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Logout"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_token_modal(&self, frame: &mut Frame, area: Rect, redeem: bool) {
        let area = centered_rect(72, 16, area);
        frame.render_widget(Clear, area);

        let tokens = self.state.tokens();
        let (title, scope) = if redeem {
            ("Redeem Tokens", FocusScope::RedeemModal)
        } else {
            ("Buy Tokens", FocusScope::BuyModal)
        };

        let mut lines = vec![
            self.muted(&format!("Balance: {:.2} tokens", tokens.balance())),
            Line::from(""),
        ];
        let controls = fields::token_modal_controls(self.state, redeem);
        lines.extend(self.control_lines(&controls, self.focus_in(scope)));
        lines.push(Line::from(""));
        if tokens.is_connecting() {
            lines.push(self.warning("Connecting to CBDC wallet..."));
        }
        if let Some(err) = tokens.error() {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(self.theme.danger),
            )));
        }
        if redeem && tokens.exceeds_balance() {
            lines.push(self.warning(&insufficient_tokens(tokens.balance())));
        }
        if redeem && !self.state.vpa_exists() && tokens.error().is_none() {
            lines.push(self.muted(&WalletError::MissingVpa.to_string()));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_alert(&self, frame: &mut Frame, area: Rect, message: &str) {
        let area = centered_rect(56, 7, area);
        frame.render_widget(Clear, area);

        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" dismiss"),
        ]);
        let paragraph = Paragraph::new(vec![Line::from(message.to_string()), Line::from(""), helper])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Alert")
                    .border_style(Style::default().fg(self.theme.danger)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let line = match self.state.toast() {
            Some(toast) => {
                let color = match toast.kind {
                    ToastKind::Success => self.theme.success,
                    ToastKind::Error => self.theme.danger,
                };
                Line::from(Span::styled(
                    toast.message.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => self.muted(help_text(self.scope)),
        };
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn heading(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn muted(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), Style::default().fg(self.theme.muted)))
    }

    fn warning(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), Style::default().fg(self.theme.warning)))
    }

    fn success(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), Style::default().fg(self.theme.success)))
    }
}

fn insufficient_tokens(balance: f64) -> String {
    format!("Insufficient tokens available. You have {balance:.2} tokens available.")
}

fn stat_line(stat: &SupplyStats) -> Line<'static> {
    Line::from(format!("{}: {}", stat.label, stat.summary()))
}

fn help_text(scope: FocusScope) -> &'static str {
    match scope {
        FocusScope::Alert => "Enter dismiss",
        FocusScope::Notifications => "Esc back",
        FocusScope::Screen(Screen::Welcome) => "Tab move  Enter select  q quit",
        FocusScope::Screen(Screen::Dashboard) => {
            "Tab move  Enter select  m menu  n notifications  Ctrl+C quit"
        }
        FocusScope::Menu => "↑↓ move  Enter select  Esc close",
        _ => "Tab move  Enter select  ←→ change  Esc back  Ctrl+C quit",
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use solar_p2p_core::{Action, Route};
    use std::time::Instant;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    fn rendered(state: &AppState) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        terminal
            .draw(|frame| Renderer::new(state, &theme, 0, today()).draw(frame))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), area);
    }

    #[test]
    fn welcome_screen_shows_entry_buttons() {
        let text = rendered(&AppState::default());
        assert!(text.contains("Peer-To-Peer Energy Trading Platform"));
        assert!(text.contains("[ Login ]"));
        assert!(text.contains("[ Register ]"));
    }

    #[test]
    fn notifications_replace_the_screen() {
        let mut state = AppState::default();
        state.apply(Action::OpenNotifications, Instant::now());
        let text = rendered(&state);
        assert!(text.contains("Energy Supply Recorded"));
        assert!(!text.contains("[ Login ]"));
    }

    #[test]
    fn phone_error_is_shown_under_the_field() {
        let mut state = AppState::default();
        state.apply(Action::Navigate(Route::Login), Instant::now());
        state.apply(Action::SetPhone("987654320".to_string()), Instant::now());
        let text = rendered(&state);
        assert!(text.contains("Mobile number should be 10 digits long"));
    }

    #[test]
    fn redeem_modal_warns_about_balance_and_missing_vpa() {
        let mut state = AppState::default();
        let now = Instant::now();
        for action in [
            Action::Navigate(Route::Login),
            Action::SetPhone("9876543210".to_string()),
            Action::SetTermsAccepted(true),
            Action::RequestOtp,
            Action::SetOtp("123456".to_string()),
            Action::SubmitOtp,
            Action::SelectUserType(UserType::Prosumer),
            Action::ContinueUserType,
        ] {
            state.apply(action, now);
        }
        let entries = [
            (RegistrationField::FirstName, "Asha"),
            (RegistrationField::LastName, "Rao"),
            (RegistrationField::State, "Karnataka"),
            (RegistrationField::City, "Mysore"),
            (RegistrationField::Discom, "CESC"),
            (RegistrationField::Locality, "Hebbal"),
            (RegistrationField::PinCode, "570017"),
            (RegistrationField::MeterNumber, "M-1"),
            (RegistrationField::ConnectionNumber, "C-1"),
            (RegistrationField::MeteringCategory, "Net Metering"),
            (RegistrationField::SolarCapacity, "4.5"),
        ];
        for (field, value) in entries {
            state.apply(Action::SetRegistrationField(field, value.to_string()), now);
        }
        state.apply(Action::SubmitRegistration, now);
        state.apply(Action::RegistrationFinished(Ok(())), now);
        state.apply(Action::Navigate(Route::Continue), now);
        state.apply(Action::ToggleMenu, now);
        state.apply(Action::SelectMenuItem(MenuItem::Wallet), now);
        state.apply(Action::OpenRedeemModal, now);
        state.apply(Action::SetTokenAmount("5".to_string()), now);
        assert_eq!(state.screen(), Screen::Wallet);

        let text = rendered(&state);
        assert!(text.contains("Insufficient tokens available. You have 0.00 tokens available."));
        assert!(text.contains("A VPA must be created before you can redeem tokens."));
    }

    #[test]
    fn toast_takes_the_status_line() {
        let mut state = AppState::default();
        state.show_error("Something went wrong", Instant::now());
        let text = rendered(&state);
        assert!(text.contains("Something went wrong"));
    }
}
