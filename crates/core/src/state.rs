//! Application state and the reducer that updates it.
//!
//! [`AppState::apply`] is the only way state changes. It never performs I/O;
//! work that must happen outside (HTTP, wallet, opening a browser) comes back
//! as [`Command`]s whose results are fed in again as actions.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    error::{WalletError, REGISTRATION_FAILED, SUPPORT_LINK_FAILED},
    forms::{
        BidCategory, BidField, BidForm, ChangeRequest, Credentials, ProsumerRecord,
        RegistrationField, RegistrationForm, TokenPanel, VpaForm,
    },
    models::{sample_notifications, Notification, UserType},
    navigation::{MenuItem, Navigator, Route, Screen},
    services::WalletOperation,
    timer::OtpCountdown,
    toast::{Toast, ToastKind, ToastNotifier},
};

/// Something that happened: a key press mapped by the frontend, a timer
/// tick, or the completion of a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Follow an unguarded edge (Back, Sell, Continue, ...).
    Navigate(Route),
    /// Open or close the side menu.
    ToggleMenu,
    /// Close the side menu.
    CloseMenu,
    /// Show the notifications list.
    OpenNotifications,
    /// Hide the notifications list.
    CloseNotifications,
    /// Pick a side-menu entry.
    SelectMenuItem(MenuItem),
    /// Confirm the logout prompt.
    ConfirmLogout,
    /// Dismiss the logout prompt.
    CancelLogout,

    /// Replace the phone field text.
    SetPhone(String),
    /// Tick or untick the terms checkbox.
    SetTermsAccepted(bool),
    /// Press "Get OTP".
    RequestOtp,
    /// Replace the OTP field text.
    SetOtp(String),
    /// Press "Verify".
    SubmitOtp,
    /// Press "Resend OTP".
    ResendOtp,
    /// One-second countdown tick.
    Tick,
    /// Pick a user type.
    SelectUserType(UserType),
    /// Press "Continue" on the user type screen.
    ContinueUserType,

    /// Replace a registration field.
    SetRegistrationField(RegistrationField, String),
    /// Press "Register".
    SubmitRegistration,
    /// Result of [`Command::RegisterProsumer`]; the error is for logging only.
    RegistrationFinished(Result<(), String>),

    /// Pick a bid category.
    SelectBidCategory(BidCategory),
    /// Replace a bid field.
    SetBidField(BidField, String),
    /// Press "Submit" on the bid form.
    SubmitBid,

    /// Open the buy modal.
    OpenBuyModal,
    /// Open the redeem modal.
    OpenRedeemModal,
    /// Close whichever token modal is open.
    CloseTokenModal,
    /// Replace the token amount text.
    SetTokenAmount(String),
    /// Press "Buy".
    BuyTokens,
    /// Press "Redeem".
    RedeemTokens,
    /// Press "Add VPA" in the redeem modal.
    AddVpa,
    /// Result of [`Command::ConnectWallet`].
    WalletFinished {
        /// Operation that finished.
        operation: WalletOperation,
        /// Outcome.
        result: Result<(), WalletError>,
    },

    /// Replace the VPA field.
    SetVpa(String),
    /// Replace the VPA username field.
    SetVpaUsername(String),
    /// Press "Submit" on the VPA screen.
    SubmitVpa,
    /// Replace the change request text.
    SetChangeRequest(String),
    /// Press "Save" on the change request screen.
    SaveChangeRequest,
    /// Press "Submit" on the change request screen.
    SubmitChangeRequest,

    /// Drop the toast if its deadline passed.
    ExpireToast,
    /// Drop the toast now.
    DismissToast,
    /// Acknowledge the blocking alert.
    DismissAlert,
    /// [`Command::OpenSupport`] could not open the link.
    SupportLinkFailed(String),
}

impl Action {
    /// Actions that are not user input and must be handled even while an
    /// alert blocks the screen.
    fn is_background(&self) -> bool {
        matches!(
            self,
            Action::Tick
                | Action::ExpireToast
                | Action::DismissAlert
                | Action::RegistrationFinished(_)
                | Action::WalletFinished { .. }
                | Action::SupportLinkFailed(_)
        )
    }
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `POST` the record to the backend.
    RegisterProsumer(ProsumerRecord),
    /// Ask the wallet to perform a token operation.
    ConnectWallet {
        /// Buy or redeem.
        operation: WalletOperation,
        /// Token amount; zero when none was entered.
        amount: f64,
    },
    /// Open the support chat link.
    OpenSupport,
}

/// The whole client state.
#[derive(Debug, Clone)]
pub struct AppState {
    nav: Navigator,
    active_menu: MenuItem,
    credentials: Credentials,
    countdown: OtpCountdown,
    user_type: Option<UserType>,
    registration: RegistrationForm,
    registration_pending: bool,
    bid: BidForm,
    tokens: TokenPanel,
    vpa: VpaForm,
    vpa_exists: bool,
    change_request: ChangeRequest,
    notifications: Vec<Notification>,
    toasts: ToastNotifier,
    alert: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AppState {
    /// Fresh state on the welcome screen.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            nav: Navigator::default(),
            active_menu: MenuItem::default(),
            credentials: Credentials::default(),
            countdown: OtpCountdown::new(config.otp_resend_secs),
            user_type: None,
            registration: RegistrationForm::default(),
            registration_pending: false,
            bid: BidForm::default(),
            tokens: TokenPanel::default(),
            vpa: VpaForm::default(),
            vpa_exists: false,
            change_request: ChangeRequest::default(),
            notifications: sample_notifications(),
            toasts: ToastNotifier::new(config.toast_ttl()),
            alert: None,
        }
    }

    /// Active screen and overlays.
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    /// Highlighted side-menu entry.
    pub fn active_menu(&self) -> MenuItem {
        self.active_menu
    }

    /// Login form.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// OTP resend countdown.
    pub fn countdown(&self) -> &OtpCountdown {
        &self.countdown
    }

    /// Chosen user type.
    pub fn user_type(&self) -> Option<UserType> {
        self.user_type
    }

    /// Registration form.
    pub fn registration(&self) -> &RegistrationForm {
        &self.registration
    }

    /// Whether a registration request is in flight.
    pub fn registration_pending(&self) -> bool {
        self.registration_pending
    }

    /// Bid form.
    pub fn bid(&self) -> &BidForm {
        &self.bid
    }

    /// Token modal state.
    pub fn tokens(&self) -> &TokenPanel {
        &self.tokens
    }

    /// VPA form.
    pub fn vpa(&self) -> &VpaForm {
        &self.vpa
    }

    /// Whether a VPA has been registered.
    pub fn vpa_exists(&self) -> bool {
        self.vpa_exists
    }

    /// Account change request.
    pub fn change_request(&self) -> &ChangeRequest {
        &self.change_request
    }

    /// Inbox.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Visible toast.
    pub fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    /// Blocking alert text.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Apply `action` at time `now` and return the side effects to run.
    pub fn apply(&mut self, action: Action, now: Instant) -> Vec<Command> {
        if self.alert.is_some() && !action.is_background() {
            debug!(?action, "Ignoring input while alert is open");
            return Vec::new();
        }

        let mut commands = Vec::new();
        match action {
            Action::Navigate(route) => {
                if route.is_guarded() {
                    warn!(?route, "Guarded route requested directly; ignoring");
                } else if self.registration_pending && self.screen() == Screen::ProsumerRegistration {
                    debug!(?route, "Registration in flight; staying on the form");
                } else {
                    self.go(route);
                }
            }
            Action::ToggleMenu => self.nav.toggle_menu(),
            Action::CloseMenu => self.nav.close_menu(),
            Action::OpenNotifications => self.nav.open_notifications(),
            Action::CloseNotifications => self.nav.close_notifications(),
            Action::SelectMenuItem(item) => {
                self.active_menu = item;
                match item {
                    MenuItem::Support => commands.push(Command::OpenSupport),
                    MenuItem::Logout => self.nav.set_logout_confirm(true),
                    _ => {
                        if let Some(target) = item.target() {
                            self.go(Route::Menu(target));
                        }
                        self.nav.close_menu();
                    }
                }
            }
            Action::ConfirmLogout => {
                if self.nav.overlays().logout_confirm && self.go(Route::LoggedOut) {
                    self.reset_session();
                }
            }
            Action::CancelLogout => self.nav.set_logout_confirm(false),

            Action::SetPhone(raw) => {
                self.credentials.set_phone(&raw);
            }
            Action::SetTermsAccepted(accepted) => self.credentials.set_terms_accepted(accepted),
            Action::RequestOtp => {
                if self.credentials.can_request_otp() && self.go(Route::OtpRequested) {
                    self.countdown.restart();
                    info!("OTP requested");
                }
            }
            Action::SetOtp(raw) => {
                self.credentials.set_otp(&raw);
            }
            Action::SubmitOtp => {
                if self.credentials.can_submit_otp() {
                    self.go(Route::OtpVerified);
                }
            }
            Action::ResendOtp => {
                if self.screen() == Screen::Otp && self.countdown.can_resend() {
                    self.countdown.restart();
                    self.credentials.clear_otp();
                    self.toasts.success("OTP sent successfully", now);
                }
            }
            Action::Tick => {
                if self.screen() == Screen::Otp && self.countdown.tick() {
                    debug!("OTP resend enabled");
                }
            }
            Action::SelectUserType(kind) => self.user_type = Some(kind),
            Action::ContinueUserType => {
                if self.user_type == Some(UserType::Prosumer) {
                    self.go(Route::ProsumerSelected);
                }
            }

            Action::SetRegistrationField(field, raw) => {
                self.registration.set(field, &raw);
            }
            Action::SubmitRegistration => {
                if !self.registration_pending && self.registration.can_submit() {
                    match self.registration.validate() {
                        Ok(record) => {
                            self.registration_pending = true;
                            commands.push(Command::RegisterProsumer(record));
                        }
                        Err(err) => {
                            debug!(?err, "Registration blocked");
                            self.alert = Some(err.to_string());
                        }
                    }
                }
            }
            Action::RegistrationFinished(result) => {
                self.registration_pending = false;
                match result {
                    Ok(()) => {
                        info!("Prosumer registered");
                        self.go(Route::Registered);
                    }
                    Err(err) => {
                        warn!(error = %err, "Prosumer registration failed");
                        self.alert = Some(REGISTRATION_FAILED.to_string());
                    }
                }
            }

            Action::SelectBidCategory(category) => self.bid.select_category(category),
            Action::SetBidField(field, raw) => self.bid.set(field, &raw),
            Action::SubmitBid => {
                if self.bid.can_submit() && self.bid.validate() && self.go(Route::BidSubmitted) {
                    info!(category = ?self.bid.category(), "Bid submitted");
                    self.toasts.success("Bid submitted successfully", now);
                }
            }

            Action::OpenBuyModal => {
                if self.screen() == Screen::Wallet {
                    self.tokens.clear_error();
                    self.nav.open_buy_modal();
                }
            }
            Action::OpenRedeemModal => {
                if self.screen() == Screen::Wallet {
                    self.tokens.clear_error();
                    self.nav.open_redeem_modal();
                }
            }
            Action::CloseTokenModal => self.nav.close_token_modals(),
            Action::SetTokenAmount(raw) => self.tokens.set_amount(&raw),
            Action::BuyTokens => {
                if self.nav.overlays().buy_modal && self.tokens.can_buy() {
                    self.tokens.begin_connecting();
                    commands.push(Command::ConnectWallet {
                        operation: WalletOperation::Buy,
                        amount: self.tokens.amount_value().unwrap_or(0.0),
                    });
                }
            }
            Action::RedeemTokens => {
                if self.nav.overlays().redeem_modal && self.tokens.can_redeem() {
                    if self.vpa_exists {
                        self.tokens.begin_connecting();
                        commands.push(Command::ConnectWallet {
                            operation: WalletOperation::Redeem,
                            amount: self.tokens.amount_value().unwrap_or(0.0),
                        });
                    } else {
                        self.tokens.fail(WalletError::MissingVpa);
                    }
                }
            }
            Action::AddVpa => {
                if self.nav.overlays().redeem_modal {
                    self.go(Route::AddVpa);
                }
            }
            Action::WalletFinished { operation, result } => {
                let succeeded = result.is_ok();
                self.tokens.finish(result);
                if succeeded {
                    self.nav.close_token_modals();
                    self.toasts.success(operation.success_message(), now);
                } else {
                    warn!(?operation, "Wallet operation failed");
                }
            }

            Action::SetVpa(raw) => self.vpa.vpa = raw,
            Action::SetVpaUsername(raw) => self.vpa.username = raw,
            Action::SubmitVpa => {
                if self.go(Route::VpaSaved) {
                    self.vpa_exists = true;
                    self.toasts.success("VPA updated successfully", now);
                }
            }
            Action::SetChangeRequest(raw) => {
                self.change_request.text = raw;
                self.change_request.draft_saved = false;
            }
            Action::SaveChangeRequest => {
                if self.screen() == Screen::EditAccountDetails {
                    self.change_request.draft_saved = true;
                    self.toasts.success("Details saved as draft", now);
                }
            }
            Action::SubmitChangeRequest => {
                if self.go(Route::ChangeRequestSubmitted) {
                    self.change_request = ChangeRequest::default();
                    self.toasts.success("Request submitted successfully", now);
                }
            }

            Action::ExpireToast => {
                self.toasts.expire(now);
            }
            Action::DismissToast => self.toasts.dismiss(),
            Action::DismissAlert => self.alert = None,
            Action::SupportLinkFailed(err) => {
                warn!(error = %err, "Support link failed");
                self.show_error(SUPPORT_LINK_FAILED, now);
            }
        }
        commands
    }

    /// Show an error toast.
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        self.toasts.show(ToastKind::Error, message, now);
    }

    fn go(&mut self, route: Route) -> bool {
        let from = self.nav.screen();
        match self.nav.follow(route) {
            Some(screen) => {
                info!(?from, ?route, ?screen, "Screen changed");
                true
            }
            None => {
                debug!(?from, ?route, "No such transition");
                false
            }
        }
    }

    fn reset_session(&mut self) {
        self.credentials.reset();
        self.countdown.reset();
        self.user_type = None;
        self.registration.reset();
        self.registration_pending = false;
        self.bid.reset();
        self.active_menu = MenuItem::default();
        info!("Logged out");
    }
}
