//! Focusable controls of each screen and how key presses map onto them.

use chrono::NaiveDate;
use solar_p2p_core::{
    forms::{bid::next_month_name, BidCategory, BidField, RegistrationField},
    models::UserType,
    Action, AppState, MenuItem, Route, Screen,
};

/// Push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Login,
    Register,
    GetOtp,
    Verify,
    ResendOtp,
    ContinueUserType,
    SubmitRegistration,
    GoToDashboard,
    Menu,
    Notifications,
    Sell,
    SubmitBid,
    Back,
    EditDetails,
    UpdateVpa,
    BuyTokens,
    RedeemTokens,
    ConfirmBuy,
    ConfirmRedeem,
    AddVpa,
    CloseModal,
    SubmitVpa,
    SaveDraft,
    SubmitRequest,
    ConfirmLogout,
    CancelLogout,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Login => "Login",
            Button::Register => "Register",
            Button::GetOtp => "Get OTP",
            Button::Verify => "Verify",
            Button::ResendOtp => "Resend OTP",
            Button::ContinueUserType | Button::GoToDashboard => "Continue",
            Button::SubmitRegistration => "Register",
            Button::Menu => "Menu",
            Button::Notifications => "Notifications",
            Button::Sell => "SELL",
            Button::SubmitBid | Button::SubmitVpa | Button::SubmitRequest => "Submit",
            Button::Back | Button::CloseModal | Button::CancelLogout => "Cancel",
            Button::EditDetails => "Edit Account Details",
            Button::UpdateVpa => "Update VPA",
            Button::BuyTokens => "Buy Tokens",
            Button::RedeemTokens => "Redeem Tokens",
            Button::ConfirmBuy => "Buy",
            Button::ConfirmRedeem => "Redeem",
            Button::AddVpa => "Add VPA",
            Button::SaveDraft => "Save",
            Button::ConfirmLogout => "Logout",
        }
    }

    /// Whether pressing the button does anything right now.
    pub fn enabled(&self, state: &AppState) -> bool {
        match self {
            Button::GetOtp => state.credentials().can_request_otp(),
            Button::Verify => state.credentials().can_submit_otp(),
            Button::ResendOtp => state.countdown().can_resend(),
            Button::ContinueUserType => state.user_type().is_some(),
            Button::SubmitRegistration => {
                state.registration().can_submit() && !state.registration_pending()
            }
            Button::SubmitBid => state.bid().can_submit(),
            Button::ConfirmBuy => state.tokens().can_buy(),
            Button::ConfirmRedeem => state.tokens().can_redeem(),
            _ => true,
        }
    }

    fn action(&self) -> Action {
        match self {
            Button::Login => Action::Navigate(Route::Login),
            Button::Register => Action::Navigate(Route::Register),
            Button::GetOtp => Action::RequestOtp,
            Button::Verify => Action::SubmitOtp,
            Button::ResendOtp => Action::ResendOtp,
            Button::ContinueUserType => Action::ContinueUserType,
            Button::SubmitRegistration => Action::SubmitRegistration,
            Button::GoToDashboard => Action::Navigate(Route::Continue),
            Button::Menu => Action::ToggleMenu,
            Button::Notifications => Action::OpenNotifications,
            Button::Sell => Action::Navigate(Route::Sell),
            Button::SubmitBid => Action::SubmitBid,
            Button::Back => Action::Navigate(Route::Back),
            Button::EditDetails => Action::Navigate(Route::EditDetails),
            Button::UpdateVpa => Action::Navigate(Route::UpdateVpa),
            Button::BuyTokens => Action::OpenBuyModal,
            Button::RedeemTokens => Action::OpenRedeemModal,
            Button::ConfirmBuy => Action::BuyTokens,
            Button::ConfirmRedeem => Action::RedeemTokens,
            Button::AddVpa => Action::AddVpa,
            Button::CloseModal => Action::CloseTokenModal,
            Button::SubmitVpa => Action::SubmitVpa,
            Button::SaveDraft => Action::SaveChangeRequest,
            Button::SubmitRequest => Action::SubmitChangeRequest,
            Button::ConfirmLogout => Action::ConfirmLogout,
            Button::CancelLogout => Action::CancelLogout,
        }
    }
}

/// How a control reacts to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Free text; characters and Backspace edit it.
    Text,
    /// Fixed options; Left/Right cycle through them.
    Choice,
    /// Space or Enter flips it.
    Toggle,
    /// Enter presses it.
    Button,
}

/// One focusable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Phone,
    Terms,
    Otp,
    UserType(UserType),
    Registration(RegistrationField),
    BidCategory,
    Bid(BidField),
    TokenAmount,
    Vpa,
    VpaUsername,
    ChangeRequest,
    Menu(MenuItem),
    Button(Button),
}

impl Control {
    pub fn kind(&self) -> ControlKind {
        match self {
            Control::Terms | Control::UserType(_) => ControlKind::Toggle,
            Control::BidCategory | Control::Bid(BidField::Period) => ControlKind::Choice,
            Control::Registration(field) if field.is_choice() => ControlKind::Choice,
            Control::Menu(_) | Control::Button(_) => ControlKind::Button,
            _ => ControlKind::Text,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Phone => "Mobile Number",
            Control::Terms => "I agree to the Terms & Conditions",
            Control::Otp => "Enter OTP",
            Control::UserType(kind) => kind.label(),
            Control::Registration(field) => field.label(),
            Control::BidCategory => "Bid Category",
            Control::Bid(field) => field.label(),
            Control::TokenAmount => "Number of Tokens (1 Token = 1₹)",
            Control::Vpa => "Virtual Payment Address (VPA)",
            Control::VpaUsername => "Username",
            Control::ChangeRequest => "Account change details",
            Control::Menu(item) => item.label(),
            Control::Button(button) => button.label(),
        }
    }

    /// Current text of a text or choice control.
    pub fn value(&self, state: &AppState) -> String {
        match self {
            Control::Phone => state.credentials().phone().to_string(),
            Control::Otp => state.credentials().otp().to_string(),
            Control::Registration(field) => state.registration().value(*field).to_string(),
            Control::BidCategory => state
                .bid()
                .category()
                .map(|category| category.label().to_string())
                .unwrap_or_default(),
            Control::Bid(field) => state.bid().value(*field).to_string(),
            Control::TokenAmount => state.tokens().amount().to_string(),
            Control::Vpa => state.vpa().vpa.clone(),
            Control::VpaUsername => state.vpa().username.clone(),
            Control::ChangeRequest => state.change_request().text.clone(),
            _ => String::new(),
        }
    }

    /// Whether a toggle is on.
    pub fn checked(&self, state: &AppState) -> bool {
        match self {
            Control::Terms => state.credentials().terms_accepted(),
            Control::UserType(kind) => state.user_type() == Some(*kind),
            _ => false,
        }
    }

    pub fn enabled(&self, state: &AppState) -> bool {
        match self {
            Control::Button(button) => button.enabled(state),
            _ => true,
        }
    }

    /// Options of a choice control.
    pub fn options(&self, state: &AppState, today: NaiveDate) -> Vec<&'static str> {
        match self {
            Control::Registration(field) => state.registration().options(*field),
            Control::BidCategory => BidCategory::ALL.iter().map(|c| c.label()).collect(),
            Control::Bid(BidField::Period) => vec![next_month_name(today)],
            _ => Vec::new(),
        }
    }

    /// Action storing `text` as the new value.
    pub fn set_text(&self, text: String) -> Option<Action> {
        let action = match self {
            Control::Phone => Action::SetPhone(text),
            Control::Otp => Action::SetOtp(text),
            Control::Registration(field) => Action::SetRegistrationField(*field, text),
            Control::BidCategory => {
                let category = BidCategory::ALL
                    .into_iter()
                    .find(|category| category.label() == text)?;
                Action::SelectBidCategory(category)
            }
            Control::Bid(field) => Action::SetBidField(*field, text),
            Control::TokenAmount => Action::SetTokenAmount(text),
            Control::Vpa => Action::SetVpa(text),
            Control::VpaUsername => Action::SetVpaUsername(text),
            Control::ChangeRequest => Action::SetChangeRequest(text),
            _ => return None,
        };
        Some(action)
    }

    /// Append a typed character to a text control.
    pub fn type_char(&self, state: &AppState, ch: char) -> Option<Action> {
        if self.kind() != ControlKind::Text {
            return None;
        }
        let mut text = self.value(state);
        text.push(ch);
        self.set_text(text)
    }

    /// Remove the last character of a text control.
    pub fn backspace(&self, state: &AppState) -> Option<Action> {
        if self.kind() != ControlKind::Text {
            return None;
        }
        let mut text = self.value(state);
        text.pop()?;
        self.set_text(text)
    }

    /// Move a choice control `delta` options forward or back.
    pub fn cycle(&self, state: &AppState, today: NaiveDate, delta: isize) -> Option<Action> {
        if self.kind() != ControlKind::Choice {
            return None;
        }
        let options = self.options(state, today);
        if options.is_empty() {
            return None;
        }
        let len = options.len() as isize;
        let current = self.value(state);
        let next = match options.iter().position(|option| *option == current) {
            Some(index) => (index as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.set_text(options[next as usize].to_string())
    }

    /// Enter or Space on the control.
    pub fn activate(&self, state: &AppState) -> Option<Action> {
        match self {
            Control::Terms => Some(Action::SetTermsAccepted(!state.credentials().terms_accepted())),
            Control::UserType(kind) => Some(Action::SelectUserType(*kind)),
            Control::Menu(item) => Some(Action::SelectMenuItem(*item)),
            Control::Button(button) if button.enabled(state) => Some(button.action()),
            _ => None,
        }
    }
}

/// What currently owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusScope {
    Alert,
    Notifications,
    LogoutConfirm,
    Menu,
    BuyModal,
    RedeemModal,
    Screen(Screen),
}

/// Topmost layer receiving keys.
pub fn scope(state: &AppState) -> FocusScope {
    let overlays = state.navigator().overlays();
    if state.alert().is_some() {
        FocusScope::Alert
    } else if overlays.notifications {
        FocusScope::Notifications
    } else if overlays.logout_confirm {
        FocusScope::LogoutConfirm
    } else if overlays.menu {
        FocusScope::Menu
    } else if overlays.buy_modal {
        FocusScope::BuyModal
    } else if overlays.redeem_modal {
        FocusScope::RedeemModal
    } else {
        FocusScope::Screen(state.screen())
    }
}

/// Controls of the topmost layer in focus order.
pub fn controls(state: &AppState) -> Vec<Control> {
    use Button as B;
    match scope(state) {
        FocusScope::Alert | FocusScope::Notifications => Vec::new(),
        FocusScope::LogoutConfirm => vec![
            Control::Button(B::ConfirmLogout),
            Control::Button(B::CancelLogout),
        ],
        FocusScope::Menu => MenuItem::ALL.into_iter().map(Control::Menu).collect(),
        FocusScope::BuyModal => token_modal_controls(state, false),
        FocusScope::RedeemModal => token_modal_controls(state, true),
        FocusScope::Screen(screen) => screen_controls(state, screen),
    }
}

/// Controls of the buy or redeem modal.
pub fn token_modal_controls(state: &AppState, redeem: bool) -> Vec<Control> {
    let mut controls = vec![Control::TokenAmount];
    if !redeem {
        controls.extend([Control::Button(Button::ConfirmBuy), Control::Button(Button::CloseModal)]);
        return controls;
    }
    if !state.vpa_exists() {
        controls.push(Control::Button(Button::AddVpa));
    }
    controls.extend([Control::Button(Button::ConfirmRedeem), Control::Button(Button::CloseModal)]);
    controls
}

/// Controls laid out on `screen` itself, ignoring overlays.
pub fn screen_controls(state: &AppState, screen: Screen) -> Vec<Control> {
    use Button as B;
    match screen {
        Screen::Welcome => vec![Control::Button(B::Login), Control::Button(B::Register)],
        Screen::Login => vec![
            Control::Phone,
            Control::Terms,
            Control::Button(B::GetOtp),
            Control::Button(B::Back),
        ],
        Screen::Otp => vec![
            Control::Otp,
            Control::Button(B::Verify),
            Control::Button(B::ResendOtp),
            Control::Button(B::Back),
        ],
        Screen::UserType => {
            let mut controls: Vec<Control> =
                UserType::ALL.into_iter().map(Control::UserType).collect();
            controls.extend([Control::Button(B::ContinueUserType), Control::Button(B::Back)]);
            controls
        }
        Screen::ProsumerRegistration => {
            let mut controls: Vec<Control> = RegistrationField::ALL
                .into_iter()
                .map(Control::Registration)
                .collect();
            controls.extend([Control::Button(B::SubmitRegistration), Control::Button(B::Back)]);
            controls
        }
        Screen::RegistrationConfirmation => {
            vec![Control::Button(B::GoToDashboard), Control::Button(B::Back)]
        }
        Screen::Dashboard => vec![
            Control::Button(B::Sell),
            Control::Button(B::Menu),
            Control::Button(B::Notifications),
        ],
        Screen::Bidding => {
            let mut controls = vec![Control::BidCategory];
            if let Some(category) = state.bid().category() {
                controls.extend(BidField::for_category(category).iter().copied().map(Control::Bid));
            }
            controls.extend([Control::Button(B::SubmitBid), Control::Button(B::Back)]);
            controls
        }
        Screen::Account => vec![
            Control::Button(B::EditDetails),
            Control::Button(B::UpdateVpa),
            Control::Button(B::Back),
        ],
        Screen::BidHistory => vec![Control::Button(B::Back)],
        Screen::Wallet => vec![
            Control::Button(B::BuyTokens),
            Control::Button(B::RedeemTokens),
            Control::Button(B::Back),
        ],
        Screen::EditAccountDetails => vec![
            Control::ChangeRequest,
            Control::Button(B::SaveDraft),
            Control::Button(B::SubmitRequest),
            Control::Button(B::Back),
        ],
        Screen::UpdateVpa => vec![
            Control::Vpa,
            Control::VpaUsername,
            Control::Button(B::SubmitVpa),
            Control::Button(B::Back),
        ],
    }
}

/// Focus cursor that resets whenever the focused layer changes.
#[derive(Debug, Clone, Default)]
pub struct Focus {
    scope: Option<FocusScope>,
    index: usize,
}

impl Focus {
    /// Re-anchor on the current layer and clamp to its control count.
    pub fn sync(&mut self, scope: FocusScope, len: usize) {
        if self.scope != Some(scope) {
            self.scope = Some(scope);
            self.index = 0;
        }
        if len == 0 {
            self.index = 0;
        } else if self.index >= len {
            self.index = len - 1;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index as isize + delta).rem_euclid(len as isize) as usize;
    }
}
