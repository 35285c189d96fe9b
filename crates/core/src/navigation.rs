#![allow(missing_docs)]

//! Screen graph and overlay flags.
//!
//! Screens change only through [`next_screen`], which looks the edge up in a
//! fixed transition table. Overlays are independent flags layered on top of
//! whichever screen is active.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Every full-page screen of the client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Screen {
    Welcome,
    Login,
    Otp,
    UserType,
    ProsumerRegistration,
    RegistrationConfirmation,
    Dashboard,
    Bidding,
    Account,
    BidHistory,
    Wallet,
    EditAccountDetails,
    UpdateVpa,
}

impl Screen {
    /// All screens in flow order.
    pub const ALL: [Screen; 13] = [
        Screen::Welcome,
        Screen::Login,
        Screen::Otp,
        Screen::UserType,
        Screen::ProsumerRegistration,
        Screen::RegistrationConfirmation,
        Screen::Dashboard,
        Screen::Bidding,
        Screen::Account,
        Screen::BidHistory,
        Screen::Wallet,
        Screen::EditAccountDetails,
        Screen::UpdateVpa,
    ];

    /// Header title.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Peer-To-Peer Energy Trading Platform",
            Screen::Login => "Log In",
            Screen::Otp => "Verify OTP",
            Screen::UserType => "Select User Type",
            Screen::ProsumerRegistration => "Prosumer Registration",
            Screen::RegistrationConfirmation => "Registration Status",
            Screen::Dashboard => "P2P Dashboard",
            Screen::Bidding => "P2P Bidding",
            Screen::Account => "Account",
            Screen::BidHistory => "Bid History",
            Screen::Wallet => "My Wallet",
            Screen::EditAccountDetails => "Edit Account Details",
            Screen::UpdateVpa => "Update VPA",
        }
    }
}

/// Side-menu destinations that are screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuTarget {
    Dashboard,
    Account,
    BidHistory,
    Wallet,
}

impl MenuTarget {
    /// Screen the entry leads to.
    pub fn screen(&self) -> Screen {
        match self {
            MenuTarget::Dashboard => Screen::Dashboard,
            MenuTarget::Account => Screen::Account,
            MenuTarget::BidHistory => Screen::BidHistory,
            MenuTarget::Wallet => Screen::Wallet,
        }
    }
}

/// Entry of the dashboard side menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Account,
    BidHistory,
    Wallet,
    Support,
    Logout,
}

impl MenuItem {
    /// Entries in display order.
    pub const ALL: [MenuItem; 6] = [
        MenuItem::Dashboard,
        MenuItem::Account,
        MenuItem::BidHistory,
        MenuItem::Wallet,
        MenuItem::Support,
        MenuItem::Logout,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Dashboard => "Dashboard",
            MenuItem::Account => "Account",
            MenuItem::BidHistory => "Bid History",
            MenuItem::Wallet => "My Wallet",
            MenuItem::Support => "Support",
            MenuItem::Logout => "Logout",
        }
    }

    /// Screen the entry navigates to, if it is a plain navigation entry.
    pub fn target(&self) -> Option<MenuTarget> {
        match self {
            MenuItem::Dashboard => Some(MenuTarget::Dashboard),
            MenuItem::Account => Some(MenuTarget::Account),
            MenuItem::BidHistory => Some(MenuTarget::BidHistory),
            MenuItem::Wallet => Some(MenuTarget::Wallet),
            MenuItem::Support | MenuItem::Logout => None,
        }
    }
}

/// A labelled edge out of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Back,
    Login,
    Register,
    Continue,
    Sell,
    EditDetails,
    UpdateVpa,
    AddVpa,
    Menu(MenuTarget),
    OtpRequested,
    OtpVerified,
    ProsumerSelected,
    Registered,
    BidSubmitted,
    VpaSaved,
    ChangeRequestSubmitted,
    LoggedOut,
}

impl Route {
    /// Guarded routes are only taken by the state reducer after its checks pass.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            Route::OtpRequested
                | Route::OtpVerified
                | Route::ProsumerSelected
                | Route::Registered
                | Route::BidSubmitted
                | Route::VpaSaved
                | Route::ChangeRequestSubmitted
                | Route::LoggedOut
        )
    }
}

const TRANSITIONS: &[(Screen, Route, Screen)] = &[
    (Screen::Welcome, Route::Login, Screen::Login),
    (Screen::Welcome, Route::Register, Screen::Login),
    (Screen::Login, Route::Back, Screen::Welcome),
    (Screen::Login, Route::OtpRequested, Screen::Otp),
    (Screen::Otp, Route::Back, Screen::Login),
    (Screen::Otp, Route::OtpVerified, Screen::UserType),
    (Screen::UserType, Route::Back, Screen::Otp),
    (Screen::UserType, Route::ProsumerSelected, Screen::ProsumerRegistration),
    (Screen::ProsumerRegistration, Route::Back, Screen::UserType),
    (Screen::ProsumerRegistration, Route::Registered, Screen::RegistrationConfirmation),
    (Screen::RegistrationConfirmation, Route::Back, Screen::ProsumerRegistration),
    (Screen::RegistrationConfirmation, Route::Continue, Screen::Dashboard),
    (Screen::Dashboard, Route::Sell, Screen::Bidding),
    (Screen::Dashboard, Route::Menu(MenuTarget::Dashboard), Screen::Dashboard),
    (Screen::Dashboard, Route::Menu(MenuTarget::Account), Screen::Account),
    (Screen::Dashboard, Route::Menu(MenuTarget::BidHistory), Screen::BidHistory),
    (Screen::Dashboard, Route::Menu(MenuTarget::Wallet), Screen::Wallet),
    (Screen::Dashboard, Route::LoggedOut, Screen::Welcome),
    (Screen::Bidding, Route::Back, Screen::Dashboard),
    (Screen::Bidding, Route::BidSubmitted, Screen::Dashboard),
    (Screen::Account, Route::Back, Screen::Dashboard),
    (Screen::Account, Route::EditDetails, Screen::EditAccountDetails),
    (Screen::Account, Route::UpdateVpa, Screen::UpdateVpa),
    (Screen::BidHistory, Route::Back, Screen::Dashboard),
    (Screen::Wallet, Route::Back, Screen::Dashboard),
    (Screen::Wallet, Route::AddVpa, Screen::UpdateVpa),
    (Screen::EditAccountDetails, Route::Back, Screen::Account),
    (Screen::EditAccountDetails, Route::ChangeRequestSubmitted, Screen::Account),
    (Screen::UpdateVpa, Route::Back, Screen::Account),
    (Screen::UpdateVpa, Route::VpaSaved, Screen::Account),
];

/// Destination of `route` taken from `from`, if that edge exists.
pub fn next_screen(from: Screen, route: Route) -> Option<Screen> {
    TRANSITIONS
        .iter()
        .find(|(source, edge, _)| *source == from && *edge == route)
        .map(|(_, _, target)| *target)
}

/// Routes leaving `from`.
pub fn routes_from(from: Screen) -> Vec<Route> {
    TRANSITIONS
        .iter()
        .filter(|(source, _, _)| *source == from)
        .map(|(_, route, _)| *route)
        .collect()
}

/// Screens reachable from `start` following any edge, guarded or not.
pub fn reachable_from(start: Screen) -> BTreeSet<Screen> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(screen) = queue.pop_front() {
        for (_, _, target) in TRANSITIONS.iter().filter(|(source, _, _)| *source == screen) {
            if seen.insert(*target) {
                queue.push_back(*target);
            }
        }
    }
    seen
}

/// Overlay flags layered over the active screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlays {
    pub menu: bool,
    pub notifications: bool,
    pub logout_confirm: bool,
    pub buy_modal: bool,
    pub redeem_modal: bool,
}

/// What the frontend should draw as the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The notifications list covers the whole page.
    Notifications,
    /// The active screen, with any layered overlays on top.
    Screen(Screen),
}

/// Active screen plus overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    overlays: Overlays,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            overlays: Overlays::default(),
        }
    }
}

impl Navigator {
    /// Currently active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current overlay flags.
    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Body to render. Notifications replace the screen; every other overlay layers on it.
    pub fn view(&self) -> View {
        if self.overlays.notifications {
            View::Notifications
        } else {
            View::Screen(self.screen)
        }
    }

    /// Follow `route` from the active screen. Returns the new screen, or
    /// `None` (leaving everything untouched) when no such edge exists.
    ///
    /// A successful transition closes the menu, the logout confirmation and
    /// the token modals. The notifications flag is left as it is.
    pub fn follow(&mut self, route: Route) -> Option<Screen> {
        let target = next_screen(self.screen, route)?;
        self.screen = target;
        self.overlays.menu = false;
        self.overlays.logout_confirm = false;
        self.close_token_modals();
        Some(target)
    }

    pub fn toggle_menu(&mut self) {
        self.overlays.menu = !self.overlays.menu;
    }

    pub fn close_menu(&mut self) {
        self.overlays.menu = false;
    }

    pub fn open_notifications(&mut self) {
        self.overlays.notifications = true;
    }

    pub fn close_notifications(&mut self) {
        self.overlays.notifications = false;
    }

    pub fn set_logout_confirm(&mut self, open: bool) {
        self.overlays.logout_confirm = open;
    }

    pub fn open_buy_modal(&mut self) {
        self.overlays.redeem_modal = false;
        self.overlays.buy_modal = true;
    }

    pub fn open_redeem_modal(&mut self) {
        self.overlays.buy_modal = false;
        self.overlays.redeem_modal = true;
    }

    pub fn close_token_modals(&mut self) {
        self.overlays.buy_modal = false;
        self.overlays.redeem_modal = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_is_reachable_from_welcome() {
        let reachable = reachable_from(Screen::Welcome);
        for screen in Screen::ALL {
            assert!(reachable.contains(&screen), "{screen:?} unreachable");
        }
    }

    #[test]
    fn every_screen_except_welcome_and_dashboard_has_a_back_edge() {
        for screen in Screen::ALL {
            let has_back = next_screen(screen, Route::Back).is_some();
            let expected = !matches!(screen, Screen::Welcome | Screen::Dashboard);
            assert_eq!(has_back, expected, "{screen:?}");
        }
    }

    #[test]
    fn unknown_edges_leave_navigator_untouched() {
        let mut nav = Navigator::default();
        nav.toggle_menu();
        assert_eq!(nav.follow(Route::Sell), None);
        assert_eq!(nav.screen(), Screen::Welcome);
        assert!(nav.overlays().menu);
    }

    #[test]
    fn transitions_close_layered_overlays() {
        let mut nav = Navigator::default();
        nav.follow(Route::Login);
        nav.toggle_menu();
        nav.set_logout_confirm(true);
        nav.open_buy_modal();
        assert_eq!(nav.follow(Route::Back), Some(Screen::Welcome));
        assert_eq!(nav.overlays(), &Overlays::default());
    }

    // The notifications list is a full-page takeover while the menu and
    // modals layer over the screen. This pins that asymmetry.
    #[test]
    fn notifications_take_over_the_view_but_menu_does_not() {
        let mut nav = Navigator {
            screen: Screen::Dashboard,
            overlays: Overlays::default(),
        };
        nav.toggle_menu();
        assert_eq!(nav.view(), View::Screen(Screen::Dashboard));

        nav.open_notifications();
        assert_eq!(nav.view(), View::Notifications);

        nav.follow(Route::Sell);
        assert_eq!(nav.screen(), Screen::Bidding);
        assert_eq!(nav.view(), View::Notifications);

        nav.close_notifications();
        assert_eq!(nav.view(), View::Screen(Screen::Bidding));
    }

    #[test]
    fn guarded_routes_are_flagged() {
        assert!(Route::OtpRequested.is_guarded());
        assert!(Route::LoggedOut.is_guarded());
        assert!(!Route::Back.is_guarded());
        assert!(!Route::Menu(MenuTarget::Wallet).is_guarded());
        assert!(routes_from(Screen::Dashboard).contains(&Route::Sell));
    }
}
