#![warn(clippy::all, missing_docs)]

//! Core application model for the Solar P2P trading client.
//!
//! This crate hosts the screen graph, form validation, the OTP countdown,
//! toasts, configuration, and the service traits for the registration
//! backend and the CBDC wallet. All state changes go through
//! [`AppState::apply`]; frontends render the state and run the returned
//! [`Command`]s with [`Services`].

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;
pub mod timer;
pub mod toast;
pub mod validation;

pub use config::AppConfig;
pub use controller::Services;
pub use error::{ApiError, RegistrationError, WalletError};
pub use navigation::{MenuItem, Navigator, Route, Screen, View};
pub use state::{Action, AppState, Command};
