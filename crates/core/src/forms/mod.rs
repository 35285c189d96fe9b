//! Form state containers. Each owns its raw values and inline errors.

pub mod account;
pub mod bid;
pub mod login;
pub mod registration;

pub use account::{ChangeRequest, TokenPanel, VpaForm};
pub use bid::{BidCategory, BidErrors, BidField, BidForm};
pub use login::Credentials;
pub use registration::{ProsumerRecord, RegistrationField, RegistrationForm};
