//! Command implementations.

pub mod health;
pub mod history;
pub mod profile;
pub mod show;
pub mod verify;

pub use self::health::execute_health;
pub use self::history::{execute_history, load_history};
pub use self::profile::execute_profile;
pub use self::show::{execute_show, navigate_detail, open_detail};
pub use self::verify::{execute_verify, submit_claim};
