//! Authentication
//!
//! Session middleware and login/logout helpers.

mod session;

pub use session::{log_in, log_out, require_user, session_layer};
