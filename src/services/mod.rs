//! Business logic layer

pub mod session;

pub use session::AccountSession;
