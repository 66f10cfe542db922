//! Image identity and label-suggestion core for slide labeling.
//!
//! [`identity`] decides whether two image references are the same image;
//! [`labels`] turns raw slide text into selectable label candidates.

pub mod config_manager;
pub mod error;
pub mod gallery;
pub mod identity;
pub mod labels;
pub mod session;

pub use error::{IdentityError, SessionError};
