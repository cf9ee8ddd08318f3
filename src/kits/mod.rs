//! Kit model and storage.

pub mod kit;
pub mod store;

pub use kit::{Kit, UserId, UserKits};
pub use store::KitStore;
