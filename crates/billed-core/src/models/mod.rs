//! Data models shared by the store backends and the controllers.

mod bill;
mod user;

pub use bill::*;
pub use user::*;
