pub mod announcement;
pub mod app_config;
pub mod auth;
pub mod common;
pub mod stats;
pub mod ticket;
pub mod winner;

pub use announcement::*;
pub use app_config::*;
pub use auth::*;
pub use common::*;
pub use stats::*;
pub use ticket::*;
pub use winner::*;
