pub mod announcement_service;
pub mod app_config_service;
pub mod auth_service;
pub mod stats_service;
pub mod ticket_service;
pub mod winner_service;

pub use announcement_service::*;
pub use app_config_service::*;
pub use auth_service::*;
pub use stats_service::*;
pub use ticket_service::*;
pub use winner_service::*;
