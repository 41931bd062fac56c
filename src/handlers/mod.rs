pub mod admin;
pub mod announcements;
pub mod auth;
pub mod config;
pub mod stats;
pub mod tickets;
pub mod winners;

pub use admin::admin_config;
pub use announcements::announcement_config;
pub use auth::auth_config;
pub use config::config_config;
pub use stats::stats_config;
pub use tickets::ticket_config;
pub use winners::winner_config;
