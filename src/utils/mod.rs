pub mod code_generator;
pub mod device;
pub mod phone;

pub use code_generator::{generate_entry_id, generate_id_suffix, generate_ticket_number};
pub use device::detect_device_type;
pub use phone::validate_pk_mobile;
