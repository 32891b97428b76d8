// Command handlers
pub mod catalogue; // update, search
pub mod config;    // config
pub mod roms;      // add, del

pub use catalogue::{handle_search_command, handle_update_command};
pub use config::handle_config_command;
pub use roms::{handle_add_command, handle_del_command};
