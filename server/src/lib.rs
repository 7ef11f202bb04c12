pub mod broadcaster;
pub mod room;
pub mod server_config;
pub mod web_server;
pub mod ws_handler;
