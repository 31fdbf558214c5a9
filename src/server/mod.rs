// Server module entry point
// Listener setup, accept loop, per-connection serving, signals

pub mod connection;
pub mod disconnect;
pub mod listener;
pub mod signal;

mod server_loop;

pub use disconnect::is_client_disconnect;
pub use listener::create_reusable_listener;
pub use server_loop::run_server_loop;
pub use signal::start_signal_handler;
