// Server loop module
// Accept loop with graceful shutdown

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use super::disconnect;
use crate::config::AppState;
use crate::logger;

/// Accept connections until the shutdown signal fires.
///
/// This loop is the last-resort backstop: no per-connection failure ever
/// stops it. Accept errors caused by a client that already went away are
/// suppressed; any other accept error is logged and the loop continues.
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        if !disconnect::is_io_disconnect(&e) {
                            logger::log_server_error(&e);
                        }
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_server_stop();
                return Ok(());
            }
        }
    }
}
