// Connection handling module
// Serves a single accepted TCP connection in its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;
use crate::server::disconnect;

/// Handle a single connection in a spawned task.
///
/// The router produces every response, so a connection-level error here means
/// the transport failed. A client that disconnected mid-transfer is silently
/// ignored; anything else gets one log line. Either way only this connection
/// is affected and the accept loop keeps running.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| {
                    let state = Arc::clone(&state);
                    async move { handler::handle_request(req, peer_addr, state).await }
                }),
            );

        if let Err(err) = conn.await {
            // A connection torn down before a complete request is routine
            // browser behavior (preconnect, cancelled navigation)
            if err.is_incomplete_message() || disconnect::is_client_disconnect(&err) {
                return;
            }
            logger::log_connection_error(&err);
        }
    });
}
