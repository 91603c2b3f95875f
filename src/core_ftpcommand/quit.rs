use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the QUIT FTP command.
///
/// Only the reply is sent here; the connection loop closes the socket once
/// the handler has returned.
pub async fn handle_quit_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    info!("Received QUIT command from connection {}", session.lock().await.id);
    send_response(&writer, b"221 Bye.\r\n").await
}
