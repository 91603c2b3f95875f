use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the PASS FTP command. Any password is accepted.
pub async fn handle_pass_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    _password: String,
) -> Result<(), std::io::Error> {
    debug!("PASS accepted for connection {}", session.lock().await.id);
    send_response(&writer, b"230 Logged in.\r\n").await
}
