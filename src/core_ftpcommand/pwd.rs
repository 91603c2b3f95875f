use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the PWD FTP command.
pub async fn handle_pwd_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    let cwd = session.lock().await.cwd.clone();
    send_response(&writer, format!("257 \"{}\"\r\n", cwd).as_bytes()).await
}
