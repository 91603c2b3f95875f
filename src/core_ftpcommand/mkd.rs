use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the MKD (Make Directory) FTP command.
pub async fn handle_mkd_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    match ctx.storage.mkdir(&path).await {
        Ok(()) => {
            info!("Created directory {}", path);
            send_response(&writer, b"250 OK\r\n").await
        }
        Err(e) => send_failure(&writer, "MKD", &e).await,
    }
}
