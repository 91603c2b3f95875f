use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RMD (Remove Directory) FTP command. Non-empty directories are
/// refused by the filesystem and answered with the generic failure.
pub async fn handle_rmd_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    match ctx.storage.rmdir(&path).await {
        Ok(()) => {
            info!("Removed directory {}", path);
            send_response(&writer, b"250 OK\r\n").await
        }
        Err(e) => send_failure(&writer, "RMD", &e).await,
    }
}
