use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the DELE (Delete File) FTP command.
pub async fn handle_dele_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    match ctx.storage.remove(&path).await {
        Ok(()) => {
            info!("Deleted file {}", path);
            send_response(&writer, b"250 OK\r\n").await
        }
        Err(e) => send_failure(&writer, "DELE", &e).await,
    }
}
