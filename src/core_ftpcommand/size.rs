use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the SIZE (File Size) FTP command.
pub async fn handle_size_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    match ctx.storage.stat(&path).await {
        Ok(stat) => {
            info!("File size for {} is {}", path, stat.size);
            send_response(&writer, format!("213 {}\r\n", stat.size).as_bytes()).await
        }
        Err(e) => send_failure(&writer, "SIZE", &e).await,
    }
}
