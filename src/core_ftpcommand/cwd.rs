use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the CWD FTP command.
///
/// The working directory only moves when the resolved path is an existing
/// directory; otherwise the session is left untouched.
pub async fn handle_cwd_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let new_dir = session.lock().await.resolve(&arg);

    if !ctx.storage.is_dir(&new_dir).await {
        return send_failure(&writer, "CWD", &FtpError::NotADirectory(new_dir)).await;
    }

    info!("Changing directory to {}", new_dir);
    session.lock().await.cwd = new_dir;
    send_response(&writer, b"250 OK\r\n").await
}
