use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RNFR (Rename From) FTP command.
///
/// The source is only remembered when it exists. Any command other than RNTO
/// discards it again.
pub async fn handle_rnfr_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    if let Err(e) = ctx.storage.stat(&path).await {
        return send_failure(&writer, "RNFR", &e).await;
    }

    info!("Rename source set to {}", path);
    session.lock().await.rename_from = Some(path);
    send_response(&writer, b"350 Rename from\r\n").await
}
