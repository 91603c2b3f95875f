use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RNTO (Rename To) FTP command.
///
/// The pending source is consumed whatever the outcome.
pub async fn handle_rnto_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let (from, to) = {
        let mut session = session.lock().await;
        (session.rename_from.take(), session.resolve(&arg))
    };

    let Some(from) = from else {
        return send_failure(&writer, "RNTO", &FtpError::NoRenameSource).await;
    };

    match ctx.storage.rename(&from, &to).await {
        Ok(()) => {
            info!("Renamed {} to {}", from, to);
            send_response(&writer, b"250 OK\r\n").await
        }
        Err(e) => send_failure(&writer, "RNTO", &e).await,
    }
}
