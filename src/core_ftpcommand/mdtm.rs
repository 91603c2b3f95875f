use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;

/// Handles the MDTM FTP command, replying with the modification time in UTC.
pub async fn handle_mdtm_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    match ctx.storage.stat(&path).await {
        Ok(stat) => {
            let response = format!("213 {}\r\n", format_mdtm(stat.modified));
            send_response(&writer, response.as_bytes()).await
        }
        Err(e) => send_failure(&writer, "MDTM", &e).await,
    }
}

/// `YYYYMMDDHHMMSS` timestamp as used by MDTM replies.
pub fn format_mdtm(modified: SystemTime) -> String {
    let modified: DateTime<Utc> = modified.into();
    modified.format("%Y%m%d%H%M%S").to_string()
}
