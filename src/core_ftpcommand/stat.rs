use crate::core_fs::listing;
use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the STAT FTP command.
///
/// Without an argument this is a status summary of the server and session.
/// With one, the detailed listing of the path is sent on the control channel.
pub async fn handle_stat_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        let summary = {
            let session = session.lock().await;
            format_status(&session, ctx.config.server.command_timeout_secs, ctx.client_count().await)
        };
        return send_response(&writer, summary.as_bytes()).await;
    }

    let path = session.lock().await.resolve(&arg);
    let lines = listing::list(&ctx.storage, &path, true).await;

    let mut reply = String::from("213-Status of ");
    reply.push_str(&path);
    reply.push_str(":\r\n");
    lines.iter().for_each(|line| reply.push_str(line));
    reply.push_str("213 Done.\r\n");
    send_response(&writer, reply.as_bytes()).await
}

/// Multi-line `211` status summary.
pub fn format_status(session: &Session, timeout_secs: u64, client_count: usize) -> String {
    format!(
        "211-({}) flashftpd status\r\n\
         \x20   Connected to ({})\r\n\
         \x20   Logged in as {}\r\n\
         \x20   TYPE: Binary STRU: File MODE: Stream\r\n\
         \x20   Session timeout {}\r\n\
         \x20   Client count is {}\r\n\
         211 End of Status\r\n",
        session.server_ip,
        session.remote_addr.ip(),
        session.username.as_deref().unwrap_or("anonymous"),
        timeout_secs,
        client_count
    )
}
