use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles NOOP, and ABOR which has nothing to abort once a command has
/// returned.
pub async fn handle_noop_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    _session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    send_response(&writer, b"200 OK\r\n").await
}
