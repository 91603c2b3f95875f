use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the TYPE FTP command.
///
/// Transfers are always binary; the requested type is only logged.
pub async fn handle_type_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    _session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    debug!("TYPE {} requested, staying in binary mode", arg);
    send_response(&writer, b"200 Transfer mode set\r\n").await
}
