use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the CDUP FTP command. At the root this is a no-op.
pub async fn handle_cdup_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    {
        let mut session = session.lock().await;
        let parent = session.resolve("..");
        session.cwd = parent;
    }
    send_response(&writer, b"250 OK\r\n").await
}
