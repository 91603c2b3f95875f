use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_feat_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    _session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    send_response(&writer, b"211 no-features\r\n").await
}
