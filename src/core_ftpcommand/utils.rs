use crate::core_error::FtpError;
use crate::core_network::data_channel::open_data_channel;
use crate::server::ServerContext;
use crate::session::Session;
use log::warn;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

/// Write side of a control connection, shared with the running command.
pub type ControlWriter = Arc<Mutex<OwnedWriteHalf>>;

/// Sends a response to the client.
pub async fn send_response(writer: &ControlWriter, message: &[u8]) -> Result<(), std::io::Error> {
    let mut writer = writer.lock().await;
    writer.write_all(message).await?;
    writer.flush().await?;
    Ok(())
}

/// Logs a failed operation and sends its generic failure reply.
pub async fn send_failure(
    writer: &ControlWriter,
    command: &str,
    err: &FtpError,
) -> Result<(), std::io::Error> {
    warn!("{} failed: {}", command, err);
    send_response(writer, err.to_ftp_response().as_bytes()).await
}

/// Opens the data channel for the session's current mode.
///
/// Passive sessions accept on the server's shared data listener, active ones
/// dial the endpoint stored by PORT.
pub async fn open_session_data_channel(
    ctx: &ServerContext,
    session: &Mutex<Session>,
) -> Result<TcpStream, FtpError> {
    let mode = session.lock().await.data_mode;
    open_data_channel(&ctx.data_listener, mode, ctx.config.server.data_timeout()).await
}
