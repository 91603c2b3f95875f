use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::{
    open_session_data_channel, send_failure, send_response, ControlWriter,
};
use crate::core_network::data_channel::close_data_channel;
use crate::core_transfer::copy_chunked;
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RETR (Retrieve) FTP command.
///
/// The file is streamed to the data channel one chunk at a time. The channel
/// is closed before the final reply, whether the transfer succeeded or not.
pub async fn handle_retr_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    let path = session.lock().await.resolve(&arg);

    let mut stream = match open_session_data_channel(&ctx, &session).await {
        Ok(stream) => stream,
        Err(e) => return send_failure(&writer, "RETR", &e).await,
    };

    let result: Result<u64, FtpError> = async {
        let mut file = ctx.storage.open_read(&path).await?;
        send_response(&writer, b"150 Opening data connection.\r\n").await?;
        copy_chunked(&mut file, &mut stream, ctx.transfer_limits()).await
    }
    .await;
    close_data_channel(stream).await;

    match result {
        Ok(bytes) => {
            info!("Sent {} ({} bytes)", path, bytes);
            send_response(&writer, b"226 Transfer complete.\r\n").await
        }
        Err(e) => send_failure(&writer, "RETR", &e).await,
    }
}
