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

/// Handles the STOR and APPE FTP commands.
///
/// STOR truncates the target, APPE appends to it. Either way the file is
/// created when missing.
pub async fn handle_stor_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
    append: bool,
) -> Result<(), std::io::Error> {
    let command = if append { "APPE" } else { "STOR" };
    let path = session.lock().await.resolve(&arg);

    let mut stream = match open_session_data_channel(&ctx, &session).await {
        Ok(stream) => stream,
        Err(e) => return send_failure(&writer, command, &e).await,
    };

    let result: Result<u64, FtpError> = async {
        let mut file = ctx.storage.open_write(&path, append).await?;
        send_response(&writer, b"150 Ok to send data.\r\n").await?;
        copy_chunked(&mut stream, &mut file, ctx.transfer_limits()).await
    }
    .await;
    close_data_channel(stream).await;

    match result {
        Ok(bytes) => {
            info!("Stored {} ({} bytes)", path, bytes);
            send_response(&writer, b"226 Transfer complete.\r\n").await
        }
        Err(e) => send_failure(&writer, command, &e).await,
    }
}
