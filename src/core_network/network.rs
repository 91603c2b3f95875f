use crate::constants::MAX_COMMAND_LINE;
use crate::core_ftpcommand::ftpcommand::{split_command, FtpCommand};
use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Serves one control connection until the client leaves.
///
/// Commands run one at a time and only while this connection holds the
/// server's device lock; a command arriving while another connection is busy
/// is rejected without touching any state. Each command runs in its own task
/// so that a panic is answered with the generic failure and the session
/// survives. An `Err` means the control channel itself broke.
pub async fn handle_connection(
    socket: TcpStream,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
) -> Result<(), std::io::Error> {
    let (read_half, write_half) = socket.into_split();
    let writer: ControlWriter = Arc::new(Mutex::new(write_half));
    let mut reader = BufReader::new(read_half);

    let banner = format!("220 {}\r\n", ctx.config.server.banner);
    send_response(&writer, banner.as_bytes()).await?;

    let mut buffer = String::new();
    loop {
        buffer.clear();
        let mut limited = (&mut reader).take(MAX_COMMAND_LINE);
        let n = match timeout(ctx.config.server.command_timeout(), limited.read_line(&mut buffer)).await {
            Ok(read) => read?,
            Err(_) => {
                info!("Control connection idle for too long, closing");
                break;
            }
        };
        if n as u64 == MAX_COMMAND_LINE && !buffer.ends_with('\n') {
            warn!("Command line longer than {} bytes, closing", MAX_COMMAND_LINE);
            break;
        }

        let line = buffer.trim_end_matches(['\r', '\n']);
        if n == 0 || line.is_empty() {
            info!("Client disconnected");
            break;
        }

        let (verb, payload) = split_command(line);

        let Some(_busy) = ctx.device.try_acquire() else {
            warn!("Rejecting {} while another command is running", verb);
            send_response(&writer, b"400 Device busy.\r\n").await?;
            continue;
        };

        info!("Command={}, Payload={}", verb, payload);

        let command = FtpCommand::from_str(&verb);
        if command != Some(FtpCommand::RNTO) {
            session.lock().await.rename_from = None;
        }

        let Some((command, handler)) = command
            .and_then(|command| ctx.handlers.get(&command).map(|handler| (command, Arc::clone(handler))))
        else {
            send_response(&writer, b"502 Unsupported command.\r\n").await?;
            continue;
        };

        let task = tokio::spawn(handler(
            Arc::clone(&writer),
            Arc::clone(&ctx),
            Arc::clone(&session),
            payload,
        ));
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Error handling command {}: {}", verb, e);
                return Err(e);
            }
            Err(e) => {
                error!("Command {} aborted: {}", verb, e);
                send_response(&writer, b"550 Fail\r\n").await?;
            }
        }

        if command == FtpCommand::QUIT {
            break;
        }
    }

    Ok(())
}
