use crate::core_error::FtpError;
use crate::core_fs::listing;
use crate::core_ftpcommand::utils::{
    open_session_data_channel, send_failure, send_response, ControlWriter,
};
use crate::core_network::data_channel::close_data_channel;
use crate::core_transfer::send_lines;
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the LIST and NLST FTP commands.
///
/// LIST always sends `ls -l` style records. NLST sends bare names unless its
/// option word contains `l`. The argument may be a directory, a single file
/// or a glob on the last path segment.
pub async fn handle_list_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
    always_detailed: bool,
) -> Result<(), std::io::Error> {
    let command = if always_detailed { "LIST" } else { "NLST" };
    let (options, target) = split_list_argument(&arg);
    let include_details = always_detailed || options.contains('l');
    let path = session.lock().await.resolve(target);

    let mut stream = match open_session_data_channel(&ctx, &session).await {
        Ok(stream) => stream,
        Err(e) => return send_failure(&writer, command, &e).await,
    };

    let result = async {
        let lines = listing::list(&ctx.storage, &path, include_details).await;
        send_response(&writer, b"150 Here comes the directory listing.\r\n").await?;
        send_lines(&mut stream, &lines, ctx.config.server.data_timeout()).await?;
        Ok::<usize, FtpError>(lines.len())
    }
    .await;
    close_data_channel(stream).await;

    match result {
        Ok(count) => {
            info!("{} of {} sent {} entries", command, path, count);
            send_response(&writer, b"226 Transfer complete.\r\n").await
        }
        Err(e) => send_failure(&writer, command, &e).await,
    }
}

/// Splits an optional leading `-opts` word off a LIST/NLST argument.
pub fn split_list_argument(arg: &str) -> (&str, &str) {
    if !arg.starts_with('-') {
        return ("", arg);
    }
    match arg.split_once(' ') {
        Some((options, path)) => (options, path.trim_start()),
        None => (arg, ""),
    }
}
