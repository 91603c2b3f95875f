use crate::core_ftpcommand::utils::{send_response, ControlWriter};
use crate::core_network::data_channel::DataMode;
use crate::server::ServerContext;
use crate::session::Session;
use log::debug;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the PASV FTP command.
///
/// No listener is created here: every session shares the data socket bound at
/// startup, so the reply always advertises that fixed port.
pub async fn handle_pasv_command(
    writer: ControlWriter,
    ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<(), std::io::Error> {
    let response = {
        let mut session = session.lock().await;
        session.data_mode = DataMode::Passive;
        format_pasv_response(session.server_ip, ctx.data_port())
    };

    debug!("PASV response: {}", response.trim_end());
    send_response(&writer, response.as_bytes()).await
}

/// Encodes an address and port as the `227` tuple.
pub fn format_pasv_response(ip: Ipv4Addr, port: u16) -> String {
    let [h1, h2, h3, h4] = ip.octets();
    format!(
        "227 Entering Passive Mode ({},{},{},{},{},{}).\r\n",
        h1,
        h2,
        h3,
        h4,
        port >> 8,
        port & 0xff
    )
}
