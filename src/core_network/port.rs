use crate::core_error::FtpError;
use crate::core_ftpcommand::utils::{send_failure, send_response, ControlWriter};
use crate::core_network::data_channel::DataMode;
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Parses the `h1,h2,h3,h4,p1,p2` argument of PORT.
///
/// Fields beyond the sixth are ignored.
pub fn parse_port_argument(arg: &str) -> Result<SocketAddrV4, FtpError> {
    let items: Vec<&str> = arg.split(',').map(str::trim).collect();
    if items.len() < 6 {
        return Err(FtpError::MalformedInput(arg.to_string()));
    }

    let fields: Vec<u8> = items[..6]
        .iter()
        .map(|item| item.parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| FtpError::MalformedInput(arg.to_string()))?;

    let ip = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
    let port = (fields[4] as u16) << 8 | fields[5] as u16;
    Ok(SocketAddrV4::new(ip, port))
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Only records the endpoint; the connection is dialed by the next command
/// that needs a data channel. A malformed argument leaves the session as is.
pub async fn handle_port_command(
    writer: ControlWriter,
    _ctx: Arc<ServerContext>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<(), std::io::Error> {
    match parse_port_argument(&arg) {
        Ok(endpoint) => {
            info!("Received PORT command with endpoint {}", endpoint);
            session.lock().await.data_mode = DataMode::Active(endpoint);
            send_response(&writer, b"200 OK\r\n").await
        }
        Err(e) => send_failure(&writer, "PORT", &e).await,
    }
}
