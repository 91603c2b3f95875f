use crate::core_error::FtpError;
use log::{debug, info};
use std::net::SocketAddrV4;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// How the next data connection of a session is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    /// The client connects to the shared passive data port.
    #[default]
    Passive,
    /// The server dials the endpoint announced with PORT.
    Active(SocketAddrV4),
}

/// Opens the data connection for one command.
///
/// Passive mode accepts the next inbound connection on the shared listener,
/// active mode dials out to the stored endpoint. Both are bounded by
/// `data_timeout`. The stream must not outlive the command that opened it;
/// hand it back to [`close_data_channel`] when done.
pub async fn open_data_channel(
    listener: &TcpListener,
    mode: DataMode,
    data_timeout: Duration,
) -> Result<TcpStream, FtpError> {
    match mode {
        DataMode::Passive => {
            let (stream, peer) = timeout(data_timeout, listener.accept())
                .await
                .map_err(|_| FtpError::Timeout("waiting for passive data connection".into()))?
                .map_err(|e| FtpError::DataChannel(format!("accept failed: {}", e)))?;
            info!("FTP Data connection from: {}", peer);
            Ok(stream)
        }
        DataMode::Active(endpoint) => {
            let stream = timeout(data_timeout, TcpStream::connect(endpoint))
                .await
                .map_err(|_| FtpError::Timeout(format!("connecting to {}", endpoint)))?
                .map_err(|e| FtpError::DataChannel(format!("connect to {} failed: {}", endpoint, e)))?;
            info!("FTP Data connection to: {}", endpoint);
            Ok(stream)
        }
    }
}

/// Shuts the data connection down. The stream is consumed either way.
pub async fn close_data_channel(mut stream: TcpStream) {
    if let Err(e) = stream.shutdown().await {
        debug!("Data channel shutdown failed: {}", e);
    }
}
