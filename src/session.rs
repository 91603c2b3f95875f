use crate::core_fs::resolve;
use crate::core_network::data_channel::DataMode;
use std::net::{Ipv4Addr, SocketAddr};

/// Identifies a control connection for the lifetime of the server.
pub type ConnectionId = u64;

/// Per-client state of one control connection.
#[derive(Debug)]
pub struct Session {
    pub id: ConnectionId,
    pub remote_addr: SocketAddr,
    pub server_ip: Ipv4Addr, // Address advertised in PASV replies and STAT
    pub cwd: String,         // Always absolute, normalized and an existing directory
    pub rename_from: Option<String>,
    pub data_mode: DataMode,
    pub username: Option<String>,
}

impl Session {
    pub fn new(id: ConnectionId, remote_addr: SocketAddr, server_ip: Ipv4Addr) -> Self {
        Self {
            id,
            remote_addr,
            server_ip,
            cwd: String::from("/"),
            rename_from: None,
            data_mode: DataMode::default(),
            username: None,
        }
    }

    /// Absolute path of a command payload relative to the working directory.
    pub fn resolve(&self, payload: &str) -> String {
        resolve(&self.cwd, payload)
    }
}
