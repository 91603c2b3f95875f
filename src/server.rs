use crate::config::Config;
use crate::core_fs::Storage;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::{initialize_command_handlers, CommandHandler};
use crate::core_network::network;
use crate::core_transfer::TransferLimits;
use crate::session::{ConnectionId, Session};
use anyhow::{bail, Context, Result};
use log::{error, info};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Process-wide busy flag.
///
/// At most one command runs at a time across every session. The slot is held
/// by the guard returned from [`DeviceLock::try_acquire`] and released when
/// the guard is dropped, so a failing or panicking command frees it too.
#[derive(Debug, Clone, Default)]
pub struct DeviceLock {
    slot: Arc<Mutex<()>>,
}

impl DeviceLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the slot without waiting. `None` means another command is running.
    pub fn try_acquire(&self) -> Option<OwnedMutexGuard<()>> {
        Arc::clone(&self.slot).try_lock_owned().ok()
    }
}

/// State shared by every connection of a running server.
pub struct ServerContext {
    pub config: Config,
    pub storage: Storage,
    pub data_listener: TcpListener, // Shared passive data socket
    pub device: DeviceLock,
    pub handlers: HashMap<FtpCommand, Arc<CommandHandler>>,
    sessions: Mutex<HashMap<ConnectionId, Arc<Mutex<Session>>>>,
    next_id: AtomicU64,
}

impl ServerContext {
    pub fn new(config: Config, storage: Storage, data_listener: TcpListener) -> Self {
        Self {
            config,
            storage,
            data_listener,
            device: DeviceLock::new(),
            handlers: initialize_command_handlers(),
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Port advertised in PASV replies.
    pub fn data_port(&self) -> u16 {
        self.data_listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or(self.config.server.data_port)
    }

    /// Address announced to a client whose control connection landed on `local`.
    pub fn advertised_ip(&self, local: SocketAddr) -> Ipv4Addr {
        if let Some(ip) = self.config.server.pasv_address {
            return ip;
        }
        match local.ip() {
            IpAddr::V4(ip) => ip,
            IpAddr::V6(ip) => ip.to_ipv4_mapped().unwrap_or(Ipv4Addr::UNSPECIFIED),
        }
    }

    pub fn transfer_limits(&self) -> TransferLimits {
        TransferLimits::from_config(&self.config.server)
    }

    pub async fn register_session(&self, remote_addr: SocketAddr, local: SocketAddr) -> Arc<Mutex<Session>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Mutex::new(Session::new(id, remote_addr, self.advertised_ip(local))));
        self.sessions.lock().await.insert(id, Arc::clone(&session));
        session
    }

    pub async fn unregister_session(&self, id: ConnectionId) {
        self.sessions.lock().await.remove(&id);
    }

    pub async fn client_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

/// An FTP server bound to its control and data sockets.
pub struct Server {
    control_listener: TcpListener,
    context: Arc<ServerContext>,
}

impl Server {
    /// Binds both sockets and checks the served root.
    pub async fn bind(config: Config) -> Result<Self> {
        let root = config
            .server
            .root_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve root directory: {:?}", config.server.root_dir))?;
        if !root.is_dir() {
            bail!("Root directory is not a directory: {:?}", root);
        }

        let address = config.server.listen_address.clone();
        let control_listener = TcpListener::bind((address.as_str(), config.server.listen_port))
            .await
            .with_context(|| format!("Failed to bind control port {}:{}", address, config.server.listen_port))?;
        let data_listener = TcpListener::bind((address.as_str(), config.server.data_port))
            .await
            .with_context(|| format!("Failed to bind data port {}:{}", address, config.server.data_port))?;

        let storage = Storage::new(root);
        info!("Serving files from {:?}", storage.root());
        let context = ServerContext::new(config, storage, data_listener);
        Ok(Self {
            control_listener,
            context: Arc::new(context),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.control_listener.local_addr()?)
    }

    pub fn context(&self) -> Arc<ServerContext> {
        Arc::clone(&self.context)
    }

    /// Accepts control connections until the process is stopped.
    pub async fn run(self) -> Result<()> {
        info!(
            "Server listening on {} (data port {})",
            self.local_addr()?,
            self.context.data_port()
        );

        loop {
            let (socket, addr) = match self.control_listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };
            let local = match socket.local_addr() {
                Ok(local) => local,
                Err(e) => {
                    error!("Dropping connection from {}: {}", addr, e);
                    continue;
                }
            };

            let ctx = Arc::clone(&self.context);
            let session = ctx.register_session(addr, local).await;
            let id = session.lock().await.id;
            info!("FTP Client connection from: {} (connection {})", addr, id);

            tokio::spawn(async move {
                if let Err(e) = network::handle_connection(socket, Arc::clone(&ctx), session).await {
                    error!("Connection error: {}", e);
                }
                ctx.unregister_session(id).await;
                info!("Connection closed for {}", addr);
            });
        }
    }
}

/// Runs the FTP server with the provided configuration.
pub async fn run(config: Config) -> Result<()> {
    let server = Server::bind(config).await?;
    server.run().await
}
