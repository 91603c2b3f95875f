use crate::config::Config;
use crate::server::{Server, ServerContext};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

async fn start_server(root: &Path, data_timeout_secs: u64) -> (SocketAddr, Arc<ServerContext>) {
    let mut config = Config::default();
    config.server.listen_address = String::from("127.0.0.1");
    config.server.listen_port = 0;
    config.server.data_port = 0;
    config.server.root_dir = root.to_path_buf();
    config.server.chunk_size = 16;
    config.server.data_timeout_secs = data_timeout_secs;

    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    let ctx = server.context();
    tokio::spawn(server.run());
    (addr, ctx)
}

fn populate(root: &Path) {
    std::fs::write(root.join("a.txt"), b"alpha").unwrap();
    std::fs::write(root.join("B.txt"), b"bravo!").unwrap();
    std::fs::write(root.join("c.py"), b"print(1)").unwrap();
    std::fs::create_dir(root.join("lib")).unwrap();
    std::fs::write(root.join("lib").join("util.py"), b"x = 1").unwrap();
}

struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        let mut client = Self {
            reader: BufReader::new(read_half),
            writer,
        };
        let greeting = client.read_reply().await;
        assert!(greeting.starts_with("220 "), "unexpected greeting {:?}", greeting);
        client
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await
            .unwrap();
    }

    async fn read_reply(&mut self) -> String {
        let mut line = String::new();
        timeout(REPLY_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("no reply from server")
            .unwrap();
        line
    }

    async fn command(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_reply().await
    }

    /// Reads lines up to and including the one starting with `last`.
    async fn read_until(&mut self, last: &str) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_reply().await;
            assert!(!line.is_empty(), "connection closed mid reply");
            let done = line.starts_with(last);
            lines.push(line);
            if done {
                return lines;
            }
        }
    }

    async fn pasv(&mut self) -> SocketAddr {
        let reply = self.command("PASV").await;
        assert!(reply.starts_with("227 Entering Passive Mode ("), "{:?}", reply);
        let start = reply.find('(').unwrap() + 1;
        let end = reply.find(')').unwrap();
        let fields: Vec<u8> = reply[start..end]
            .split(',')
            .map(|field| field.parse().unwrap())
            .collect();
        let ip = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
        let port = (fields[4] as u16) << 8 | fields[5] as u16;
        SocketAddr::V4(SocketAddrV4::new(ip, port))
    }

    async fn is_closed(&mut self) -> bool {
        let mut line = String::new();
        matches!(
            timeout(REPLY_TIMEOUT, self.reader.read_line(&mut line)).await,
            Ok(Ok(0)) | Ok(Err(_))
        )
    }
}

/// Runs a data-channel command in passive mode and returns what the server sent.
async fn passive_download(client: &mut TestClient, command: &str) -> (String, Vec<u8>, String) {
    let data_addr = client.pasv().await;
    let mut data = TcpStream::connect(data_addr).await.unwrap();
    client.send(command).await;
    let preliminary = client.read_reply().await;
    let mut payload = Vec::new();
    timeout(REPLY_TIMEOUT, data.read_to_end(&mut payload))
        .await
        .unwrap()
        .unwrap();
    (preliminary, payload, client.read_reply().await)
}

async fn passive_upload(client: &mut TestClient, command: &str, payload: &[u8]) -> String {
    let data_addr = client.pasv().await;
    let mut data = TcpStream::connect(data_addr).await.unwrap();
    client.send(command).await;
    assert_eq!(client.read_reply().await, "150 Ok to send data.\r\n");
    data.write_all(payload).await.unwrap();
    data.shutdown().await.unwrap();
    drop(data);
    client.read_reply().await
}

#[tokio::test]
async fn test_greeting_and_simple_commands() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("USER micro").await, "230 Logged in.\r\n");
    assert_eq!(client.command("PASS python").await, "230 Logged in.\r\n");
    assert_eq!(client.command("syst").await, "215 UNIX Type: L8\r\n");
    assert_eq!(client.command("TYPE I").await, "200 Transfer mode set\r\n");
    assert_eq!(client.command("NOOP").await, "200 OK\r\n");
    assert_eq!(client.command("ABOR").await, "200 OK\r\n");
    assert_eq!(client.command("FEAT").await, "211 no-features\r\n");
    assert_eq!(client.command("PWD").await, "257 \"/\"\r\n");
    assert_eq!(client.command("XPWD").await, "257 \"/\"\r\n");
    assert_eq!(client.command("SITE CHMOD 755 x").await, "502 Unsupported command.\r\n");
}

#[tokio::test]
async fn test_cwd_to_missing_directory_keeps_cwd() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("CWD lib").await, "250 OK\r\n");
    assert_eq!(client.command("PWD").await, "257 \"/lib\"\r\n");
    assert_eq!(client.command("CWD /missing").await, "550 Fail\r\n");
    assert_eq!(client.command("XCWD /a.txt").await, "550 Fail\r\n");
    assert_eq!(client.command("PWD").await, "257 \"/lib\"\r\n");
    assert_eq!(client.command("CDUP").await, "250 OK\r\n");
    assert_eq!(client.command("PWD").await, "257 \"/\"\r\n");
    assert_eq!(client.command("CDUP").await, "250 OK\r\n");
    assert_eq!(client.command("PWD").await, "257 \"/\"\r\n");
}

#[tokio::test]
async fn test_passive_listings_are_sorted() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let (preliminary, payload, done) = passive_download(&mut client, "NLST").await;
    assert_eq!(preliminary, "150 Here comes the directory listing.\r\n");
    assert_eq!(
        String::from_utf8(payload).unwrap(),
        "a.txt\r\nB.txt\r\nc.py\r\nlib\r\n"
    );
    assert_eq!(done, "226 Transfer complete.\r\n");

    let (_, payload, done) = passive_download(&mut client, "LIST").await;
    let listing = String::from_utf8(payload).unwrap();
    let lines: Vec<&str> = listing.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("-rw-r--r--    1 owner group          5 "));
    assert!(lines[0].ends_with(" a.txt"));
    assert!(lines[1].ends_with(" B.txt"));
    assert!(lines[3].starts_with("drwxr-xr-x"));
    assert!(lines[3].ends_with(" lib"));
    assert_eq!(done, "226 Transfer complete.\r\n");
}

#[tokio::test]
async fn test_nlst_glob_and_options() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let (_, payload, _) = passive_download(&mut client, "NLST *.txt").await;
    assert_eq!(String::from_utf8(payload).unwrap(), "a.txt\r\nB.txt\r\n");

    let (_, payload, _) = passive_download(&mut client, "NLST -l lib").await;
    let listing = String::from_utf8(payload).unwrap();
    assert!(listing.starts_with("-rw-r--r--"));
    assert!(listing.ends_with(" util.py\r\n"));

    let (_, payload, done) = passive_download(&mut client, "LIST /lib/util.py").await;
    assert!(String::from_utf8(payload).unwrap().ends_with(" util.py\r\n"));
    assert_eq!(done, "226 Transfer complete.\r\n");
}

#[tokio::test]
async fn test_list_of_missing_path_is_empty() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let (preliminary, payload, done) = passive_download(&mut client, "LIST /nowhere/*.py").await;
    assert_eq!(preliminary, "150 Here comes the directory listing.\r\n");
    assert!(payload.is_empty());
    assert_eq!(done, "226 Transfer complete.\r\n");

    client.send("STAT /nowhere/x").await;
    assert_eq!(
        client.read_until("213 ").await,
        vec!["213-Status of /nowhere/x:\r\n", "213 Done.\r\n"]
    );
}

#[tokio::test]
async fn test_list_without_data_connection_times_out() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 1).await;
    let mut client = TestClient::connect(addr).await;

    client.pasv().await;
    assert_eq!(client.command("LIST").await, "550 Fail\r\n");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut other = TestClient::connect(addr).await;
    assert_eq!(other.command("NOOP").await, "200 OK\r\n");
}

#[tokio::test]
async fn test_store_then_retrieve_is_byte_identical() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let content: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 251) as u8).collect();
    assert_eq!(
        passive_upload(&mut client, "STOR newfile.bin", &content).await,
        "226 Transfer complete.\r\n"
    );

    let (preliminary, payload, done) = passive_download(&mut client, "RETR newfile.bin").await;
    assert_eq!(preliminary, "150 Opening data connection.\r\n");
    assert_eq!(payload, content);
    assert_eq!(done, "226 Transfer complete.\r\n");

    assert_eq!(client.command("SIZE newfile.bin").await, "213 1000\r\n");
    assert_eq!(std::fs::read(root.path().join("newfile.bin")).unwrap(), content);
}

#[tokio::test]
async fn test_append_and_overwrite() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    passive_upload(&mut client, "STOR log.txt", b"abc").await;
    passive_upload(&mut client, "APPE log.txt", b"def").await;
    assert_eq!(std::fs::read(root.path().join("log.txt")).unwrap(), b"abcdef");

    passive_upload(&mut client, "STOR log.txt", b"xy").await;
    assert_eq!(std::fs::read(root.path().join("log.txt")).unwrap(), b"xy");
}

#[tokio::test]
async fn test_retr_of_missing_file_fails() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let data_addr = client.pasv().await;
    let _data = TcpStream::connect(data_addr).await.unwrap();
    assert_eq!(client.command("RETR ghost.bin").await, "550 Fail\r\n");
    assert_eq!(client.command("NOOP").await, "200 OK\r\n");
}

#[tokio::test]
async fn test_active_mode_retrieve() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let reply = client
        .command(&format!("PORT 127,0,0,1,{},{}", port >> 8, port & 0xff))
        .await;
    assert_eq!(reply, "200 OK\r\n");

    client.send("RETR /lib/util.py").await;
    let (mut data, _) = timeout(REPLY_TIMEOUT, listener.accept()).await.unwrap().unwrap();
    assert_eq!(client.read_reply().await, "150 Opening data connection.\r\n");
    let mut payload = Vec::new();
    data.read_to_end(&mut payload).await.unwrap();
    assert_eq!(payload, b"x = 1");
    assert_eq!(client.read_reply().await, "226 Transfer complete.\r\n");
}

#[tokio::test]
async fn test_malformed_port_is_rejected() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("PORT 127,0,0,1,4").await, "504 Fail\r\n");
    assert_eq!(client.command("PORT a,b,c,d,e,f").await, "504 Fail\r\n");

    // Still in passive mode.
    let (_, payload, _) = passive_download(&mut client, "NLST").await;
    assert!(payload.is_empty());
}

#[tokio::test]
async fn test_directory_and_file_removal() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("MKD fresh").await, "250 OK\r\n");
    assert!(root.path().join("fresh").is_dir());
    assert_eq!(client.command("XMKD fresh").await, "550 Fail\r\n");
    assert_eq!(client.command("RMD fresh").await, "250 OK\r\n");
    assert!(!root.path().join("fresh").exists());
    assert_eq!(client.command("XRMD lib").await, "550 Fail\r\n");

    assert_eq!(client.command("DELE a.txt").await, "250 OK\r\n");
    assert!(!root.path().join("a.txt").exists());
    assert_eq!(client.command("DELE a.txt").await, "550 Fail\r\n");
    assert_eq!(client.command("SIZE a.txt").await, "550 Fail\r\n");
}

#[tokio::test]
async fn test_rename_sequence() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("RNFR missing.txt").await, "550 Fail\r\n");
    assert_eq!(client.command("RNTO other.txt").await, "550 Fail\r\n");

    assert_eq!(client.command("RNFR a.txt").await, "350 Rename from\r\n");
    assert_eq!(client.command("NOOP").await, "200 OK\r\n");
    assert_eq!(client.command("RNTO other.txt").await, "550 Fail\r\n");
    assert!(root.path().join("a.txt").exists());

    assert_eq!(client.command("RNFR a.txt").await, "350 Rename from\r\n");
    assert_eq!(client.command("RNTO lib/moved.txt").await, "250 OK\r\n");
    assert!(!root.path().join("a.txt").exists());
    assert_eq!(std::fs::read(root.path().join("lib").join("moved.txt")).unwrap(), b"alpha");
    assert_eq!(client.command("RNTO again.txt").await, "550 Fail\r\n");
}

#[tokio::test]
async fn test_unknown_verb_clears_pending_rename() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("RNFR a.txt").await, "350 Rename from\r\n");
    assert_eq!(client.command("FOO").await, "502 Unsupported command.\r\n");
    assert_eq!(client.command("RNTO z.txt").await, "550 Fail\r\n");
    assert!(root.path().join("a.txt").exists());
    assert!(!root.path().join("z.txt").exists());
}

#[tokio::test]
async fn test_busy_rejection_keeps_pending_rename() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("RNFR a.txt").await, "350 Rename from\r\n");
    let guard = ctx.device.try_acquire().unwrap();
    assert_eq!(client.command("NOOP").await, "400 Device busy.\r\n");
    drop(guard);
    assert_eq!(client.command("RNTO z.txt").await, "250 OK\r\n");
    assert!(root.path().join("z.txt").exists());
}

#[tokio::test]
async fn test_busy_device_rejects_without_side_effects() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, ctx) = start_server(root.path(), 2).await;
    let mut first = TestClient::connect(addr).await;
    let mut second = TestClient::connect(addr).await;

    let guard = ctx.device.try_acquire().unwrap();
    assert_eq!(second.command("CWD lib").await, "400 Device busy.\r\n");
    assert_eq!(first.command("CWD lib").await, "400 Device busy.\r\n");
    drop(guard);

    assert_eq!(second.command("PWD").await, "257 \"/\"\r\n");
    assert_eq!(first.command("PWD").await, "257 \"/\"\r\n");
}

#[tokio::test]
async fn test_second_session_rejected_while_first_runs_command() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut first = TestClient::connect(addr).await;
    let mut second = TestClient::connect(addr).await;

    // LIST blocks on the passive accept until the data timeout.
    first.pasv().await;
    first.send("LIST").await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(second.command("CWD lib").await, "400 Device busy.\r\n");
    assert_eq!(second.command("PWD").await, "400 Device busy.\r\n");

    assert_eq!(first.read_reply().await, "550 Fail\r\n");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(second.command("PWD").await, "257 \"/\"\r\n");
    assert_eq!(first.command("PWD").await, "257 \"/\"\r\n");
}

#[tokio::test]
async fn test_stat_summary_and_listing() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;
    client.command("USER micro").await;

    client.send("STAT").await;
    let summary = client.read_until("211 ").await;
    assert!(summary[0].starts_with("211-(127.0.0.1)"));
    assert!(summary.contains(&String::from("    Logged in as micro\r\n")));
    assert!(summary.contains(&String::from("    Client count is 1\r\n")));
    assert_eq!(summary.last().unwrap(), "211 End of Status\r\n");

    client.send("STAT /lib").await;
    let listing = client.read_until("213 ").await;
    assert!(listing[0].starts_with("213-"));
    assert_eq!(listing.len(), 3);
    assert!(listing[1].ends_with(" util.py\r\n"));
    assert_eq!(listing[2], "213 Done.\r\n");
}

#[tokio::test]
async fn test_mdtm_reports_utc_timestamp() {
    let root = TempDir::new().unwrap();
    populate(root.path());
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let reply = client.command("MDTM a.txt").await;
    let stamp = reply.strip_prefix("213 ").unwrap().trim_end();
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(client.command("MDTM nope.txt").await, "550 Fail\r\n");
}

#[tokio::test]
async fn test_quit_closes_connection() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("QUIT").await, "221 Bye.\r\n");
    assert!(client.is_closed().await);
}

#[tokio::test]
async fn test_empty_line_closes_connection() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    client.send("").await;
    assert!(client.is_closed().await);
}

#[tokio::test]
async fn test_blank_line_is_not_a_disconnect() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("   ").await, "502 Unsupported command.\r\n");
    assert_eq!(client.command("NOOP").await, "200 OK\r\n");
}

#[tokio::test]
async fn test_overlong_line_closes_connection() {
    let root = TempDir::new().unwrap();
    let (addr, _ctx) = start_server(root.path(), 2).await;
    let mut client = TestClient::connect(addr).await;

    let line = format!("RETR {}", "x".repeat(4096));
    client.send(&line).await;
    assert!(client.is_closed().await);
}
