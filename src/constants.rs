// src/constants.rs

pub const DEFAULT_LISTEN_PORT: u16 = 21;
pub const DEFAULT_DATA_PORT: u16 = 13333;
pub const DEFAULT_CHUNK_SIZE: usize = 512;
pub const COMMAND_TIMEOUT_SECS: u64 = 300;
pub const DATA_TIMEOUT_SECS: u64 = 10;
pub const MAX_COMMAND_LINE: u64 = 1024; // Bytes, line terminator included
pub const DEFAULT_BANNER: &str = "Hello, this is flashftpd.";

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
