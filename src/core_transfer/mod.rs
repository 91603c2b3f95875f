pub mod transfer;

pub use transfer::{copy_chunked, send_lines, TransferLimits};
