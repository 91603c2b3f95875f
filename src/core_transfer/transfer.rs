use crate::config::ServerConfig;
use crate::core_error::FtpError;
use log::debug;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

/// Chunk size and per-operation deadline of the transfer loop.
#[derive(Debug, Clone, Copy)]
pub struct TransferLimits {
    pub chunk_size: usize,
    pub io_timeout: Duration,
}

impl TransferLimits {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            chunk_size: config.chunk_size(),
            io_timeout: config.data_timeout(),
        }
    }
}

/// Streams `reader` into `writer` one bounded chunk at a time.
///
/// Each chunk is forwarded as soon as it is read, so peak memory is one
/// chunk whatever the payload size. Stops on the first empty read and
/// returns the number of bytes moved.
pub async fn copy_chunked<R, W>(
    reader: &mut R,
    writer: &mut W,
    limits: TransferLimits,
) -> Result<u64, FtpError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buffer = vec![0; limits.chunk_size.max(1)];
    let mut total: u64 = 0;

    loop {
        let bytes_read = timeout(limits.io_timeout, reader.read(&mut buffer))
            .await
            .map_err(|_| FtpError::Timeout("reading transfer chunk".into()))??;
        if bytes_read == 0 {
            break;
        }

        timeout(limits.io_timeout, writer.write_all(&buffer[..bytes_read]))
            .await
            .map_err(|_| FtpError::Timeout("writing transfer chunk".into()))??;
        total += bytes_read as u64;
    }

    timeout(limits.io_timeout, writer.flush())
        .await
        .map_err(|_| FtpError::Timeout("flushing transfer".into()))??;

    debug!("Chunked copy finished after {} bytes", total);
    Ok(total)
}

/// Writes listing lines one at a time.
pub async fn send_lines<W>(
    writer: &mut W,
    lines: &[String],
    io_timeout: Duration,
) -> Result<(), FtpError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    for line in lines {
        timeout(io_timeout, writer.write_all(line.as_bytes()))
            .await
            .map_err(|_| FtpError::Timeout("writing listing".into()))??;
    }
    timeout(io_timeout, writer.flush())
        .await
        .map_err(|_| FtpError::Timeout("flushing listing".into()))??;
    Ok(())
}
