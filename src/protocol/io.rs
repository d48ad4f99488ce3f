//! Full-transfer send/receive over a stream that may fragment.

use std::io::{self, ErrorKind};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Writes the whole buffer, looping over partial writes.
///
/// `Interrupted` is retried. A write that accepts zero bytes means the peer
/// is gone and is reported as `WriteZero`.
pub async fn send_all<S>(stream: &mut S, buf: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let mut written = 0;

    while written < buf.len() {
        match stream.write(&buf[written..]).await {
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::WriteZero,
                    "connection closed while writing",
                ));
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Reads until `buf` is full or the peer closes.
///
/// Returns the number of bytes actually obtained. A count below
/// `buf.len()` means the peer closed early; callers must treat that as a
/// protocol error.
pub async fn recv_exact<S>(stream: &mut S, buf: &mut [u8]) -> io::Result<usize>
where
    S: AsyncRead + Unpin,
{
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
