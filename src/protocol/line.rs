//! Unbuffered line reading.
//!
//! Lines are read one byte at a time so that nothing past the newline is
//! consumed: the body that follows the header block stays in the stream for
//! the exact-length read.

use std::io::{self, ErrorKind};

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

const INITIAL_CAPACITY: usize = 256;

/// Reads one `\n`-terminated line and strips trailing `\r`/`\n`.
///
/// Returns `Ok(None)` when the stream is closed before any byte arrives,
/// which is distinct from `Ok(Some(""))` (the blank line ending a header
/// block). If the stream closes mid-line, the partial line is returned.
pub async fn read_line<S>(stream: &mut S) -> io::Result<Option<String>>
where
    S: AsyncRead + Unpin,
{
    let mut line = BytesMut::with_capacity(INITIAL_CAPACITY);
    let mut byte = [0u8; 1];

    loop {
        let n = match stream.read(&mut byte).await {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if n == 0 {
            if line.is_empty() {
                return Ok(None);
            }
            break;
        }

        if byte[0] == b'\n' {
            break;
        }

        if line.len() == line.capacity() {
            let grow = line.capacity().max(INITIAL_CAPACITY);
            line.reserve(grow);
        }
        line.put_u8(byte[0]);
    }

    let end = trimmed_len(&line);
    Ok(Some(String::from_utf8_lossy(&line[..end]).into_owned()))
}

fn trimmed_len(line: &[u8]) -> usize {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
        end -= 1;
    }
    end
}
