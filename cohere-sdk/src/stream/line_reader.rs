use std::io;

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Capacity of the internal read buffer. Longer lines come back in fragments.
pub const DEFAULT_LINE_CAPACITY: usize = 4096;

/// A piece of a logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Bytes of the line, without the terminating `\n`.
    pub bytes: Bytes,
    /// `false` when more bytes of the same logical line follow.
    pub complete: bool,
}

/// Splits a byte source into newline-terminated lines without ever waiting
/// for more than one buffer's worth of data.
///
/// Unlike [`AsyncBufReadExt::read_line`], a line that does not fit in the
/// buffer, or that is still in flight when the buffered data runs out, is
/// handed out as a fragment with `complete == false`. The caller decides how
/// to join fragments.
pub struct LineReader<R> {
    inner: BufReader<R>,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_LINE_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), inner),
        }
    }

    /// Reads the next line or fragment.
    ///
    /// Returns `Ok(None)` on clean end of stream. Bytes received before the
    /// end of stream without a trailing newline are returned as an incomplete
    /// fragment first.
    pub async fn read_line(&mut self) -> io::Result<Option<Line>> {
        let available = self.inner.fill_buf().await?;
        if available.is_empty() {
            return Ok(None);
        }

        let line = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                let line = Line {
                    bytes: Bytes::copy_from_slice(&available[..pos]),
                    complete: true,
                };
                self.inner.consume(pos + 1);
                line
            }
            None => {
                let len = available.len();
                let line = Line {
                    bytes: Bytes::copy_from_slice(available),
                    complete: false,
                };
                self.inner.consume(len);
                line
            }
        };
        Ok(Some(line))
    }
}
