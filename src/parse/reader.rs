use std::io::Error as IoError;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "async_tokio")]
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[cfg(feature = "async_std")]
use async_std::io::{prelude::BufReadExt, BufReader, Read};

/// Line-wise reader over a `.osu` source that keeps a single line buffer.
pub(crate) struct FileReader<R> {
    buf: Vec<u8>,
    inner: BufReader<R>,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl<R: Read> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(64),
        }
    }

    /// Read the next line into the buffer. Returns `0` once the source is exhausted.
    pub(crate) fn next_line(&mut self) -> Result<usize, IoError> {
        self.buf.clear();

        self.inner.read_until(b'\n', &mut self.buf)
    }
}

#[cfg(feature = "async_tokio")]
impl<R: AsyncRead + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(64),
        }
    }

    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        self.buf.clear();

        self.inner.read_until(b'\n', &mut self.buf).await
    }
}

#[cfg(feature = "async_std")]
impl<R: Read + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(64),
        }
    }

    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        self.buf.clear();

        self.inner.read_until(b'\n', &mut self.buf).await
    }
}

impl<R> FileReader<R> {
    /// The current line without its line terminator.
    pub(crate) fn bytes(&self) -> &[u8] {
        let mut end = self.buf.len();

        while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }

        &self.buf[..end]
    }
}
