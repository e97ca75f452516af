//! UTF-8 input adapter
//!
//! Terminal byte streams arrive in arbitrary chunks, so a multi-byte
//! UTF-8 sequence can be split across two reads. [`Utf8Reader`] pulls
//! bytes from any [`std::io::Read`] source, trims a trailing partial
//! sequence off each window, and carries it into the next read so the
//! decoded character stream never sees a torn code point. Only at end of
//! stream is an unterminated tail decoded as-is (yielding replacement
//! characters).

use std::io::{self, Read};

use thiserror::Error;

/// How many bytes each pull requests from the source.
pub const READ_SIZE: usize = 4096;

// Headroom for the carried tail in front of a full read.
const BUF_SIZE: usize = READ_SIZE + 32;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("I/O error reading input: {0}")]
    Io(#[from] io::Error),

    #[error("input window decoded to no characters")]
    Decode,
}

/// Number of bytes at the front of `input` that form complete UTF-8
/// sequences. At most the last three bytes are trimmed: a trailing lead
/// byte (`>= 0xC0`), a three-or-four-byte lead one position earlier
/// (`>= 0xE0`), or a four-byte lead two positions earlier (`>= 0xF0`).
pub fn trim_partial_utf8(input: &[u8]) -> usize {
    let len = input.len();
    if len >= 1 && input[len - 1] >= 0xC0 {
        return len - 1;
    }
    if len >= 2 && input[len - 2] >= 0xE0 {
        return len - 2;
    }
    if len >= 3 && input[len - 3] >= 0xF0 {
        return len - 3;
    }
    len
}

/// Streaming UTF-8 to wide-character adapter.
pub struct Utf8Reader {
    buf: Box<[u8; BUF_SIZE]>,
    /// Partial sequence carried from the previous window.
    tail: [u8; 4],
    tail_len: usize,
    chars: Vec<char>,
}

impl Default for Utf8Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Reader {
    pub fn new() -> Self {
        Utf8Reader {
            buf: Box::new([0; BUF_SIZE]),
            tail: [0; 4],
            tail_len: 0,
            chars: Vec::with_capacity(READ_SIZE),
        }
    }

    /// Pull the next window from `source` and decode it. Returns the
    /// number of characters now available through [`Utf8Reader::chars`],
    /// or 0 at end of stream.
    pub fn read_from<R: Read>(&mut self, source: &mut R) -> Result<usize, ReadError> {
        let mut pos = 0;

        if self.tail_len > 0 {
            self.buf[..self.tail_len].copy_from_slice(&self.tail[..self.tail_len]);
            pos = self.tail_len;
        }

        let window = loop {
            let n = source.read(&mut self.buf[pos..pos + READ_SIZE])?;
            if n == 0 {
                if self.tail_len > 0 {
                    // End of stream: flush the unterminated tail as-is.
                    let len = self.tail_len;
                    self.tail_len = 0;
                    break len;
                }
                return Ok(0);
            }
            pos += n;
            let complete = trim_partial_utf8(&self.buf[..pos]);
            if complete != 0 {
                let trimmed = pos - complete;
                self.tail[..trimmed].copy_from_slice(&self.buf[complete..pos]);
                self.tail_len = trimmed;
                break complete;
            }
            // Everything read so far is one partial sequence; keep pulling.
        };

        self.chars.clear();
        self.chars
            .extend(String::from_utf8_lossy(&self.buf[..window]).chars());
        if self.chars.is_empty() {
            return Err(ReadError::Decode);
        }
        Ok(self.chars.len())
    }

    /// The characters decoded by the last [`Utf8Reader::read_from`].
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}
