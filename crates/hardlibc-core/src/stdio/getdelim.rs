//! Growable delimited-line reading (the getdelim/getline family).
//!
//! [`LineBuffer`] is an owned byte region with explicit capacity and logical
//! length; [`read_delimited`] appends stream bytes to it up to a delimiter,
//! doubling the capacity on demand while preserving prior content across
//! every reallocation. The reader is terminal-mode-unaware: callers that
//! prompt for secrets disable echo at the stream layer around the call and
//! restore it afterward.
//!
//! Invariants:
//! - capacity is `data.len()` and never shrinks during a read
//! - whenever `len > 0`, `capacity >= len + 1` and `data[len] == 0`
//! - a failed growth leaves the buffer pointer, capacity, and every
//!   previously written byte exactly as they were

use std::io::{self, Read};

use thiserror::Error;

use crate::errno::{self, ErrorKind, FailureKind};

/// Baseline capacity allocated on first use of an empty buffer.
pub const INITIAL_LINE_CAPACITY: usize = 128;

/// Hard ceiling: the maximum representable signed size.
const MAX_LINE_CAPACITY: usize = isize::MAX as usize;

/// Failures of [`read_delimited`].
#[derive(Debug, Error)]
pub enum ReadError {
    /// End of stream before any byte was buffered.
    #[error("end of stream with no bytes buffered")]
    EndOfStream,
    /// Doubling the capacity would exceed the maximum representable size.
    #[error("line would exceed the maximum representable size")]
    Overflow,
    /// The allocator refused the doubled capacity.
    #[error("allocation failure while growing the line buffer")]
    Allocation,
    /// A non-EOF stream fault. Not retried internally; retry policy,
    /// including EINTR, belongs to the caller.
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),
}

impl FailureKind for ReadError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReadError::EndOfStream | ReadError::Stream(_) => ErrorKind::StreamError,
            ReadError::Overflow => ErrorKind::Range,
            ReadError::Allocation => ErrorKind::AllocationFailure,
        }
    }
}

// ---------------------------------------------------------------------------
// Line buffer
// ---------------------------------------------------------------------------

/// An owned, growable line buffer reused across [`read_delimited`] calls.
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// Backing storage; the capacity is `data.len()`.
    data: Vec<u8>,
    /// Logical length of the current line, terminator excluded.
    len: usize,
}

impl LineBuffer {
    /// An empty buffer; the first read allocates [`INITIAL_LINE_CAPACITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer with a caller-chosen starting capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: vec![0; capacity], len: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current line, terminator excluded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Discards the logical content; the capacity is kept for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Ensures room for one more byte plus the terminator, doubling the
    /// capacity if fewer than two free bytes remain.
    ///
    /// Growth replaces the storage only after the new region is secured, so
    /// any failure leaves the existing buffer and content untouched.
    fn reserve_for_append(&mut self) -> Result<(), ReadError> {
        if self.data.len() >= self.len + 2 {
            return Ok(());
        }
        let target = if self.data.is_empty() {
            INITIAL_LINE_CAPACITY
        } else {
            let doubled = self.data.len().checked_mul(2).ok_or(ReadError::Overflow)?;
            if doubled > MAX_LINE_CAPACITY {
                return Err(ReadError::Overflow);
            }
            doubled
        };

        let mut next = Vec::new();
        next.try_reserve_exact(target).map_err(|_| ReadError::Allocation)?;
        next.resize(target, 0);
        next[..self.len].copy_from_slice(&self.data[..self.len]);
        self.data = next;
        Ok(())
    }

    /// Appends one byte and rewrites the terminator.
    fn push(&mut self, byte: u8) -> Result<(), ReadError> {
        self.reserve_for_append()?;
        self.data[self.len] = byte;
        self.len += 1;
        self.data[self.len] = 0;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Reads bytes from `stream` into `line` until `delimiter` is seen.
///
/// The previous content of `line` is replaced; its storage is reused and
/// grown as needed. Returns the number of bytes written, delimiter
/// included. End-of-stream with bytes already buffered is a complete
/// result (a final unterminated fragment); end-of-stream with nothing
/// buffered is [`ReadError::EndOfStream`]. On any failure the bytes read
/// so far remain accessible through [`LineBuffer::as_bytes`].
pub fn read_delimited<R: Read>(
    line: &mut LineBuffer,
    delimiter: u8,
    stream: &mut R,
) -> Result<usize, ReadError> {
    errno::observe(read_delimited_impl(line, delimiter, stream))
}

fn read_delimited_impl<R: Read>(
    line: &mut LineBuffer,
    delimiter: u8,
    stream: &mut R,
) -> Result<usize, ReadError> {
    line.clear();
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(0) => {
                if line.len == 0 {
                    return Err(ReadError::EndOfStream);
                }
                return Ok(line.len);
            }
            Ok(_) => {
                line.push(byte[0])?;
                if byte[0] == delimiter {
                    return Ok(line.len);
                }
            }
            Err(err) => return Err(ReadError::Stream(err)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno;
    use std::io::Cursor;

    #[test]
    fn test_reads_up_to_delimiter() {
        let mut stream = Cursor::new(b"abc\ndef".to_vec());
        let mut line = LineBuffer::new();

        let n = read_delimited(&mut line, b'\n', &mut stream).unwrap();
        assert_eq!(n, 4);
        assert_eq!(line.as_bytes(), b"abc\n");
        assert_eq!(errno::get_errno(), 0);
    }

    #[test]
    fn test_eof_fragment_then_empty_failure() {
        let mut stream = Cursor::new(b"abc\ndef".to_vec());
        let mut line = LineBuffer::new();

        assert_eq!(read_delimited(&mut line, b'\n', &mut stream).unwrap(), 4);
        assert_eq!(read_delimited(&mut line, b'\n', &mut stream).unwrap(), 3);
        assert_eq!(line.as_bytes(), b"def");

        let err = read_delimited(&mut line, b'\n', &mut stream).unwrap_err();
        assert!(matches!(err, ReadError::EndOfStream));
        assert_eq!(errno::get_errno(), errno::EIO);
    }

    #[test]
    fn test_first_use_allocates_baseline() {
        let mut line = LineBuffer::new();
        assert_eq!(line.capacity(), 0);
        let mut stream = Cursor::new(b"x\n".to_vec());
        read_delimited(&mut line, b'\n', &mut stream).unwrap();
        assert_eq!(line.capacity(), INITIAL_LINE_CAPACITY);
    }

    #[test]
    fn test_growth_preserves_content() {
        // Start tiny so a long line forces many doublings.
        let mut line = LineBuffer::with_capacity(1);
        let long: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8 | 1).collect();
        let mut input = long.clone();
        input.push(b'\n');
        let mut stream = Cursor::new(input);

        let n = read_delimited(&mut line, b'\n', &mut stream).unwrap();
        assert_eq!(n, long.len() + 1);
        assert_eq!(&line.as_bytes()[..long.len()], &long[..]);
        assert!(line.capacity() >= line.len() + 1);
    }

    #[test]
    fn test_final_content_independent_of_initial_capacity() {
        let payload = b"the quick brown fox jumps over the lazy dog\n";
        let mut results = Vec::new();
        for cap in [0usize, 1, 2, 7, 64, 4096] {
            let mut line = LineBuffer::with_capacity(cap);
            let mut stream = Cursor::new(payload.to_vec());
            let n = read_delimited(&mut line, b'\n', &mut stream).unwrap();
            results.push((n, line.as_bytes().to_vec()));
        }
        for (n, bytes) in &results {
            assert_eq!(*n, payload.len());
            assert_eq!(bytes.as_slice(), payload);
        }
    }

    #[test]
    fn test_delimiter_only_line() {
        let mut line = LineBuffer::new();
        let mut stream = Cursor::new(b"\nrest".to_vec());
        assert_eq!(read_delimited(&mut line, b'\n', &mut stream).unwrap(), 1);
        assert_eq!(line.as_bytes(), b"\n");
    }

    #[test]
    fn test_alternate_delimiter() {
        let mut line = LineBuffer::new();
        let mut stream = Cursor::new(b"k=v\0next".to_vec());
        assert_eq!(read_delimited(&mut line, 0, &mut stream).unwrap(), 4);
        assert_eq!(line.as_bytes(), b"k=v\0");
    }

    #[test]
    fn test_buffer_reuse_across_calls() {
        let mut line = LineBuffer::new();
        let mut stream = Cursor::new(b"long first line\nhi\n".to_vec());
        read_delimited(&mut line, b'\n', &mut stream).unwrap();
        let cap_after_first = line.capacity();
        read_delimited(&mut line, b'\n', &mut stream).unwrap();
        assert_eq!(line.as_bytes(), b"hi\n");
        assert_eq!(line.capacity(), cap_after_first);
    }

    #[test]
    fn test_stream_fault_surfaces_without_retry() {
        struct Faulty;
        impl Read for Faulty {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
            }
        }

        let mut line = LineBuffer::new();
        let err = read_delimited(&mut line, b'\n', &mut Faulty).unwrap_err();
        assert!(matches!(err, ReadError::Stream(_)));
        assert_eq!(errno::get_errno(), errno::EIO);
    }

    #[test]
    fn test_partial_line_survives_stream_fault() {
        struct TwoThenFault(u8);
        impl Read for TwoThenFault {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0 < 2 {
                    buf[0] = b'a' + self.0;
                    self.0 += 1;
                    Ok(1)
                } else {
                    Err(io::Error::other("disk fault"))
                }
            }
        }

        let mut line = LineBuffer::new();
        let err = read_delimited(&mut line, b'\n', &mut TwoThenFault(0)).unwrap_err();
        assert!(matches!(err, ReadError::Stream(_)));
        assert_eq!(line.as_bytes(), b"ab");
    }

    #[test]
    fn test_terminator_invariant() {
        let mut line = LineBuffer::new();
        let mut stream = Cursor::new(b"abc\n".to_vec());
        read_delimited(&mut line, b'\n', &mut stream).unwrap();
        assert_eq!(line.data[line.len], 0);
        assert!(line.capacity() >= line.len() + 1);
    }
}
