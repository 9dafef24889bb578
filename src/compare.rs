//! Byte-exact content comparison
//!
//! The authoritative equality check: no hashing, so no collisions, and it
//! stops at the first chunk pair that differs in length or content.

use crate::cancel::CancelToken;
use crate::config::CompareConfig;
use crate::error::{ErrorKind, FsvResult};
use crate::path::Path;
use std::fs::File;
use std::io::{self, Read};
use tracing::debug;

/// Fill `buf` as far as the reader allows. Returns the bytes read; fewer
/// than `buf.len()` only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compare two streams chunk by chunk, in lockstep.
///
/// Returns `false` as soon as a chunk pair differs in length (the streams
/// have different sizes) or in any byte. `path` only labels a cancellation
/// error.
pub fn contents_equal<A: Read, B: Read>(
    mut a: A,
    mut b: B,
    buffer_size: usize,
    cancel: &CancelToken,
    path: &Path,
) -> FsvResult<bool> {
    let size = buffer_size.max(1);
    let mut buf_a = vec![0u8; size];
    let mut buf_b = vec![0u8; size];

    loop {
        if cancel.is_cancelled() {
            return Err(ErrorKind::Cancelled.new(path, None));
        }
        let n_a = read_full(&mut a, &mut buf_a)?;
        let n_b = read_full(&mut b, &mut buf_b)?;
        if n_a != n_b {
            return Ok(false);
        }
        if buf_a[..n_a] != buf_b[..n_b] {
            return Ok(false);
        }
        if n_a < size {
            // Short chunk on both sides: both streams ended together.
            return Ok(true);
        }
    }
}

impl Path {
    /// Byte-exact equality of two files with default settings.
    pub fn same_contents_as(&self, other: &Path) -> FsvResult<bool> {
        self.same_contents_as_with(other, &CompareConfig::default(), &CancelToken::new())
    }

    /// Byte-exact equality of two files, read sequentially in lockstep.
    pub fn same_contents_as_with(
        &self,
        other: &Path,
        config: &CompareConfig,
        cancel: &CancelToken,
    ) -> FsvResult<bool> {
        let a = File::open(self.as_std_path())?;
        let b = File::open(other.as_std_path())?;
        let equal = contents_equal(a, b, config.buffer_size, cancel, self)?;
        debug!(a = %self, b = %other, equal, "compared contents");
        Ok(equal)
    }
}
