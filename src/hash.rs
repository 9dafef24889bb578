//! Streaming FNV-1a content hashing
//!
//! Digests are 64-bit FNV-1a over the file bytes in offset order, with the
//! standard offset basis and prime, so values are reproducible across runs
//! and implementations. Not a cryptographic fingerprint.

use crate::cancel::CancelToken;
use crate::config::HashConfig;
use crate::error::{ErrorKind, FsvError, FsvResult};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::sync::mpsc;
use std::thread;
use tracing::debug;

/// FNV-1a 64-bit offset basis
pub const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 0x100000001b3;

/// 64-bit content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub u64);

impl Digest {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Big-endian hex, always 16 characters.
    pub fn to_hex(self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    pub fn from_hex(s: &str) -> Option<Digest> {
        let bytes: [u8; 8] = hex::decode(s).ok()?.try_into().ok()?;
        Some(Digest(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Incremental FNV-1a 64 state.
///
/// Feeding the same bytes in any chunking yields the same digest; feeding
/// them out of order does not.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.state = bytes
            .iter()
            .fold(self.state, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME));
    }

    pub fn digest(&self) -> Digest {
        Digest(self.state)
    }
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot digest of an in-memory buffer.
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = Fnv1a64::new();
    hasher.update(bytes);
    hasher.digest()
}

/// Fold a reader into a digest on the calling thread.
///
/// `path` only labels a cancellation error.
pub fn digest_reader<R: Read>(
    mut reader: R,
    chunk_size: usize,
    cancel: &CancelToken,
    path: &Path,
) -> FsvResult<Digest> {
    let mut hasher = Fnv1a64::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        if cancel.is_cancelled() {
            return Err(ErrorKind::Cancelled.new(path, None));
        }
        match reader.read(&mut buf) {
            Ok(0) => return Ok(hasher.digest()),
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read `reader` on a worker thread and fold chunks on the caller.
///
/// Chunks travel over a bounded channel in offset order. A read failure is
/// sent in-band after the chunks that preceded it, so the consumer sees it
/// exactly where the stream broke. The worker is joined before returning.
fn digest_pipelined<R: Read + Send>(
    mut reader: R,
    config: &HashConfig,
    cancel: &CancelToken,
    path: &Path,
) -> FsvResult<Digest> {
    let chunk_size = config.chunk_size.max(1);
    let (tx, rx) = mpsc::sync_channel::<FsvResult<Vec<u8>>>(config.channel_depth);

    thread::scope(|scope| -> FsvResult<Digest> {
        scope.spawn(move || loop {
            if cancel.is_cancelled() {
                let _ = tx.send(Err(ErrorKind::Cancelled.new(path, None)));
                return;
            }
            let mut chunk = vec![0u8; chunk_size];
            let item = match reader.read(&mut chunk) {
                Ok(0) => return,
                Ok(n) => {
                    chunk.truncate(n);
                    Ok(chunk)
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => Err(FsvError::from(e)),
            };
            let failed = item.is_err();
            // A send error means the consumer stopped listening.
            if tx.send(item).is_err() || failed {
                return;
            }
        });

        let mut hasher = Fnv1a64::new();
        for item in rx {
            hasher.update(&item?);
        }
        Ok(hasher.digest())
    })
}

impl Path {
    /// FNV-1a digest of the file contents with default settings.
    pub fn hash(&self) -> FsvResult<Digest> {
        self.hash_with(&HashConfig::default(), &CancelToken::new())
    }

    /// FNV-1a digest of the file contents.
    ///
    /// The file is read on a dedicated worker and folded here. The handle is
    /// closed on every exit path.
    pub fn hash_with(&self, config: &HashConfig, cancel: &CancelToken) -> FsvResult<Digest> {
        let file = File::open(self.as_std_path())?;
        let digest = digest_pipelined(file, config, cancel, self)?;
        debug!(path = %self, digest = %digest, "hashed file");
        Ok(digest)
    }

    /// Whether the file currently hashes to `digest`.
    pub fn has_hash(&self, digest: Digest) -> FsvResult<bool> {
        self.has_hash_with(digest, &HashConfig::default(), &CancelToken::new())
    }

    pub fn has_hash_with(
        &self,
        digest: Digest,
        config: &HashConfig,
        cancel: &CancelToken,
    ) -> FsvResult<bool> {
        Ok(self.hash_with(config, cancel)? == digest)
    }

    /// Whether both files have the same digest, hashing them concurrently.
    pub fn same_hash_as(&self, other: &Path) -> FsvResult<bool> {
        self.same_hash_as_with(other, &HashConfig::default(), &CancelToken::new())
    }

    /// Whether both files have the same digest.
    ///
    /// Each file is hashed on its own worker. The first failure is returned
    /// as soon as it arrives; the sibling worker is cancelled and joined
    /// before this returns, so its file handle is closed too. Cancelling
    /// `cancel` stops both workers.
    pub fn same_hash_as_with(
        &self,
        other: &Path,
        config: &HashConfig,
        cancel: &CancelToken,
    ) -> FsvResult<bool> {
        let a = File::open(self.as_std_path())?;
        let b = File::open(other.as_std_path())?;
        let equal = same_digest_readers([(a, self), (b, other)], config.chunk_size, cancel)?;
        debug!(a = %self, b = %other, equal, "compared digests");
        Ok(equal)
    }
}

/// Digest both readers on scoped workers and compare.
///
/// The workers share a child of `cancel`. The first error wins: the child
/// is cancelled so the other worker stops at its next chunk, and the scope
/// joins it before returning.
fn same_digest_readers<R: Read + Send>(
    sources: [(R, &Path); 2],
    chunk_size: usize,
    cancel: &CancelToken,
) -> FsvResult<bool> {
    let local = cancel.child();
    let (tx, rx) = mpsc::channel::<(usize, FsvResult<Digest>)>();

    thread::scope(|scope| -> FsvResult<bool> {
        for (slot, (reader, path)) in sources.into_iter().enumerate() {
            let tx = tx.clone();
            let local = &local;
            scope.spawn(move || {
                let _ = tx.send((slot, digest_reader(reader, chunk_size, local, path)));
            });
        }
        drop(tx);

        let mut digests = [None; 2];
        for _ in 0..2 {
            let (slot, digest) = rx.recv().map_err(|_| FsvError::Unknown)?;
            match digest {
                Ok(d) => digests[slot] = Some(d),
                Err(e) => {
                    local.cancel();
                    return Err(e);
                }
            }
        }
        Ok(digests[0] == digests[1])
    })
}
