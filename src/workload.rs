//! Per-request workload: allocate, randomize, hash.
//!
//! Each call to [`run`] allocates a fresh [`BUFFER_SIZE`] buffer, fills it
//! from the thread-local RNG and returns its XXH3-128 digest. The buffer is
//! dropped before `run` returns, so the memory cost is transient but scales
//! with the number of requests in flight.
//!
//! XXH3 is fast and non-cryptographic. Do not use [`Digest`] for anything
//! that needs collision resistance against adversarial input.

use std::collections::TryReserveError;
use std::fmt;

use rand::RngCore;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_128_with_seed;

/// Size of the per-request buffer: 10 MiB.
pub const BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Length of a rendered [`Digest`] (128 bits as hex).
pub const DIGEST_HEX_LEN: usize = 32;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("failed to allocate {size} byte buffer: {source}")]
    Allocation {
        size: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Seed for the fast hash.
///
/// Fixed for the lifetime of the process, different across processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSeed(u64);

impl HashSeed {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Pick a seed from the OS-seeded thread RNG.
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// 128-bit digest; `Display` renders zero-padded lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(u128);

impl Digest {
    pub fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Allocate a zeroed buffer of exactly [`BUFFER_SIZE`] bytes.
///
/// Uses fallible reservation so that an out-of-memory condition surfaces as
/// an error for the caller to report rather than aborting the process.
pub fn allocate_buffer() -> Result<Vec<u8>, WorkloadError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(BUFFER_SIZE)
        .map_err(|source| WorkloadError::Allocation {
            size: BUFFER_SIZE,
            source,
        })?;
    buf.resize(BUFFER_SIZE, 0);
    Ok(buf)
}

/// Overwrite every byte of `buf` with random data.
pub fn fill_random(buf: &mut [u8]) {
    rand::thread_rng().fill_bytes(buf);
}

pub fn digest(bytes: &[u8], seed: HashSeed) -> Digest {
    Digest(xxh3_128_with_seed(bytes, seed.value()))
}

/// Allocate a fresh buffer, randomize it and hash it.
pub fn run(seed: HashSeed) -> Result<Digest, WorkloadError> {
    let mut buf = allocate_buffer()?;
    fill_random(&mut buf);
    Ok(digest(&buf, seed))
}
