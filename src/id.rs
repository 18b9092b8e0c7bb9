//! Identifier generation for data source reads.
//!
//! Every read assigns its result a fresh opaque id. The id carries no
//! meaning; it only gives the read result a value for its computed `id`
//! attribute. The generator is injected so tests can use predictable ids.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// A source of opaque identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier. Implementations must not repeat ids.
    fn next_id(&self) -> String;
}

/// Random decimal ids drawn from the thread-local RNG.
///
/// Ids are non-negative 63-bit integers rendered in base 10.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        rand::thread_rng().gen_range(0..=i64::MAX).to_string()
    }
}

/// Deterministic ids of the form `<prefix>-<n>`, counting from 1.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequenceIdGenerator {
    /// Create a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}
