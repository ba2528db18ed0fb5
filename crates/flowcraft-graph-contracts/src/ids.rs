//! ID generation for collision auto-renaming
//!
//! When a delta tries to add a node or edge whose ID is already taken,
//! the engine renames it by appending a fresh suffix. The suffix source
//! is injected so production code gets uuid-v4 entropy while tests get
//! repeatable sequences.

use uuid::Uuid;

/// Source of fresh disambiguation suffixes
pub trait IdGenerator {
    /// Produce a suffix not tied to any previous call
    fn fresh_suffix(&mut self) -> String;
}

/// Default generator backed by uuid v4
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn fresh_suffix(&mut self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        id[..8].to_string()
    }
}

/// Deterministic generator for tests: 1, 2, 3, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIdGenerator {
    counter: u64,
}

impl SequentialIdGenerator {
    /// Create a generator starting at 1
    pub fn new() -> Self {
        Self { counter: 0 }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn fresh_suffix(&mut self) -> String {
        self.counter += 1;
        self.counter.to_string()
    }
}

/// Append suffixes to `base` until `is_taken` no longer matches
///
/// Suffixes come from the injected generator, so the result is
/// deterministic when the generator is. The loop always terminates for
/// a generator that eventually produces an unused suffix; with the uuid
/// generator a single iteration suffices in practice.
pub fn disambiguate<F>(base: &str, ids: &mut dyn IdGenerator, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let candidate = format!("{}-{}", base, ids.fresh_suffix());
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}
