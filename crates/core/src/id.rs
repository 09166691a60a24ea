//! Identifier generation. The build only needs tokens that are unique within
//! one run; the random source mirrors the upstream document-id shape while the
//! sequential source makes builds reproducible for tests and diffing.

use std::collections::HashSet;

use rand::Rng;

/// Supplies unique opaque tokens on demand. Injected into the builder so
/// tests can pin the sequence.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random identifiers: `"ID"` followed by 23 lowercase hex characters.
/// Uniqueness is enforced per instance, never via process-global state.
pub struct RandomIdSource {
    issued: HashSet<String>,
}

impl RandomIdSource {
    pub fn new() -> Self {
        Self {
            issued: HashSet::new(),
        }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        let mut rng = rand::thread_rng();
        loop {
            let mut id = String::with_capacity(25);
            id.push_str("ID");
            for _ in 0..23 {
                id.push(HEX[rng.gen_range(0..HEX.len())] as char);
            }
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Deterministic identifiers: `"ID"` followed by a zero-padded counter in
/// hex, keeping the 25-character shape of the random source.
pub struct SequentialIdSource {
    next: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self { next: 0 }
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = format!("ID{:023x}", self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_have_expected_shape() {
        let mut ids = RandomIdSource::new();
        let id = ids.next_id();
        assert_eq!(id.len(), 25);
        assert!(id.starts_with("ID"));
        assert!(id[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_ids_unique_within_instance() {
        let mut ids = RandomIdSource::new();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let mut a = SequentialIdSource::new();
        let mut b = SequentialIdSource::new();
        for _ in 0..10 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn test_sequential_ids_keep_shape() {
        let mut ids = SequentialIdSource::new();
        assert_eq!(ids.next_id(), "ID00000000000000000000000");
        assert_eq!(ids.next_id(), "ID00000000000000000000001");
        assert_eq!(ids.next_id().len(), 25);
    }
}
