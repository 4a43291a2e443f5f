use crc32fast::Hasher;
use uuid::Uuid;

/// Derive a short stable seed from an arbitrary string using CRC32
pub fn seed_from(value: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Source of fresh element and resource ids.
///
/// Ids only ever contain `[a-zA-Z0-9-]` so they survive inside a
/// `@resources/<id>` reference.
#[derive(Debug, Clone, Default)]
pub enum IdGenerator {
    /// UUID v4 per id
    #[default]
    Random,
    /// `<seed>-<n>`, reproducible across runs
    Sequential { seed: String, count: u32 },
}

impl IdGenerator {
    pub fn random() -> Self {
        IdGenerator::Random
    }

    pub fn sequential(seed: &str) -> Self {
        IdGenerator::Sequential {
            seed: seed_from(seed),
            count: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        match self {
            IdGenerator::Random => Uuid::new_v4().to_string(),
            IdGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::sequential("layout");
        let seed = seed_from("layout");

        assert_eq!(ids.next_id(), format!("{}-1", seed));
        assert_eq!(ids.next_id(), format!("{}-2", seed));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = IdGenerator::sequential("x");
        let mut b = IdGenerator::sequential("x");
        assert_eq!(a.next_id(), b.next_id());

        let mut c = IdGenerator::sequential("y");
        assert_ne!(IdGenerator::sequential("x").next_id(), c.next_id());
    }

    #[test]
    fn test_random_ids_are_reference_safe() {
        let mut ids = IdGenerator::random();
        let first = ids.next_id();
        assert_ne!(first, ids.next_id());
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }
}
