use crc32fast::Hasher;

/// Stable short hash of a seed string
pub fn seed_hash(seed: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(seed.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Deterministic id source.
///
/// Sequential ids (`<seed>-<n>`) name sessions and history entries;
/// component ids follow the `<Role>_<4 hex>` shape and are checked against
/// ids already in use.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed_hash(seed),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Fresh component id for `role` for which `is_taken` returns false
    pub fn component_id(&mut self, role: &str, is_taken: impl Fn(&str) -> bool) -> String {
        let prefix = if role.is_empty() { "component" } else { role };
        loop {
            self.count += 1;
            let mut hasher = Hasher::new();
            hasher.update(self.seed.as_bytes());
            hasher.update(prefix.as_bytes());
            hasher.update(&self.count.to_le_bytes());
            let candidate = format!("{}_{:04x}", prefix, hasher.finalize() & 0xffff);
            if !is_taken(&candidate) {
                return candidate;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_hash_is_stable() {
        assert_eq!(seed_hash("task-1"), seed_hash("task-1"));
        assert_ne!(seed_hash("task-1"), seed_hash("task-2"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("session".to_string());
        assert_eq!(gen.new_id(), "session-1");
        assert_eq!(gen.new_id(), "session-2");
    }

    #[test]
    fn test_component_id_shape_and_uniqueness() {
        let mut gen = IdGenerator::new("task-1");
        let first = gen.component_id("AlertTable", |_| false);
        assert!(first.starts_with("AlertTable_"));
        assert_eq!(first.len(), "AlertTable_".len() + 4);

        let taken = first.clone();
        let mut replay = IdGenerator::new("task-1");
        let second = replay.component_id("AlertTable", |id| id == taken);
        assert_ne!(second, first);
    }

    #[test]
    fn test_empty_role_gets_generic_prefix() {
        let mut gen = IdGenerator::new("x");
        assert!(gen.component_id("", |_| false).starts_with("component_"));
    }
}
