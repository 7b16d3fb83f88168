use crc32fast::Hasher;

/// Derive a stable document seed from a file path using CRC32.
///
/// Block ids minted for the same document path are reproducible across
/// sessions, which lets the editing layer address blocks in saved
/// layouts without a separate id map.
pub fn document_seed(path: &str) -> String {
    let mut buff = String::from(path);
    if !path.starts_with("file://") {
        buff = format!("file://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for block instances within one workspace.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(path: &str) -> Self {
        Self {
            seed: document_seed(path),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_seed_is_stable() {
        let a = document_seed("/deploy/docker-compose.yml");
        let b = document_seed("/deploy/docker-compose.yml");
        assert_eq!(a, b);

        let c = document_seed("/deploy/Dockerfile");
        assert_ne!(a, c);
    }

    #[test]
    fn test_sequential_ids_share_seed() {
        let mut gen = IdGenerator::new("/config.yaml");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
        assert!(id2.starts_with(gen.seed()));
    }
}
