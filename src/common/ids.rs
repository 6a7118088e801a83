//! Deterministic hash helper used to stamp matching artifact pairs.

/// Small non-cryptographic FNV-1a hash. Collisions only risk failing to
/// notice a mismatched artifact pair, never a wrong prediction.
#[derive(Copy, Clone, Debug)]
pub struct SimpleHash(u32);

impl SimpleHash {
    /// Create a new hash state with the FNV offset basis.
    pub fn new() -> Self {
        Self(2_166_136_261)
    }

    /// Feed bytes into the hash function.
    pub fn update(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = (self.0 ^ (*b as u32)).wrapping_mul(16_777_619);
        }
    }

    /// Finalise the hash and return an 8-character lowercase hex string.
    pub fn finish_hex(&self) -> String {
        format!("{:08x}", self.0)
    }
}

impl Default for SimpleHash {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_hashes_identically() {
        let mut a = SimpleHash::new();
        let mut b = SimpleHash::new();
        a.update(b"claim");
        b.update(b"claim");
        assert_eq!(a.finish_hex(), b.finish_hex());
    }

    #[test]
    fn different_input_changes_the_stamp() {
        let mut a = SimpleHash::new();
        let mut b = SimpleHash::new();
        a.update(b"run-1");
        b.update(b"run-2");
        assert_ne!(a.finish_hex(), b.finish_hex());
    }
}
