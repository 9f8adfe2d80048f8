use sha2::{Digest, Sha256};

///
/// ContentHash
///
/// A SHA-256 digest over a structural description of an `AspectDef`: its
/// name followed by its property definitions in declaration order (name,
/// type code, and the mutability/nullability flags of each). Two
/// `AspectDef`s with the same content hash are structurally
/// interchangeable; a mismatching hash under the same name is a
/// `DefinitionConflict`.
///
/// Order-sensitive: reordering property definitions changes the hash.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A builder that feeds length-prefixed fields into a running SHA-256
/// digest, so that variable-length string fields cannot be confused with
/// adjacent fields (no accidental "ab"+"c" == "a"+"bc" collisions).
pub struct ContentHasher(Sha256);

impl ContentHasher {
    #[must_use]
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.0.update((s.len() as u64).to_le_bytes());
        self.0.update(s.as_bytes());
        self
    }

    pub fn update_bool(&mut self, b: bool) -> &mut Self {
        self.0.update([u8::from(b)]);
        self
    }

    pub fn update_u8(&mut self, v: u8) -> &mut Self {
        self.0.update([v]);
        self
    }

    #[must_use]
    pub fn finish(self) -> ContentHash {
        let digest = self.0.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        ContentHash(bytes)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ContentHasher;

    #[test]
    fn order_sensitive() {
        let mut a = ContentHasher::new();
        a.update_str("name").update_str("age");
        let mut b = ContentHasher::new();
        b.update_str("age").update_str("name");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn length_prefix_prevents_boundary_collision() {
        let mut a = ContentHasher::new();
        a.update_str("ab").update_str("c");
        let mut b = ContentHasher::new();
        b.update_str("a").update_str("bc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn deterministic() {
        let mut a = ContentHasher::new();
        a.update_str("person").update_bool(true);
        let mut b = ContentHasher::new();
        b.update_str("person").update_bool(true);
        assert_eq!(a.finish(), b.finish());
    }
}
