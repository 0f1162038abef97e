use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Suffix marking a directory reference in its textual form.
pub const DIR_SUFFIX: &str = ".dir";

/// Content hash assigned by a backend.
///
/// The tree layer never computes these itself; it only carries them around.
/// A hash is any non-empty string without `.` or `/`, since `.` introduces the
/// kind suffix of a [`HashRef`] and `/` introduces a path.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Wrap a backend-assigned hash string.
    pub fn new(hash: impl Into<String>) -> Result<Self, TypeError> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(TypeError::EmptyHash);
        }
        if hash.contains('.') || hash.contains('/') {
            return Err(TypeError::ReservedCharacter(hash));
        }
        Ok(Self(hash))
    }

    /// Hex-encode a raw digest.
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

/// The kind of object a [`HashRef`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RefKind {
    /// Opaque bytes, returned verbatim.
    Blob,
    /// A serialized directory listing.
    Dir,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

/// A content hash tagged with the kind of object it names.
///
/// The kind tag belongs to this layer only: backends are keyed by the bare
/// [`ContentHash`], so the tag is dropped before every backend call.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashRef {
    hash: ContentHash,
    kind: RefKind,
}

impl HashRef {
    pub fn new(hash: ContentHash, kind: RefKind) -> Self {
        Self { hash, kind }
    }

    /// Reference to a blob object.
    pub fn blob(hash: ContentHash) -> Self {
        Self::new(hash, RefKind::Blob)
    }

    /// Reference to a directory object.
    pub fn dir(hash: ContentHash) -> Self {
        Self::new(hash, RefKind::Dir)
    }

    /// Parse the textual form: `<hash>` for blobs, `<hash>.dir` for directories.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        match s.split_once('.') {
            None => Ok(Self::blob(ContentHash::new(s)?)),
            Some((hash, "dir")) => Ok(Self::dir(ContentHash::new(hash)?)),
            Some(_) => Err(TypeError::InvalidHashRef(s.to_string())),
        }
    }

    /// The backend key, with the kind tag stripped.
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn into_hash(self) -> ContentHash {
        self.hash
    }

    pub fn kind(&self) -> RefKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == RefKind::Dir
    }

    pub fn is_blob(&self) -> bool {
        self.kind == RefKind::Blob
    }
}

impl fmt::Debug for HashRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashRef({}:{})", self.kind, self.hash.short())
    }
}

impl fmt::Display for HashRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RefKind::Blob => write!(f, "{}", self.hash),
            RefKind::Dir => write!(f, "{}{DIR_SUFFIX}", self.hash),
        }
    }
}

impl FromStr for HashRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HashRef {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HashRef> for String {
    fn from(r: HashRef) -> Self {
        r.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hash(s: &str) -> ContentHash {
        ContentHash::new(s).unwrap()
    }

    #[test]
    fn empty_hash_rejected() {
        assert_eq!(ContentHash::new(""), Err(TypeError::EmptyHash));
    }

    #[test]
    fn reserved_characters_rejected() {
        assert!(matches!(
            ContentHash::new("ab.cd"),
            Err(TypeError::ReservedCharacter(_))
        ));
        assert!(matches!(
            ContentHash::new("ab/cd"),
            Err(TypeError::ReservedCharacter(_))
        ));
    }

    #[test]
    fn from_digest_is_hex() {
        let h = ContentHash::from_digest(&[0xab, 0xcd]);
        assert_eq!(h.as_str(), "abcd");
    }

    #[test]
    fn short_is_prefix() {
        let h = hash("0123456789abcdef");
        assert_eq!(h.short(), "01234567");
        assert_eq!(hash("abc").short(), "abc");
    }

    #[test]
    fn parse_blob_ref() {
        let r = HashRef::parse("deadbeef").unwrap();
        assert!(r.is_blob());
        assert_eq!(r.hash().as_str(), "deadbeef");
    }

    #[test]
    fn parse_dir_ref() {
        let r = HashRef::parse("deadbeef.dir").unwrap();
        assert!(r.is_dir());
        assert_eq!(r.hash().as_str(), "deadbeef");
        assert_eq!(r.to_string(), "deadbeef.dir");
    }

    #[test]
    fn parse_unknown_suffix_rejected() {
        assert!(matches!(
            HashRef::parse("deadbeef.txt"),
            Err(TypeError::InvalidHashRef(_))
        ));
    }

    #[test]
    fn parse_empty_hash_rejected() {
        assert_eq!(HashRef::parse(".dir"), Err(TypeError::EmptyHash));
    }

    #[test]
    fn same_hash_different_kind_not_equal() {
        assert_ne!(HashRef::blob(hash("aa")), HashRef::dir(hash("aa")));
    }

    #[test]
    fn serde_uses_textual_form() {
        let r = HashRef::dir(hash("cafe"));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"cafe.dir\"");
        let parsed: HashRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn serde_rejects_bad_hash() {
        assert!(serde_json::from_str::<ContentHash>("\"a.b\"").is_err());
    }

    proptest! {
        #[test]
        fn textual_form_roundtrips(h in "[0-9a-f]{1,64}", is_dir in any::<bool>()) {
            let kind = if is_dir { RefKind::Dir } else { RefKind::Blob };
            let r = HashRef::new(hash(&h), kind);
            prop_assert_eq!(HashRef::parse(&r.to_string()).unwrap(), r);
        }
    }
}
