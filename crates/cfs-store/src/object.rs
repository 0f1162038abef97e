use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use cfs_types::{ContentHash, HashRef};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{StoreError, StoreResult};

/// Check that `name` can be used as a directory entry name.
///
/// Names are non-empty and never contain `/`.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("entry name is empty".into());
    }
    if name.contains('/') {
        return Err(format!("entry name contains '/': {name}"));
    }
    Ok(())
}

/// A single entry in a stored directory.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DirEntry {
    name: String,
    target: HashRef,
}

/// A stored directory listing: entry names mapped to hash references.
///
/// Entries keep insertion order. The serialized form is a flat JSON object
/// written in that order, e.g. `{"a.txt":"<hash>","sub":"<hash>.dir"}`, so a
/// given sequence of writes always produces the same bytes.
///
/// Integer-like names get no special placement: writing `b` and then `1`
/// encodes as `{"b":..,"1":..}`. Encoders that hoist array-index keys to the
/// front (JavaScript's `JSON.stringify`, for one) produce different bytes, and
/// therefore different hashes, for the same writes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<DirEntry>,
    index: HashMap<String, usize>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&HashRef> {
        self.index.get(name).map(|&i| &self.entries[i].target)
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, target: HashRef) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].target = target,
            None => self.push(name, target),
        }
    }

    fn push(&mut self, name: String, target: HashRef) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(DirEntry { name, target });
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashRef)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.target))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> StoreResult<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a directory object fetched under `hash`.
    pub fn from_bytes(hash: &ContentHash, data: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(data).map_err(|e| StoreError::CorruptDirectory {
            hash: hash.clone(),
            reason: e.to_string(),
        })
    }
}

impl FromIterator<(String, HashRef)> for Directory {
    fn from_iter<I: IntoIterator<Item = (String, HashRef)>>(iter: I) -> Self {
        let mut dir = Self::new();
        for (name, target) in iter {
            dir.insert(name, target);
        }
        dir
    }
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Directory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DirectoryVisitor;

        impl<'de> Visitor<'de> for DirectoryVisitor {
            type Value = Directory;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of entry names to hash references")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Directory, A::Error> {
                let mut dir = Directory::new();
                while let Some((name, target)) = access.next_entry::<String, HashRef>()? {
                    validate_name(&name).map_err(de::Error::custom)?;
                    if dir.index.contains_key(&name) {
                        return Err(de::Error::custom(format!("duplicate entry: {name}")));
                    }
                    dir.push(name, target);
                }
                Ok(dir)
            }
        }

        deserializer.deserialize_map(DirectoryVisitor)
    }
}
