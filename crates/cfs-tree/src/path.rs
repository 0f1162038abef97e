//! Address parsing.
//!
//! A leading `/` selects path resolution from the root. Anything else is read
//! as a textual hash reference and fetched directly.

use cfs_types::HashRef;

use crate::error::{FsError, FsResult};

/// Split `path` on `/`, dropping empty segments, so `/a//b/` is `/a/b`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// A parsed read address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address<'a> {
    /// Resolve through the root, one segment at a time.
    Path(Vec<&'a str>),
    /// Fetch an object directly, bypassing the root.
    Hash(HashRef),
}

impl<'a> Address<'a> {
    pub fn parse(address: &'a str) -> FsResult<Self> {
        if address.starts_with('/') {
            Ok(Self::Path(segments(address)))
        } else {
            Ok(Self::Hash(HashRef::parse(address)?))
        }
    }
}

/// Validate a write path and return its segments.
///
/// Write paths start with `/` and name at least one entry.
pub(crate) fn write_segments(path: &str) -> FsResult<Vec<&str>> {
    if !path.starts_with('/') {
        return Err(FsError::InvalidPath(path.to_string()));
    }
    let segs = segments(path);
    if segs.is_empty() {
        return Err(FsError::InvalidPath(path.to_string()));
    }
    Ok(segs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfs_types::ContentHash;
    use proptest::prelude::*;

    #[test]
    fn empty_segments_dropped() {
        assert_eq!(segments("/a//b/"), vec!["a", "b"]);
        assert_eq!(segments("/"), Vec::<&str>::new());
        assert_eq!(segments(""), Vec::<&str>::new());
    }

    #[test]
    fn leading_slash_is_path() {
        assert_eq!(Address::parse("/a/b").unwrap(), Address::Path(vec!["a", "b"]));
        assert_eq!(Address::parse("/").unwrap(), Address::Path(vec![]));
    }

    #[test]
    fn bare_address_is_hash() {
        let h = ContentHash::new("abc123").unwrap();
        assert_eq!(Address::parse("abc123").unwrap(), Address::Hash(HashRef::blob(h.clone())));
        assert_eq!(Address::parse("abc123.dir").unwrap(), Address::Hash(HashRef::dir(h)));
    }

    #[test]
    fn malformed_hash_address() {
        assert!(matches!(Address::parse("abc.zip"), Err(FsError::InvalidHashRef(_))));
        assert!(matches!(Address::parse(""), Err(FsError::InvalidHashRef(_))));
    }

    #[test]
    fn write_paths_need_leading_slash_and_a_name() {
        assert_eq!(write_segments("/a/b.txt").unwrap(), vec!["a", "b.txt"]);
        assert!(matches!(write_segments("a/b"), Err(FsError::InvalidPath(_))));
        assert!(matches!(write_segments("/"), Err(FsError::InvalidPath(_))));
        assert!(matches!(write_segments("//"), Err(FsError::InvalidPath(_))));
    }

    proptest! {
        #[test]
        fn extra_slashes_never_change_segments(parts in proptest::collection::vec("[a-z0-9.]{1,6}", 1..5)) {
            let plain = format!("/{}", parts.join("/"));
            let noisy = format!("//{}//", parts.join("///"));
            prop_assert_eq!(segments(&plain), segments(&noisy));
            prop_assert_eq!(segments(&plain).len(), parts.len());
        }
    }
}
