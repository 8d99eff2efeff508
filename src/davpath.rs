//! Canonical URI paths.
//!
//! A [`DavPath`] is the decoded, normalized form of a request path. Two
//! paths are equal when their segments are equal; a trailing slash only
//! marks the collection form and never changes identity, so COPY/MOVE
//! source/destination comparison works on segments alone.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::errors::DavError;
use crate::DavResult;

// Characters that must be escaped when a path is rendered back into a URL.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The path part of a request URL, decoded and normalized.
#[derive(Debug, Clone)]
pub struct DavPath {
    segments: Vec<String>,
    collection: bool,
}

impl DavPath {
    /// Parse an absolute, possibly percent-encoded request path.
    pub fn new(path: &str) -> DavResult<DavPath> {
        // query and fragment are the transport's business.
        let path = path.split(['?', '#']).next().unwrap_or("");
        if !path.starts_with('/') {
            return Err(DavError::InvalidPath);
        }
        let collection = path.ends_with('/');
        let mut segments = Vec::new();
        for seg in path.split('/') {
            match seg {
                "" | "." => continue,
                ".." => return Err(DavError::ForbiddenPath),
                seg => {
                    let decoded = percent_decode_str(seg)
                        .decode_utf8()
                        .map_err(|_| DavError::InvalidPath)?;
                    if decoded == ".." {
                        return Err(DavError::ForbiddenPath);
                    }
                    if decoded.contains(['/', '\0']) {
                        return Err(DavError::InvalidPath);
                    }
                    segments.push(decoded.into_owned());
                }
            }
        }
        let collection = collection || segments.is_empty();
        Ok(DavPath {
            segments,
            collection,
        })
    }

    /// The root collection.
    pub fn root() -> DavPath {
        DavPath {
            segments: Vec::new(),
            collection: true,
        }
    }

    /// Parse a `Destination` value, which may be an absolute URL.
    pub fn from_destination(dest: &str) -> DavResult<DavPath> {
        if dest.contains("://") {
            let url = url::Url::parse(dest).map_err(|_| DavError::InvalidPath)?;
            DavPath::new(url.path())
        } else {
            DavPath::new(dest)
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Does the path end in a slash (the collection form)?
    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Switch to the collection form.
    pub fn add_slash(&mut self) {
        self.collection = true;
    }

    /// The last path segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// Parent collection; the root is its own parent.
    pub fn parent(&self) -> DavPath {
        let mut segments = self.segments.clone();
        segments.pop();
        DavPath {
            segments,
            collection: true,
        }
    }

    /// Child of this path.
    pub fn join(&self, name: &str) -> DavPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        DavPath {
            segments,
            collection: false,
        }
    }

    /// Decoded path segments, root-down.
    pub(crate) fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_str())
    }

    /// Is `other` strictly below this path?
    pub(crate) fn is_ancestor_of(&self, other: &DavPath) -> bool {
        other.segments.len() > self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// All proper ancestors, root first, excluding the path itself.
    pub(crate) fn ancestors(&self) -> Vec<DavPath> {
        (0..self.segments.len())
            .map(|n| DavPath {
                segments: self.segments[..n].to_vec(),
                collection: true,
            })
            .collect()
    }

    /// Canonical identity key (no trailing slash, decoded).
    pub(crate) fn key(&self) -> String {
        let mut s = String::new();
        for seg in &self.segments {
            s.push('/');
            s.push_str(seg);
        }
        if s.is_empty() {
            s.push('/');
        }
        s
    }

    /// Percent-encoded URL form.
    pub fn as_url_string(&self) -> String {
        let mut s = String::new();
        for seg in &self.segments {
            s.push('/');
            s.push_str(&utf8_percent_encode(seg, PATH_ENCODE_SET).to_string());
        }
        if s.is_empty() || self.collection {
            s.push('/');
        }
        s
    }

    /// Relative filesystem form, for stores that map into a base directory.
    pub fn as_rel_ospath(&self) -> PathBuf {
        let mut p = PathBuf::new();
        for seg in &self.segments {
            p.push(seg);
        }
        p
    }
}

impl fmt::Display for DavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_url_string())
    }
}

impl PartialEq for DavPath {
    fn eq(&self, other: &DavPath) -> bool {
        self.segments == other.segments
    }
}
impl Eq for DavPath {}

impl Hash for DavPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state)
    }
}

impl Ord for DavPath {
    fn cmp(&self, other: &DavPath) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for DavPath {
    fn partial_cmp(&self, other: &DavPath) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let p = DavPath::new("/foo/bar%20baz").unwrap();
        assert_eq!(p.file_name(), Some("bar baz"));
        assert_eq!(p.as_url_string(), "/foo/bar%20baz");
        assert!(!p.is_collection());

        let c = DavPath::new("/foo/").unwrap();
        assert!(c.is_collection());
        assert_eq!(c.as_url_string(), "/foo/");
    }

    #[test]
    fn test_identity_ignores_slash() {
        let a = DavPath::new("/a/b").unwrap();
        let b = DavPath::new("/a/b/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(DavPath::new("/a/../b").is_err());
        assert!(DavPath::new("/%2e%2e/etc").is_err());
        assert!(DavPath::new("relative").is_err());
    }

    #[test]
    fn test_parent_and_ancestors() {
        let p = DavPath::new("/a/b/c").unwrap();
        assert_eq!(p.parent(), DavPath::new("/a/b/").unwrap());
        let anc = p.ancestors();
        assert_eq!(anc.len(), 3);
        assert!(anc[0].is_root());
        assert_eq!(anc[2], DavPath::new("/a/b").unwrap());
        assert!(DavPath::root().ancestors().is_empty());
    }

    #[test]
    fn test_ancestry() {
        let a = DavPath::new("/a").unwrap();
        let ab = DavPath::new("/a/b").unwrap();
        assert!(a.is_ancestor_of(&ab));
        assert!(!ab.is_ancestor_of(&a));
        assert!(!a.is_ancestor_of(&a));
        assert!(DavPath::root().is_ancestor_of(&a));
    }

    #[test]
    fn test_destination_url() {
        let p = DavPath::from_destination("http://localhost:8880/dir/file").unwrap();
        assert_eq!(p, DavPath::new("/dir/file").unwrap());
        let p = DavPath::from_destination("/dir/other").unwrap();
        assert_eq!(p.file_name(), Some("other"));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = DavPath::new("/a").unwrap();
        let b = DavPath::new("/a/b").unwrap();
        let c = DavPath::new("/b").unwrap();
        assert!(a < b && b < c);
    }
}
