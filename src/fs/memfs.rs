//! Ephemeral in-memory filesystem.
//!
//! The whole tree lives under one RwLock, so every operation the handler
//! issues is applied atomically: a caller never observes a half-applied
//! mutation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::SystemTime;

use bytes::Bytes;
use futures_util::{stream, FutureExt, StreamExt};
use parking_lot::RwLock;

use crate::davpath::DavPath;
use crate::fs::*;

pub(crate) struct MemFs {
    root: RwLock<MemNode>,
}

struct MemNode {
    created: SystemTime,
    modified: SystemTime,
    props: HashMap<String, String>,
    kind: MemKind,
}

enum MemKind {
    File { data: Bytes },
    Dir { children: BTreeMap<String, MemNode> },
}

impl MemNode {
    fn new_dir() -> MemNode {
        let now = SystemTime::now();
        MemNode {
            created: now,
            modified: now,
            props: HashMap::new(),
            kind: MemKind::Dir {
                children: BTreeMap::new(),
            },
        }
    }

    fn new_file(data: Bytes) -> MemNode {
        let now = SystemTime::now();
        MemNode {
            created: now,
            modified: now,
            props: HashMap::new(),
            kind: MemKind::File { data },
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self.kind, MemKind::Dir { .. })
    }

    fn meta(&self) -> ResourceMeta {
        let len = match &self.kind {
            MemKind::File { data } => data.len() as u64,
            MemKind::Dir { .. } => 0,
        };
        ResourceMeta {
            len,
            is_collection: self.is_dir(),
            created: Some(self.created),
            modified: Some(self.modified),
        }
    }
}

fn lookup<'t>(root: &'t MemNode, path: &DavPath) -> FsResult<&'t MemNode> {
    let mut node = root;
    for seg in path.segments() {
        match &node.kind {
            MemKind::Dir { children } => {
                node = children.get(seg).ok_or(FsError::NotFound)?;
            }
            MemKind::File { .. } => return Err(FsError::NotACollection),
        }
    }
    Ok(node)
}

fn lookup_mut<'t>(root: &'t mut MemNode, path: &DavPath) -> FsResult<&'t mut MemNode> {
    let mut node = root;
    for seg in path.segments() {
        match &mut node.kind {
            MemKind::Dir { children } => {
                node = children.get_mut(seg).ok_or(FsError::NotFound)?;
            }
            MemKind::File { .. } => return Err(FsError::NotACollection),
        }
    }
    Ok(node)
}

// The child map of `path`'s parent, plus the leaf name.
fn parent_children<'t, 'p>(
    root: &'t mut MemNode,
    path: &'p DavPath,
) -> FsResult<(&'t mut BTreeMap<String, MemNode>, &'p str)> {
    let name = path.file_name().ok_or(FsError::Forbidden)?;
    let parent = lookup_mut(root, &path.parent())?;
    match &mut parent.kind {
        MemKind::Dir { children } => Ok((children, name)),
        MemKind::File { .. } => Err(FsError::NotACollection),
    }
}

impl MemFs {
    pub fn new() -> Arc<MemFs> {
        Arc::new(MemFs {
            root: RwLock::new(MemNode::new_dir()),
        })
    }
}

impl ResourceStore for MemFs {
    fn metadata<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ResourceMeta> {
        async move {
            let root = self.root.read();
            lookup(&root, path).map(|n| n.meta())
        }
        .boxed()
    }

    fn read<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Bytes> {
        async move {
            let root = self.root.read();
            match &lookup(&root, path)?.kind {
                MemKind::File { data } => Ok(data.clone()),
                MemKind::Dir { .. } => Err(FsError::Forbidden),
            }
        }
        .boxed()
    }

    fn write<'a>(&'a self, path: &'a DavPath, data: Bytes) -> FsFuture<'a, bool> {
        async move {
            trace!("FS: write {path}");
            let mut root = self.root.write();
            let (children, name) = parent_children(&mut root, path)?;
            match children.get_mut(name) {
                Some(node) if node.is_dir() => Err(FsError::Forbidden),
                Some(node) => {
                    node.kind = MemKind::File { data };
                    node.modified = SystemTime::now();
                    Ok(false)
                }
                None => {
                    children.insert(name.to_string(), MemNode::new_file(data));
                    Ok(true)
                }
            }
        }
        .boxed()
    }

    fn create_collection<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: create_collection {path}");
            let mut root = self.root.write();
            let (children, name) = parent_children(&mut root, path)?;
            if children.contains_key(name) {
                return Err(FsError::Exists);
            }
            children.insert(name.to_string(), MemNode::new_dir());
            Ok(())
        }
        .boxed()
    }

    fn remove<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: remove {path}");
            let mut root = self.root.write();
            let (children, name) = parent_children(&mut root, path)?;
            // dropping the node drops the whole subtree.
            children.remove(name).map(|_| ()).ok_or(FsError::NotFound)
        }
        .boxed()
    }

    fn read_dir<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, FsStream<FsDirEntry>> {
        async move {
            let root = self.root.read();
            match &lookup(&root, path)?.kind {
                MemKind::Dir { children } => {
                    let entries: Vec<_> = children
                        .iter()
                        .map(|(name, node)| FsDirEntry {
                            name: name.clone(),
                            meta: node.meta(),
                        })
                        .collect();
                    Ok(stream::iter(entries).boxed())
                }
                MemKind::File { .. } => Err(FsError::NotACollection),
            }
        }
        .boxed()
    }

    fn copy_file<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: copy_file {from} {to}");
            let mut root = self.root.write();
            let (data, props) = match lookup(&root, from)? {
                MemNode {
                    kind: MemKind::File { data },
                    props,
                    ..
                } => (data.clone(), props.clone()),
                _ => return Err(FsError::Forbidden),
            };
            let (children, name) = parent_children(&mut root, to)?;
            let mut node = MemNode::new_file(data);
            node.props = props;
            children.insert(name.to_string(), node);
            Ok(())
        }
        .boxed()
    }

    fn rename<'a>(&'a self, from: &'a DavPath, to: &'a DavPath) -> FsFuture<'a, ()> {
        async move {
            trace!("FS: rename {from} {to}");
            let mut root = self.root.write();
            // destination parent must be in place before the source is
            // detached, or a failure would drop the subtree.
            if !lookup(&root, &to.parent())?.is_dir() {
                return Err(FsError::NotACollection);
            }
            let node = {
                let (children, name) = parent_children(&mut root, from)?;
                children.remove(name).ok_or(FsError::NotFound)?
            };
            let (children, name) = parent_children(&mut root, to)?;
            children.insert(name.to_string(), node);
            Ok(())
        }
        .boxed()
    }

    fn get_props<'a>(&'a self, path: &'a DavPath) -> FsFuture<'a, Vec<(String, String)>> {
        async move {
            let root = self.root.read();
            let node = lookup(&root, path)?;
            let mut props: Vec<_> = node
                .props
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            props.sort();
            Ok(props)
        }
        .boxed()
    }

    fn patch_prop<'a>(
        &'a self,
        path: &'a DavPath,
        name: &'a str,
        value: Option<&'a str>,
    ) -> FsFuture<'a, ()> {
        async move {
            let mut root = self.root.write();
            let node = lookup_mut(&mut root, path)?;
            match value {
                Some(v) => {
                    node.props.insert(name.to_string(), v.to_string());
                }
                None => {
                    node.props.remove(name);
                }
            }
            Ok(())
        }
        .boxed()
    }
}
