//! The scope chain consulted when resolving variable paths.

use crate::types::Value;
use crate::warning::compute_suggestions;

/// Stack of context frames, searched innermost first.
///
/// The bottom frame is the render context. Each active loop iteration pushes a
/// frame exposing the current item both under its alias (`{{job.title}}`) and
/// through its own fields (`{{title}}`).
pub struct ScopeChain<'v> {
    frames: Vec<Frame<'v>>,
}

enum Frame<'v> {
    Root(&'v Value),
    Item {
        collection: String,
        alias: String,
        item: &'v Value,
    },
}

impl<'v> Frame<'v> {
    fn resolve(&self, segments: &[&str]) -> Option<&'v Value> {
        match self {
            Frame::Root(root) => root.lookup(segments),
            Frame::Item { alias, item, .. } => {
                if let Some((first, rest)) = segments.split_first()
                    && *first == alias.as_str()
                    && let Some(value) = item.lookup(rest)
                {
                    return Some(value);
                }
                item.lookup(segments)
            }
        }
    }

    /// Names that can start a path in this frame.
    fn names(&self) -> Vec<String> {
        let (alias, value) = match self {
            Frame::Root(root) => (None, *root),
            Frame::Item { alias, item, .. } => (Some(alias.clone()), *item),
        };
        let keys = value
            .as_map()
            .into_iter()
            .flat_map(|entries| entries.keys().cloned());
        alias.into_iter().chain(keys).collect()
    }
}

impl<'v> ScopeChain<'v> {
    pub fn new(root: &'v Value) -> Self {
        Self {
            frames: vec![Frame::Root(root)],
        }
    }

    /// Pushes a frame for one item of `collection`.
    pub fn push_item(&mut self, collection: &str, alias: &str, item: &'v Value) {
        self.frames.push(Frame::Item {
            collection: collection.to_string(),
            alias: alias.to_string(),
            item,
        });
    }

    /// Pops the innermost item frame. The root frame is never popped.
    pub fn pop_item(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of active loop frames.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Resolves a dotted path against the first frame, innermost first, in
    /// which the whole path is defined.
    pub fn resolve(&self, path: &str) -> Option<&'v Value> {
        let segments: Vec<&str> = path.split('.').collect();
        self.resolve_segments(&segments)
    }

    fn resolve_segments(&self, segments: &[&str]) -> Option<&'v Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.resolve(segments))
    }

    /// Enclosing loop collections, outermost first.
    pub fn collections(&self) -> Vec<String> {
        self.frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Root(_) => None,
                Frame::Item { collection, .. } => Some(collection.clone()),
            })
            .collect()
    }

    /// Suggests resolvable paths close to an unresolved one.
    ///
    /// Finds the longest prefix of `path` that resolves and compares the next
    /// segment against that value's keys. When not even the first segment
    /// resolves, compares it against every name visible in scope.
    pub fn suggest(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path.split('.').collect();
        for len in (1..segments.len()).rev() {
            let Some(parent) = self.resolve_segments(&segments[..len]) else {
                continue;
            };
            let keys: Vec<String> = parent
                .as_map()
                .map(|entries| entries.keys().cloned().collect())
                .unwrap_or_default();
            let prefix = segments[..len].join(".");
            return compute_suggestions(segments[len], &keys)
                .into_iter()
                .map(|key| rebuild(&[prefix.as_str(), key.as_str()], &segments[len + 1..]))
                .collect();
        }

        let mut names: Vec<String> = Vec::new();
        for frame in self.frames.iter().rev() {
            for name in frame.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        compute_suggestions(segments[0], &names)
            .into_iter()
            .map(|name| rebuild(&[name.as_str()], &segments[1..]))
            .collect()
    }
}

fn rebuild(head: &[&str], rest: &[&str]) -> String {
    head.iter().chain(rest).copied().collect::<Vec<_>>().join(".")
}
