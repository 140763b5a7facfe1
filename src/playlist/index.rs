// AVL tree over (title, id)
// Titles can collide, ids can't - so every key is unique and the tree never
// holds duplicates. Nodes carry the key only; the registry owns the entries.

use std::cmp::{max, Ordering};

use tracing::debug;

use super::entry::{Entry, EntryId, EntryRegistry};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    title: String,
    id: EntryId,
    left: Link,
    right: Link,
    height: i32,
}

impl Node {
    fn new(title: String, id: EntryId) -> Box<Self> {
        Box::new(Self {
            title,
            id,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Where `(title, id)` sits relative to this node's key
    fn locate(&self, title: &str, id: EntryId) -> Ordering {
        title
            .cmp(self.title.as_str())
            .then_with(|| id.cmp(&self.id))
    }
}

fn height(link: &Link) -> i32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn update_height(node: &mut Node) {
    node.height = 1 + max(height(&node.left), height(&node.right));
}

fn balance_factor(node: &Node) -> i32 {
    height(&node.left) - height(&node.right)
}

fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}

/// Restore the height cache and the AVL balance at `node`.
/// Left-left / right-right take a single rotation, left-right / right-left a double one.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    update_height(&mut node);
    let balance = balance_factor(&node);

    if balance > 1 {
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn insert_node(link: Link, title: String, id: EntryId, inserted: &mut bool) -> Box<Node> {
    let Some(mut node) = link else {
        *inserted = true;
        return Node::new(title, id);
    };

    match node.locate(&title, id) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), title, id, inserted)),
        Ordering::Greater => node.right = Some(insert_node(node.right.take(), title, id, inserted)),
        Ordering::Equal => return node,
    }

    rebalance(node)
}

/// Detach the minimum of a subtree. Returns (rest of subtree, detached node).
fn take_min(mut node: Box<Node>) -> (Link, Box<Node>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn remove_node(link: Link, title: &str, id: EntryId, removed: &mut bool) -> Link {
    let mut node = link?;

    match node.locate(title, id) {
        Ordering::Less => node.left = remove_node(node.left.take(), title, id, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), title, id, removed),
        Ordering::Equal => {
            *removed = true;
            match (node.left.take(), node.right.take()) {
                (None, None) => return None,
                (Some(child), None) | (None, Some(child)) => return Some(child),
                (Some(left), Some(right)) => {
                    // promote the in-order successor
                    let (rest, mut successor) = take_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    node = successor;
                }
            }
        }
    }

    Some(rebalance(node))
}

fn collect_exact_title(link: &Link, title: &str, out: &mut Vec<EntryId>) {
    let Some(node) = link else {
        return;
    };

    match title.cmp(node.title.as_str()) {
        Ordering::Less => collect_exact_title(&node.left, title, out),
        Ordering::Greater => collect_exact_title(&node.right, title, out),
        Ordering::Equal => {
            // equal titles can sit on both sides, ordered by id
            collect_exact_title(&node.left, title, out);
            out.push(node.id);
            collect_exact_title(&node.right, title, out);
        }
    }
}

/// Balanced search index over playlist entries, keyed by (title, id)
#[derive(Debug, Default)]
pub struct OrderedIndex {
    root: Link,
    len: usize,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `entry`, unless a song with the same title and artist is already indexed.
    /// Returns false (and changes nothing) on such a duplicate.
    pub fn insert(&mut self, entry: &Entry, registry: &EntryRegistry) -> bool {
        let duplicate = self
            .find_exact_title(&entry.title)
            .into_iter()
            .filter_map(|id| registry.get(id))
            .any(|existing| existing.is_same_song(&entry.title, &entry.artist));

        if duplicate {
            debug!("Index rejected duplicate '{}' by '{}'", entry.title, entry.artist);
            return false;
        }

        let mut inserted = false;
        self.root = Some(insert_node(self.root.take(), entry.title.clone(), entry.id, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove the node for `id`.
    ///
    /// The tree has no id-keyed path, so this first walks the whole tree to
    /// recover the title (O(n)), then deletes by the (title, id) key.
    pub fn remove_by_id(&mut self, id: EntryId) -> bool {
        let Some(title) = self.title_of(id).map(str::to_owned) else {
            return false;
        };

        let mut removed = false;
        self.root = remove_node(self.root.take(), &title, id, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Every indexed id whose title matches ignoring case, in key order
    pub fn search_by_title(&self, title: &str) -> Vec<EntryId> {
        let needle = title.to_lowercase();
        self.iter()
            .filter(|(candidate, _)| candidate.to_lowercase() == needle)
            .map(|(_, id)| id)
            .collect()
    }

    /// Case-sensitive title lookup that only descends where the title can be
    pub fn find_exact_title(&self, title: &str) -> Vec<EntryId> {
        let mut out = Vec::new();
        collect_exact_title(&self.root, title, &mut out);
        out
    }

    pub fn all_in_order(&self) -> Vec<EntryId> {
        self.iter().map(|(_, id)| id).collect()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.title_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Drop every node. Entries themselves live in the registry and are untouched.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// In-order walk yielding `(title, id)`
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    fn title_of(&self, id: EntryId) -> Option<&str> {
        self.iter()
            .find(|(_, candidate)| *candidate == id)
            .map(|(title, _)| title)
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left(root.as_deref());
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, EntryId);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.title.as_str(), node.id))
    }
}
