//! Arena-backed folder/file tree.
//!
//! Nodes live in a slot vector and are addressed by generational [`NodeId`]s, wrapped in
//! [`FolderId`] / [`FileId`] so a file can never be passed where a folder is expected. A folder
//! owns its children: releasing a folder releases its whole subtree, and a released slot bumps
//! its generation so stale handles are rejected instead of aliasing a newer node.

mod children;
mod options;
mod walk;

pub use children::NamedChildren;
pub use options::PlacementOptions;
pub use walk::{DepthFirst, Visit};

use std::fmt;

use serde::Serialize;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geom::{self, Point, Vector};
use crate::rng::XorShift64Star;

/// Longest accepted node name, in bytes.
pub const MAX_NAME_LEN: usize = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "File"),
            NodeKind::Folder => write!(f, "Folder"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(NodeId);

impl FolderId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(NodeId);

impl FileId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

impl From<FolderId> for NodeId {
    fn from(value: FolderId) -> Self {
        value.0
    }
}

impl From<FileId> for NodeId {
    fn from(value: FileId) -> Self {
        value.0
    }
}

/// Physical and visual state shared by files and folders.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub center: Point,
    pub radius: f64,
    pub mass: f64,
    pub velocity: Vector,
    pub color: Color,
}

impl Body {
    fn at(center: Point, radius: f64, mass: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            mass,
            velocity: Vector::zero(),
            color,
        }
    }
}

#[derive(Debug, Clone)]
enum Payload {
    File {
        lines: u64,
    },
    Folder {
        files: NamedChildren<FileId>,
        folders: NamedChildren<FolderId>,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<FolderId>,
    body: Body,
    payload: Payload,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<FolderId> {
        self.parent
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::File { .. } => NodeKind::File,
            Payload::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    /// Line count of a file; `None` for folders.
    pub fn lines(&self) -> Option<u64> {
        match self.payload {
            Payload::File { lines } => Some(lines),
            Payload::Folder { .. } => None,
        }
    }

    pub fn files(&self) -> Option<&NamedChildren<FileId>> {
        match &self.payload {
            Payload::Folder { files, .. } => Some(files),
            Payload::File { .. } => None,
        }
    }

    pub fn folders(&self) -> Option<&NamedChildren<FolderId>> {
        match &self.payload {
            Payload::Folder { folders, .. } => Some(folders),
            Payload::File { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    released: usize,
    root: FolderId,
    placement: PlacementOptions,
    rng: XorShift64Star,
}

impl Tree {
    /// Creates a tree holding only the root folder, centered at `center`.
    pub fn new(root_name: &str, center: Point) -> Result<Self> {
        Self::with_options(root_name, center, PlacementOptions::default())
    }

    pub fn with_options(
        root_name: &str,
        center: Point,
        placement: PlacementOptions,
    ) -> Result<Self> {
        validate_name(root_name)?;
        let body = Body::at(
            center,
            placement.folder_radius,
            placement.folder_mass,
            placement.folder_color,
        );
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            released: 0,
            root: FolderId(NodeId {
                index: 0,
                generation: 0,
            }),
            rng: XorShift64Star::new(placement.random_seed),
            placement,
        };
        let id = tree.alloc(Node {
            name: root_name.to_string(),
            parent: None,
            body,
            payload: empty_folder(),
        });
        tree.root = FolderId(id);
        Ok(tree)
    }

    pub fn root(&self) -> FolderId {
        self.root
    }

    pub fn placement(&self) -> &PlacementOptions {
        &self.placement
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total number of nodes released over the lifetime of the tree.
    pub fn released_count(&self) -> usize {
        self.released
    }

    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.slot_node(id.into()).is_some()
    }

    pub fn node(&self, id: impl Into<NodeId>) -> Result<&Node> {
        self.slot_node(id.into()).ok_or(Error::StaleHandle)
    }

    pub fn body(&self, id: impl Into<NodeId>) -> Result<&Body> {
        self.node(id).map(Node::body)
    }

    pub fn body_mut(&mut self, id: impl Into<NodeId>) -> Result<&mut Body> {
        self.node_mut(id.into()).map(|n| &mut n.body)
    }

    pub fn name_exists(&self, folder: FolderId, name: &str) -> bool {
        self.folder_children(folder)
            .map(|(files, folders)| files.contains(name) || folders.contains(name))
            .unwrap_or(false)
    }

    pub fn find_file(&self, folder: FolderId, name: &str) -> Result<FileId> {
        let (files, _) = self.folder_children(folder)?;
        files.get(name).ok_or_else(|| Error::NotFound {
            kind: NodeKind::File,
            name: name.to_string(),
        })
    }

    pub fn find_folder(&self, folder: FolderId, name: &str) -> Result<FolderId> {
        let (_, folders) = self.folder_children(folder)?;
        folders.get(name).ok_or_else(|| Error::NotFound {
            kind: NodeKind::Folder,
            name: name.to_string(),
        })
    }

    pub fn files(&self, folder: FolderId) -> Result<impl DoubleEndedIterator<Item = FileId> + '_> {
        self.folder_children(folder).map(|(files, _)| files.ids())
    }

    pub fn folders(
        &self,
        folder: FolderId,
    ) -> Result<impl DoubleEndedIterator<Item = FolderId> + '_> {
        self.folder_children(folder).map(|(_, folders)| folders.ids())
    }

    pub fn create_folder(&mut self, parent: FolderId, name: &str) -> Result<FolderId> {
        validate_name(name)?;
        self.ensure_name_free(parent, name)?;

        let center = self.node(parent)?.body.center + self.folder_offset();
        let body = Body::at(
            center,
            self.placement.folder_radius,
            self.placement.folder_mass,
            self.placement.folder_color,
        );
        let id = FolderId(self.alloc(Node {
            name: name.to_string(),
            parent: Some(parent),
            body,
            payload: empty_folder(),
        }));

        let (_, folders) = self.folder_children_mut(parent)?;
        let inserted = folders.insert(name, id);
        debug_assert!(inserted, "folder name checked free above");
        Ok(id)
    }

    pub fn create_file(&mut self, folder: FolderId, name: &str) -> Result<FileId> {
        validate_name(name)?;
        self.ensure_name_free(folder, name)?;

        let parent_center = self.node(folder)?.body.center;
        let body = Body::at(
            self.orbit_point(parent_center),
            self.placement.file_radius,
            self.placement.file_mass,
            self.placement.file_color,
        );
        let id = FileId(self.alloc(Node {
            name: name.to_string(),
            parent: Some(folder),
            body,
            payload: Payload::File { lines: 0 },
        }));

        let (files, _) = self.folder_children_mut(folder)?;
        let inserted = files.insert(name, id);
        debug_assert!(inserted, "file name checked free above");
        Ok(id)
    }

    pub fn remove_file(&mut self, folder: FolderId, name: &str) -> Result<()> {
        let (files, _) = self.folder_children_mut(folder)?;
        let id = files.remove(name).ok_or_else(|| Error::NotFound {
            kind: NodeKind::File,
            name: name.to_string(),
        })?;
        self.release(id.0);
        Ok(())
    }

    /// Releases `folder` and everything below it, children before parents, and detaches it from
    /// its parent. Destroying the root empties the tree. Returns the number of released nodes.
    pub fn destroy_folder(&mut self, folder: FolderId) -> Result<usize> {
        let node = self.node(folder)?;
        if let Some(parent) = node.parent {
            let name = node.name.clone();
            let (_, folders) = self.folder_children_mut(parent)?;
            folders.remove(&name);
        }
        Ok(self.release_subtree(folder))
    }

    /// Paints `folder`, every descendant folder and every descendant file with `color`.
    pub fn set_general_color(&mut self, folder: FolderId, color: Color) -> Result<()> {
        self.for_each_body_mut(folder, &mut |body| body.color = color)
    }

    /// Steps the color of every node under `folder` (inclusive) towards `target`.
    pub fn fade_colors(&mut self, folder: FolderId, target: Color, step: u8) -> Result<()> {
        self.for_each_body_mut(folder, &mut |body| {
            body.color = body.color.step_towards(target, step)
        })
    }

    pub fn set_color(&mut self, id: impl Into<NodeId>, color: Color) -> Result<()> {
        self.body_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_lines(&mut self, file: FileId, lines: u64) -> Result<()> {
        match &mut self.node_mut(file.0)?.payload {
            Payload::File { lines: slot } => {
                *slot = lines;
                Ok(())
            }
            Payload::Folder { .. } => Err(Error::KindMismatch {
                expected: NodeKind::File,
                found: NodeKind::Folder,
            }),
        }
    }

    /// Slash-joined path of `id` relative to the root; the root itself maps to `""`.
    pub fn path_of(&self, id: impl Into<NodeId>) -> Result<String> {
        let mut names: Vec<&str> = Vec::new();
        let mut cur = self.node(id)?;
        while let Some(parent) = cur.parent {
            names.push(cur.name.as_str());
            cur = self.node(parent)?;
        }
        names.reverse();
        Ok(names.join("/"))
    }

    /// Pre-order traversal from the root: a folder, then its files, then each child folder's
    /// subtree in insertion order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(self)
    }

    fn slot_node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .ok_or(Error::StaleHandle)?;
        if slot.generation != id.generation {
            return Err(Error::StaleHandle);
        }
        slot.node.as_mut().ok_or(Error::StaleHandle)
    }

    fn folder_children(
        &self,
        folder: FolderId,
    ) -> Result<(&NamedChildren<FileId>, &NamedChildren<FolderId>)> {
        match &self.node(folder)?.payload {
            Payload::Folder { files, folders } => Ok((files, folders)),
            Payload::File { .. } => Err(Error::KindMismatch {
                expected: NodeKind::Folder,
                found: NodeKind::File,
            }),
        }
    }

    fn folder_children_mut(
        &mut self,
        folder: FolderId,
    ) -> Result<(&mut NamedChildren<FileId>, &mut NamedChildren<FolderId>)> {
        match &mut self.node_mut(folder.0)?.payload {
            Payload::Folder { files, folders } => Ok((files, folders)),
            Payload::File { .. } => Err(Error::KindMismatch {
                expected: NodeKind::Folder,
                found: NodeKind::File,
            }),
        }
    }

    fn ensure_name_free(&self, folder: FolderId, name: &str) -> Result<()> {
        let (files, folders) = self.folder_children(folder)?;
        if files.contains(name) || folders.contains(name) {
            return Err(Error::AlreadyExists {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn folder_offset(&mut self) -> Vector {
        let jitter = self.placement.folder_jitter;
        let offset = geom::vector(
            self.rng.next_f64_signed() * jitter,
            self.rng.next_f64_signed() * jitter,
        );
        if geom::length(offset) == 0.0 {
            // A zero offset would give the parent spring a zero-length start.
            return geom::vector(jitter.abs().max(1.0), 0.0);
        }
        offset
    }

    fn orbit_point(&mut self, center: Point) -> Point {
        let angle = self.rng.next_f64_unit() * std::f64::consts::TAU;
        let radius = self.placement.file_orbit_radius;
        center + geom::vector(angle.cos() * radius, angle.sin() * radius)
    }

    fn for_each_body_mut(
        &mut self,
        folder: FolderId,
        f: &mut impl FnMut(&mut Body),
    ) -> Result<()> {
        let mut pending = vec![folder];
        while let Some(folder) = pending.pop() {
            let (files, folders) = self.folder_children(folder)?;
            let files: Vec<FileId> = files.ids().collect();
            pending.extend(folders.ids());
            for file in files {
                f(self.body_mut(file)?);
            }
            f(self.body_mut(folder)?);
        }
        Ok(())
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        self.released += 1;
        Some(node)
    }

    fn release_subtree(&mut self, folder: FolderId) -> usize {
        let mut released = 0;
        // Folders in discovery order; released in reverse so children go before parents.
        let mut emptied = Vec::new();
        let mut pending = vec![folder];
        while let Some(folder) = pending.pop() {
            let (files, folders) = match self.folder_children_mut(folder) {
                Ok((files, folders)) => (std::mem::take(files), std::mem::take(folders)),
                Err(_) => continue,
            };
            for file in files.into_ids() {
                if self.release(file.0).is_some() {
                    released += 1;
                }
            }
            pending.extend(folders.into_ids());
            emptied.push(folder);
        }
        for folder in emptied.into_iter().rev() {
            if self.release(folder.0).is_some() {
                released += 1;
            }
        }
        released
    }
}

fn empty_folder() -> Payload {
    Payload::Folder {
        files: NamedChildren::new(),
        folders: NamedChildren::new(),
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.len() > MAX_NAME_LEN {
        "name is longer than 127 bytes"
    } else if name.contains('/') {
        "name contains '/'"
    } else {
        return Ok(());
    };
    Err(Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}
