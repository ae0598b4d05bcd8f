use super::{Body, FolderId, Node, NodeId, NodeKind, Tree};

/// One node yielded by [`DepthFirst`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub parent: Option<FolderId>,
    /// Root is depth 0.
    pub depth: usize,
    pub node: &'a Node,
}

impl<'a> Visit<'a> {
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn body(&self) -> &'a Body {
        self.node.body()
    }

    pub fn is_file(&self) -> bool {
        self.node.is_file()
    }
}

/// Explicit-stack pre-order walk; see [`Tree::depth_first`].
#[derive(Debug, Clone)]
pub struct DepthFirst<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> DepthFirst<'a> {
    pub(super) fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.contains(tree.root()) {
            stack.push((tree.root().node(), 0));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        loop {
            let (id, depth) = self.stack.pop()?;
            let Some(node) = self.tree.slot_node(id) else {
                continue;
            };
            // Pushed in reverse so files pop before folders, each in insertion order.
            if let Some(folders) = node.folders() {
                self.stack
                    .extend(folders.ids().rev().map(|f| (f.node(), depth + 1)));
            }
            if let Some(files) = node.files() {
                self.stack
                    .extend(files.ids().rev().map(|f| (f.node(), depth + 1)));
            }
            return Some(Visit {
                id,
                parent: node.parent(),
                depth,
                node,
            });
        }
    }
}
