//! Octree spatial index over mesh vertices
//!
//! Nodes own their eight children outright; a node either has no children or
//! all eight, and once split it never becomes a leaf again.

use meshcluster_core::{BoundingBox, Point3f};

/// Child slot of an octree node.
///
/// Left/right split x, bottom/top split y, front/back split z, with the back
/// octants covering the upper half of z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octant {
    LeftBottomBack = 0,
    RightBottomBack = 1,
    LeftTopBack = 2,
    RightTopBack = 3,
    LeftBottomFront = 4,
    RightBottomFront = 5,
    LeftTopFront = 6,
    RightTopFront = 7,
}

impl Octant {
    /// All octants in child order.
    pub const ALL: [Octant; 8] = [
        Octant::LeftBottomBack,
        Octant::RightBottomBack,
        Octant::LeftTopBack,
        Octant::RightTopBack,
        Octant::LeftBottomFront,
        Octant::RightBottomFront,
        Octant::LeftTopFront,
        Octant::RightTopFront,
    ];

    pub fn is_right(self) -> bool {
        (self as u8) & 1 != 0
    }

    pub fn is_top(self) -> bool {
        (self as u8) & 2 != 0
    }

    pub fn is_back(self) -> bool {
        (self as u8) & 4 == 0
    }

    /// Box of this octant inside `parent`, split at `mid`.
    fn bounds(self, parent: &BoundingBox, mid: &Point3f) -> BoundingBox {
        let (x0, x1) = if self.is_right() { (mid.x, parent.max.x) } else { (parent.min.x, mid.x) };
        let (y0, y1) = if self.is_top() { (mid.y, parent.max.y) } else { (parent.min.y, mid.y) };
        let (z0, z1) = if self.is_back() { (mid.z, parent.max.z) } else { (parent.min.z, mid.z) };
        BoundingBox::new(Point3f::new(x0, y0, z0), Point3f::new(x1, y1, z1))
    }
}

/// Octree node holding the indices of the vertices that fell inside it.
#[derive(Debug, Clone)]
pub struct Octree {
    bounds: BoundingBox,
    members: Vec<usize>,
    children: Option<Box<[Octree; 8]>>,
    depth: u32,
}

impl Octree {
    /// Root node covering `bounds`.
    pub fn new(bounds: BoundingBox) -> Self {
        Self::with_depth(bounds, 0)
    }

    fn with_depth(bounds: BoundingBox, depth: u32) -> Self {
        Self {
            bounds,
            members: Vec::new(),
            children: None,
            depth,
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn push_member(&mut self, vertex: usize) {
        self.members.push(vertex);
    }

    /// Inclusive range test on all three axes.
    pub fn contains_vertex(&self, p: &Point3f) -> bool {
        self.bounds.contains(p)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Split this node at the midpoint of each axis into eight children.
    /// Does nothing if the node is already split.
    pub fn generate_children(&mut self) {
        if self.children.is_some() {
            return;
        }
        let min = self.bounds.min;
        let max = self.bounds.max;
        let mid = Point3f::new(
            min.x + (max.x - min.x) / 2.0,
            min.y + (max.y - min.y) / 2.0,
            min.z + (max.z - min.z) / 2.0,
        );
        let depth = self.depth + 1;
        let parent = self.bounds;
        self.children = Some(Box::new(
            Octant::ALL.map(|octant| Octree::with_depth(octant.bounds(&parent, &mid), depth)),
        ));
    }

    pub fn children(&self) -> Option<&[Octree; 8]> {
        self.children.as_deref()
    }

    pub fn children_mut(&mut self) -> Option<&mut [Octree; 8]> {
        self.children.as_deref_mut()
    }

    pub fn child(&self, octant: Octant) -> Option<&Octree> {
        self.children.as_ref().map(|c| &c[octant as usize])
    }

    /// Leaves in depth-first child order.
    pub fn leaves(&self) -> Vec<&Octree> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Octree>) {
        match &self.children {
            Some(children) => children.iter().for_each(|c| c.collect_leaves(out)),
            None => out.push(self),
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |c| c.iter().map(Octree::node_count).sum())
    }

    /// Depth of the deepest node below (and including) this one.
    pub fn max_depth(&self) -> u32 {
        self.children
            .as_ref()
            .and_then(|c| c.iter().map(Octree::max_depth).max())
            .unwrap_or(self.depth)
    }
}
