use glam::Vec3;

use crate::geometry::{EdgeGeometry, Geometry, Transform, EDGE_THRESHOLD_DEGREES};
use crate::material::Material;
use crate::math::{intersect_aabb, intersect_triangle, Color, Ray, AABB};

/// Margin added around part bounds so flat faces still have a volume
const BOUNDS_MARGIN: f32 = 1e-3;

/// Stable handle to a node in a [`SceneGraph`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a group node; only groups can have children
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(NodeId);

impl GroupId {
    pub fn node(self) -> NodeId {
        self.0
    }
}

/// Named, rendered, pickable node
#[derive(Clone, Debug)]
pub struct Part {
    name: String,
    geometry: Geometry,
    material: Material,
    transform: Transform,
    world_triangles: Vec<[Vec3; 3]>,
    bounds: AABB,
}

impl Part {
    pub fn new(
        name: impl Into<String>,
        geometry: Geometry,
        material: Material,
        transform: Transform,
    ) -> Self {
        let world_triangles: Vec<[Vec3; 3]> = geometry
            .triangles()
            .map(|tri| tri.map(|p| transform.apply(p)))
            .collect();
        let world_points: Vec<Vec3> = world_triangles.iter().flatten().copied().collect();
        let bounds = AABB::from_points(&world_points)
            .unwrap_or(AABB::new(transform.translation, transform.translation))
            .padded(BOUNDS_MARGIN);

        Self {
            name: name.into(),
            geometry,
            material,
            transform,
            world_triangles,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World-space bounds, slightly padded
    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn world_triangles(&self) -> &[[Vec3; 3]] {
        &self.world_triangles
    }

    /// Distance along `ray` to the closest triangle of this part
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        if intersect_aabb(ray.origin, ray.direction, self.bounds.min, self.bounds.max) < 0.0 {
            return None;
        }

        self.world_triangles
            .iter()
            .filter_map(|&[a, b, c]| intersect_triangle(ray, a, b, c))
            .map(|hit| hit.t)
            .min_by(f32::total_cmp)
    }
}

/// Edge lines drawn over a part. Never pickable.
#[derive(Clone, Debug)]
pub struct Outline {
    edges: EdgeGeometry,
    color: Color,
    transform: Transform,
}

impl Outline {
    /// Outline of `geometry` placed with the owning part's `transform`
    pub fn of(geometry: &Geometry, transform: Transform, color: Color) -> Self {
        Self {
            edges: geometry.edges(EDGE_THRESHOLD_DEGREES),
            color,
            transform,
        }
    }

    pub fn edges(&self) -> &EdgeGeometry {
        &self.edges
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn world_segments(&self) -> impl Iterator<Item = [Vec3; 2]> + '_ {
        self.edges
            .segments()
            .iter()
            .map(move |seg| seg.map(|p| self.transform.apply(p)))
    }
}

/// X/Y/Z axis lines from the origin, coloured red/green/blue
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axes {
    pub length: f32,
}

impl Axes {
    pub fn segments(&self) -> [([Vec3; 2], Color); 3] {
        [
            ([Vec3::ZERO, Vec3::X * self.length], Color::RED),
            ([Vec3::ZERO, Vec3::Y * self.length], Color::GREEN),
            ([Vec3::ZERO, Vec3::Z * self.length], Color::BLUE),
        ]
    }
}

#[derive(Clone, Debug, Default)]
pub struct Group {
    pub name: Option<String>,
    children: Vec<NodeId>,
}

impl Group {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Node kinds. Picking only ever looks at [`Node::Part`].
#[derive(Clone, Debug)]
pub enum Node {
    Group(Group),
    Part(Part),
    Outline(Outline),
    Axes(Axes),
}

/// Tree of scene nodes stored in an arena. Node 0 is the root group.
/// Nodes are never removed, so a [`NodeId`] stays valid for the graph's life.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Group(Group {
                name: Some("Scene".to_string()),
                children: Vec::new(),
            })],
        }
    }

    pub fn root(&self) -> GroupId {
        GroupId(NodeId(0))
    }

    pub fn add_group(&mut self, parent: GroupId, name: Option<&str>) -> GroupId {
        let id = self.add(
            parent,
            Node::Group(Group {
                name: name.map(str::to_string),
                children: Vec::new(),
            }),
        );
        GroupId(id)
    }

    pub fn add(&mut self, parent: GroupId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(Node::Group(group)) = self.nodes.get_mut(parent.0 .0) {
            group.children.push(id);
        }
        id
    }

    pub fn add_part(&mut self, parent: GroupId, part: Part) -> NodeId {
        self.add(parent, Node::Part(part))
    }

    pub fn add_outline(&mut self, parent: GroupId, outline: Outline) -> NodeId {
        self.add(parent, Node::Outline(outline))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root group is always present
        false
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        match self.nodes.get(id.0 .0) {
            Some(Node::Group(group)) => Some(group),
            _ => None,
        }
    }

    pub fn part(&self, id: NodeId) -> Option<&Part> {
        match self.nodes.get(id.0) {
            Some(Node::Part(part)) => Some(part),
            _ => None,
        }
    }

    pub fn part_mut(&mut self, id: NodeId) -> Option<&mut Part> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Part(part)) => Some(part),
            _ => None,
        }
    }

    /// Depth-first, parents before children, starting at the root
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId(0)];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(Node::Group(group)) = self.nodes.get(id.0) {
                stack.extend(group.children.iter().rev());
            }
        }
        order
    }

    /// Parts eligible for picking: every part with a non-empty name, in
    /// traversal order
    pub fn pickable_parts(&self) -> impl Iterator<Item = (NodeId, &Part)> + '_ {
        self.traverse().into_iter().filter_map(move |id| match self.node(id) {
            Some(Node::Part(part)) if !part.name().is_empty() => Some((id, part)),
            _ => None,
        })
    }

    pub fn parts(&self) -> impl Iterator<Item = (NodeId, &Part)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Part(part) => Some((NodeId(i), part)),
            _ => None,
        })
    }

    pub fn outlines(&self) -> impl Iterator<Item = &Outline> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Outline(outline) => Some(outline),
            _ => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axes> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Axes(axes) => Some(axes),
            _ => None,
        })
    }
}
