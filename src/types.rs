//! Core data types for the polygon editor.
//!
//! This module defines the scene model: the ordered list of polygon nodes and the
//! undirected connections drawn between them. Nodes are identified by their index
//! in the scene, so removing a node renumbers every node after it and every
//! connection endpoint that referred to one of them.

use crate::constants;
use crate::geometry::Point;

/// Index of a node inside [`Scene::nodes`].
pub type NodeIndex = usize;

/// A regular polygon placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonNode {
    /// Center of the polygon in canvas pixels
    pub center: Point,
    /// Distance from the center to every vertex
    pub radius: u32,
    /// Number of sides (and vertices)
    pub sides: u32,
}

impl PolygonNode {
    /// Creates a new polygon node.
    pub fn new(center: Point, radius: u32, sides: u32) -> Self {
        Self {
            center,
            radius,
            sides,
        }
    }

    /// Approximate containment test used for picking: `point` hits the node when its
    /// Manhattan distance to the center does not exceed the radius.
    pub fn contains(&self, point: Point) -> bool {
        point.manhattan_distance(self.center) <= i64::from(self.radius)
    }
}

/// An undirected link between two nodes, stored in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Index of the node the user clicked first
    pub start: NodeIndex,
    /// Index of the node the user clicked second
    pub end: NodeIndex,
}

impl Connection {
    /// Creates a connection between `start` and `end`.
    pub fn new(start: NodeIndex, end: NodeIndex) -> Self {
        Self { start, end }
    }

    /// Whether this connection joins `a` and `b`, in either direction.
    pub fn joins(&self, a: NodeIndex, b: NodeIndex) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Whether either endpoint is `index`.
    pub fn touches(&self, index: NodeIndex) -> bool {
        self.start == index || self.end == index
    }
}

/// Result of [`Scene::add_connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The connection was appended
    Added,
    /// The two nodes were already connected; nothing changed
    AlreadyConnected,
    /// Both endpoints are the same node; nothing changed
    SelfLoop,
    /// An endpoint does not refer to an existing node; nothing changed
    OutOfRange,
}

/// A broken scene invariant, reported by [`Scene::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneViolation {
    /// A node has a zero radius
    ZeroRadius {
        /// Offending node
        node: NodeIndex,
    },
    /// A node has fewer than three sides
    TooFewSides {
        /// Offending node
        node: NodeIndex,
        /// Its side count
        sides: u32,
    },
    /// A node has more sides than the editor can create
    TooManySides {
        /// Offending node
        node: NodeIndex,
        /// Its side count
        sides: u32,
    },
    /// A node's radius exceeds [`constants::MAX_RADIUS`]
    RadiusTooLarge {
        /// Offending node
        node: NodeIndex,
        /// Its radius
        radius: u32,
    },
    /// A connection references a node that does not exist
    DanglingConnection {
        /// Position of the connection in the list
        connection: usize,
        /// The out-of-range endpoint
        endpoint: NodeIndex,
    },
    /// A connection starts and ends on the same node
    SelfConnection {
        /// Position of the connection in the list
        connection: usize,
    },
    /// A connection repeats an earlier one (in either direction)
    DuplicateConnection {
        /// Position of the repeated connection in the list
        connection: usize,
    },
}

impl std::fmt::Display for SceneViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroRadius { node } => write!(f, "node {node} has a zero radius"),
            Self::TooFewSides { node, sides } => {
                write!(f, "node {node} has {sides} sides (at least 3 required)")
            }
            Self::TooManySides { node, sides } => write!(
                f,
                "node {node} has {sides} sides (at most {} allowed)",
                constants::MAX_SIDES
            ),
            Self::RadiusTooLarge { node, radius } => write!(
                f,
                "node {node} has radius {radius} (at most {} allowed)",
                constants::MAX_RADIUS
            ),
            Self::DanglingConnection {
                connection,
                endpoint,
            } => write!(
                f,
                "connection {connection} references node {endpoint}, which does not exist"
            ),
            Self::SelfConnection { connection } => {
                write!(f, "connection {connection} connects a node to itself")
            }
            Self::DuplicateConnection { connection } => {
                write!(f, "connection {connection} duplicates an earlier connection")
            }
        }
    }
}

/// The full drawing: polygons in creation order plus their connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    /// Polygons, bottom-most first
    pub nodes: Vec<PolygonNode>,
    /// Connections, in insertion order
    pub connections: Vec<Connection>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scene has neither nodes nor connections.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    /// Appends a polygon and returns its index.
    pub fn add_node(&mut self, center: Point, radius: u32, sides: u32) -> NodeIndex {
        self.nodes.push(PolygonNode::new(center, radius, sides));
        self.nodes.len() - 1
    }

    /// Returns the first node (lowest index) whose hit region contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeIndex> {
        self.nodes.iter().position(|node| node.contains(point))
    }

    /// Removes the node at `index` together with every connection touching it.
    ///
    /// Remaining connection endpoints above `index` are shifted down by one so they
    /// keep pointing at the same polygons. Returns the removed node, or `None` if
    /// `index` is out of range.
    pub fn remove_node(&mut self, index: NodeIndex) -> Option<PolygonNode> {
        if index >= self.nodes.len() {
            return None;
        }
        let removed = self.nodes.remove(index);

        self.connections.retain(|conn| !conn.touches(index));
        let shift = |i: NodeIndex| if i > index { i - 1 } else { i };
        for conn in &mut self.connections {
            conn.start = shift(conn.start);
            conn.end = shift(conn.end);
        }

        Some(removed)
    }

    /// Moves the node at `index` so its center is `new_center`. Radius and side count
    /// are left alone. Returns `false` if `index` is out of range.
    pub fn move_node(&mut self, index: NodeIndex, new_center: Point) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.center = new_center;
                true
            }
            None => false,
        }
    }

    /// Connects nodes `a` and `b` unless that would break a scene invariant.
    pub fn add_connection(&mut self, a: NodeIndex, b: NodeIndex) -> ConnectOutcome {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return ConnectOutcome::OutOfRange;
        }
        if a == b {
            return ConnectOutcome::SelfLoop;
        }
        if self.connections.iter().any(|conn| conn.joins(a, b)) {
            return ConnectOutcome::AlreadyConnected;
        }
        self.connections.push(Connection::new(a, b));
        ConnectOutcome::Added
    }

    /// Removes every node and connection.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    /// Checks every scene invariant and reports the first violation found.
    pub fn validate(&self) -> Result<(), SceneViolation> {
        for (node, n) in self.nodes.iter().enumerate() {
            if n.radius == 0 {
                return Err(SceneViolation::ZeroRadius { node });
            }
            if n.radius > constants::MAX_RADIUS {
                return Err(SceneViolation::RadiusTooLarge {
                    node,
                    radius: n.radius,
                });
            }
            if n.sides < constants::MIN_SIDES {
                return Err(SceneViolation::TooFewSides {
                    node,
                    sides: n.sides,
                });
            }
            if n.sides > constants::MAX_SIDES {
                return Err(SceneViolation::TooManySides {
                    node,
                    sides: n.sides,
                });
            }
        }

        for (connection, conn) in self.connections.iter().enumerate() {
            for endpoint in [conn.start, conn.end] {
                if endpoint >= self.nodes.len() {
                    return Err(SceneViolation::DanglingConnection {
                        connection,
                        endpoint,
                    });
                }
            }
            if conn.start == conn.end {
                return Err(SceneViolation::SelfConnection { connection });
            }
            if self.connections[..connection]
                .iter()
                .any(|earlier| earlier.joins(conn.start, conn.end))
            {
                return Err(SceneViolation::DuplicateConnection { connection });
            }
        }

        Ok(())
    }

    /// One-line summary of every node, used for diagnostics.
    pub fn describe_nodes(&self) -> String {
        let items: Vec<String> = self
            .nodes
            .iter()
            .map(|n| {
                format!(
                    "(center: ({}, {}), radius: {}, sides: {})",
                    n.center.x, n.center.y, n.radius, n.sides
                )
            })
            .collect();
        format!("[{}]", items.join(", "))
    }

    /// One-line summary of every connection, used for diagnostics.
    pub fn describe_connections(&self) -> String {
        let items: Vec<String> = self
            .connections
            .iter()
            .map(|c| format!("({}, {})", c.start, c.end))
            .collect();
        format!("[{}]", items.join(", "))
    }
}
