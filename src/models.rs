//! Domain models for the tactical console.
//!
//! Graph nodes are a tagged sum over [`NodeKind`] so the map renderer and the
//! view-mode transition logic can match exhaustively; adding a kind is a
//! compile-checked change everywhere it is handled.

use std::fmt;

/// Engagement type of a case, drives which map layouts apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngagementKind {
    /// Standard construction claim
    #[default]
    Claim,
    /// Formal arbitration proceedings
    Arbitration,
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementKind::Claim => write!(f, "Claim"),
            EngagementKind::Arbitration => write!(f, "Arbitration"),
        }
    }
}

/// Specialism of an expert witness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpertRole {
    Oversight,
    Quantum,
    Delay,
    Forensic,
    Legal,
}

impl ExpertRole {
    /// All roles, in registry display order
    pub fn all() -> &'static [ExpertRole] {
        &[
            ExpertRole::Oversight,
            ExpertRole::Quantum,
            ExpertRole::Delay,
            ExpertRole::Forensic,
            ExpertRole::Legal,
        ]
    }

    /// Registry section heading for the role
    pub fn registry_title(&self) -> &'static str {
        match self {
            ExpertRole::Oversight => "Oversight Managers",
            ExpertRole::Quantum => "Quantum Experts",
            ExpertRole::Delay => "Delay Analysts",
            ExpertRole::Forensic => "Forensic Specialists",
            ExpertRole::Legal => "Legal Counsel",
        }
    }
}

impl fmt::Display for ExpertRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpertRole::Oversight => write!(f, "Oversight"),
            ExpertRole::Quantum => write!(f, "Quantum"),
            ExpertRole::Delay => write!(f, "Delay"),
            ExpertRole::Forensic => write!(f, "Forensic"),
            ExpertRole::Legal => write!(f, "Legal"),
        }
    }
}

/// Kind of a map node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Central hub of a map; clicking it in strategy view drills into anatomy
    Root,
    /// Workstream / work-package node
    Category,
    /// Leaf work item
    Item,
    /// Flagged leaf item (risks)
    Warning,
    /// Expert witness on the board
    Expert,
    /// Project node on the company overview
    Project,
}

/// Expert record embedded inside an anatomy category node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedExpert {
    pub name: String,
    /// Free-text role title ("Cost Lead", "Quantum Expert", ...)
    pub role: String,
    /// Monogram shown in the terminal in place of a portrait
    pub monogram: String,
}

impl AssignedExpert {
    pub fn new(name: &str, role: &str, monogram: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            monogram: monogram.to_string(),
        }
    }
}

/// A node on the relationship map.
///
/// Coordinates are in map units on a nominal 1200x900 board; the renderer
/// applies the view transform and scales into terminal cells.
#[derive(Debug, Clone)]
pub struct MapNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    /// Specialism tag, experts only
    pub role: Option<ExpertRole>,
    pub description: Option<String>,
    /// Monogram for expert portraits
    pub monogram: Option<String>,
    /// Strategy view: category this expert is informally attached to.
    /// Visual grouping only, never part of the tree structure.
    pub allocated_to: Option<String>,
    /// Anatomy view: parent node for the collapsible tree
    pub parent_id: Option<String>,
    /// Anatomy view: expert embedded in this category
    pub assigned_expert: Option<AssignedExpert>,
}

impl MapNode {
    pub fn new(id: &str, label: &str, kind: NodeKind, x: f64, y: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            x,
            y,
            role: None,
            description: None,
            monogram: None,
            allocated_to: None,
            parent_id: None,
            assigned_expert: None,
        }
    }

    pub fn role(mut self, role: ExpertRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn monogram(mut self, mark: &str) -> Self {
        self.monogram = Some(mark.to_string());
        self
    }

    pub fn allocated_to(mut self, category_id: &str) -> Self {
        self.allocated_to = Some(category_id.to_string());
        self
    }

    pub fn child_of(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn assigned(mut self, expert: AssignedExpert) -> Self {
        self.assigned_expert = Some(expert);
        self
    }

    pub fn is_expert(&self) -> bool {
        self.kind == NodeKind::Expert
    }
}

/// An undirected drawn edge between two nodes. Endpoints that do not resolve
/// to a node in the snapshot are skipped at render time, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

impl Connection {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Whether this edge touches the given node
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// Immutable graph template returned by the data provider. The live map state
/// works on a mutable copy and reloads a fresh snapshot on every project or
/// view-mode switch.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    pub label: String,
    pub subtitle: Option<String>,
    pub nodes: Vec<MapNode>,
    pub connections: Vec<Connection>,
}

impl GraphSnapshot {
    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut MapNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MapNode> {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_deref() == Some(id))
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| n.parent_id.as_deref() == Some(id))
    }

    pub fn experts(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.iter().filter(|n| n.is_expert())
    }

    /// Whether two nodes share at least one drawn edge
    pub fn connected(&self, a: &str, b: &str) -> bool {
        self.connections
            .iter()
            .any(|c| (c.from == a && c.to == b) || (c.from == b && c.to == a))
    }
}

/// Lifecycle status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "Active"),
            ProjectStatus::OnHold => write!(f, "On Hold"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// An engagement on the consultancy's books
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub status: ProjectStatus,
    pub engagement: EngagementKind,
    /// Percent complete, 0-100
    pub progress: u16,
    pub expertise: &'static [&'static str],
}

/// A consultant available on the bench
#[derive(Debug, Clone)]
pub struct ExpertProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub role: ExpertRole,
    pub monogram: &'static str,
    /// Internal aptitude score shown in the registry
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_tree() -> GraphSnapshot {
        GraphSnapshot {
            label: "test".to_string(),
            subtitle: None,
            nodes: vec![
                MapNode::new("a", "A", NodeKind::Category, 0.0, 0.0),
                MapNode::new("b", "B", NodeKind::Item, 0.0, 0.0).child_of("a"),
                MapNode::new("c", "C", NodeKind::Item, 0.0, 0.0).child_of("a"),
            ],
            connections: vec![Connection::new("a", "b")],
        }
    }

    #[test]
    fn children_lookup() {
        let snap = snapshot_with_tree();
        assert!(snap.has_children("a"));
        assert!(!snap.has_children("b"));
        assert_eq!(snap.children_of("a").count(), 2);
    }

    #[test]
    fn connection_queries() {
        let snap = snapshot_with_tree();
        assert!(snap.connected("a", "b"));
        assert!(snap.connected("b", "a"));
        assert!(!snap.connected("a", "c"));
        assert!(snap.connections[0].touches("a"));
        assert!(!snap.connections[0].touches("c"));
    }

    #[test]
    fn node_builder_carries_tags() {
        let node = MapNode::new("e1", "Jane Doe", NodeKind::Expert, 10.0, 20.0)
            .role(ExpertRole::Quantum)
            .allocated_to("cat_finance")
            .monogram("JD");
        assert!(node.is_expert());
        assert_eq!(node.role, Some(ExpertRole::Quantum));
        assert_eq!(node.allocated_to.as_deref(), Some("cat_finance"));
    }

    #[test]
    fn role_display_matches_registry() {
        assert_eq!(ExpertRole::Quantum.to_string(), "Quantum");
        assert_eq!(ExpertRole::all().len(), 5);
    }
}
