//! Relationship map state: pan/zoom transform, drag tracking, collapsible
//! branch visibility and the strategy/anatomy view-mode transitions.
//!
//! All coordinates below are map units on the nominal board (the data layer
//! places nodes on a ~1200x900 grid). The renderer owns the conversion from
//! terminal cells to these units, so every operation here is pure state math
//! and unit-testable without a terminal.

use std::collections::HashSet;

use uuid::Uuid;

use crate::data::{self, ids};
use crate::models::{
    AssignedExpert, EngagementKind, ExpertProfile, ExpertRole, GraphSnapshot, MapNode, NodeKind,
};

/// Zoom bounds and step for the +/- controls
pub const ZOOM_MIN: f64 = 0.4;
pub const ZOOM_MAX: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.1;
/// Scale applied when centering on a single node
pub const FOCUS_SCALE: f64 = 1.4;
/// Resting scale for a freshly opened board
pub const DEFAULT_SCALE: f64 = 0.8;
/// Pointer travel (map units, either axis) beyond which a press is a drag,
/// not a click
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Nominal board center used for the default centered transform
const BOARD_CENTER: (f64, f64) = (600.0, 450.0);

/// Pan offset and zoom factor applied to the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            k: DEFAULT_SCALE,
        }
    }
}

impl Transform {
    /// Map units -> screen units
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.k + self.x, y * self.k + self.y)
    }

    /// Screen units -> map units
    pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.x) / self.k, (sy - self.y) / self.k)
    }

    /// Transform that puts the board center in the middle of the canvas at
    /// the resting scale
    fn centered(canvas: (f64, f64)) -> Self {
        Self {
            x: canvas.0 / 2.0 - BOARD_CENTER.0 * DEFAULT_SCALE,
            y: canvas.1 / 2.0 - BOARD_CENTER.1 * DEFAULT_SCALE,
            k: DEFAULT_SCALE,
        }
    }
}

/// Drag-in-progress bookkeeping. `moved` survives `end_drag` so the click
/// handler that fires on release can tell a drag from a click; it resets on
/// the next press.
#[derive(Debug, Clone, Copy, Default)]
struct DragState {
    active: bool,
    moved: bool,
    start: (f64, f64),
    origin: (f64, f64),
}

/// Which board of a project is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Flat strategy board: workstreams plus loosely-linked experts
    #[default]
    Strategy,
    /// Hierarchical anatomy board with collapsible branches
    Detail,
}

/// Where the node sidebar should dock, away from the clicked node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarSide {
    Left,
    #[default]
    Right,
}

/// What the map is showing: the whole company, or one engagement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapContext {
    Company,
    Project {
        id: String,
        engagement: EngagementKind,
    },
}

/// Result of a node click, for the shell to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Node selected, sidebar opens
    Selected,
    /// Root clicked on a strategy board: drilled into anatomy
    EnteredAnatomy,
    /// Category/assigned node clicked in anatomy: canvas centered on it
    Focused,
    /// Project node clicked on the company overview
    EnteredProject(&'static str),
    /// Expert clicked on a strategy board: reveal the bench at this role
    OpenedRegistry(ExpertRole),
    /// Click did not resolve to anything actionable
    Ignored,
}

/// Result of the back control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Was focused in anatomy: only the focus was cleared
    FocusCleared,
    /// Anatomy closed, strategy board reloaded
    ReturnedToStrategy,
    /// Already on strategy: leaving the project is the shell's call
    ExitProject,
}

/// Remembered slot of the last recalled expert, so a replacement from the
/// bench lands where its predecessor stood
#[derive(Debug, Clone)]
struct RecalledSlot {
    x: f64,
    y: f64,
    allocated_to: Option<String>,
}

/// Live state of the relationship map
#[derive(Debug, Clone)]
pub struct MapState {
    pub context: MapContext,
    pub view_mode: ViewMode,
    pub snapshot: GraphSnapshot,
    pub transform: Transform,
    pub selected: Option<String>,
    pub focused: Option<String>,
    pub expanded: HashSet<String>,
    pub sidebar_side: SidebarSide,
    drag: DragState,
    last_recalled: Option<RecalledSlot>,
}

impl MapState {
    /// Company-wide overview board
    pub fn company() -> Self {
        Self {
            context: MapContext::Company,
            view_mode: ViewMode::Strategy,
            snapshot: data::company_overview_snapshot(),
            transform: Transform::default(),
            selected: None,
            focused: None,
            expanded: HashSet::new(),
            sidebar_side: SidebarSide::default(),
            drag: DragState::default(),
            last_recalled: None,
        }
    }

    /// Fresh strategy board for one engagement
    pub fn project(project_id: &str, engagement: EngagementKind) -> Self {
        Self {
            context: MapContext::Project {
                id: project_id.to_string(),
                engagement,
            },
            view_mode: ViewMode::Strategy,
            snapshot: data::strategy_snapshot(project_id, engagement),
            transform: Transform::default(),
            selected: None,
            focused: None,
            expanded: HashSet::new(),
            sidebar_side: SidebarSide::default(),
            drag: DragState::default(),
            last_recalled: None,
        }
    }

    fn engagement(&self) -> EngagementKind {
        match &self.context {
            MapContext::Company => EngagementKind::Claim,
            MapContext::Project { engagement, .. } => *engagement,
        }
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        self.selected.as_deref().and_then(|id| self.snapshot.node(id))
    }

    // ============================================
    // Transform engine
    // ============================================

    pub fn begin_drag(&mut self, sx: f64, sy: f64) {
        self.drag = DragState {
            active: true,
            moved: false,
            start: (sx, sy),
            origin: (self.transform.x, self.transform.y),
        };
    }

    pub fn drag_to(&mut self, sx: f64, sy: f64) {
        if !self.drag.active {
            return;
        }
        let dx = sx - self.drag.start.0;
        let dy = sy - self.drag.start.1;
        if dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD {
            self.drag.moved = true;
        }
        self.transform.x = self.drag.origin.0 + dx;
        self.transform.y = self.drag.origin.1 + dy;
    }

    /// Ends the drag. Also called when the pointer leaves the canvas, so the
    /// dragging flag can never wedge on.
    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Whether the last press travelled past the click threshold
    pub fn drag_moved(&self) -> bool {
        self.drag.moved
    }

    pub fn zoom_in(&mut self) {
        self.transform.k = (self.transform.k + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.transform.k = (self.transform.k - ZOOM_STEP).max(ZOOM_MIN);
    }

    /// Center the canvas on a node at the focus scale and dim everything not
    /// connected to it
    pub fn focus_on(&mut self, node_id: &str, canvas: (f64, f64)) -> bool {
        let Some((x, y)) = self.snapshot.node(node_id).map(|n| (n.x, n.y)) else {
            return false;
        };
        self.transform = Transform {
            x: canvas.0 / 2.0 - x * FOCUS_SCALE,
            y: canvas.1 / 2.0 - y * FOCUS_SCALE,
            k: FOCUS_SCALE,
        };
        self.focused = Some(node_id.to_string());
        self.selected = Some(node_id.to_string());
        true
    }

    pub fn reset_focus(&mut self, canvas: (f64, f64)) {
        self.focused = None;
        self.transform = Transform::centered(canvas);
    }

    /// A click on empty canvas. Ignored outright if the press travelled (it
    /// was a pan); otherwise clears focus first, then selection.
    pub fn background_click(&mut self, canvas: (f64, f64)) {
        if self.drag.moved {
            return;
        }
        if self.view_mode == ViewMode::Detail && self.focused.is_some() {
            self.reset_focus(canvas);
        }
        self.selected = None;
    }

    /// Whether a node sits outside the focused cluster
    pub fn is_dimmed(&self, node: &MapNode) -> bool {
        match self.focused.as_deref() {
            Some(focused) => node.id != focused && !self.snapshot.connected(focused, &node.id),
            None => false,
        }
    }

    // ============================================
    // Hit testing
    // ============================================

    /// Half-extents of a node's clickable box in map units
    fn hit_extent(kind: NodeKind) -> (f64, f64) {
        match kind {
            NodeKind::Root => (110.0, 45.0),
            NodeKind::Category | NodeKind::Project => (110.0, 40.0),
            NodeKind::Item | NodeKind::Warning => (80.0, 30.0),
            NodeKind::Expert => (60.0, 60.0),
        }
    }

    /// Topmost visible node under a screen-space point
    pub fn node_at(&self, sx: f64, sy: f64) -> Option<&MapNode> {
        let (mx, my) = self.transform.invert(sx, sy);
        self.snapshot
            .nodes
            .iter()
            .filter(|n| self.is_visible(n))
            .filter(|n| {
                let (hw, hh) = Self::hit_extent(n.kind);
                (n.x - mx).abs() <= hw && (n.y - my).abs() <= hh
            })
            .last()
    }

    // ============================================
    // Expansion / visibility
    // ============================================

    pub fn toggle_expansion(&mut self, node_id: &str) {
        if !self.expanded.remove(node_id) {
            self.expanded.insert(node_id.to_string());
        }
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.expanded.contains(node_id)
    }

    /// A node with no parent is always visible; otherwise its parent must be
    /// expanded and itself visible. Only anatomy boards collapse.
    pub fn is_visible<'a>(&'a self, node: &'a MapNode) -> bool {
        if self.view_mode == ViewMode::Strategy {
            return true;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        self.visible_walk(node, &mut seen)
    }

    fn visible_walk<'a>(&'a self, node: &'a MapNode, seen: &mut HashSet<&'a str>) -> bool {
        let Some(parent_id) = node.parent_id.as_deref() else {
            return true;
        };
        if !seen.insert(&node.id) {
            // Malformed parent cycle: fail safe to hidden instead of looping
            return false;
        }
        let Some(parent) = self.snapshot.node(parent_id) else {
            // Dangling parent reference: treat the node as top-level
            return true;
        };
        self.expanded.contains(parent_id) && self.visible_walk(parent, seen)
    }

    // ============================================
    // Clicks and navigation
    // ============================================

    pub fn node_click(&mut self, node_id: &str, canvas: (f64, f64)) -> ClickOutcome {
        let Some(node) = self.snapshot.node(node_id) else {
            return ClickOutcome::Ignored;
        };
        let kind = node.kind;
        let role = node.role;
        let node_x = node.x;
        let has_assignment = node.assigned_expert.is_some();
        self.sidebar_side = if node_x >= BOARD_CENTER.0 {
            SidebarSide::Left
        } else {
            SidebarSide::Right
        };

        let in_company = matches!(self.context, MapContext::Company);
        match (in_company, kind, self.view_mode) {
            (true, NodeKind::Project, _) => {
                match data::overview_project_id(node_id) {
                    Some(pid) => ClickOutcome::EnteredProject(pid),
                    None => {
                        self.selected = Some(node_id.to_string());
                        ClickOutcome::Selected
                    }
                }
            }
            (false, NodeKind::Root, ViewMode::Strategy) => {
                self.switch_to_detail(canvas);
                ClickOutcome::EnteredAnatomy
            }
            (false, NodeKind::Expert, ViewMode::Strategy) => {
                self.selected = Some(node_id.to_string());
                match role {
                    Some(role) => ClickOutcome::OpenedRegistry(role),
                    None => ClickOutcome::Selected,
                }
            }
            (_, NodeKind::Category, ViewMode::Detail) => {
                self.focus_on(node_id, canvas);
                ClickOutcome::Focused
            }
            (_, _, ViewMode::Detail) if has_assignment => {
                self.focus_on(node_id, canvas);
                ClickOutcome::Focused
            }
            _ => {
                self.selected = Some(node_id.to_string());
                ClickOutcome::Selected
            }
        }
    }

    pub fn back(&mut self, canvas: (f64, f64)) -> BackOutcome {
        match self.view_mode {
            ViewMode::Detail if self.focused.is_some() => {
                self.reset_focus(canvas);
                BackOutcome::FocusCleared
            }
            ViewMode::Detail => {
                self.switch_to_strategy();
                BackOutcome::ReturnedToStrategy
            }
            ViewMode::Strategy => BackOutcome::ExitProject,
        }
    }

    // ============================================
    // View-mode transitions
    // ============================================

    /// Anatomy categories and which captured roles they absorb, per
    /// engagement type. The first fielded expert matching any listed role
    /// takes the slot.
    fn assignment_targets(
        engagement: EngagementKind,
    ) -> &'static [(&'static str, &'static [ExpertRole])] {
        match engagement {
            EngagementKind::Arbitration => &[
                (ids::D_PLEAD, &[ExpertRole::Oversight, ExpertRole::Forensic]),
                (ids::D_EXPERT, &[ExpertRole::Quantum]),
                (ids::D_EVIDENCE, &[ExpertRole::Delay]),
                (ids::D_DISCLOSURE, &[ExpertRole::Legal]),
            ],
            EngagementKind::Claim => &[
                (ids::D_COST, &[ExpertRole::Quantum]),
                (ids::D_SCHED, &[ExpertRole::Delay]),
                (ids::D_RISK, &[ExpertRole::Forensic]),
            ],
        }
    }

    /// Where each anatomy assignment re-materializes on the strategy board:
    /// (anatomy category, role tag, x, y, strategy workstream)
    fn return_slots(
        engagement: EngagementKind,
    ) -> &'static [(&'static str, ExpertRole, f64, f64, &'static str)] {
        match engagement {
            EngagementKind::Arbitration => &[
                (ids::D_PLEAD, ExpertRole::Oversight, 600.0, 800.0, ids::CAT_PLEADINGS),
                (ids::D_EXPERT, ExpertRole::Quantum, 350.0, 600.0, ids::CAT_QUANTUM),
                (ids::D_EVIDENCE, ExpertRole::Delay, 850.0, 600.0, ids::CAT_EVIDENCE),
            ],
            EngagementKind::Claim => &[
                (ids::D_COST, ExpertRole::Quantum, 350.0, 600.0, ids::CAT_FINANCE),
                (ids::D_SCHED, ExpertRole::Delay, 850.0, 600.0, ids::CAT_EVENTS),
                (ids::D_RISK, ExpertRole::Forensic, 450.0, 250.0, ids::CAT_CONTRACT),
            ],
        }
    }

    /// Strategy -> anatomy. Experts currently fielded on the strategy board
    /// are carried in as embedded assignments on their matching categories;
    /// categories with no matching expert keep the template roster.
    pub fn switch_to_detail(&mut self, canvas: (f64, f64)) {
        let MapContext::Project { id, engagement } = &self.context else {
            return;
        };
        if self.view_mode != ViewMode::Strategy {
            return;
        }
        let (project_id, engagement) = (id.clone(), *engagement);

        let fielded: Vec<(ExpertRole, String, String)> = self
            .snapshot
            .experts()
            .filter_map(|n| {
                n.role.map(|role| {
                    (
                        role,
                        n.label.clone(),
                        n.monogram.clone().unwrap_or_default(),
                    )
                })
            })
            .collect();

        let mut fresh = data::detail_snapshot(&project_id, engagement);
        for (target, roles) in Self::assignment_targets(engagement) {
            let matched = fielded.iter().find(|(role, _, _)| roles.contains(role));
            if let Some((role, name, monogram)) = matched {
                if let Some(node) = fresh.node_mut(target) {
                    node.assigned_expert =
                        Some(AssignedExpert::new(name, &role.to_string(), monogram));
                }
            }
        }

        self.snapshot = fresh;
        self.expanded.clear();
        self.view_mode = ViewMode::Detail;
        self.selected = None;
        self.focused = None;
        self.transform = Transform::centered(canvas);
    }

    /// Anatomy -> strategy. The return roster is assembled from the current
    /// assignments, but the strategy board still reopens with its default
    /// lineup: anatomy reassignments do not survive the trip back. Known
    /// quirk, kept until product says otherwise (see DESIGN.md).
    pub fn switch_to_strategy(&mut self) {
        let MapContext::Project { id, engagement } = &self.context else {
            return;
        };
        if self.view_mode != ViewMode::Detail {
            return;
        }
        let (project_id, engagement) = (id.clone(), *engagement);

        let _returning = self.carry_over_experts();

        self.snapshot = data::strategy_snapshot(&project_id, engagement);
        self.expanded.clear();
        self.view_mode = ViewMode::Strategy;
        self.selected = None;
        self.focused = None;
        self.transform = Transform::default();
    }

    /// Expert nodes synthesized from the anatomy assignments, positioned at
    /// their predetermined strategy slots
    pub fn carry_over_experts(&self) -> Vec<MapNode> {
        let mut carried = Vec::new();
        for (detail_id, role, x, y, workstream) in Self::return_slots(self.engagement()) {
            let Some(node) = self.snapshot.node(detail_id) else {
                continue;
            };
            if let Some(expert) = &node.assigned_expert {
                carried.push(
                    MapNode::new(
                        &format!("exp_{}", Uuid::new_v4().simple()),
                        &expert.name,
                        NodeKind::Expert,
                        *x,
                        *y,
                    )
                    .role(*role)
                    .monogram(&expert.monogram)
                    .allocated_to(workstream)
                    .describe(&format!("Senior {}", expert.role)),
                );
            }
        }
        carried
    }

    // ============================================
    // Bench allocation (strategy board only)
    // ============================================

    /// Default landing slot for a bench role: (x, y, workstream)
    fn bench_slot(
        engagement: EngagementKind,
        role: ExpertRole,
    ) -> Option<(f64, f64, &'static str)> {
        match engagement {
            EngagementKind::Arbitration => match role {
                ExpertRole::Quantum => Some((350.0, 600.0, ids::CAT_QUANTUM)),
                ExpertRole::Delay => Some((850.0, 600.0, ids::CAT_EVIDENCE)),
                ExpertRole::Oversight => Some((600.0, 800.0, ids::CAT_PLEADINGS)),
                ExpertRole::Legal => Some((400.0, 150.0, ids::CAT_PLEADINGS)),
                ExpertRole::Forensic => None,
            },
            EngagementKind::Claim => match role {
                ExpertRole::Quantum => Some((350.0, 600.0, ids::CAT_FINANCE)),
                ExpertRole::Delay => Some((850.0, 600.0, ids::CAT_EVENTS)),
                ExpertRole::Forensic => Some((450.0, 250.0, ids::CAT_CONTRACT)),
                _ => None,
            },
        }
    }

    /// Whether a bench member is already fielded, by name
    pub fn board_has(&self, name: &str) -> bool {
        self.snapshot.nodes.iter().any(|n| n.label == name)
    }

    /// Field a bench expert on the strategy board. An expert of the same role
    /// already on the board is swapped out and the newcomer inherits its
    /// slot; otherwise the last-recalled slot, then the role's default slot,
    /// then the board center. Returns the new node id.
    pub fn add_expert(&mut self, profile: &ExpertProfile) -> Option<String> {
        if self.view_mode != ViewMode::Strategy
            || !matches!(self.context, MapContext::Project { .. })
        {
            return None;
        }

        let mut slot = match self.last_recalled.take() {
            Some(recalled) => (recalled.x, recalled.y, recalled.allocated_to),
            None => match Self::bench_slot(self.engagement(), profile.role) {
                Some((x, y, cat)) => (x, y, Some(cat.to_string())),
                None => (BOARD_CENTER.0, BOARD_CENTER.1, None),
            },
        };

        if let Some(pos) = self
            .snapshot
            .nodes
            .iter()
            .position(|n| n.is_expert() && n.role == Some(profile.role))
        {
            let outgoing = self.snapshot.nodes.remove(pos);
            slot = (outgoing.x, outgoing.y, outgoing.allocated_to);
        }

        let id = format!("{}_{}", profile.id, Uuid::new_v4().simple());
        let mut node = MapNode::new(&id, profile.name, NodeKind::Expert, slot.0, slot.1)
            .role(profile.role)
            .monogram(profile.monogram)
            .describe(&format!("Senior {} Expert. Fielded from the bench.", profile.role));
        node.allocated_to = slot.2;
        self.snapshot.nodes.push(node);
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Recall a fielded expert to the bench, remembering its slot for the
    /// next allocation
    pub fn recall_expert(&mut self, node_id: &str) -> bool {
        let Some(pos) = self
            .snapshot
            .nodes
            .iter()
            .position(|n| n.id == node_id && n.is_expert())
        else {
            return false;
        };
        let outgoing = self.snapshot.nodes.remove(pos);
        self.last_recalled = Some(RecalledSlot {
            x: outgoing.x,
            y: outgoing.y,
            allocated_to: outgoing.allocated_to,
        });
        self.selected = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Connection;

    const CANVAS: (f64, f64) = (1000.0, 800.0);

    fn claim_map() -> MapState {
        MapState::project("p1", EngagementKind::Claim)
    }

    fn anatomy_map() -> MapState {
        let mut map = claim_map();
        map.switch_to_detail(CANVAS);
        map
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn parentless_nodes_always_visible() {
        let map = anatomy_map();
        let root = map.snapshot.node(ids::ROOT_DETAIL).unwrap();
        let category = map.snapshot.node(ids::D_COST).unwrap();
        assert!(map.is_visible(root));
        assert!(map.is_visible(category));
    }

    #[test]
    fn visibility_is_inductive_over_three_levels() {
        // d_cost -> l_c1 -> l_c3 -> l_c5
        let mut map = anatomy_map();
        let l_c5 = |map: &MapState| map.snapshot.node("l_c5").unwrap().clone();

        assert!(!map.is_visible(&l_c5(&map)));
        map.toggle_expansion(ids::D_COST);
        assert!(!map.is_visible(&l_c5(&map)));
        map.toggle_expansion("l_c1");
        assert!(!map.is_visible(&l_c5(&map)));
        map.toggle_expansion("l_c3");
        assert!(map.is_visible(&l_c5(&map)));

        // Collapsing an ancestor hides the whole branch again
        map.toggle_expansion(ids::D_COST);
        assert!(!map.is_visible(&l_c5(&map)));
    }

    #[test]
    fn parent_cycle_fails_safe_to_hidden() {
        let mut map = anatomy_map();
        map.snapshot.nodes.push(
            MapNode::new("cyc_a", "A", NodeKind::Item, 0.0, 0.0).child_of("cyc_b"),
        );
        map.snapshot.nodes.push(
            MapNode::new("cyc_b", "B", NodeKind::Item, 0.0, 0.0).child_of("cyc_a"),
        );
        map.toggle_expansion("cyc_a");
        map.toggle_expansion("cyc_b");
        let a = map.snapshot.node("cyc_a").unwrap().clone();
        assert!(!map.is_visible(&a));
    }

    #[test]
    fn dangling_parent_is_treated_as_top_level() {
        let mut map = anatomy_map();
        map.snapshot
            .nodes
            .push(MapNode::new("orphan", "Orphan", NodeKind::Item, 0.0, 0.0).child_of("gone"));
        let orphan = map.snapshot.node("orphan").unwrap().clone();
        assert!(map.is_visible(&orphan));
    }

    #[test]
    fn strategy_board_ignores_expansion() {
        let map = claim_map();
        for node in &map.snapshot.nodes {
            assert!(map.is_visible(node));
        }
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut map = claim_map();
        for _ in 0..30 {
            map.zoom_in();
        }
        approx(map.transform.k, ZOOM_MAX);
        for _ in 0..40 {
            map.zoom_out();
        }
        approx(map.transform.k, ZOOM_MIN);
    }

    #[test]
    fn focus_centers_node_at_focus_scale() {
        let mut map = anatomy_map();
        assert!(map.focus_on(ids::D_COST, CANVAS));
        // d_cost sits at (900, 300)
        approx(map.transform.x, 500.0 - 900.0 * FOCUS_SCALE);
        approx(map.transform.y, 400.0 - 300.0 * FOCUS_SCALE);
        approx(map.transform.k, FOCUS_SCALE);
        assert_eq!(map.focused.as_deref(), Some(ids::D_COST));
        assert_eq!(map.selected.as_deref(), Some(ids::D_COST));
    }

    #[test]
    fn reset_focus_returns_to_default_offset() {
        let mut map = anatomy_map();
        map.focus_on(ids::D_COST, CANVAS);
        map.reset_focus(CANVAS);
        assert!(map.focused.is_none());
        approx(map.transform.x, 500.0 - 600.0 * DEFAULT_SCALE);
        approx(map.transform.y, 400.0 - 450.0 * DEFAULT_SCALE);
        approx(map.transform.k, DEFAULT_SCALE);
    }

    #[test]
    fn focused_cluster_dims_unconnected_nodes() {
        let mut map = anatomy_map();
        map.focus_on(ids::D_COST, CANVAS);
        let connected = map.snapshot.node("l_c1").unwrap();
        let unconnected = map.snapshot.node(ids::D_RISK).unwrap();
        let itself = map.snapshot.node(ids::D_COST).unwrap();
        assert!(!map.is_dimmed(itself));
        assert!(!map.is_dimmed(connected));
        assert!(map.is_dimmed(unconnected));
    }

    #[test]
    fn drag_beyond_threshold_suppresses_background_click() {
        let mut map = claim_map();
        map.node_click("expert_alan", CANVAS);
        assert!(map.selected.is_some());

        map.begin_drag(100.0, 100.0);
        map.drag_to(110.0, 130.0);
        map.end_drag();
        map.background_click(CANVAS);
        assert!(map.selected.is_some(), "pan must not deselect");
    }

    #[test]
    fn small_jitter_still_counts_as_click() {
        let mut map = claim_map();
        map.node_click("expert_alan", CANVAS);

        // 3 units in either axis is within the click threshold
        map.begin_drag(100.0, 100.0);
        map.drag_to(102.0, 103.0);
        map.end_drag();
        map.background_click(CANVAS);
        assert!(map.selected.is_none());
    }

    #[test]
    fn clean_background_click_clears_selection_and_focus() {
        let mut map = anatomy_map();
        map.focus_on(ids::D_COST, CANVAS);
        map.background_click(CANVAS);
        assert!(map.selected.is_none());
        assert!(map.focused.is_none());
    }

    #[test]
    fn release_outside_canvas_still_ends_drag() {
        let mut map = claim_map();
        map.begin_drag(10.0, 10.0);
        assert!(map.is_dragging());
        map.end_drag();
        assert!(!map.is_dragging());
    }

    #[test]
    fn drag_pans_relative_to_drag_origin() {
        let mut map = claim_map();
        map.begin_drag(100.0, 100.0);
        map.drag_to(160.0, 80.0);
        approx(map.transform.x, 60.0);
        approx(map.transform.y, -20.0);
        map.drag_to(130.0, 100.0);
        approx(map.transform.x, 30.0);
        approx(map.transform.y, 0.0);
    }

    #[test]
    fn root_click_enters_anatomy() {
        let mut map = claim_map();
        let outcome = map.node_click(ids::ROOT, CANVAS);
        assert_eq!(outcome, ClickOutcome::EnteredAnatomy);
        assert_eq!(map.view_mode, ViewMode::Detail);
        assert!(map.selected.is_none());
        assert!(map.expanded.is_empty());
    }

    #[test]
    fn anatomy_inherits_fielded_quantum_expert() {
        let map = anatomy_map();
        let cost = map.snapshot.node(ids::D_COST).unwrap();
        let assigned = cost.assigned_expert.as_ref().unwrap();
        assert_eq!(assigned.role, "Quantum");
        assert_eq!(assigned.name, "Alan Clarke");
        // No expert ever maps onto logistics: template stays bare
        assert!(map.snapshot.node(ids::D_LOG).unwrap().assigned_expert.is_none());
    }

    #[test]
    fn category_without_matching_role_keeps_template_roster() {
        let mut map = claim_map();
        // Pull the forensic-mapped slot empty by fielding no forensic expert:
        // the default p1 board has none, so d_risk keeps its template analyst.
        map.switch_to_detail(CANVAS);
        let risk = map.snapshot.node(ids::D_RISK).unwrap();
        assert_eq!(risk.assigned_expert.as_ref().unwrap().name, "Zohib Habib");
    }

    #[test]
    fn arbitration_mapping_routes_oversight_to_pleadings() {
        let mut map = MapState::project("p2", EngagementKind::Arbitration);
        map.switch_to_detail(CANVAS);
        let plead = map.snapshot.node(ids::D_PLEAD).unwrap();
        assert_eq!(plead.assigned_expert.as_ref().unwrap().name, "Andrew Bowler");
        let disclosure = map.snapshot.node(ids::D_DISCLOSURE).unwrap();
        assert_eq!(
            disclosure.assigned_expert.as_ref().unwrap().name,
            "Fernando Ortega"
        );
    }

    #[test]
    fn round_trip_resets_view_state() {
        let mut map = claim_map();
        map.switch_to_detail(CANVAS);
        map.node_click("l_l1", CANVAS);
        map.switch_to_strategy();

        assert_eq!(map.view_mode, ViewMode::Strategy);
        assert_eq!(map.transform, Transform::default());
        assert!(map.selected.is_none());
        assert!(map.expanded.is_empty());
    }

    #[test]
    fn anatomy_reassignments_do_not_survive_the_return_trip() {
        let mut map = anatomy_map();
        map.snapshot.node_mut(ids::D_COST).unwrap().assigned_expert =
            Some(AssignedExpert::new("William Baxter", "Quantum Lead", "WB"));

        let carried = map.carry_over_experts();
        assert!(carried.iter().any(|n| n.label == "William Baxter"));

        map.switch_to_strategy();
        assert!(map.board_has("Alan Clarke"));
        assert!(!map.board_has("William Baxter"));
    }

    #[test]
    fn carry_over_lands_on_predetermined_slots() {
        let map = anatomy_map();
        let carried = map.carry_over_experts();
        let quantum = carried
            .iter()
            .find(|n| n.role == Some(ExpertRole::Quantum))
            .unwrap();
        approx(quantum.x, 350.0);
        approx(quantum.y, 600.0);
        assert_eq!(quantum.allocated_to.as_deref(), Some(ids::CAT_FINANCE));
    }

    #[test]
    fn back_walks_focus_then_strategy_then_exit() {
        let mut map = anatomy_map();
        map.focus_on(ids::D_COST, CANVAS);
        assert_eq!(map.back(CANVAS), BackOutcome::FocusCleared);
        assert_eq!(map.view_mode, ViewMode::Detail);
        assert_eq!(map.back(CANVAS), BackOutcome::ReturnedToStrategy);
        assert_eq!(map.view_mode, ViewMode::Strategy);
        assert_eq!(map.back(CANVAS), BackOutcome::ExitProject);
    }

    #[test]
    fn bench_swap_inherits_the_outgoing_slot() {
        let mut map = claim_map();
        let pool = data::expert_pool();
        let baxter = pool.iter().find(|p| p.name == "William Baxter").unwrap();

        let before = map.snapshot.node("expert_alan").unwrap().clone();
        map.add_expert(baxter).unwrap();

        assert!(!map.board_has("Alan Clarke"));
        let fielded = map
            .snapshot
            .experts()
            .find(|n| n.label == "William Baxter")
            .unwrap();
        approx(fielded.x, before.x);
        approx(fielded.y, before.y);
        assert_eq!(fielded.allocated_to, before.allocated_to);
    }

    #[test]
    fn recall_remembers_the_vacated_slot() {
        let mut map = claim_map();
        assert!(map.recall_expert("expert_alan"));
        assert!(!map.board_has("Alan Clarke"));

        let pool = data::expert_pool();
        let clarke = pool.iter().find(|p| p.name == "Alan Clarke").unwrap();
        map.add_expert(clarke).unwrap();
        let fielded = map
            .snapshot
            .experts()
            .find(|n| n.label == "Alan Clarke")
            .unwrap();
        approx(fielded.x, 350.0);
        approx(fielded.y, 600.0);
    }

    #[test]
    fn bench_is_strategy_only() {
        let mut map = anatomy_map();
        let pool = data::expert_pool();
        assert!(map.add_expert(&pool[0]).is_none());
    }

    #[test]
    fn overview_project_click_enters_the_engagement() {
        let mut map = MapState::company();
        let outcome = map.node_click("proj_metro", CANVAS);
        assert_eq!(outcome, ClickOutcome::EnteredProject("p2"));
        // The overview root never drills anywhere
        let outcome = map.node_click(ids::HQ_ROOT, CANVAS);
        assert_eq!(outcome, ClickOutcome::Selected);
        assert_eq!(map.view_mode, ViewMode::Strategy);
    }

    #[test]
    fn expert_click_reveals_registry_at_role() {
        let mut map = claim_map();
        let outcome = map.node_click("expert_alan", CANVAS);
        assert_eq!(outcome, ClickOutcome::OpenedRegistry(ExpertRole::Quantum));
        assert_eq!(map.selected.as_deref(), Some("expert_alan"));
    }

    #[test]
    fn sidebar_docks_away_from_the_node() {
        let mut map = claim_map();
        map.node_click("expert_alan", CANVAS); // x = 350
        assert_eq!(map.sidebar_side, SidebarSide::Right);
        map.node_click("expert_ian", CANVAS); // x = 850
        assert_eq!(map.sidebar_side, SidebarSide::Left);
    }

    #[test]
    fn hit_test_honors_transform_and_visibility() {
        let mut map = claim_map();
        // Root at (600, 450) under the default 0.8 scale lands at (480, 360)
        let hit = map.node_at(480.0, 360.0).unwrap();
        assert_eq!(hit.id, ids::ROOT);
        assert!(map.node_at(5.0, 5.0).is_none());

        map.switch_to_detail(CANVAS);
        // Collapsed children are not clickable
        let (sx, sy) = {
            let node = map.snapshot.node("l_c1").unwrap();
            map.transform.apply(node.x, node.y)
        };
        assert!(map.node_at(sx, sy).is_none());
        map.toggle_expansion(ids::D_COST);
        assert_eq!(map.node_at(sx, sy).unwrap().id, "l_c1");
    }

    #[test]
    fn dangling_connection_endpoints_are_queryable_without_panic() {
        let mut map = claim_map();
        map.snapshot
            .connections
            .push(Connection::new("ghost_a", "ghost_b"));
        // Renderers resolve endpoints through node(); missing ends skip the edge
        let conn = map.snapshot.connections.last().unwrap();
        assert!(map.snapshot.node(&conn.from).is_none());
        assert!(map.snapshot.node(&conn.to).is_none());
    }
}
