//! Node sidebar synthesis: the latest-update card, the attached document
//! list and, for parent nodes, the per-child workstream rollup.
//!
//! Everything is recomputed from the live snapshot on each selection; nothing
//! here is stored.

use rand::Rng;

use crate::models::{GraphSnapshot, MapNode};

/// Priority tag on the latest-update card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePriority {
    High,
    Normal,
}

/// The "latest update" message shown at the top of the sidebar
#[derive(Debug, Clone)]
pub struct LatestUpdate {
    pub from: String,
    pub monogram: String,
    pub subject: String,
    pub date: &'static str,
    pub preview: String,
    pub priority: UpdatePriority,
}

/// File format of an attached document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Xls,
}

/// A document attached to the selected node
#[derive(Debug, Clone)]
pub struct NodeFile {
    pub name: String,
    pub kind: FileKind,
    pub size: &'static str,
    pub date: &'static str,
}

/// Health of a child workstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkStatus {
    OnTrack,
    Processing,
    Flagged,
}

impl WorkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkStatus::OnTrack => "On Track",
            WorkStatus::Processing => "Processing",
            WorkStatus::Flagged => "Flagged",
        }
    }
}

/// Rollup row for one child of a parent node
#[derive(Debug, Clone)]
pub struct ChildRollup {
    pub label: String,
    pub status: WorkStatus,
    /// Percent complete, 60-99
    pub completion: u8,
}

/// Everything the sidebar renders for one selected node
#[derive(Debug, Clone)]
pub struct SidebarData {
    pub latest_update: LatestUpdate,
    pub documents: Vec<NodeFile>,
    /// Present only when the node has children
    pub child_rollup: Option<Vec<ChildRollup>>,
}

fn status_for(label: &str) -> WorkStatus {
    if label.contains("Invoices") {
        WorkStatus::Processing
    } else if label.contains("Risk") {
        WorkStatus::Flagged
    } else {
        WorkStatus::OnTrack
    }
}

/// Synthesize the sidebar payload for a selected node
pub fn resolve(node: &MapNode, snapshot: &GraphSnapshot) -> SidebarData {
    let children: Vec<&MapNode> = snapshot.children_of(&node.id).collect();
    let is_parent = !children.is_empty();

    let (from, monogram) = match &node.assigned_expert {
        Some(expert) => (expert.name.clone(), expert.monogram.clone()),
        None if is_parent => ("Lead Expert".to_string(), "LE".to_string()),
        None => ("Project Admin".to_string(), "PA".to_string()),
    };

    let mut update = LatestUpdate {
        from,
        monogram,
        subject: format!("Update: {} Status", node.label),
        date: "10:45 AM",
        preview: format!(
            "I've updated the {} documentation. Please review the attached files.",
            node.label
        ),
        priority: UpdatePriority::Normal,
    };
    if node.label.contains("Cost") {
        update.subject = "Budget Variance Alert".to_string();
        update.preview =
            "We are seeing a 5% drift in the substructure package. See attached tracker."
                .to_string();
        update.priority = UpdatePriority::High;
    } else if node.label.contains("Schedule") {
        update.subject = "Baseline V4 Approval".to_string();
        update.preview =
            "The client has accepted the V4 baseline. Critical path remains unaffected."
                .to_string();
    }

    let mut documents = vec![
        NodeFile {
            name: format!("{}_Report.pdf", node.label),
            kind: FileKind::Pdf,
            size: "2.4 MB",
            date: "Today",
        },
        NodeFile {
            name: format!("{}_Data.xlsx", node.label),
            kind: FileKind::Xls,
            size: "850 KB",
            date: "Yesterday",
        },
    ];
    // Surface at most two child summaries to keep the panel readable
    for child in children.iter().take(2) {
        documents.push(NodeFile {
            name: format!("{}_Summary.pdf", child.label),
            kind: FileKind::Pdf,
            size: "1.2 MB",
            date: "2d ago",
        });
    }

    let child_rollup = is_parent.then(|| {
        let mut rng = rand::thread_rng();
        children
            .iter()
            .map(|child| ChildRollup {
                label: child.label.clone(),
                status: status_for(&child.label),
                completion: rng.gen_range(60..100),
            })
            .collect()
    });

    SidebarData {
        latest_update: update,
        documents,
        child_rollup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, ids};
    use crate::models::EngagementKind;

    fn anatomy() -> GraphSnapshot {
        data::detail_snapshot("p1", EngagementKind::Claim)
    }

    #[test]
    fn cost_nodes_raise_a_budget_alert() {
        let snap = anatomy();
        let data = resolve(snap.node(ids::D_COST).unwrap(), &snap);
        assert_eq!(data.latest_update.subject, "Budget Variance Alert");
        assert_eq!(data.latest_update.priority, UpdatePriority::High);
        // Sender is the embedded cost lead
        assert_eq!(data.latest_update.from, "Alan Clarke");
    }

    #[test]
    fn schedule_nodes_report_the_baseline() {
        let snap = anatomy();
        let data = resolve(snap.node(ids::D_SCHED).unwrap(), &snap);
        assert_eq!(data.latest_update.subject, "Baseline V4 Approval");
        assert_eq!(data.latest_update.priority, UpdatePriority::Normal);
    }

    #[test]
    fn leaf_nodes_fall_back_to_the_project_admin() {
        let snap = anatomy();
        let data = resolve(snap.node("l_l1").unwrap(), &snap);
        assert_eq!(data.latest_update.from, "Project Admin");
        assert!(data.child_rollup.is_none());
        assert_eq!(data.documents.len(), 2);
    }

    #[test]
    fn unassigned_parents_fall_back_to_the_lead_expert() {
        let snap = anatomy();
        let data = resolve(snap.node(ids::D_LOG).unwrap(), &snap);
        assert_eq!(data.latest_update.from, "Lead Expert");
        assert!(data.child_rollup.is_some());
    }

    #[test]
    fn parents_aggregate_children_and_cap_summaries() {
        let snap = anatomy();
        // d_cost has two direct children (Budget Tracker, Cash Flow)
        let data = resolve(snap.node(ids::D_COST).unwrap(), &snap);
        let rollup = data.child_rollup.unwrap();
        assert_eq!(rollup.len(), 2);
        assert_eq!(data.documents.len(), 4);
    }

    #[test]
    fn rollup_statuses_follow_label_keywords() {
        let snap = anatomy();
        let tracker = resolve(snap.node("l_c1").unwrap(), &snap);
        let rollup = tracker.child_rollup.unwrap();
        let invoices = rollup.iter().find(|c| c.label == "Invoices").unwrap();
        assert_eq!(invoices.status, WorkStatus::Processing);

        let risk = resolve(snap.node(ids::D_RISK).unwrap(), &snap);
        let rollup = risk.child_rollup.unwrap();
        assert_eq!(rollup[0].status, WorkStatus::Flagged);
    }

    #[test]
    fn completion_stays_in_band() {
        let snap = anatomy();
        for _ in 0..50 {
            let data = resolve(snap.node(ids::D_COST).unwrap(), &snap);
            for child in data.child_rollup.unwrap() {
                assert!((60..100).contains(&(child.completion as i32)));
            }
        }
    }
}
