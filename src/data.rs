//! Static case data: the project book, the expert bench, and the graph
//! snapshots behind the relationship map.
//!
//! Everything here is a pure function of its inputs. Snapshot builders never
//! fail; an unknown project id falls back to the default (Skyline Tower)
//! layout rather than erroring.

use crate::models::{
    AssignedExpert, Connection, EngagementKind, ExpertProfile, ExpertRole, GraphSnapshot, MapNode,
    NodeKind, ProjectRecord, ProjectStatus,
};

/// Well-known node ids shared between the data provider and the transition
/// controller. The `d_` prefix marks anatomy (detail) nodes, `cat_` marks
/// strategy workstreams.
pub mod ids {
    pub const ROOT: &str = "root";
    pub const ROOT_DETAIL: &str = "root_detail";
    pub const HQ_ROOT: &str = "hq_root";

    // Strategy workstreams (standard claim)
    pub const CAT_CONTRACT: &str = "cat_contract";
    pub const CAT_FINANCE: &str = "cat_finance";
    pub const CAT_EVENTS: &str = "cat_events";
    // Strategy workstreams (arbitration)
    pub const CAT_PLEADINGS: &str = "cat_pleadings";
    pub const CAT_QUANTUM: &str = "cat_quantum";
    pub const CAT_EVIDENCE: &str = "cat_evidence";

    // Anatomy categories (standard claim)
    pub const D_SCHED: &str = "d_sched";
    pub const D_COST: &str = "d_cost";
    pub const D_RISK: &str = "d_risk";
    pub const D_LOG: &str = "d_log";
    pub const D_QA: &str = "d_qa";
    pub const D_STAKE: &str = "d_stake";
    // Anatomy categories (arbitration)
    pub const D_PLEAD: &str = "d_plead";
    pub const D_EXPERT: &str = "d_expert";
    pub const D_EVIDENCE: &str = "d_evidence";
    pub const D_DISCLOSURE: &str = "d_disclosure";
    pub const D_HEARING: &str = "d_hearing";
    pub const D_ADMIN: &str = "d_admin";
}

/// The consultancy's current engagement book
pub fn project_book() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "p1",
            name: "Skyline Tower",
            location: "Doha, Qatar",
            status: ProjectStatus::Active,
            engagement: EngagementKind::Claim,
            progress: 65,
            expertise: &[
                "Contract Management",
                "Commercial Management",
                "Claims Drafting (EOT/VO's)",
            ],
        },
        ProjectRecord {
            id: "p2",
            name: "Metro Phase 2",
            location: "Ho Chi Minh City, Vietnam",
            status: ProjectStatus::Active,
            engagement: EngagementKind::Arbitration,
            progress: 32,
            expertise: &[
                "Dispute Resolution & Arbitration Management",
                "Quantum/Engineering/Delay Experts",
                "Disruption Analysis",
            ],
        },
        ProjectRecord {
            id: "p3",
            name: "Harbor Warehouse",
            location: "Salalah, Oman",
            status: ProjectStatus::OnHold,
            engagement: EngagementKind::Claim,
            progress: 88,
            expertise: &[
                "Preparation and Audit of Programme Baseline",
                "International Property/Risk Management",
                "Fraud Investigation/Liquidation & Termination",
            ],
        },
        ProjectRecord {
            id: "p4",
            name: "Lotus Tower Fit-out",
            location: "Colombo, Sri Lanka",
            status: ProjectStatus::Completed,
            engagement: EngagementKind::Claim,
            progress: 100,
            expertise: &["Final Account Negotiation", "Defect Liability Management"],
        },
        ProjectRecord {
            id: "p5",
            name: "Jumeirah Palm Infra",
            location: "Dubai, UAE",
            status: ProjectStatus::Completed,
            engagement: EngagementKind::Arbitration,
            progress: 100,
            expertise: &["Expert Witness Testimony", "Quantum Determination"],
        },
    ]
}

/// The bench: consultants available for tactical allocation
pub fn expert_pool() -> Vec<ExpertProfile> {
    vec![
        ExpertProfile {
            id: "exp_ac",
            name: "Alan Clarke",
            role: ExpertRole::Quantum,
            monogram: "AC",
            rating: 92,
        },
        ExpertProfile {
            id: "exp_zh",
            name: "Zohib Habib",
            role: ExpertRole::Forensic,
            monogram: "ZH",
            rating: 89,
        },
        ExpertProfile {
            id: "exp_ib",
            name: "Ian Bartlett",
            role: ExpertRole::Delay,
            monogram: "IB",
            rating: 91,
        },
        ExpertProfile {
            id: "exp_ph",
            name: "Philip Hoskins",
            role: ExpertRole::Delay,
            monogram: "PH",
            rating: 85,
        },
        ExpertProfile {
            id: "exp_dh",
            name: "David Hugill",
            role: ExpertRole::Forensic,
            monogram: "DH",
            rating: 90,
        },
        ExpertProfile {
            id: "exp_wb",
            name: "William Baxter",
            role: ExpertRole::Quantum,
            monogram: "WB",
            rating: 88,
        },
        ExpertProfile {
            id: "exp_fo",
            name: "Fernando Ortega",
            role: ExpertRole::Legal,
            monogram: "FO",
            rating: 95,
        },
    ]
}

fn project_title(project_id: &str) -> &'static str {
    match project_id {
        "p2" => "Metro Phase 2",
        "p3" => "Harbor Warehouse",
        "p4" => "Lotus Tower Fit-out",
        "p5" => "Jumeirah Palm Infra",
        _ => "Skyline Tower",
    }
}

/// Arbitration layouts apply either by engagement type or for the two
/// engagements that are arbitrations regardless of how the caller tagged them
fn is_arbitration(project_id: &str, engagement: EngagementKind) -> bool {
    engagement == EngagementKind::Arbitration || project_id == "p2" || project_id == "p5"
}

fn is_asset_claim(project_id: &str) -> bool {
    project_id == "p3" || project_id == "p4"
}

/// Flat strategy board: root, workstream categories and loosely-linked experts
pub fn strategy_snapshot(project_id: &str, engagement: EngagementKind) -> GraphSnapshot {
    let title = project_title(project_id);

    if is_arbitration(project_id, engagement) {
        return GraphSnapshot {
            label: format!("{title} - Arbitration"),
            subtitle: Some("Tribunal Strategy Layout".to_string()),
            nodes: vec![
                MapNode::new(ids::ROOT, "ICC Arbitration", NodeKind::Root, 600.0, 450.0)
                    .describe("Central Legal & Expert Hub"),
                MapNode::new(
                    ids::CAT_PLEADINGS,
                    "Tribunal & Pleadings",
                    NodeKind::Category,
                    600.0,
                    150.0,
                ),
                MapNode::new(
                    ids::CAT_QUANTUM,
                    "Quantum Evidence",
                    NodeKind::Category,
                    200.0,
                    750.0,
                ),
                MapNode::new(
                    ids::CAT_EVIDENCE,
                    "Factual Evidence",
                    NodeKind::Category,
                    1000.0,
                    750.0,
                ),
                MapNode::new("expert_andrew", "Andrew Bowler", NodeKind::Expert, 600.0, 800.0)
                    .role(ExpertRole::Oversight)
                    .monogram("AB")
                    .describe("Lead Expert Witness")
                    .allocated_to(ids::CAT_PLEADINGS),
                MapNode::new("expert_zohib", "Zohib Habib", NodeKind::Expert, 350.0, 600.0)
                    .role(ExpertRole::Quantum)
                    .monogram("ZH")
                    .describe("Quantum Expert Witness")
                    .allocated_to(ids::CAT_QUANTUM),
                MapNode::new("expert_ian", "Ian Bartlett", NodeKind::Expert, 850.0, 600.0)
                    .role(ExpertRole::Delay)
                    .monogram("IB")
                    .describe("Delay Expert Witness")
                    .allocated_to(ids::CAT_EVIDENCE),
                MapNode::new("expert_fernando", "Fernando Ortega", NodeKind::Expert, 400.0, 150.0)
                    .role(ExpertRole::Legal)
                    .monogram("FO")
                    .describe("Appointed Lawyer")
                    .allocated_to(ids::CAT_PLEADINGS),
                MapNode::new("item_claim", "Statement of Claim", NodeKind::Item, 600.0, 50.0)
                    .describe("Submission Due: 15 Oct"),
            ],
            connections: vec![
                Connection::new(ids::ROOT, ids::CAT_PLEADINGS),
                Connection::new(ids::ROOT, ids::CAT_QUANTUM),
                Connection::new(ids::ROOT, ids::CAT_EVIDENCE),
                Connection::new(ids::CAT_PLEADINGS, "item_claim"),
            ],
        };
    }

    if is_asset_claim(project_id) {
        return GraphSnapshot {
            label: title.to_string(),
            subtitle: Some("Asset Claim".to_string()),
            nodes: vec![
                MapNode::new(ids::ROOT, title, NodeKind::Root, 600.0, 450.0)
                    .describe("Logistics Hub Asset Claim"),
                MapNode::new(
                    ids::CAT_CONTRACT,
                    "Lease Agreement",
                    NodeKind::Category,
                    600.0,
                    200.0,
                ),
                MapNode::new(ids::CAT_FINANCE, "Damages", NodeKind::Category, 300.0, 650.0),
                MapNode::new(ids::CAT_EVENTS, "Defects", NodeKind::Category, 900.0, 650.0),
                MapNode::new("expert_andrew", "Andrew Bowler", NodeKind::Expert, 600.0, 800.0)
                    .role(ExpertRole::Oversight)
                    .monogram("AB")
                    .describe("Managing Director"),
                MapNode::new("expert_william", "William Baxter", NodeKind::Expert, 450.0, 550.0)
                    .role(ExpertRole::Quantum)
                    .monogram("WB")
                    .describe("Quantum Consultant")
                    .allocated_to(ids::CAT_FINANCE),
                MapNode::new("expert_david", "David Hugill", NodeKind::Expert, 750.0, 550.0)
                    .role(ExpertRole::Forensic)
                    .monogram("DH")
                    .describe("Forensic Expert")
                    .allocated_to(ids::CAT_EVENTS),
            ],
            connections: vec![
                Connection::new(ids::ROOT, ids::CAT_CONTRACT),
                Connection::new(ids::ROOT, ids::CAT_FINANCE),
                Connection::new(ids::ROOT, ids::CAT_EVENTS),
            ],
        };
    }

    // Default layout (Skyline Tower / unknown ids)
    GraphSnapshot {
        label: title.to_string(),
        subtitle: Some("Case Strategy Layout".to_string()),
        nodes: vec![
            MapNode::new(ids::ROOT, title, NodeKind::Root, 600.0, 450.0)
                .describe("Central Hub. Enter to open Project Anatomy."),
            MapNode::new(
                ids::CAT_CONTRACT,
                "Contract Baseline",
                NodeKind::Category,
                600.0,
                150.0,
            ),
            MapNode::new(
                ids::CAT_FINANCE,
                "Quantum Audit",
                NodeKind::Category,
                200.0,
                750.0,
            ),
            MapNode::new(
                ids::CAT_EVENTS,
                "Delay Events",
                NodeKind::Category,
                1000.0,
                750.0,
            ),
            MapNode::new("expert_andrew", "Andrew Bowler", NodeKind::Expert, 600.0, 800.0)
                .role(ExpertRole::Oversight)
                .monogram("AB")
                .describe("Managing Director & Portfolio Oversight"),
            MapNode::new("expert_alan", "Alan Clarke", NodeKind::Expert, 350.0, 600.0)
                .role(ExpertRole::Quantum)
                .monogram("AC")
                .describe("Infrastructure Valuation Lead")
                .allocated_to(ids::CAT_FINANCE),
            MapNode::new("expert_ian", "Ian Bartlett", NodeKind::Expert, 850.0, 600.0)
                .role(ExpertRole::Delay)
                .monogram("IB")
                .describe("Forensic Delay Analyst")
                .allocated_to(ids::CAT_EVENTS),
            MapNode::new("item_fidic", "Cl 8.4 Entitlement", NodeKind::Item, 600.0, 50.0)
                .describe("EOT Basis"),
        ],
        connections: vec![
            Connection::new(ids::ROOT, ids::CAT_CONTRACT),
            Connection::new(ids::ROOT, ids::CAT_FINANCE),
            Connection::new(ids::ROOT, ids::CAT_EVENTS),
            Connection::new(ids::CAT_CONTRACT, "item_fidic"),
        ],
    }
}

/// Hierarchical anatomy board: categories with embedded experts that expand
/// into sub-item trees
pub fn detail_snapshot(project_id: &str, engagement: EngagementKind) -> GraphSnapshot {
    let title = project_title(project_id);

    if is_arbitration(project_id, engagement) {
        let nodes = vec![
            MapNode::new(
                ids::ROOT_DETAIL,
                "Arbitration Workstreams",
                NodeKind::Root,
                600.0,
                450.0,
            )
            .describe("Tribunal Preparation & Evidence"),
            MapNode::new(ids::D_PLEAD, "Pleadings", NodeKind::Category, 600.0, 150.0)
                .assigned(AssignedExpert::new("Andrew Bowler", "Lead Expert", "AB")),
            MapNode::new(ids::D_EXPERT, "Expert Reports", NodeKind::Category, 900.0, 300.0)
                .assigned(AssignedExpert::new("Zohib Habib", "Quantum Expert", "ZH")),
            MapNode::new(
                ids::D_EVIDENCE,
                "Witness Evidence",
                NodeKind::Category,
                900.0,
                600.0,
            )
            .assigned(AssignedExpert::new("Ian Bartlett", "Delay Expert", "IB")),
            MapNode::new(
                ids::D_DISCLOSURE,
                "Disclosure",
                NodeKind::Category,
                600.0,
                750.0,
            )
            .assigned(AssignedExpert::new("Fernando Ortega", "Appointed Lawyer", "FO")),
            MapNode::new(ids::D_HEARING, "Hearing Prep", NodeKind::Category, 300.0, 600.0),
            MapNode::new(ids::D_ADMIN, "Tribunal Admin", NodeKind::Category, 300.0, 300.0),
            MapNode::new("l_soc", "Statement of Claim", NodeKind::Item, 500.0, 50.0)
                .child_of(ids::D_PLEAD),
            MapNode::new("l_def", "Statement of Defence", NodeKind::Item, 700.0, 50.0)
                .child_of(ids::D_PLEAD),
            MapNode::new("l_rep1", "Report No. 1", NodeKind::Item, 1100.0, 250.0)
                .child_of(ids::D_EXPERT),
            MapNode::new("l_joint", "Joint Statement", NodeKind::Item, 1100.0, 350.0)
                .child_of(ids::D_EXPERT),
            MapNode::new("l_scott", "Scott Schedule", NodeKind::Item, 1300.0, 300.0)
                .child_of("l_joint"),
            MapNode::new("l_witness", "Factual Witnesses", NodeKind::Item, 1100.0, 600.0)
                .child_of(ids::D_EVIDENCE),
            MapNode::new("l_redfern", "Redfern Schedule", NodeKind::Item, 600.0, 850.0)
                .child_of(ids::D_DISCLOSURE),
        ];
        let connections = vec![
            Connection::new(ids::ROOT_DETAIL, ids::D_PLEAD),
            Connection::new(ids::ROOT_DETAIL, ids::D_EXPERT),
            Connection::new(ids::ROOT_DETAIL, ids::D_EVIDENCE),
            Connection::new(ids::ROOT_DETAIL, ids::D_DISCLOSURE),
            Connection::new(ids::ROOT_DETAIL, ids::D_HEARING),
            Connection::new(ids::ROOT_DETAIL, ids::D_ADMIN),
            Connection::new(ids::D_PLEAD, "l_soc"),
            Connection::new(ids::D_PLEAD, "l_def"),
            Connection::new(ids::D_EXPERT, "l_rep1"),
            Connection::new(ids::D_EXPERT, "l_joint"),
            Connection::new("l_joint", "l_scott"),
            Connection::new(ids::D_EVIDENCE, "l_witness"),
            Connection::new(ids::D_DISCLOSURE, "l_redfern"),
        ];
        return GraphSnapshot {
            label: format!("{title} - Anatomy"),
            subtitle: None,
            nodes,
            connections,
        };
    }

    // Standard claim anatomy; asset claims field a different quantum/risk bench
    let (cost, risk) = if is_asset_claim(project_id) {
        (
            AssignedExpert::new("William Baxter", "Quantum Lead", "WB"),
            AssignedExpert::new("David Hugill", "Risk Expert", "DH"),
        )
    } else {
        (
            AssignedExpert::new("Alan Clarke", "Cost Lead", "AC"),
            AssignedExpert::new("Zohib Habib", "Risk Analyst", "ZH"),
        )
    };
    let sched = AssignedExpert::new("Ian Bartlett", "Lead Planner", "IB");

    let nodes = vec![
        MapNode::new(ids::ROOT_DETAIL, title, NodeKind::Root, 600.0, 450.0)
            .describe("Internal Project Structure & Work Packages"),
        MapNode::new(ids::D_SCHED, "Master Schedule", NodeKind::Category, 600.0, 150.0)
            .assigned(sched),
        MapNode::new(ids::D_COST, "Cost Plan", NodeKind::Category, 900.0, 300.0).assigned(cost),
        MapNode::new(ids::D_RISK, "Risk Register", NodeKind::Category, 900.0, 600.0)
            .assigned(risk),
        MapNode::new(ids::D_LOG, "Logistics", NodeKind::Category, 600.0, 750.0),
        MapNode::new(ids::D_QA, "QA/QC", NodeKind::Category, 300.0, 600.0),
        MapNode::new(ids::D_STAKE, "Stakeholders", NodeKind::Category, 300.0, 300.0),
        MapNode::new("l_s1", "Baseline V4", NodeKind::Item, 500.0, 50.0).child_of(ids::D_SCHED),
        MapNode::new("l_s2", "Critical Path", NodeKind::Item, 700.0, 50.0).child_of(ids::D_SCHED),
        MapNode::new("l_c1", "Budget Tracker", NodeKind::Item, 1100.0, 250.0)
            .child_of(ids::D_COST),
        MapNode::new("l_c2", "Cash Flow", NodeKind::Item, 1100.0, 350.0).child_of(ids::D_COST),
        MapNode::new("l_c3", "Invoices", NodeKind::Item, 1300.0, 250.0).child_of("l_c1"),
        MapNode::new("l_c4", "Appendices", NodeKind::Item, 1300.0, 350.0).child_of("l_c1"),
        MapNode::new("l_c5", "Final Reports", NodeKind::Item, 1500.0, 300.0).child_of("l_c3"),
        MapNode::new("l_r1", "Top 5 Risks", NodeKind::Warning, 1100.0, 600.0)
            .child_of(ids::D_RISK),
        MapNode::new("l_l1", "Procurement", NodeKind::Item, 600.0, 850.0).child_of(ids::D_LOG),
    ];
    let connections = vec![
        Connection::new(ids::ROOT_DETAIL, ids::D_SCHED),
        Connection::new(ids::ROOT_DETAIL, ids::D_COST),
        Connection::new(ids::ROOT_DETAIL, ids::D_RISK),
        Connection::new(ids::ROOT_DETAIL, ids::D_LOG),
        Connection::new(ids::ROOT_DETAIL, ids::D_QA),
        Connection::new(ids::ROOT_DETAIL, ids::D_STAKE),
        Connection::new(ids::D_SCHED, "l_s1"),
        Connection::new(ids::D_SCHED, "l_s2"),
        Connection::new(ids::D_COST, "l_c1"),
        Connection::new(ids::D_COST, "l_c2"),
        Connection::new("l_c1", "l_c3"),
        Connection::new("l_c1", "l_c4"),
        Connection::new("l_c3", "l_c5"),
        Connection::new(ids::D_RISK, "l_r1"),
        Connection::new(ids::D_LOG, "l_l1"),
    ];

    GraphSnapshot {
        label: format!("{title} - Anatomy"),
        subtitle: None,
        nodes,
        connections,
    }
}

/// Company-wide operations map: HQ, live projects and their lead consultants
pub fn company_overview_snapshot() -> GraphSnapshot {
    let nodes = vec![
        MapNode::new(ids::HQ_ROOT, "Bowler Consult", NodeKind::Root, 600.0, 100.0)
            .monogram("AB")
            .describe("Managing Director & Global Operations"),
        MapNode::new("proj_skyline", "Skyline Tower", NodeKind::Project, 250.0, 300.0)
            .describe("Contract & Commercial Management, Claims Drafting"),
        MapNode::new("proj_metro", "Metro Phase 2", NodeKind::Project, 600.0, 300.0)
            .describe("Dispute Resolution & Arbitration, Disruption Analysis"),
        MapNode::new("proj_harbor", "Harbor Warehouse", NodeKind::Project, 950.0, 300.0)
            .describe("Programme Baseline Audit, Fraud Investigation"),
        MapNode::new("lead_alan", "Alan Clarke", NodeKind::Expert, 150.0, 500.0)
            .role(ExpertRole::Quantum)
            .monogram("AC"),
        MapNode::new("lead_ian", "Ian Bartlett", NodeKind::Expert, 350.0, 500.0)
            .role(ExpertRole::Delay)
            .monogram("IB"),
        MapNode::new("lead_fernando", "Fernando Ortega", NodeKind::Expert, 500.0, 500.0)
            .role(ExpertRole::Legal)
            .monogram("FO"),
        MapNode::new("lead_zohib", "Zohib Habib", NodeKind::Expert, 700.0, 500.0)
            .role(ExpertRole::Forensic)
            .monogram("ZH"),
        MapNode::new("lead_david", "David Hugill", NodeKind::Expert, 850.0, 500.0)
            .role(ExpertRole::Forensic)
            .monogram("DH"),
        MapNode::new("lead_philip", "Philip Hoskins", NodeKind::Expert, 1050.0, 500.0)
            .role(ExpertRole::Delay)
            .monogram("PH"),
    ];
    let connections = vec![
        Connection::new(ids::HQ_ROOT, "proj_skyline"),
        Connection::new(ids::HQ_ROOT, "proj_metro"),
        Connection::new(ids::HQ_ROOT, "proj_harbor"),
        Connection::new("proj_skyline", "lead_alan"),
        Connection::new("proj_skyline", "lead_ian"),
        Connection::new("proj_metro", "lead_fernando"),
        Connection::new("proj_metro", "lead_zohib"),
        Connection::new("proj_harbor", "lead_david"),
        Connection::new("proj_harbor", "lead_philip"),
    ];
    GraphSnapshot {
        label: "Company Operations".to_string(),
        subtitle: Some("All Projects Portfolio".to_string()),
        nodes,
        connections,
    }
}

/// Company overview project node id -> engagement book id
pub fn overview_project_id(node_id: &str) -> Option<&'static str> {
    match node_id {
        "proj_skyline" => Some("p1"),
        "proj_metro" => Some("p2"),
        "proj_harbor" => Some("p3"),
        _ => None,
    }
}

// ============================================
// Drive & Mail mock records
// ============================================

/// Kind of a drive entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Folder,
    Pdf,
    Xls,
    Doc,
    Img,
}

/// A row in the document drive
#[derive(Debug, Clone)]
pub struct DriveEntry {
    pub name: String,
    pub kind: DocKind,
    pub size: &'static str,
    pub date: &'static str,
    /// Indent level in the flattened tree listing
    pub depth: u8,
}

impl DriveEntry {
    fn folder(name: &str, date: &'static str, depth: u8) -> Self {
        Self {
            name: name.to_string(),
            kind: DocKind::Folder,
            size: "--",
            date,
            depth,
        }
    }

    fn file(name: &str, kind: DocKind, size: &'static str, date: &'static str, depth: u8) -> Self {
        Self {
            name: name.to_string(),
            kind,
            size,
            date,
            depth,
        }
    }
}

/// Flattened drive tree for a project
pub fn drive_entries(project_name: &str) -> Vec<DriveEntry> {
    vec![
        DriveEntry::folder("01. Contract Documents", "2023-10-01", 0),
        DriveEntry::file("Main Contract - FIDIC Red.pdf", DocKind::Pdf, "12.4 MB", "2023-09-15", 1),
        DriveEntry::file("Particular Conditions.pdf", DocKind::Pdf, "2.1 MB", "2023-09-15", 1),
        DriveEntry::file("Appendix A - Scope.pdf", DocKind::Pdf, "5.6 MB", "2023-09-15", 1),
        DriveEntry::folder("02. Correspondence", "2023-10-05", 0),
        DriveEntry::file("Notice of Delay 01.pdf", DocKind::Pdf, "450 KB", "2023-11-12", 1),
        DriveEntry::folder("03. Site Records", "2023-10-10", 0),
        DriveEntry::file("Daily_Diary_May_24.pdf", DocKind::Pdf, "1.2 MB", "2023-05-24", 1),
        DriveEntry::file("Site_Photos_May.zip", DocKind::Img, "145 MB", "2023-05-25", 1),
        DriveEntry::folder("04. Financials", "2023-10-12", 0),
        DriveEntry::file(
            &format!("{project_name}_Budget_Tracker.xlsx"),
            DocKind::Xls,
            "45 KB",
            "2023-11-20",
            1,
        ),
        DriveEntry::file("Valuation_05.xlsx", DocKind::Xls, "22 KB", "2023-11-22", 1),
    ]
}

/// Priority of an inbox item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailPriority {
    High,
    Normal,
}

/// A mock inbox row
#[derive(Debug, Clone)]
pub struct MailItem {
    pub from: &'static str,
    pub subject: String,
    pub preview: &'static str,
    pub date: &'static str,
    pub priority: MailPriority,
    pub unread: bool,
}

/// Mock inbox for a project
pub fn inbox(project_name: &str) -> Vec<MailItem> {
    vec![
        MailItem {
            from: "Project Manager",
            subject: format!("Re: {project_name} EOT Claim - Urgent"),
            preview: "Hi, please see the attached comments regarding the EOT submission.",
            date: "10:42 AM",
            priority: MailPriority::High,
            unread: true,
        },
        MailItem {
            from: "Contractor Admin",
            subject: "Site Diary - Week 42".to_string(),
            preview: "Attached are the site diaries for the last week. Please review.",
            date: "Yesterday",
            priority: MailPriority::Normal,
            unread: true,
        },
        MailItem {
            from: "Quantity Surveyor",
            subject: "Valuation 05 - Certified".to_string(),
            preview: "The payment certificate has been issued for Valuation 05.",
            date: "May 12",
            priority: MailPriority::Normal,
            unread: false,
        },
        MailItem {
            from: "Client Rep",
            subject: "Meeting Minutes - Monthly Progress".to_string(),
            preview: "Minutes from Tuesday's meeting are attached for your records.",
            date: "May 10",
            priority: MailPriority::Normal,
            unread: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tree_is_acyclic(snap: &GraphSnapshot) {
        for node in &snap.nodes {
            let mut seen = vec![node.id.as_str()];
            let mut cursor = node.parent_id.as_deref();
            while let Some(pid) = cursor {
                assert!(!seen.contains(&pid), "cycle through {pid}");
                seen.push(pid);
                cursor = snap.node(pid).and_then(|p| p.parent_id.as_deref());
            }
        }
    }

    #[test]
    fn unknown_project_falls_back_to_default() {
        let snap = strategy_snapshot("does-not-exist", EngagementKind::Claim);
        assert_eq!(snap.label, "Skyline Tower");
        assert!(snap.node(ids::ROOT).is_some());
        assert!(snap.node(ids::CAT_FINANCE).is_some());
    }

    #[test]
    fn arbitration_applies_by_engagement_or_id() {
        let by_engagement = strategy_snapshot("p1", EngagementKind::Arbitration);
        assert!(by_engagement.node(ids::CAT_PLEADINGS).is_some());

        let by_id = strategy_snapshot("p5", EngagementKind::Claim);
        assert!(by_id.node(ids::CAT_PLEADINGS).is_some());
    }

    #[test]
    fn connections_reference_existing_nodes() {
        for engagement in [EngagementKind::Claim, EngagementKind::Arbitration] {
            for pid in ["p1", "p2", "p3", "p4", "p5"] {
                for snap in [
                    strategy_snapshot(pid, engagement),
                    detail_snapshot(pid, engagement),
                ] {
                    for conn in &snap.connections {
                        assert!(snap.node(&conn.from).is_some(), "{pid}: {}", conn.from);
                        assert!(snap.node(&conn.to).is_some(), "{pid}: {}", conn.to);
                    }
                }
            }
        }
        let overview = company_overview_snapshot();
        for conn in &overview.connections {
            assert!(overview.node(&conn.from).is_some());
            assert!(overview.node(&conn.to).is_some());
        }
    }

    #[test]
    fn anatomy_trees_are_acyclic() {
        assert_tree_is_acyclic(&detail_snapshot("p1", EngagementKind::Claim));
        assert_tree_is_acyclic(&detail_snapshot("p2", EngagementKind::Arbitration));
        assert_tree_is_acyclic(&detail_snapshot("p3", EngagementKind::Claim));
    }

    #[test]
    fn asset_claims_field_their_own_bench() {
        let p1 = detail_snapshot("p1", EngagementKind::Claim);
        let p3 = detail_snapshot("p3", EngagementKind::Claim);
        let cost_p1 = p1.node(ids::D_COST).unwrap().assigned_expert.as_ref().unwrap();
        let cost_p3 = p3.node(ids::D_COST).unwrap().assigned_expert.as_ref().unwrap();
        assert_eq!(cost_p1.name, "Alan Clarke");
        assert_eq!(cost_p3.name, "William Baxter");
    }

    #[test]
    fn snapshots_are_deterministic() {
        let a = strategy_snapshot("p1", EngagementKind::Claim);
        let b = strategy_snapshot("p1", EngagementKind::Claim);
        assert_eq!(a.nodes.len(), b.nodes.len());
        assert_eq!(a.connections, b.connections);
    }

    #[test]
    fn expert_pool_has_unique_ids() {
        let pool = expert_pool();
        for (i, a) in pool.iter().enumerate() {
            for b in &pool[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
