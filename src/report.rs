//! Client for the report-drafting service.
//!
//! An async HTTP client around the consultancy's generative drafting endpoint.
//! All methods are non-blocking and designed to run in a separate Tokio task;
//! the TUI talks to the worker over channels and never awaits a draft inline.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::ProjectRecord;

/// Default drafting service base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8790";

/// The house report skeleton every draft must follow
const REPORT_STRUCTURE: &str = "\
1.0 EXECUTIVE SUMMARY: High-level overview of entitlement (Days & USD).
2.0 PROJECT PARTICULARS: Key dates, parties, and scope.
3.0 CONTRACTUAL BASIS: Specific clause analysis (e.g. FIDIC Cl 8.4, 20.1).
4.0 DELAY CHRONOLOGY: Detailed cause-and-effect narrative.
5.0 FORENSIC DISRUPTION ANALYSIS: Productivity loss vs baseline.
6.0 QUANTUM EVALUATION: Prolongation cost and loss of opportunity.
7.0 STATEMENT OF CLAIM: Formal closing and signature placeholder.";

/// Draft request payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub system: String,
    pub prompt: String,
}

/// Draft response payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub text: String,
}

/// HTTP client for the drafting service
#[derive(Debug, Clone)]
pub struct ReportClient {
    client: Client,
    base_url: String,
}

impl ReportClient {
    /// Create a new client with the specified base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn system_instruction(project: &ProjectRecord) -> String {
        format!(
            "You are a senior forensic delay analyst and quantum expert drafting \
             a formal report under managing-director oversight.\n\
             Project: {} ({}). Engagement: {}.\n\n\
             REPORT STRUCTURE (MUST FOLLOW):\n{}\n\n\
             TONE: Forensic, objective, authoritative. Every fact must be \
             linked to a source document.",
            project.name, project.location, project.engagement, REPORT_STRUCTURE
        )
    }

    /// Ask the service to draft a report for one workstream of a project
    pub async fn draft(&self, project: &ProjectRecord, subject: &str, brief: &str) -> Result<String> {
        let url = format!("{}/v1/draft", self.base_url);
        let request = DraftRequest {
            system: Self::system_instruction(project),
            prompt: format!(
                "Construct the \"{subject}\" report using the 7-section structure. \
                 Focus on sections 5.0 and 6.0, these require the highest expert rigor.\n\
                 Workstream context: {brief}"
            ),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send draft request")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Drafting service error: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            );
        }

        let draft: DraftResponse = response
            .json()
            .await
            .context("Failed to parse draft response")?;
        Ok(draft.text)
    }

    /// Health check - probes the service status endpoint
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1/status", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

/// Messages sent from the drafting worker to the main TUI thread
#[derive(Debug, Clone)]
pub enum ReportMessage {
    /// A draft came back from the service
    Drafted { subject: String, body: String },
    /// Drafting failed
    Failed(String),
    /// Drafting service reachability changed
    ConnectionStatus(bool),
}

/// Commands sent from the TUI to the drafting worker
#[derive(Debug, Clone)]
pub enum ReportCommand {
    /// Draft a report for a workstream of a project
    Draft {
        project: ProjectRecord,
        subject: String,
        brief: String,
    },
    /// Probe the drafting service
    CheckConnection,
    /// Shut the worker down
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn system_instruction_names_the_engagement() {
        let book = data::project_book();
        let metro = book.iter().find(|p| p.id == "p2").unwrap();
        let system = ReportClient::system_instruction(metro);
        assert!(system.contains("Metro Phase 2"));
        assert!(system.contains("Arbitration"));
        assert!(system.contains("7.0 STATEMENT OF CLAIM"));
    }

    #[test]
    fn draft_request_serializes_camel_case() {
        let request = DraftRequest {
            system: "s".to_string(),
            prompt: "p".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"system\""));
        assert!(json.contains("\"prompt\""));
    }
}
