//! Deploy and destroy through a [`Relay`].

use std::sync::Arc;

use labwire_types::{Relay, RelayMethod, RelayRequest, RelayResponse, Topology};
use serde_json::json;

use crate::config::DeployConfig;
use crate::hints::{Hint, classify};
use crate::log::DeployLog;

/// What one deploy or destroy produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOutcome {
    /// The orchestrator answered 2xx.
    pub success: bool,
    /// Downstream status, when the relay was reached.
    pub status: Option<u16>,
    /// Hints recognized in a failure.
    pub hints: Vec<Hint>,
    /// Everything the user should see, in order.
    pub log: DeployLog,
}

impl DeployOutcome {
    fn new(log: DeployLog) -> Self {
        Self {
            success: false,
            status: None,
            hints: Vec::new(),
            log,
        }
    }
}

/// Sends lab snapshots to the orchestrator.
///
/// Each call encodes the snapshot it is given. Concurrent calls are not
/// serialized or cancelled.
#[derive(Clone)]
pub struct DeploySession {
    relay: Arc<dyn Relay>,
}

impl DeploySession {
    /// A session over `relay`.
    pub fn new(relay: impl Relay + 'static) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }

    /// A session over a shared relay.
    pub fn with_relay(relay: Arc<dyn Relay>) -> Self {
        Self { relay }
    }

    /// Create or reconfigure the lab from `snapshot`.
    ///
    /// Never fails: transport and orchestrator errors end up in the log.
    pub async fn deploy(&self, snapshot: Topology, config: &DeployConfig) -> DeployOutcome {
        let lab = config.effective_lab_name();
        let mut log = DeployLog::new();
        log.push(format!(
            "Initiating deployment of '{lab}' to {}...",
            config.api_base()
        ));

        let manifest = match labwire_codec::encode_json(&snapshot.nodes, &snapshot.links, lab) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(error = %err, "topology could not be encoded");
                log.push(format!("Error: {err}"));
                return DeployOutcome::new(log);
            }
        };

        let request = RelayRequest {
            url: config.deploy_url(),
            method: RelayMethod::Post,
            headers: config.headers(),
            data: Some(json!({ "topologyContent": manifest })),
        };
        tracing::info!(lab, nodes = snapshot.nodes.len(), links = snapshot.links.len(), "deploying lab");

        self.send(request, log, "Deployment successful!", true).await
    }

    /// Tear the lab down and clean up its files.
    pub async fn destroy(&self, config: &DeployConfig) -> DeployOutcome {
        let lab = config.effective_lab_name();
        let mut log = DeployLog::new();
        log.push(format!("Initiating destruction of lab '{lab}' through relay..."));

        let request = RelayRequest {
            url: config.destroy_url(),
            method: RelayMethod::Delete,
            headers: config.headers(),
            data: None,
        };
        tracing::info!(lab, "destroying lab");

        self.send(request, log, "Lab destroyed successfully.", false)
            .await
    }

    async fn send(
        &self,
        request: RelayRequest,
        mut log: DeployLog,
        success_line: &str,
        echo_data: bool,
    ) -> DeployOutcome {
        let response = match self.relay.forward(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "relay unreachable");
                log.push(format!("Relay Connection Failed: {err}. Is the backend running?"));
                return DeployOutcome::new(log);
            }
        };

        let mut outcome = DeployOutcome::new(log);
        outcome.status = Some(response.status);

        if response.is_success() {
            outcome.success = true;
            outcome.log.push(success_line);
            if echo_data {
                if let Some(data) = &response.data {
                    outcome.log.push_value(data);
                }
            }
            return outcome;
        }

        let detail = failure_detail(&response);
        tracing::warn!(status = response.status, error = %detail, "orchestrator rejected request");
        outcome
            .log
            .push(format!("Error ({}): {detail}", response.status));
        if echo_data {
            outcome.hints = classify(response.status, &detail);
            for hint in &outcome.hints {
                outcome.log.push(hint.message());
            }
        }
        outcome
    }
}

impl std::fmt::Debug for DeploySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploySession").finish_non_exhaustive()
    }
}

/// The relay's error text, or the downstream body when there is none.
fn failure_detail(response: &RelayResponse) -> String {
    match &response.error {
        Some(error) if !error.is_empty() => error.clone(),
        _ => response
            .data
            .as_ref()
            .map_or_else(|| "null".to_owned(), |data| data.to_string()),
    }
}
