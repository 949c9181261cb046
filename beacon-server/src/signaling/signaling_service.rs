use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::ServerConfig;
use crate::relay::RelayCommand;

/// Shared axum state: the way into the relay loop plus the configuration
/// the per-connection plumbing needs.
#[derive(Clone)]
pub struct SignalingService {
    relay_tx: mpsc::Sender<RelayCommand>,
    config: Arc<ServerConfig>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>, config: Arc<ServerConfig>) -> Self {
        Self { relay_tx, config }
    }

    pub fn relay_tx(&self) -> &mpsc::Sender<RelayCommand> {
        &self.relay_tx
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
