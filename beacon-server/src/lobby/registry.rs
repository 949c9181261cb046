use std::collections::HashMap;

use beacon_core::{LobbyCode, PeerId};
use tracing::debug;

use crate::lobby::Lobby;
use crate::protocol::RelayError;

/// Owns every active lobby and enforces the membership ceiling.
pub struct LobbyRegistry {
    lobbies: HashMap<LobbyCode, Lobby>,
    max_members: usize,
}

impl LobbyRegistry {
    pub fn new(max_members: usize) -> Self {
        Self {
            lobbies: HashMap::new(),
            max_members,
        }
    }

    /// Register an empty lobby under a freshly drawn code, re-rolled until
    /// it misses every active lobby.
    pub fn create(&mut self) -> LobbyCode {
        let mut rng = rand::rng();
        let code = loop {
            let candidate = LobbyCode::generate(&mut rng);
            if !self.lobbies.contains_key(&candidate) {
                break candidate;
            }
        };
        self.lobbies.insert(code.clone(), Lobby::new(code.clone()));
        debug!(%code, "lobby created");
        code
    }

    /// Add `peer` to the lobby at `code`. Fails without mutating anything
    /// when the code names no active lobby or the lobby is at its ceiling.
    pub fn join(&mut self, code: &LobbyCode, peer: PeerId) -> Result<(), RelayError> {
        let lobby = self
            .lobbies
            .get_mut(code)
            .ok_or(RelayError::InvalidLobbyReference)?;
        if lobby.len() >= self.max_members {
            return Err(RelayError::LobbyFull);
        }
        lobby.insert(peer);
        Ok(())
    }

    /// Remove `peer` from the lobby at `code`, deleting the lobby the
    /// moment it empties. Returns true when the lobby was deleted.
    pub fn leave(&mut self, code: &LobbyCode, peer: &PeerId) -> bool {
        let Some(lobby) = self.lobbies.get_mut(code) else {
            return false;
        };
        lobby.remove(peer);
        if lobby.is_empty() {
            self.lobbies.remove(code);
            debug!(%code, "lobby emptied and removed");
            return true;
        }
        false
    }

    pub fn get(&self, code: &LobbyCode) -> Option<&Lobby> {
        self.lobbies.get(code)
    }

    pub fn contains(&self, code: &LobbyCode) -> bool {
        self.lobbies.contains_key(code)
    }

    /// Members of the lobby at `code`, empty when no such lobby exists.
    pub fn members(&self, code: &LobbyCode) -> &[PeerId] {
        self.lobbies.get(code).map(Lobby::members).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }
}
