use beacon_core::{LobbyCode, PeerId};

/// A code-addressed group of peers eligible to signal each other.
///
/// Membership is kept in insertion order; introductions iterate it.
pub struct Lobby {
    code: LobbyCode,
    members: Vec<PeerId>,
}

impl Lobby {
    pub(crate) fn new(code: LobbyCode) -> Self {
        Self {
            code,
            members: Vec::new(),
        }
    }

    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    pub fn members(&self) -> &[PeerId] {
        &self.members
    }

    pub fn contains(&self, id: &PeerId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn insert(&mut self, id: PeerId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: &PeerId) {
        self.members.retain(|m| m != id);
    }
}
