//! The lobby engine: join protocol and room state machine.
//!
//! [`Lobby`] owns the room registry and the session store and is the
//! only thing that mutates them. It is shared across tasks as
//! `Arc<Lobby>`; there is no global state.
//!
//! # Locking
//!
//! Both stores sit behind their own `tokio::sync::Mutex`. Every operation
//! takes the registry lock first and the session lock second, and holds
//! both until its mutation is complete. That gives the two atomicity
//! guarantees the engine relies on:
//!
//! - allocate-and-insert of a new room is one step, so two concurrent
//!   creations never get the same number;
//! - check-and-append of a member is one step, so concurrent joins by the
//!   same handle collapse into one membership.
//!
//! Replies are rendered after the locks are dropped.

use parlor_protocol::{
    Action, Caller, Command, GameChoice, LanguageTag, MenuChoice, Reply,
    RoomId, Update, UpdateKind,
};
use parlor_room::{MemberAdded, Room, RoomConfig, RoomError, RoomRegistry};
use parlor_session::{InputMode, Role, Session, SessionStore};
use tokio::sync::Mutex;

use crate::render;
use crate::roles::{DeferredRoles, RoleAssigner};
use crate::LobbyError;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What a join attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The caller was added. Carries the room as it is after the join.
    Joined(Room),
    /// The caller's handle was already in the room. Nothing changed.
    AlreadyMember(RoomId),
}

/// The lobby as one particular member sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyView {
    pub room: Room,
    /// Whether this viewer may start the game. Computed from the room's
    /// owner on every request, never cached.
    pub can_start: bool,
}

// ---------------------------------------------------------------------------
// Lobby
// ---------------------------------------------------------------------------

/// Rooms, sessions, and the rules that connect them.
pub struct Lobby<R: RoleAssigner = DeferredRoles> {
    rooms: Mutex<RoomRegistry>,
    sessions: Mutex<SessionStore>,
    roles: R,
}

impl Lobby {
    /// A lobby whose game start does not assign roles.
    pub fn new(config: RoomConfig) -> Self {
        Self::with_roles(config, DeferredRoles)
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

impl<R: RoleAssigner> Lobby<R> {
    pub fn with_roles(config: RoomConfig, roles: R) -> Self {
        Self {
            rooms: Mutex::new(RoomRegistry::new(config)),
            sessions: Mutex::new(SessionStore::new()),
            roles,
        }
    }

    // =====================================================================
    // Update dispatch
    // =====================================================================

    /// Classifies one update, runs the matching operation, and renders
    /// the result.
    ///
    /// Returns `None` when there is nothing to say: free text from a user
    /// who was not asked for a room ID.
    pub async fn handle(&self, update: Update) -> Option<Reply> {
        let caller = &update.from;
        match update.kind {
            UpdateKind::Command(name) => {
                Some(self.on_command(caller, Command::parse(&name)).await)
            }
            UpdateKind::Callback(payload) => match Action::parse(&payload) {
                Ok(action) => Some(self.on_action(caller, action).await),
                Err(e) => {
                    tracing::debug!(user = %caller.id, error = %e, "bad callback");
                    Some(render::stale_button())
                }
            },
            UpdateKind::Text(text) => {
                match self.join_by_text(caller, &text).await {
                    Err(LobbyError::NotAwaitingRoomId) => None,
                    result => Some(render::text_join(result)),
                }
            }
        }
    }

    async fn on_command(&self, caller: &Caller, command: Command) -> Reply {
        match command {
            Command::Start => {
                self.welcome(caller).await;
                render::welcome()
            }
            Command::Create => render::created(self.create_room(caller).await),
            Command::Join => {
                self.await_room_id(caller).await;
                render::standalone(render::ask_room_id())
            }
            Command::Help => render::help(),
            Command::Unknown(name) => {
                tracing::debug!(user = %caller.id, command = %name, "unknown command");
                render::unknown_command()
            }
        }
    }

    async fn on_action(&self, caller: &Caller, action: Action) -> Reply {
        match action {
            Action::Language(tag) => {
                self.select_language(caller, tag).await;
                render::main_menu()
            }
            Action::Menu(MenuChoice::Create) => {
                render::created(self.create_room(caller).await)
            }
            Action::Menu(MenuChoice::Join) => {
                self.await_room_id(caller).await;
                render::ask_room_id()
            }
            Action::Join(room_id) => {
                render::button_join(self.join_by_button(caller, room_id).await)
            }
            Action::Game(GameChoice::Play) => {
                render::lobby(self.lobby_view(caller).await)
            }
            Action::Game(GameChoice::Start) => {
                render::started(self.start_game(caller).await)
            }
            Action::Exit(room_id) => {
                render::left(room_id, self.leave_room(caller, room_id).await)
            }
            Action::Noop => Reply::ack(),
        }
    }

    // =====================================================================
    // Menu operations
    // =====================================================================

    /// First contact: makes sure the user has a session.
    pub async fn welcome(&self, caller: &Caller) {
        self.sessions.lock().await.get_or_create(caller.id);
    }

    /// Records the user's language. Only the first choice is kept;
    /// returns whether this call set it.
    pub async fn select_language(&self, caller: &Caller, tag: LanguageTag) -> bool {
        self.sessions.lock().await.set_language(caller.id, tag)
    }

    /// Creates a room owned by the caller.
    ///
    /// One owned room per user: the session is checked before the
    /// allocator runs, so a refused request allocates nothing.
    ///
    /// # Errors
    /// - [`LobbyError::AlreadyHasRoom`]
    /// - [`LobbyError::Room`] with `CapacityExceeded`
    pub async fn create_room(&self, caller: &Caller) -> Result<RoomId, LobbyError> {
        let mut rooms = self.rooms.lock().await;
        let mut sessions = self.sessions.lock().await;

        if let Some(existing) = sessions.get_or_create(caller.id).owned_room {
            tracing::debug!(user = %caller.id, room_id = %existing, "already owns a room");
            return Err(LobbyError::AlreadyHasRoom(existing));
        }

        let room_id = rooms.create_room(caller.id)?.id();
        sessions.set_owned_room(caller.id, room_id);
        Ok(room_id)
    }

    /// Puts the caller in "send me a room ID" mode.
    ///
    /// Unconditional: it does not matter whether they are already in a
    /// room.
    pub async fn await_room_id(&self, caller: &Caller) {
        self.sessions
            .lock()
            .await
            .set_input_mode(caller.id, InputMode::AwaitingRoomId);
    }

    // =====================================================================
    // Join protocol
    // =====================================================================

    /// Joins the room whose number the caller typed.
    ///
    /// Only valid in [`InputMode::AwaitingRoomId`]. The mode is cleared
    /// on a fresh join and kept on every other outcome, so the user can
    /// retry.
    ///
    /// # Errors
    /// - [`LobbyError::NotAwaitingRoomId`]
    /// - [`LobbyError::InvalidInput`]: not a plain decimal number
    /// - [`LobbyError::Room`] with `NotFound`
    pub async fn join_by_text(
        &self,
        caller: &Caller,
        text: &str,
    ) -> Result<JoinOutcome, LobbyError> {
        let mut rooms = self.rooms.lock().await;
        let mut sessions = self.sessions.lock().await;

        if !sessions.get_or_create(caller.id).is_awaiting_room_id() {
            return Err(LobbyError::NotAwaitingRoomId);
        }

        let room_id = RoomId::from_digits(text.trim()).ok_or_else(|| {
            tracing::debug!(user = %caller.id, input = text, "invalid room id");
            LobbyError::InvalidInput(text.to_string())
        })?;

        let outcome = join_locked(&mut rooms, &mut sessions, caller, room_id)?;
        if matches!(outcome, JoinOutcome::Joined(_)) {
            sessions.clear_input_mode(caller.id);
        }
        Ok(outcome)
    }

    /// Joins a room from a "Join Room" button. The ID comes from the
    /// button payload, so there is nothing to validate, and the input
    /// mode is left alone.
    ///
    /// # Errors
    /// [`LobbyError::Room`] with `NotFound`.
    pub async fn join_by_button(
        &self,
        caller: &Caller,
        room_id: RoomId,
    ) -> Result<JoinOutcome, LobbyError> {
        let mut rooms = self.rooms.lock().await;
        let mut sessions = self.sessions.lock().await;
        join_locked(&mut rooms, &mut sessions, caller, room_id)
    }

    /// Takes the caller's handle out of their current room and clears
    /// their membership. Ownership is unaffected.
    ///
    /// Only the room the caller's own session is in can be left. Another
    /// user may hold the same handle there, and that membership is not
    /// the caller's to remove.
    ///
    /// # Errors
    /// [`LobbyError::Room`] with `NotFound` or `NotMember`.
    pub async fn leave_room(
        &self,
        caller: &Caller,
        room_id: RoomId,
    ) -> Result<(), LobbyError> {
        let mut rooms = self.rooms.lock().await;
        let mut sessions = self.sessions.lock().await;

        rooms.lookup(room_id)?;
        let handle = caller.handle();
        if sessions.get(&caller.id).and_then(|s| s.current_room()) != Some(room_id) {
            tracing::debug!(user = %caller.id, %room_id, "leave refused: not this user's room");
            return Err(RoomError::NotMember(room_id, handle).into());
        }

        rooms.remove_member(room_id, &handle)?;
        sessions.clear_membership(caller.id);
        Ok(())
    }

    // =====================================================================
    // Lobby / game
    // =====================================================================

    /// The caller's current room (or, failing that, the room they own),
    /// with ownership checked against the room's live owner.
    ///
    /// # Errors
    /// [`LobbyError::NotInRoom`].
    pub async fn lobby_view(&self, caller: &Caller) -> Result<LobbyView, LobbyError> {
        let rooms = self.rooms.lock().await;
        let sessions = self.sessions.lock().await;

        let room_id = focus_room(&sessions, caller)?;
        let room = rooms.lookup(room_id)?;

        Ok(LobbyView {
            room: room.clone(),
            can_start: room.is_owner(caller.id),
        })
    }

    /// Starts the game in the caller's current room, or the room they own
    /// if they have not joined one. Owner only.
    ///
    /// On success the [`RoleAssigner`] is handed the started room.
    ///
    /// # Errors
    /// - [`LobbyError::NotInRoom`]
    /// - [`LobbyError::Room`] with `NotOwner` (room unchanged) or
    ///   `AlreadyStarted`
    pub async fn start_game(&self, caller: &Caller) -> Result<Room, LobbyError> {
        let room = {
            let mut rooms = self.rooms.lock().await;
            let sessions = self.sessions.lock().await;

            let room_id = focus_room(&sessions, caller)?;
            rooms.start(room_id, caller.id)?.clone()
        };

        self.roles.assign_roles(&room);
        Ok(room)
    }

    // =====================================================================
    // Inspection
    // =====================================================================

    /// A copy of a room, if it exists.
    pub async fn room(&self, room_id: RoomId) -> Option<Room> {
        self.rooms.lock().await.get(room_id).cloned()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// A copy of the user's session, if they have one.
    pub async fn session(&self, caller: &Caller) -> Option<Session> {
        self.sessions.lock().await.get(&caller.id).cloned()
    }
}

/// The room a lobby or start action refers to: where the caller is,
/// else the room they created. Owners need not join their own room.
fn focus_room(sessions: &SessionStore, caller: &Caller) -> Result<RoomId, LobbyError> {
    sessions
        .get(&caller.id)
        .and_then(|s| s.current_room().or(s.owned_room))
        .ok_or(LobbyError::NotInRoom)
}

/// The shared core of both join paths. Caller holds both locks.
fn join_locked(
    rooms: &mut RoomRegistry,
    sessions: &mut SessionStore,
    caller: &Caller,
    room_id: RoomId,
) -> Result<JoinOutcome, LobbyError> {
    match rooms.add_member(room_id, caller.handle())? {
        MemberAdded::AlreadyMember => Ok(JoinOutcome::AlreadyMember(room_id)),
        MemberAdded::Joined => {
            let room = rooms.lookup(room_id)?;
            let role = if room.is_owner(caller.id) {
                Role::Owner
            } else {
                Role::Participant
            };
            sessions.set_membership(caller.id, room_id, role);
            Ok(JoinOutcome::Joined(room.clone()))
        }
    }
}
