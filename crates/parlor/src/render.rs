//! Turns engine outcomes into replies.
//!
//! Everything the user reads lives in this file. The engine decides what
//! happened; this module decides how it looks and where it lands
//! (a new message, an edit of the pressed message, or an alert).

use parlor_protocol::{
    Action, Button, Delivery, GameChoice, MenuChoice, Reply, RoomId,
};
use parlor_room::{Room, RoomError};

use crate::lobby::{JoinOutcome, LobbyView};
use crate::LobbyError;

const WELCOME: &str = "👋 Welcome to Parlor!\nChoose your language / Elige tu idioma:";
const MAIN_MENU: &str = "Main Menu: What would you like to do?";
const ASK_ROOM_ID: &str = "Please send the Room ID to join.";
const HELP: &str = "/start - choose a language and open the menu\n\
                    /create - create a new room\n\
                    /join - join a room by its ID";

// ---------------------------------------------------------------------------
// Keyboards
// ---------------------------------------------------------------------------

fn button(label: &str, action: Action) -> Button {
    Button::new(label, action.payload())
}

fn language_keyboard() -> Vec<Vec<Button>> {
    vec![vec![
        Button::new("🇬🇧 English", "lang_en"),
        Button::new("🇪🇸 Español", "lang_es"),
    ]]
}

fn menu_keyboard() -> Vec<Vec<Button>> {
    vec![
        vec![button("➕ Create Room", Action::Menu(MenuChoice::Create))],
        vec![button("🚪 Join Room", Action::Menu(MenuChoice::Join))],
    ]
}

/// Rewrites a callback-style reply as a new message, for the same screen
/// reached through a slash command (there is no pressed message to edit).
pub(crate) fn standalone(mut reply: Reply) -> Reply {
    if matches!(reply.delivery, Delivery::Edit | Delivery::Alert) {
        reply.delivery = Delivery::Send;
    }
    reply
}

fn players(room: &Room) -> String {
    if room.members().is_empty() {
        return "(nobody yet)".to_string();
    }
    room.member_list()
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

pub(crate) fn welcome() -> Reply {
    Reply::send(WELCOME).with_keyboard(language_keyboard())
}

pub(crate) fn main_menu() -> Reply {
    Reply::edit(MAIN_MENU).with_keyboard(menu_keyboard())
}

pub(crate) fn ask_room_id() -> Reply {
    Reply::edit(ASK_ROOM_ID)
}

pub(crate) fn help() -> Reply {
    Reply::send(HELP)
}

pub(crate) fn unknown_command() -> Reply {
    Reply::send("Unknown command. Type /start to begin.")
}

/// For payloads that no longer parse, e.g. a button from an old release.
pub(crate) fn stale_button() -> Reply {
    Reply::alert("This button is no longer valid. Type /start.")
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Room creation always answers with a new message so the room ID stays
/// visible in the chat.
pub(crate) fn created(result: Result<RoomId, LobbyError>) -> Reply {
    match result {
        Ok(room_id) => Reply::send(format!(
            "🏠 Room created! Share this ID with your friends.\nID: `{room_id}`"
        ))
        .markdown()
        .with_keyboard(vec![vec![button("🚀 Join Room", Action::Join(room_id))]]),
        Err(LobbyError::AlreadyHasRoom(room_id)) => Reply::send(format!(
            "⚠️ You already have a room assigned (ID {room_id})."
        )),
        Err(LobbyError::Room(RoomError::CapacityExceeded { .. })) => {
            Reply::send("😕 No rooms available right now. Try again later.")
        }
        Err(e) => standalone(failure(e)),
    }
}

/// Join by typed ID: every outcome is a new message. A fresh join offers
/// an exit.
pub(crate) fn text_join(result: Result<JoinOutcome, LobbyError>) -> Reply {
    match result {
        Ok(JoinOutcome::Joined(room)) => Reply::send(format!(
            "✅ Joined! Room: {}\nPlayers: {}",
            room.id(),
            players(&room)
        ))
        .with_keyboard(vec![vec![button("🚪 Exit", Action::Exit(room.id()))]]),
        Ok(JoinOutcome::AlreadyMember(_)) => {
            Reply::send("You are already in this room!")
        }
        Err(LobbyError::InvalidInput(_)) => {
            Reply::send("❌ Invalid ID. Please send numbers only.")
        }
        Err(LobbyError::Room(RoomError::NotFound(_))) => {
            Reply::send("❌ Room not found. Try again or type /start.")
        }
        Err(e) => standalone(failure(e)),
    }
}

/// Join by button: a fresh join edits the message and offers the lobby;
/// a repeat press only gets an alert.
pub(crate) fn button_join(result: Result<JoinOutcome, LobbyError>) -> Reply {
    match result {
        Ok(JoinOutcome::Joined(room)) => Reply::edit(format!(
            "✅ Joined Room {}.\nPlayers: {}\nClick below to enter the lobby.",
            room.id(),
            players(&room)
        ))
        .with_keyboard(vec![vec![button(
            "🎮 Play",
            Action::Game(GameChoice::Play),
        )]]),
        Ok(JoinOutcome::AlreadyMember(_)) => Reply::alert("Already in!"),
        Err(LobbyError::Room(RoomError::NotFound(_))) => {
            Reply::edit("❌ Room no longer exists.")
        }
        Err(e) => failure(e),
    }
}

pub(crate) fn left(room_id: RoomId, result: Result<(), LobbyError>) -> Reply {
    match result {
        Ok(()) => Reply::edit(format!("🚪 You left room {room_id}.\n{MAIN_MENU}"))
            .with_keyboard(menu_keyboard()),
        Err(LobbyError::Room(RoomError::NotMember(..) | RoomError::NotFound(_))) => {
            Reply::alert("You are not in this room.")
        }
        Err(e) => failure(e),
    }
}

// ---------------------------------------------------------------------------
// Lobby / game
// ---------------------------------------------------------------------------

/// The owner gets the start button, everyone else a placeholder.
pub(crate) fn lobby(result: Result<LobbyView, LobbyError>) -> Reply {
    match result {
        Ok(view) => {
            let action = if view.can_start {
                button("🔥 Begin Play", Action::Game(GameChoice::Start))
            } else {
                button("⌛ Waiting for host...", Action::Noop)
            };
            Reply::edit(format!(
                "Lobby - Room {}\nPlayers: {}",
                view.room.id(),
                players(&view.room)
            ))
            .with_keyboard(vec![vec![action]])
        }
        Err(e) => failure(e),
    }
}

pub(crate) fn started(result: Result<Room, LobbyError>) -> Reply {
    match result {
        Ok(_) => Reply::edit("🎲 Game started! Check your private messages for roles."),
        Err(LobbyError::Room(RoomError::NotOwner(..))) => {
            Reply::alert("Only the host can start the game!")
        }
        Err(LobbyError::Room(RoomError::AlreadyStarted(_))) => {
            Reply::alert("The game has already started.")
        }
        Err(e) => failure(e),
    }
}

/// Fallback for refusals a screen does not word specially.
fn failure(error: LobbyError) -> Reply {
    match error {
        LobbyError::NotInRoom => Reply::alert("You are not in a room yet. Join one first."),
        LobbyError::Room(RoomError::NotFound(_)) => {
            Reply::alert("❌ That room no longer exists.")
        }
        other => {
            tracing::warn!(error = %other, "unexpected lobby refusal");
            Reply::alert("Something went wrong. Type /start to begin again.")
        }
    }
}
