//! Core protocol types: identities, inbound updates, outbound replies,
//! and the bridge frame that carries them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier the chat platform assigns to a user.
///
/// Newtype over `u64` so a `UserId` can never be passed where a
/// [`RoomId`] is expected. Serialized as the bare number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user{}", self.0)
    }
}

/// Numeric identifier of a room.
///
/// Displayed as the bare number: users read it in a message and type it
/// back to join, so no prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl RoomId {
    /// Parses a room ID the way users are told to type it: ASCII digits
    /// only, no sign, no whitespace. `None` on overflow too.
    pub fn from_digits(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok().map(Self)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The display identifier that keys room membership.
///
/// Resolved once per update by [`Caller::handle`]. Two updates with the
/// same handle are the same member, even if they come from different
/// user IDs (and a user who renames themselves becomes a new member).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub String);

impl Handle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Upper-cased language code chosen from the welcome keyboard.
///
/// Advisory only: it is stored on the session but no reply text
/// branches on it yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parses a code such as `en` or `es` into `EN` / `ES`.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidLanguage`] if the code is empty or contains
    /// anything but ASCII letters and digits.
    pub fn parse(code: &str) -> Result<Self, ProtocolError> {
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(ProtocolError::InvalidLanguage(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user behind an update, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl Caller {
    /// A caller with only an ID. Mostly handy in tests.
    pub fn new(id: u64) -> Self {
        Self {
            id: UserId(id),
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn with_first_name(mut self, first_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    /// Resolves the membership handle.
    ///
    /// `@username` when the platform has one, otherwise the first name.
    /// Users with neither fall back to their numeric ID so membership
    /// still has a stable key.
    pub fn handle(&self) -> Handle {
        let non_empty = |s: &Option<String>| {
            s.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
        };

        if let Some(username) = non_empty(&self.username) {
            return Handle(format!("@{username}"));
        }
        if let Some(name) = non_empty(&self.first_name) {
            return Handle(name);
        }
        Handle(self.id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// What the user did.
///
/// Externally tagged, so a bridge sends `{"Text": "1000"}` or
/// `{"Callback": "game_start"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateKind {
    /// A slash command, e.g. `/start`.
    Command(String),
    /// A button press carrying the button's payload.
    Callback(String),
    /// A plain message.
    Text(String),
}

/// One inbound event from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Bridge-assigned ID, echoed back on the matching [`Frame::Reply`].
    pub id: u64,
    pub from: Caller,
    pub kind: UpdateKind,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// An inline button: the label the user sees and the payload the
/// platform sends back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: &str, payload: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            payload: payload.into(),
        }
    }
}

/// How the reply text should be parsed by the platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
pub enum Markup {
    #[default]
    Plain,
    Markdown,
}

/// Where the reply lands on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// A new message in the chat.
    Send,
    /// Replaces the message whose button was pressed.
    Edit,
    /// Answers the button press with a pop-up alert; the displayed
    /// message is left alone.
    Alert,
    /// Answers the button press silently. `text` is empty.
    Ack,
}

/// The rendering instruction returned by the engine for one update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// Rows of buttons, top to bottom.
    pub keyboard: Option<Vec<Vec<Button>>>,
    #[serde(default)]
    pub markup: Markup,
    pub delivery: Delivery,
}

impl Reply {
    pub fn send(text: impl Into<String>) -> Self {
        Self::new(text.into(), Delivery::Send)
    }

    pub fn edit(text: impl Into<String>) -> Self {
        Self::new(text.into(), Delivery::Edit)
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(text.into(), Delivery::Alert)
    }

    pub fn ack() -> Self {
        Self::new(String::new(), Delivery::Ack)
    }

    fn new(text: String, delivery: Delivery) -> Self {
        Self {
            text,
            keyboard: None,
            markup: Markup::Plain,
            delivery,
        }
    }

    /// Attaches a keyboard, one inner `Vec` per row.
    pub fn with_keyboard(mut self, rows: Vec<Vec<Button>>) -> Self {
        self.keyboard = Some(rows);
        self
    }

    pub fn markdown(mut self) -> Self {
        self.markup = Markup::Markdown;
        self
    }

    /// Every button on the keyboard, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.keyboard.iter().flatten().flatten()
    }
}

// ---------------------------------------------------------------------------
// Frame: the bridge wire format
// ---------------------------------------------------------------------------

/// A message between a platform bridge and the gateway.
///
/// Internally tagged: `{"type": "Hello", "version": 1, "token": "..."}`.
///
/// ```text
/// bridge                          gateway
///   │── Hello{version, token} ──────→│
///   │←───────────── Welcome{version} ─│
///   │── Update{update} ─────────────→│
///   │←──── Reply{update_id, reply} ───│   (reply is null when nothing to say)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Frame {
    /// Bridge → gateway, first frame. `token` is the bot access token.
    Hello { version: u32, token: String },

    /// Gateway → bridge: handshake accepted.
    Welcome { version: u32 },

    /// Bridge → gateway: one user event.
    Update { update: Update },

    /// Gateway → bridge: what to render for `update_id`.
    Reply {
        update_id: u64,
        reply: Option<Reply>,
    },

    /// Gateway → bridge. `code` follows HTTP conventions.
    Error { code: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_prefers_username() {
        let caller = Caller::new(1).with_username("alice").with_first_name("Alice");
        assert_eq!(caller.handle(), Handle::from("@alice"));
    }

    #[test]
    fn test_handle_falls_back_to_first_name() {
        let caller = Caller::new(1).with_first_name("Bob");
        assert_eq!(caller.handle(), Handle::from("Bob"));
    }

    #[test]
    fn test_handle_empty_username_uses_first_name() {
        let caller = Caller::new(1).with_username("").with_first_name("Bob");
        assert_eq!(caller.handle(), Handle::from("Bob"));
    }

    #[test]
    fn test_handle_without_names_uses_user_id() {
        assert_eq!(Caller::new(77).handle(), Handle::from("user77"));
    }

    #[test]
    fn test_room_id_from_digits_accepts_digits_only() {
        assert_eq!(RoomId::from_digits("0042"), Some(RoomId(42)));
        assert_eq!(RoomId::from_digits(" 42"), None);
        assert_eq!(RoomId::from_digits("4.2"), None);
        assert_eq!(RoomId::from_digits("abc"), None);
    }

    #[test]
    fn test_room_id_displays_bare_number() {
        assert_eq!(RoomId(1042).to_string(), "1042");
    }

    #[test]
    fn test_language_tag_parse_uppercases() {
        let tag = LanguageTag::parse("es").unwrap();
        assert_eq!(tag.as_str(), "ES");
    }

    #[test]
    fn test_language_tag_parse_rejects_empty_and_symbols() {
        assert!(matches!(
            LanguageTag::parse(""),
            Err(ProtocolError::InvalidLanguage(_))
        ));
        assert!(matches!(
            LanguageTag::parse("e-s"),
            Err(ProtocolError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn test_reply_buttons_flattens_rows() {
        let reply = Reply::edit("menu").with_keyboard(vec![
            vec![Button::new("a", "lang_en"), Button::new("b", "lang_es")],
            vec![Button::new("c", "menu_join")],
        ]);
        let payloads: Vec<_> =
            reply.buttons().map(|b| b.payload.as_str()).collect();
        assert_eq!(payloads, ["lang_en", "lang_es", "menu_join"]);
    }

    #[test]
    fn test_frame_uses_internal_type_tag() {
        let json = serde_json::to_value(Frame::Welcome { version: 1 }).unwrap();
        assert_eq!(json["type"], "Welcome");
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn test_caller_missing_optional_fields_deserialize_as_none() {
        let caller: Caller = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(caller, Caller::new(5));
    }
}
