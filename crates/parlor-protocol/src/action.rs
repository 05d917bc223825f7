//! Parsed forms of slash commands and button payloads.
//!
//! Button payloads look like `"<section>_<choice>"`. They are parsed once,
//! at the boundary, into [`Action`]; everything downstream matches on the
//! enum and the compiler checks that every case is handled.

use std::fmt;

use crate::{LanguageTag, ProtocolError, RoomId};

/// Payload of the disabled "waiting for host" button.
const NOOP_PAYLOAD: &str = "none";

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Choices on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    Join,
}

/// Choices inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    /// Open the lobby view.
    Play,
    /// Owner-only: begin the game.
    Start,
}

/// A button press, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `lang_<code>`
    Language(LanguageTag),
    /// `menu_create` / `menu_join`
    Menu(MenuChoice),
    /// `join_<room id>`
    Join(RoomId),
    /// `game_play` / `game_start`
    Game(GameChoice),
    /// `exit_<room id>`
    Exit(RoomId),
    /// `none`, the placeholder shown to non-owners in the lobby.
    Noop,
}

impl Action {
    /// Parses a button payload.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidAction`] for an unknown section or choice,
    /// or a room ID that is not a plain decimal number.
    pub fn parse(payload: &str) -> Result<Self, ProtocolError> {
        if payload == NOOP_PAYLOAD {
            return Ok(Self::Noop);
        }

        let invalid = || ProtocolError::InvalidAction(payload.to_string());
        let (section, choice) = payload.split_once('_').ok_or_else(invalid)?;

        match (section, choice) {
            ("lang", code) => LanguageTag::parse(code)
                .map(Self::Language)
                .map_err(|_| invalid()),
            ("menu", "create") => Ok(Self::Menu(MenuChoice::Create)),
            ("menu", "join") => Ok(Self::Menu(MenuChoice::Join)),
            ("join", id) => RoomId::from_digits(id).map(Self::Join).ok_or_else(invalid),
            ("game", "play") => Ok(Self::Game(GameChoice::Play)),
            ("game", "start") => Ok(Self::Game(GameChoice::Start)),
            ("exit", id) => RoomId::from_digits(id).map(Self::Exit).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    /// The payload a button must carry to produce this action.
    ///
    /// `Action::parse(&a.payload()) == Ok(a)` for every action.
    pub fn payload(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Language(tag) => {
                write!(f, "lang_{}", tag.as_str().to_ascii_lowercase())
            }
            Self::Menu(MenuChoice::Create) => f.write_str("menu_create"),
            Self::Menu(MenuChoice::Join) => f.write_str("menu_join"),
            Self::Join(room_id) => write!(f, "join_{room_id}"),
            Self::Game(GameChoice::Play) => f.write_str("game_play"),
            Self::Game(GameChoice::Start) => f.write_str("game_start"),
            Self::Exit(room_id) => write!(f, "exit_{room_id}"),
            Self::Noop => f.write_str(NOOP_PAYLOAD),
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A slash command, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`: welcome message and language choice.
    Start,
    /// `/create`: same as the "Create Room" menu button.
    Create,
    /// `/join`: same as the "Join Room" menu button.
    Join,
    /// `/help`
    Help,
    /// Anything else. Keeps the lower-cased name for logging.
    Unknown(String),
}

impl Command {
    /// Parses a command name. Accepts `start`, `/start` and
    /// `/start@SomeBot`, case-insensitively.
    pub fn parse(name: &str) -> Self {
        let name = name.trim().trim_start_matches('/');
        let name = name.split('@').next().unwrap_or_default();
        match name.to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "create" => Self::Create,
            "join" => Self::Join,
            "help" => Self::Help,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> Action {
        Action::parse(payload).expect("payload should parse")
    }

    #[test]
    fn test_parse_known_payloads() {
        assert_eq!(parse("menu_create"), Action::Menu(MenuChoice::Create));
        assert_eq!(parse("menu_join"), Action::Menu(MenuChoice::Join));
        assert_eq!(parse("join_1000"), Action::Join(RoomId(1000)));
        assert_eq!(parse("game_play"), Action::Game(GameChoice::Play));
        assert_eq!(parse("game_start"), Action::Game(GameChoice::Start));
        assert_eq!(parse("exit_1001"), Action::Exit(RoomId(1001)));
        assert_eq!(parse("none"), Action::Noop);
    }

    #[test]
    fn test_parse_language_uppercases_code() {
        let Action::Language(tag) = parse("lang_es") else {
            panic!("expected a language action");
        };
        assert_eq!(tag.as_str(), "ES");
    }

    #[test]
    fn test_parse_unknown_section_is_invalid() {
        assert!(matches!(
            Action::parse("shop_buy"),
            Err(ProtocolError::InvalidAction(p)) if p == "shop_buy"
        ));
    }

    #[test]
    fn test_parse_without_separator_is_invalid() {
        assert!(Action::parse("menu").is_err());
        assert!(Action::parse("").is_err());
    }

    #[test]
    fn test_parse_join_rejects_non_decimal_ids() {
        assert!(Action::parse("join_abc").is_err());
        assert!(Action::parse("join_-1").is_err());
        assert!(Action::parse("join_+5").is_err());
        assert!(Action::parse("join_").is_err());
        assert!(Action::parse("join_99999999999999999999999").is_err());
    }

    #[test]
    fn test_payload_parses_back_to_same_action() {
        let actions = [
            Action::Language(LanguageTag::parse("en").unwrap()),
            Action::Menu(MenuChoice::Create),
            Action::Join(RoomId(1234)),
            Action::Game(GameChoice::Start),
            Action::Exit(RoomId(1)),
            Action::Noop,
        ];
        for action in actions {
            assert_eq!(parse(&action.payload()), action);
        }
    }

    #[test]
    fn test_command_parse_strips_slash_and_bot_suffix() {
        assert_eq!(Command::parse("/start"), Command::Start);
        assert_eq!(Command::parse("start"), Command::Start);
        assert_eq!(Command::parse("/Create@ParlorBot"), Command::Create);
        assert_eq!(Command::parse("/join"), Command::Join);
        assert_eq!(
            Command::parse("/dance"),
            Command::Unknown("dance".into())
        );
    }
}
