//! Joystick discovery and selection
//!
//! Devices are identified by their GUID, the 16-byte identifier SDL and
//! gilrs derive from the bus, vendor, product and version of a device. It
//! is printed as 32 lowercase hex characters, which is also the form the
//! `--joystick` flag accepts.

use gilrs::{GamepadId, Gilrs};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GuidParseError {
    #[error("Expected 32 hex characters, got {0}")]
    Length(usize),

    #[error("Invalid hex character {0:?}")]
    InvalidCharacter(char),
}

impl FromStr for Guid {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, .. } => {
                GuidParseError::InvalidCharacter(c)
            }
            _ => GuidParseError::Length(s.chars().count()),
        })?;

        Ok(Self(bytes))
    }
}

/// What the player sees of an attached device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoystickInfo {
    pub name: String,
    pub guid: Guid,
}

impl fmt::Display for JoystickInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Joystick {}, GUID: {}", self.name, self.guid)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("There are no joysticks plugged in. Dance-cat-to-mouse requires a joystick.")]
    NoJoysticks,

    #[error(
        "No joystick with GUID {requested} is plugged in; available: {}",
        format_available(.available)
    )]
    UnknownGuid {
        requested: Guid,
        available: Vec<Guid>,
    },
}

fn format_available(available: &[Guid]) -> String {
    available
        .iter()
        .map(Guid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the joystick to play with.
///
/// Returns the index into `joysticks`: the one matching `requested`, or the
/// first one when nothing was requested.
pub fn select(
    joysticks: &[JoystickInfo],
    requested: Option<&Guid>,
) -> Result<usize, SelectionError> {
    if joysticks.is_empty() {
        return Err(SelectionError::NoJoysticks);
    }

    match requested {
        None => Ok(0),
        Some(guid) => joysticks
            .iter()
            .position(|joystick| joystick.guid == *guid)
            .ok_or_else(|| SelectionError::UnknownGuid {
                requested: *guid,
                available: joysticks.iter().map(|joystick| joystick.guid).collect(),
            }),
    }
}

/// Enumerate the connected joysticks in the order gilrs reports them
pub fn enumerate(gilrs: &Gilrs) -> Vec<(GamepadId, JoystickInfo)> {
    let joysticks: Vec<(GamepadId, JoystickInfo)> = gilrs
        .gamepads()
        .map(|(id, gamepad)| {
            (
                id,
                JoystickInfo {
                    name: gamepad.name().to_string(),
                    guid: Guid::from_bytes(gamepad.uuid()),
                },
            )
        })
        .collect();

    info!("Found {} joysticks", joysticks.len());
    for (idx, (id, joystick)) in joysticks.iter().enumerate() {
        debug!("  [{}] ID: {}, {}", idx, id, joystick);
    }

    joysticks
}

/// The `--list-joysticks` output, one line per device
pub fn listing(joysticks: &[JoystickInfo]) -> Vec<String> {
    joysticks.iter().map(JoystickInfo::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joystick(name: &str, last_byte: u8) -> JoystickInfo {
        let mut bytes = [
            0x03, 0x00, 0x00, 0x00, 0x79, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x10, 0x01,
            0x00, 0x00,
        ];
        bytes[15] = last_byte;
        JoystickInfo {
            name: name.to_string(),
            guid: Guid::from_bytes(bytes),
        }
    }

    #[test]
    fn guid_displays_as_lowercase_hex() {
        let guid = joystick("mat", 0xab).guid;
        assert_eq!(guid.to_string(), "030000007900000011000000100100ab");
    }

    #[test]
    fn guid_parsing_is_case_insensitive() {
        let guid = joystick("mat", 0xab).guid;
        assert_eq!("030000007900000011000000100100AB".parse::<Guid>(), Ok(guid));
        assert_eq!(guid.to_string().parse::<Guid>(), Ok(guid));
        assert_eq!(" 030000007900000011000000100100ab\n".parse::<Guid>(), Ok(guid));
    }

    #[test]
    fn guid_parsing_rejects_garbage() {
        assert_eq!("abc".parse::<Guid>(), Err(GuidParseError::Length(3)));
        assert_eq!(
            "030000007900000011000000100100abcd".parse::<Guid>(),
            Err(GuidParseError::Length(34))
        );
        assert_eq!(
            "03000000790000001100000010010zzz".parse::<Guid>(),
            Err(GuidParseError::InvalidCharacter('z'))
        );
    }

    #[test]
    fn empty_listing_when_nothing_is_attached() {
        assert!(listing(&[]).is_empty());
    }

    #[test]
    fn listing_shows_name_and_guid() {
        assert_eq!(
            listing(&[joystick("Dance Mat", 1)]),
            vec!["Joystick Dance Mat, GUID: 03000000790000001100000010010001".to_string()]
        );
    }

    #[test]
    fn first_joystick_is_the_default() {
        let joysticks = [joystick("a", 1), joystick("b", 2)];
        assert_eq!(select(&joysticks, None), Ok(0));
    }

    #[test]
    fn requested_guid_selects_that_joystick() {
        let joysticks = [joystick("a", 1), joystick("b", 2), joystick("c", 3)];
        let wanted = joysticks[2].guid;
        assert_eq!(select(&joysticks, Some(&wanted)), Ok(2));
    }

    #[test]
    fn unknown_guid_is_an_error() {
        let joysticks = [joystick("a", 1)];
        let missing = joystick("x", 9).guid;
        let err = select(&joysticks, Some(&missing)).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownGuid {
                requested: missing,
                available: vec![joysticks[0].guid],
            }
        );
        assert!(err.to_string().contains("03000000790000001100000010010001"));
    }

    #[test]
    fn no_joysticks_is_an_error() {
        assert_eq!(select(&[], None), Err(SelectionError::NoJoysticks));
    }
}
