//! Player identities and the per-cycle input set.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// One of the four player stations. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl PlayerId {
    pub const COUNT: usize = 4;
    pub const ALL: [PlayerId; Self::COUNT] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Map a station number (1–4) to its id.
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(Error::UnknownPlayer(other)),
        }
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Zero-based slot, used for config arrays and the input bitmask.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    const fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Signal colour shown when this player is called up.
    pub const fn colour(self) -> Rgb {
        match self {
            Self::One => (0, 255, 255),
            Self::Two => (0, 0, 255),
            Self::Three => (0, 255, 0),
            Self::Four => (255, 200, 0),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Which players signalled since the last reset.
///
/// Always covers exactly the four players; entries are only ever flipped,
/// never removed. Stored as a bitmask so it can cross into an atomic.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSet(u8);

impl InputSet {
    const ALL_BITS: u8 = 0b1111;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub(crate) const fn player_bit(player: PlayerId) -> u8 {
        player.mask()
    }

    /// Build a set from a slice of players, e.g. in tests and replays.
    pub fn from_players(players: &[PlayerId]) -> Self {
        players.iter().fold(Self::empty(), |mut set, &p| {
            set.set(p, true);
            set
        })
    }

    pub fn get(self, player: PlayerId) -> bool {
        self.0 & player.mask() != 0
    }

    pub fn set(&mut self, player: PlayerId, signalled: bool) {
        if signalled {
            self.0 |= player.mask();
        } else {
            self.0 &= !player.mask();
        }
    }

    /// Number of players that signalled.
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Players that signalled, in station order.
    pub fn players(self) -> impl Iterator<Item = PlayerId> {
        PlayerId::ALL.into_iter().filter(move |p| self.get(*p))
    }

    /// Dense view, one flag per station.
    pub fn as_array(self) -> [bool; PlayerId::COUNT] {
        PlayerId::ALL.map(|p| self.get(p))
    }
}

impl fmt::Debug for InputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.as_array();
        write!(f, "InputSet[{} {} {} {}]", u8::from(a), u8::from(b), u8::from(c), u8::from(d))
    }
}
