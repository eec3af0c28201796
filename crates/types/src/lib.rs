//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by the rules core and by hosts.
//! All types are plain data with no behavior beyond parsing and small state
//! transitions, so they can be copied freely between a logic thread and a
//! rendering thread.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn position**: column 3, row 0 (top-left corner of the 4x4 shape frame)
//!
//! # Cells
//!
//! A [`Cell`] is a `u8`: [`EMPTY`] (0) is a free cell, any positive value is the
//! color index of the piece that occupies it (see [`PieceKind::color_index`]).
//!
//! # Pacing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Fall interval at level 1 |
//! | `DROP_DECAY_FACTOR` | 0.8 | Interval multiplier per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level-up |
//!
//! # Examples
//!
//! ```
//! use tetris_rules_types::{PieceKind, RotationDirection, RotationState, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece: PieceKind = "t".parse().unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color_index(), 3);
//!
//! let state = RotationState::North.rotate(RotationDirection::Clockwise);
//! assert_eq!(state, RotationState::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of every shape frame, for every kind and every rotation
pub const SHAPE_SIZE: usize = 4;

/// Spawn column of the shape frame's left edge
pub const SPAWN_COL: i8 = 3;

/// Spawn row of the shape frame's top edge
pub const SPAWN_ROW: i8 = 0;

/// Number of upcoming pieces exposed by previews and snapshots
pub const PREVIEW_LEN: usize = 5;

/// Default line-clear bonus table, indexed by number of lines cleared.
///
/// The curve is convex: a four-line clear is worth more than four singles.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Level the score engine starts at
pub const INITIAL_LEVEL: u32 = 1;

/// Cleared lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// Fall interval at level 1 (milliseconds per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Interval multiplier applied once per level above 1
pub const DROP_DECAY_FACTOR: f64 = 0.8;

/// Fall interval floor (milliseconds per row)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Points per row for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// A cell on the board or inside a shape frame
///
/// - `0`: empty
/// - `1..`: occupied, value is the owning piece's color index
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven tetromino piece kinds
///
/// Each kind has a fixed color index used as its cell value:
/// - **I**: 1, horizontal bar
/// - **O**: 2, 2x2 square
/// - **T**: 3
/// - **S**: 4
/// - **Z**: 5 (mirror of S)
/// - **J**: 6
/// - **L**: 7 (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Look up a kind by its 0-based catalog index
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::{PieceKind, RulesError};
    ///
    /// assert_eq!(PieceKind::from_index(2), Ok(PieceKind::T));
    /// assert_eq!(PieceKind::from_index(7), Err(RulesError::InvalidPieceIndex(7)));
    /// ```
    pub fn from_index(index: usize) -> Result<Self, RulesError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(RulesError::InvalidPieceIndex(index))
    }

    /// 0-based catalog index
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Cell value written to the board for this kind (always non-zero)
    pub fn color_index(self) -> Cell {
        self.index() as Cell + 1
    }

    /// Whether this kind uses the I-piece kick table
    pub fn is_i(self) -> bool {
        self == PieceKind::I
    }

    /// Convert to lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

impl TryFrom<Cell> for PieceKind {
    type Error = RulesError;

    /// Resolve the kind that owns a non-empty cell value
    fn try_from(value: Cell) -> Result<Self, Self::Error> {
        if value == EMPTY {
            return Err(RulesError::InvalidColorIndex(value));
        }
        Self::from_index(value as usize - 1).map_err(|_| RulesError::InvalidColorIndex(value))
    }
}

impl FromStr for PieceKind {
    type Err = RulesError;

    /// Parse piece kind from its letter (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "o" => Ok(PieceKind::O),
            "t" => Ok(PieceKind::T),
            "s" => Ok(PieceKind::S),
            "z" => Ok(PieceKind::Z),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            _ => Err(RulesError::UnknownPieceName(s.to_string())),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Direction of a single quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North** (0): spawn orientation
/// - **East** (1): rotated 90° clockwise
/// - **South** (2): rotated 180°
/// - **West** (3): rotated 90° counter-clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationState {
    #[default]
    North,
    East,
    South,
    West,
}

impl RotationState {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::RotationState;
    ///
    /// assert_eq!(RotationState::North.rotate_cw(), RotationState::East);
    /// assert_eq!(RotationState::West.rotate_cw(), RotationState::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            RotationState::North => RotationState::East,
            RotationState::East => RotationState::South,
            RotationState::South => RotationState::West,
            RotationState::West => RotationState::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        match self {
            RotationState::North => RotationState::West,
            RotationState::West => RotationState::South,
            RotationState::South => RotationState::East,
            RotationState::East => RotationState::North,
        }
    }

    pub fn rotate(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// SRS state index (0-3)
    pub fn index(self) -> u8 {
        match self {
            RotationState::North => 0,
            RotationState::East => 1,
            RotationState::South => 2,
            RotationState::West => 3,
        }
    }

    /// Build a state from an SRS index, wrapping modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => RotationState::North,
            1 => RotationState::East,
            2 => RotationState::South,
            _ => RotationState::West,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RotationState::North => "north",
            RotationState::East => "east",
            RotationState::South => "south",
            RotationState::West => "west",
        }
    }
}

/// Host-level actions understood by the session facade
///
/// Timers are not part of the rules core; gravity is driven by the host
/// through [`GameAction::SoftDrop`] or the session's gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (scores soft drop points)
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the held one
    Hold,
    /// Clear the board and start over
    Restart,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

impl FromStr for GameAction {
    type Err = RulesError;

    /// Parse an action from its camelCase name or its one-letter script alias
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::GameAction;
    ///
    /// assert_eq!("moveLeft".parse(), Ok(GameAction::MoveLeft));
    /// assert_eq!("x".parse(), Ok(GameAction::RotateCw));
    /// assert!("jump".parse::<GameAction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" | "l" => Ok(GameAction::MoveLeft),
            "moveright" | "r" => Ok(GameAction::MoveRight),
            "softdrop" | "d" => Ok(GameAction::SoftDrop),
            "harddrop" | "h" => Ok(GameAction::HardDrop),
            "rotatecw" | "x" => Ok(GameAction::RotateCw),
            "rotateccw" | "z" => Ok(GameAction::RotateCcw),
            "hold" | "c" => Ok(GameAction::Hold),
            "restart" => Ok(GameAction::Restart),
            _ => Err(RulesError::UnknownAction(s.to_string())),
        }
    }
}

/// Errors surfaced by the rules core
///
/// Collisions and out-of-bounds placements are not errors: validity checks
/// answer them with `false`. These variants are programming or configuration
/// mistakes on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// A piece kind was requested by an index outside the catalog
    InvalidPieceIndex(usize),
    /// A cell value does not map to any piece kind
    InvalidColorIndex(Cell),
    /// A piece kind name could not be parsed
    UnknownPieceName(String),
    /// An action name could not be parsed
    UnknownAction(String),
    /// A configuration value is out of range
    InvalidConfig(&'static str),
}

impl RulesError {
    pub fn code(&self) -> &'static str {
        match self {
            RulesError::InvalidPieceIndex(_)
            | RulesError::InvalidColorIndex(_)
            | RulesError::UnknownPieceName(_) => "invalid_piece",
            RulesError::UnknownAction(_) => "invalid_action",
            RulesError::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::InvalidPieceIndex(index) => {
                write!(f, "piece index {} is outside the catalog (0..7)", index)
            }
            RulesError::InvalidColorIndex(value) => {
                write!(f, "cell value {} does not name a piece kind", value)
            }
            RulesError::UnknownPieceName(name) => write!(f, "unknown piece kind: {:?}", name),
            RulesError::UnknownAction(name) => write!(f, "unknown action: {:?}", name),
            RulesError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for RulesError {}
