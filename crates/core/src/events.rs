//! Events module - structured notifications for hosts
//!
//! The rules core never prints. Hosts that want to react to locks, clears or
//! failed rotations (sounds, animations, stats) pass an [`EventSink`].

use std::sync::mpsc;

use arrayvec::ArrayVec;

use crate::board::ROWS;
use crate::types::{PieceKind, RotationDirection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A piece was merged into the board
    PieceLocked {
        kind: Option<PieceKind>,
        cells_written: usize,
        lines_cleared: usize,
    },
    /// Completed rows were removed (pre-clear indices, ascending)
    LinesCleared {
        rows: ArrayVec<usize, ROWS>,
        count: usize,
    },
    /// A rotation succeeded only after shifting the piece
    RotationKicked {
        direction: RotationDirection,
        col_offset: i8,
        row_offset: i8,
    },
    /// No rotation candidate fit; the piece is unchanged
    RotationFailed { direction: RotationDirection },
    LevelUp { from: u32, to: u32 },
    PieceSpawned { kind: PieceKind },
    /// The next piece does not fit at the spawn point; the game is over
    SpawnBlocked { kind: PieceKind },
}

/// Receiver of [`CoreEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: CoreEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: CoreEvent) {}
}

impl EventSink for Vec<CoreEvent> {
    fn emit(&mut self, event: CoreEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<CoreEvent> {
    /// A disconnected receiver is not the core's problem; the event is dropped.
    fn emit(&mut self, event: CoreEvent) {
        let _ = self.send(event);
    }
}

/// Adapts a closure into an [`EventSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(CoreEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: CoreEvent) {
        (self.0)(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: CoreEvent) {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: CoreEvent) {
        (**self).emit(event)
    }
}
