//! Bag module - deterministic 7-bag randomizer
//!
//! Every bag holds each of the seven kinds once, shuffled. Pieces are drawn in
//! order until the bag is empty, then a fresh bag is shuffled. Any window of
//! seven consecutive bag-aligned draws therefore contains every kind.
//!
//! Shuffling uses a small LCG so a seed fully determines the sequence.

use crate::types::PieceKind;

/// Linear congruential generator (Numerical Recipes constants, m = 2^32)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`; `max` must be non-zero
    pub fn next_below(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Seven-bag piece source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bag {
    pieces: [PieceKind; 7],
    index: usize,
    rng: Lcg,
    seed: u32,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        let mut rng = Lcg::new(seed);
        let pieces = Self::shuffled(&mut rng);
        Self {
            pieces,
            index: 0,
            rng,
            seed,
        }
    }

    fn shuffled(rng: &mut Lcg) -> [PieceKind; 7] {
        let mut pieces = PieceKind::ALL;
        rng.shuffle(&mut pieces);
        pieces
    }

    /// Take the next piece, refilling the bag when it runs out
    pub fn draw(&mut self) -> PieceKind {
        if self.index >= self.pieces.len() {
            self.pieces = Self::shuffled(&mut self.rng);
            self.index = 0;
            log::trace!("bag refilled: {:?}", self.pieces);
        }
        let kind = self.pieces[self.index];
        self.index += 1;
        kind
    }

    /// The piece the next `draw` will return
    pub fn peek(&self) -> PieceKind {
        self.preview::<1>()[0]
    }

    /// The next `N` pieces, crossing into as many future bags as needed
    ///
    /// Works on a copy of the generator so the bag itself is not advanced; the
    /// result always agrees with the next `N` draws.
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        let mut out = [PieceKind::I; N];
        let mut rng = self.rng.clone();
        let mut pieces = self.pieces;
        let mut index = self.index;

        for slot in out.iter_mut() {
            if index >= pieces.len() {
                pieces = Self::shuffled(&mut rng);
                index = 0;
            }
            *slot = pieces[index];
            index += 1;
        }
        out
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.pieces[self.index..]
    }

    /// Seed the bag was created with; `Bag::new(bag.seed())` replays the game
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}
