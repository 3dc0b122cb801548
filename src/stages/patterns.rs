//! Directional light/dark tests shared by line thinning and refinement.
//!
//! Around each pixel eight tests look for a bright side and a dark side:
//!
//! ```text
//!  pair 1        pair 2        pair 3        pair 4
//!  L L L         . L L         D . L         . D .
//!  . c .         D c L         D c L         D c L
//!  D D D         . D .         D . L         . L L
//! ```
//!
//! (`L` light taps, `D` dark taps, `c` the centre; each pair also has the
//! mirrored orientation.) A test fires when every light tap is strictly
//! brighter than the centre and every dark tap. Pairs are checked in order
//! and the mirrored orientation is checked only when the primary one does
//! not fire, so each pair yields at most one light triple. What a caller
//! does with the triples differs: thinning weighs all of them, refinement
//! takes the first.

use crate::grid::Window;
use Tap::*;

/// A position in a 3x3 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tap {
    Tl,
    T,
    Tr,
    L,
    Cc,
    R,
    Bl,
    B,
    Br,
}

impl<V: Copy> Window<V> {
    /// The value at `tap`.
    #[inline]
    pub fn tap(&self, tap: Tap) -> V {
        match tap {
            Tap::Tl => self.tl,
            Tap::T => self.t,
            Tap::Tr => self.tr,
            Tap::L => self.l,
            Tap::Cc => self.cc,
            Tap::R => self.r,
            Tap::Bl => self.bl,
            Tap::B => self.b,
            Tap::Br => self.br,
        }
    }
}

/// One directional test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Taps that must all be brighter; also the blend sources, in order.
    pub light: [Tap; 3],
    /// Taps (centre included) that must all be darker than every light tap.
    pub dark: &'static [Tap],
}

impl Pattern {
    /// `min(light) > max(dark)`.
    #[inline]
    pub fn fires(&self, w: &Window<f32>) -> bool {
        let min_light = self.light.iter().map(|&t| w.tap(t)).fold(f32::INFINITY, f32::min);
        let max_dark = self.dark.iter().map(|&t| w.tap(t)).fold(f32::NEG_INFINITY, f32::max);
        min_light > max_dark
    }
}

/// The four pattern pairs in priority order: `[primary, mirrored]`.
pub static PATTERN_PAIRS: [[Pattern; 2]; 4] = [
    [
        Pattern { light: [Tl, T, Tr], dark: &[Cc, Br, B, Bl] },
        Pattern { light: [Br, B, Bl], dark: &[Cc, Tl, T, Tr] },
    ],
    [
        Pattern { light: [R, T, Tr], dark: &[Cc, L, B] },
        Pattern { light: [Bl, L, B], dark: &[Cc, R, T] },
    ],
    [
        Pattern { light: [R, Br, Tr], dark: &[Cc, L, Tl, Bl] },
        Pattern { light: [L, Tl, Bl], dark: &[Cc, R, Br, Tr] },
    ],
    [
        Pattern { light: [R, Br, B], dark: &[Cc, L, T] },
        Pattern { light: [T, L, Tl], dark: &[Cc, R, B] },
    ],
];

/// Light triples of the firing tests, at most one per pair, in priority order.
pub fn fired(w: Window<f32>) -> impl Iterator<Item = [Tap; 3]> {
    PATTERN_PAIRS
        .iter()
        .filter_map(move |pair| pair.iter().find(|p| p.fires(&w)).map(|p| p.light))
}
