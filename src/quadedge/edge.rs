// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;

/// Handle to one of the four directed edges of a quad-edge record.
///
/// The arena slot lives in the high bits and the rotation index (0 to 3) in
/// the low two bits, so the three rotation moves are pure bit arithmetic and
/// never touch the arena. Rotations 0 and 2 are the primal directed edges,
/// 1 and 3 their duals.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl EdgeId {
    pub(crate) fn new(quad: u32, rot: u8) -> Self {
        debug_assert!(rot < 4);
        EdgeId(quad << 2 | rot as u32)
    }

    /// The arena slot of the owning quad-edge record.
    pub fn quad(self) -> u32 {
        self.0 >> 2
    }

    /// Which of the four directed edges this handle is.
    pub fn rot_index(self) -> u8 {
        (self.0 & 3) as u8
    }

    /// Rotated 90 degrees counter-clockwise onto the dual edge.
    pub fn rot(self) -> EdgeId {
        EdgeId((self.0 & !3) | ((self.0 + 1) & 3))
    }

    /// Rotated 90 degrees clockwise onto the dual edge.
    pub fn inv_rot(self) -> EdgeId {
        EdgeId((self.0 & !3) | ((self.0 + 3) & 3))
    }

    /// The same undirected edge traversed the other way.
    pub fn sym(self) -> EdgeId {
        EdgeId((self.0 & !3) | ((self.0 + 2) & 3))
    }

    /// Rotations 0 and 2 connect vertices, 1 and 3 connect faces.
    pub fn is_primal(self) -> bool {
        self.0 & 1 == 0
    }

    /// The rotation-0 handle of the owning quad.
    pub fn canonical(self) -> EdgeId {
        EdgeId(self.0 & !3)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}r{}", self.quad(), self.rot_index())
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeId;

    #[test]
    fn four_rotations_return_home() {
        let e = EdgeId::new(7, 0);
        assert_eq!(e.rot().rot().rot().rot(), e);
        assert_eq!(e.rot().inv_rot(), e);
    }

    #[test]
    fn sym_is_an_involution() {
        let e = EdgeId::new(3, 1);
        assert_eq!(e.sym().sym(), e);
        assert_eq!(e.sym(), e.rot().rot());
    }

    #[test]
    fn primal_and_dual_alternate() {
        let e = EdgeId::new(0, 0);
        assert!(e.is_primal());
        assert!(!e.rot().is_primal());
        assert!(e.sym().is_primal());
        assert!(!e.inv_rot().is_primal());
    }

    #[test]
    fn canonical_strips_the_rotation() {
        let e = EdgeId::new(12, 3);
        assert_eq!(e.canonical(), EdgeId::new(12, 0));
        assert_eq!(e.canonical().quad(), 12);
    }
}
