//! Evenly spaced placements around the vertical axis.

use std::f64::consts::TAU;
use std::iter::FusedIterator;

use ring_types::Placement;

/// Finite iterator of `count` placements on a circle of `radius` at height
/// `axial_offset`. The first placement sits at azimuth `phase` (radians) and
/// the rest follow counter-clockwise every `2π / count`.
#[derive(Debug, Clone)]
pub struct RadialPattern {
    count: usize,
    radius: f64,
    phase: f64,
    axial_offset: f64,
    next: usize,
}

/// Lay out `count` features evenly around the Z axis.
pub fn radial_pattern(count: usize, radius: f64, phase: f64, axial_offset: f64) -> RadialPattern {
    RadialPattern {
        count,
        radius,
        phase,
        axial_offset,
        next: 0,
    }
}

impl RadialPattern {
    fn placement(&self, index: usize) -> Placement {
        let angle = self.phase + TAU * index as f64 / self.count as f64;
        Placement {
            angle,
            offset: [
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                self.axial_offset,
            ],
        }
    }
}

impl Iterator for RadialPattern {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        if self.next >= self.count {
            return None;
        }
        let p = self.placement(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RadialPattern {}
impl FusedIterator for RadialPattern {}
