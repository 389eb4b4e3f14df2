/*
Drum Pattern Grid
=================

One row per drum voice, one column per sixteenth note:

              0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15
    kick     [x] [ ] [ ] [ ] [x] [ ] [ ] [ ] [x] [ ] [ ] [ ] [x] [ ] [ ] [ ]
    snare    [ ] [ ] [ ] [ ] [x] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [x] [ ] [ ] [ ]
    hihat    [x] [ ] [x] [ ] [x] [ ] [x] [ ] [x] [ ] [x] [ ] [x] [ ] [x] [ ]
    openhat  [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ]
    crash    [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ] [ ]

Rows exist for the whole session and start empty. Cells only change by
toggling, in any transport state; the sequencer reads the grid fresh on
every tick, so an edit is heard the next time the playhead reaches it.
*/

use super::STEPS;
use crate::voices::DrumKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrumPattern {
    pub kind: DrumKind,
    cells: [bool; STEPS],
}

impl DrumPattern {
    pub fn new(kind: DrumKind) -> Self {
        Self {
            kind,
            cells: [false; STEPS],
        }
    }

    /// Flip a cell and return its new value. `None` when `step` is off the grid.
    pub fn toggle(&mut self, step: usize) -> Option<bool> {
        let cell = self.cells.get_mut(step)?;
        *cell = !*cell;
        Some(*cell)
    }

    pub fn is_active(&self, step: usize) -> bool {
        self.cells.get(step).copied().unwrap_or(false)
    }

    pub fn cells(&self) -> &[bool; STEPS] {
        &self.cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGrid {
    patterns: Vec<DrumPattern>,
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternGrid {
    pub fn new() -> Self {
        Self {
            patterns: DrumKind::ALL.into_iter().map(DrumPattern::new).collect(),
        }
    }

    pub fn toggle(&mut self, kind: DrumKind, step: usize) -> Option<bool> {
        self.pattern_mut(kind)?.toggle(step)
    }

    pub fn is_active(&self, kind: DrumKind, step: usize) -> bool {
        self.pattern(kind).is_some_and(|p| p.is_active(step))
    }

    /// Voices with a hit at `step`, in track order.
    pub fn hits_at(&self, step: usize) -> impl Iterator<Item = DrumKind> + '_ {
        self.patterns
            .iter()
            .filter(move |p| p.is_active(step))
            .map(|p| p.kind)
    }

    pub fn pattern(&self, kind: DrumKind) -> Option<&DrumPattern> {
        self.patterns.iter().find(|p| p.kind == kind)
    }

    fn pattern_mut(&mut self, kind: DrumKind) -> Option<&mut DrumPattern> {
        self.patterns.iter_mut().find(|p| p.kind == kind)
    }

    pub fn patterns(&self) -> &[DrumPattern] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_in_track_order() {
        let grid = PatternGrid::new();
        let kinds: Vec<_> = grid.patterns().iter().map(|p| p.kind).collect();
        assert_eq!(kinds, DrumKind::ALL);
        assert!(grid
            .patterns()
            .iter()
            .all(|p| p.cells().iter().all(|&c| !c)));
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut grid = PatternGrid::new();
        assert_eq!(grid.toggle(DrumKind::Kick, 3), Some(true));
        assert!(grid.is_active(DrumKind::Kick, 3));
        assert_eq!(grid.toggle(DrumKind::Kick, 3), Some(false));
        assert!(!grid.is_active(DrumKind::Kick, 3));
    }

    #[test]
    fn off_grid_steps_are_rejected() {
        let mut grid = PatternGrid::new();
        assert_eq!(grid.toggle(DrumKind::Snare, STEPS), None);
        assert!(!grid.is_active(DrumKind::Snare, STEPS));
    }

    #[test]
    fn hits_follow_track_order() {
        let mut grid = PatternGrid::new();
        grid.toggle(DrumKind::Crash, 0);
        grid.toggle(DrumKind::Kick, 0);
        grid.toggle(DrumKind::Hihat, 1);
        let hits: Vec<_> = grid.hits_at(0).collect();
        assert_eq!(hits, [DrumKind::Kick, DrumKind::Crash]);
    }
}
