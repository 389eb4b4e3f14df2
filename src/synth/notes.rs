/// Equal-tempered pitches for the two octaves the keyboard can reach,
/// rounded to 0.01 Hz.
const NOTES: [(&str, f32); 24] = [
    ("C4", 261.63),
    ("C#4", 277.18),
    ("D4", 293.66),
    ("D#4", 311.13),
    ("E4", 329.63),
    ("F4", 349.23),
    ("F#4", 369.99),
    ("G4", 392.00),
    ("G#4", 415.30),
    ("A4", 440.00),
    ("A#4", 466.16),
    ("B4", 493.88),
    ("C5", 523.25),
    ("C#5", 554.37),
    ("D5", 587.33),
    ("D#5", 622.25),
    ("E5", 659.25),
    ("F5", 698.46),
    ("F#5", 739.99),
    ("G5", 783.99),
    ("G#5", 830.61),
    ("A5", 880.00),
    ("A#5", 932.33),
    ("B5", 987.77),
];

/// Note name to frequency lookup. Names are case-sensitive ("C#4", not "c#4").
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteFrequencyTable;

impl NoteFrequencyTable {
    pub fn frequency(&self, note: &str) -> Option<f32> {
        self.lookup(note).map(|(_, hz)| hz)
    }

    /// The table's own copy of the name alongside its frequency.
    pub fn lookup(&self, note: &str) -> Option<(&'static str, f32)> {
        NOTES.iter().copied().find(|(name, _)| *name == note)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        NOTES.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        NOTES.len()
    }

    pub fn is_empty(&self) -> bool {
        NOTES.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knows_both_octaves() {
        let table = NoteFrequencyTable;
        assert_eq!(table.len(), 24);
        assert_eq!(table.frequency("A4"), Some(440.0));
        assert_eq!(table.frequency("C4"), Some(261.63));
        assert_eq!(table.frequency("B5"), Some(987.77));
    }

    #[test]
    fn unknown_names_miss() {
        let table = NoteFrequencyTable;
        assert_eq!(table.frequency("H4"), None);
        assert_eq!(table.frequency("C6"), None);
        assert_eq!(table.frequency("a4"), None);
        assert_eq!(table.frequency(""), None);
    }

    #[test]
    fn frequencies_rise_with_the_table() {
        let table = NoteFrequencyTable;
        let freqs: Vec<f32> = table.names().filter_map(|n| table.frequency(n)).collect();
        assert!(freqs.windows(2).all(|w| w[1] > w[0]));
        // Octave doubling within rounding.
        assert!((table.frequency("A5").unwrap() / table.frequency("A4").unwrap() - 2.0).abs() < 1e-4);
    }
}
