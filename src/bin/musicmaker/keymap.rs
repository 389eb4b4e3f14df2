//! Computer keyboard to piano keys.
//!
//! Home row for the white keys, the row above for the black ones:
//!
//! ```text
//!    w   e       t   y   u       o
//!  a   s   d   f   g   h   j   k   l
//!  C4  D4  E4  F4  G4  A4  B4  C5  D5
//! ```

pub const KEYS: [(char, &str); 15] = [
    ('a', "C4"),
    ('w', "C#4"),
    ('s', "D4"),
    ('e', "D#4"),
    ('d', "E4"),
    ('f', "F4"),
    ('t', "F#4"),
    ('g', "G4"),
    ('y', "G#4"),
    ('h', "A4"),
    ('u', "A#4"),
    ('j', "B4"),
    ('k', "C5"),
    ('o', "C#5"),
    ('l', "D5"),
];

pub fn note_for_key(key: char) -> Option<&'static str> {
    let key = key.to_ascii_lowercase();
    KEYS.iter().find(|(k, _)| *k == key).map(|(_, note)| *note)
}

pub fn is_black(note: &str) -> bool {
    note.contains('#')
}
