//! Character-to-carrier-frequency mapping
//!
//! Each supported character maps to a fixed two-tone pair drawn from a
//! row/column grid, DTMF-style: the character's index selects one row tone
//! and one column tone. The table is static and read-only; all content tones
//! sit well below the 15-16.7 kHz marker band.

/// Supported characters, uppercase. Index order defines the tone grid.
const ALPHABET: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    ' ', '.', ',', '!', '?', '\'', '-', ':',
];

/// Row tones in Hz (character index / 7).
const ROW_TONES: [f64; 7] = [1200.0, 1500.0, 1800.0, 2100.0, 2400.0, 2700.0, 3000.0];

/// Column tones in Hz (character index % 7).
const COL_TONES: [f64; 7] = [4000.0, 4400.0, 4800.0, 5200.0, 5600.0, 6000.0, 6400.0];

/// The carrier tones assigned to a character, or `None` if the character is
/// not in the table. Lookup is case-insensitive.
pub fn carrier_frequencies(c: char) -> Option<[f64; 2]> {
    let upper = c.to_ascii_uppercase();
    let index = ALPHABET.iter().position(|&a| a == upper)?;
    Some([
        ROW_TONES[index / COL_TONES.len()],
        COL_TONES[index % COL_TONES.len()],
    ])
}

/// Whether a character can be embedded.
pub fn is_supported(c: char) -> bool {
    carrier_frequencies(c).is_some()
}

/// All characters the table supports, in index order.
pub fn supported_characters() -> impl Iterator<Item = char> {
    ALPHABET.iter().copied()
}
