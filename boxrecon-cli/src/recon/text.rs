//! Text normalization for filename matching
//!
//! Report filenames arrive with inconsistent casing, accents and separator
//! characters. Everything that is compared against the unit registry goes
//! through [`normalize`] first.

/// Normalize a string for registry comparison: lowercase, accents folded,
/// `_`/`-` treated as spaces, whitespace runs collapsed, ends trimmed.
///
/// Pure and total; normalizing twice gives the same result.
pub fn normalize(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map an accented lowercase Latin character to its base letter.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}
