//! Word-pair catalog: Turkish words paired with their most common misspelling.
//!
//! The list is fixed at compile time. Lookups wrap modulo the catalog size so any
//! index (a wheel segment, the result of modulo arithmetic elsewhere) resolves to
//! an entry.

/// One correctly spelled word and the misspelling players tend to reach for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WordPair {
    pub correct: &'static str,
    pub incorrect: &'static str,
}

const fn pair(correct: &'static str, incorrect: &'static str) -> WordPair {
    WordPair { correct, incorrect }
}

pub const WORD_PAIRS: &[WordPair] = &[
    pair("Herkes", "Herkez"),
    pair("Yalnız", "Yanlız"),
    pair("Yanlış", "Yalnış"),
    pair("Şoför", "Şöför"),
    pair("Restoran", "Restorant"),
    pair("Orijinal", "Orjinal"),
    pair("Eşofman", "Eşortman"),
    pair("Makine", "Makina"),
    pair("Her şey", "Herşey"),
    pair("Sürpriz", "Süpriz"),
    pair("Kravat", "Kıravat"),
    pair("Profesör", "Profösör"),
    pair("Doktor", "Doktur"),
    pair("Mühendis", "Mühendiz"),
    pair("Öğretmen", "Öğretmem"),
    pair("Hastane", "Hastahane"),
    pair("Üniversite", "Üniversitesi"),
    pair("Bilgisayar", "Bilgisayır"),
    pair("Telefon", "Telefom"),
    pair("Televizyon", "Televizyom"),
    pair("Müzik", "Müzük"),
    pair("Kitap", "Kitab"),
    pair("Gazete", "Gazeta"),
    pair("Dergi", "Derği"),
];

/// Number of entries in [`WORD_PAIRS`].
pub fn len() -> usize {
    WORD_PAIRS.len()
}

/// Total lookup: `index` wraps around the catalog.
pub fn get(index: usize) -> WordPair {
    WORD_PAIRS[index % WORD_PAIRS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_24_pairs() {
        assert_eq!(len(), 24);
    }

    #[test]
    fn test_get_wraps_around() {
        assert_eq!(get(0), get(24));
        assert_eq!(get(3), get(3 + 24 * 7));
        assert_eq!(get(usize::MAX), WORD_PAIRS[usize::MAX % 24]);
    }

    #[test]
    fn test_first_entries_match_wheel_order() {
        assert_eq!(get(0).correct, "Herkes");
        assert_eq!(get(3).correct, "Şoför");
        assert_eq!(get(23).incorrect, "Derği");
    }
}
