//! Character-level text normalization.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Accented vowels that trigger diacritic stripping.
const ACCENTED_VOWELS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'Á', 'É', 'Í', 'Ó', 'Ú'];

/// Concatenation of every ASCII digit in `s`, order preserved.
///
/// ```
/// use recon_normalize::extract_numeric;
///
/// assert_eq!(extract_numeric("IDE-0104/B"), "0104");
/// assert_eq!(extract_numeric("no digits"), "");
/// ```
pub fn extract_numeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// True when `s` holds one of the accented vowels `áéíóúÁÉÍÓÚ`.
pub fn has_accented_vowel(s: &str) -> bool {
    s.chars().any(|c| ACCENTED_VOWELS.contains(&c))
}

/// Removes diacritics by NFD decomposition, dropping combining marks.
///
/// Text without an accented vowel is returned untouched, including any other
/// marks it carries (so `"niño"` stays `"niño"`).
///
/// ```
/// use recon_normalize::strip_diacritics;
///
/// assert_eq!(strip_diacritics("café"), "cafe");
/// assert_eq!(strip_diacritics("sin acentos"), "sin acentos");
/// ```
pub fn strip_diacritics(s: &str) -> Cow<'_, str> {
    if !has_accented_vowel(s) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.nfd().filter(|c| !is_combining_mark(*c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_numeric_keeps_leading_zeros() {
        assert_eq!(extract_numeric("CELDA 010"), "010");
        assert_eq!(extract_numeric("A1B2C3"), "123");
    }

    #[test]
    fn test_extract_numeric_ignores_non_ascii_digits() {
        assert_eq!(extract_numeric("٣4"), "4");
    }

    #[test]
    fn test_strip_diacritics_removes_accents() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert_eq!(strip_diacritics("Análisis de Estados"), "Analisis de Estados");
        assert_eq!(strip_diacritics("Peñón"), "Penon");
    }

    #[test]
    fn test_strip_diacritics_no_accent_is_noop() {
        let input = "sin acentos";
        let out = strip_diacritics(input);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "sin acentos");
    }

    #[test]
    fn test_strip_diacritics_tilde_only_is_noop() {
        assert_eq!(strip_diacritics("niño"), "niño");
        assert_eq!(strip_diacritics("über"), "über");
    }
}
