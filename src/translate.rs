use crate::transit_realtime::TranslatedString;

/// Language code preferred when picking one translation out of a bundle.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Picks one human-readable string out of a multi-language text bundle.
///
/// Returns the first translation whose language code matches `lang`
/// (case-sensitive); when no entry matches, the first translation's text is
/// used regardless of language. An empty bundle yields `None`.
pub fn resolve(translated: Option<&TranslatedString>, lang: &str) -> Option<String> {
    let translations = &translated?.translation;

    translations
        .iter()
        .find(|t| t.language.as_deref() == Some(lang))
        .or_else(|| translations.first())
        .map(|t| t.text.clone())
}

/// [`resolve`] with the feed's default language.
pub fn resolve_default(translated: Option<&TranslatedString>) -> Option<String> {
    resolve(translated, DEFAULT_LANGUAGE)
}
