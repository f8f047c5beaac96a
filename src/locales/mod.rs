//! Localization module for WikiSearch-RS
//!
//! Formats display dates and provides the UI message catalog.

use chrono::{DateTime, Datelike, NaiveDate};
use std::collections::HashMap;

/// Supported UI locales
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[("id", "Bahasa Indonesia"), ("en", "English")];

/// Locale used when the configured one is unknown
pub const DEFAULT_LOCALE: &str = "id";

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Base locale code ("id" from "id-ID"), falling back to the default
pub fn base_locale(locale: &str) -> &'static str {
    let base = locale.split(['-', '_']).next().unwrap_or(locale);
    SUPPORTED_LOCALES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(base))
        .map(|(code, _)| *code)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Format an RFC 3339 timestamp as a long date ("17 Agustus 2024").
///
/// Returns `None` when the timestamp cannot be parsed. The calendar date is
/// taken in UTC.
pub fn format_date(timestamp: &str, locale: &str) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(timestamp.trim())
        .ok()?
        .naive_utc()
        .date();
    Some(format_naive_date(date, locale))
}

/// Long date for a calendar date in the given locale
pub fn format_naive_date(date: NaiveDate, locale: &str) -> String {
    let month = date.month0() as usize;
    match base_locale(locale) {
        "en" => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
        _ => format!("{} {} {}", date.day(), MONTHS_ID[month], date.year()),
    }
}

/// UI message catalog
pub struct Translations {
    translations: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Translations {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        let id = HashMap::from([
            ("search", "Cari"),
            ("search_placeholder", "Cari artikel Wikipedia..."),
            ("updated", "Diperbarui"),
            ("popular", "Artikel populer"),
            ("no_results", "Tidak ada hasil ditemukan untuk pencarian Anda."),
            (
                "no_results_hint",
                "Coba gunakan kata kunci yang berbeda atau lebih spesifik",
            ),
            (
                "search_error",
                "Terjadi kesalahan saat mencari. Silakan coba lagi.",
            ),
            ("close", "Tutup"),
        ]);
        translations.insert("id", id);

        let en = HashMap::from([
            ("search", "Search"),
            ("search_placeholder", "Search Wikipedia articles..."),
            ("updated", "Updated"),
            ("popular", "Popular articles"),
            ("no_results", "No results found for your search."),
            ("no_results_hint", "Try different or more specific keywords"),
            ("search_error", "Something went wrong while searching. Please try again."),
            ("close", "Close"),
        ]);
        translations.insert("en", en);

        Self { translations }
    }

    /// Get a translation for a key, falling back to the default locale
    pub fn get(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.translations
            .get(base_locale(locale))
            .and_then(|t| t.get(key))
            .or_else(|| self.translations.get(DEFAULT_LOCALE).and_then(|t| t.get(key)))
            .copied()
    }

    /// Like [`get`](Self::get), returning the key itself when nothing matches
    pub fn text(&self, locale: &str, key: &'static str) -> &'static str {
        self.get(locale, key).unwrap_or(key)
    }

    /// All messages of a locale, for template contexts
    pub fn catalog(&self, locale: &str) -> HashMap<&'static str, &'static str> {
        self.translations
            .get(base_locale(locale))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_indonesian() {
        assert_eq!(
            format_date("2026-10-16T08:30:00Z", "id").as_deref(),
            Some("16 Oktober 2026")
        );
        assert_eq!(
            format_date("2024-01-05T23:59:59+00:00", "id-ID").as_deref(),
            Some("5 Januari 2024")
        );
    }

    #[test]
    fn test_format_date_english() {
        assert_eq!(
            format_date("2024-08-17T10:00:00Z", "en").as_deref(),
            Some("August 17, 2024")
        );
    }

    #[test]
    fn test_format_date_uses_utc_calendar_day() {
        assert_eq!(
            format_date("2024-03-01T01:00:00+07:00", "id").as_deref(),
            Some("29 Februari 2024")
        );
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("not a date", "id"), None);
        assert_eq!(format_date("", "id"), None);
    }

    #[test]
    fn test_base_locale() {
        assert_eq!(base_locale("id-ID"), "id");
        assert_eq!(base_locale("en_US"), "en");
        assert_eq!(base_locale("fr"), "id");
    }

    #[test]
    fn test_translations() {
        let t = Translations::new();
        assert_eq!(t.get("id", "search"), Some("Cari"));
        assert_eq!(t.get("en", "search"), Some("Search"));
        assert_eq!(t.get("de", "search"), Some("Cari"));
        assert_eq!(t.text("id", "missing_key"), "missing_key");
        assert_eq!(
            t.text("id", "search_error"),
            "Terjadi kesalahan saat mencari. Silakan coba lagi."
        );
    }
}
