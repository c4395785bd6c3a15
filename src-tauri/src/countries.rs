//! Country directory: static calling-code table shown in the selector.
//!
//! Order matters: the selector lists countries exactly as declared here,
//! and the first entry is the default selection.

use serde::Serialize;

/// A selectable country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: &'static str,
    /// Calling code without the leading `+`.
    pub code: &'static str,
    /// Lowercase ISO 3166-1 alpha-2 identifier. Unique within the table.
    pub iso: &'static str,
    pub flag: &'static str,
}

const fn country(
    name: &'static str,
    code: &'static str,
    iso: &'static str,
    flag: &'static str,
) -> Country {
    Country { name, code, iso, flag }
}

pub const COUNTRIES: &[Country] = &[
    country("السودان", "249", "sd", "🇸🇩"),
    country("المملكة العربية السعودية", "966", "sa", "🇸🇦"),
    country("مصر", "20", "eg", "🇪🇬"),
    country("الإمارات العربية المتحدة", "971", "ae", "🇦🇪"),
    country("الكويت", "965", "kw", "🇰🇼"),
    country("قطر", "974", "qa", "🇶🇦"),
    country("البحرين", "973", "bh", "🇧🇭"),
    country("عمان", "968", "om", "🇴🇲"),
    country("الأردن", "962", "jo", "🇯🇴"),
    country("فلسطين", "970", "ps", "🇵🇸"),
    country("العراق", "964", "iq", "🇮🇶"),
    country("لبنان", "961", "lb", "🇱🇧"),
    country("سوريا", "963", "sy", "🇸🇾"),
    country("اليمن", "967", "ye", "🇾🇪"),
    country("المغرب", "212", "ma", "🇲🇦"),
    country("تونس", "216", "tn", "🇹🇳"),
    country("الجزائر", "213", "dz", "🇩🇿"),
    country("ليبيا", "218", "ly", "🇱🇾"),
    country("الولايات المتحدة", "1", "us", "🇺🇸"),
    country("المملكة المتحدة", "44", "gb", "🇬🇧"),
    country("تركيا", "90", "tr", "🇹🇷"),
    country("ألمانيا", "49", "de", "🇩🇪"),
    country("فرنسا", "33", "fr", "🇫🇷"),
    country("إسبانيا", "34", "es", "🇪🇸"),
    country("إيطاليا", "39", "it", "🇮🇹"),
    country("الهند", "91", "in", "🇮🇳"),
    country("باكستان", "92", "pk", "🇵🇰"),
    country("ماليزيا", "60", "my", "🇲🇾"),
    country("إندونيسيا", "62", "id", "🇮🇩"),
];

/// Flag shown for history entries whose country is no longer listed.
pub const UNKNOWN_FLAG: &str = "🏳️";

/// The initial selection (Sudan).
pub fn default_country() -> &'static Country {
    &COUNTRIES[0]
}

/// Look up a country by its ISO identifier (case-insensitive).
pub fn find(iso: &str) -> Option<&'static Country> {
    let iso = iso.trim();
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}

/// Filter the directory for the selector's search box.
///
/// Matches on display name, calling code (a leading `+` is ignored) or ISO
/// identifier. A blank query returns the whole table.
pub fn search(query: &str) -> Vec<&'static Country> {
    let query = query.trim();
    if query.is_empty() {
        return COUNTRIES.iter().collect();
    }
    let code_query = query.trim_start_matches('+');
    let iso_query = query.to_lowercase();

    COUNTRIES
        .iter()
        .filter(|c| {
            c.name.contains(query)
                || (!code_query.is_empty() && c.code.contains(code_query))
                || c.iso.contains(iso_query.as_str())
        })
        .collect()
}
