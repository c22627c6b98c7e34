use anyhow::{anyhow, Result};
use isolang::Language;

/// Language code helpers
///
/// Backends disagree on code formats: LibreTranslate wants ISO 639-1
/// (`es`), prompts want an English name (`Spanish`). Everything here
/// resolves through `isolang`.

// ISO 639-2/B codes that differ from their 639-2/T form
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve an ISO 639-1 or 639-2 code to a language
fn resolve(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bib, _)| *bib == normalized)
                .map(|(_, term)| *term)
                .unwrap_or(normalized.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    resolve(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a code to ISO 639-1, the form LibreTranslate expects
pub fn to_part1(code: &str) -> Result<String> {
    let lang = resolve(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    lang.to_639_1()
        .map(|c| c.to_string())
        .ok_or_else(|| anyhow!("No ISO 639-1 code for language: {}", code))
}
