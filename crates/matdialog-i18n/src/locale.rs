#![forbid(unsafe_code)]

//! Locale tags and system locale detection.
//!
//! A [`ResourceTable`](crate::ResourceTable) created with `Default` starts in
//! the detected system locale, so resource-id setters follow `LC_ALL` /
//! `LANG` unless a caller picks a locale explicitly.

use std::env;

/// Locale identifier (e.g., `"en"`, `"en-US"`, `"de"`).
pub type Locale = String;

/// Locale used when nothing better is known.
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variables consulted by [`detect_system_locale`], in order.
pub const LOCALE_VARS: [&str; 2] = ["LC_ALL", "LANG"];

/// Detect the locale from the process environment.
///
/// The first of [`LOCALE_VARS`] holding a usable tag wins; otherwise
/// [`DEFAULT_LOCALE`].
#[must_use]
pub fn detect_system_locale() -> Locale {
    detect_locale_with(|var| env::var(var).ok())
}

/// Like [`detect_system_locale`], reading variables through `lookup`.
#[must_use]
pub fn detect_locale_with<F>(lookup: F) -> Locale
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_VARS
        .iter()
        .find_map(|var| lookup(var).as_deref().and_then(parse_locale))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_owned())
}

/// Normalise a POSIX-style tag (`de_DE.UTF-8` to `de-DE`).
///
/// Blank input yields [`DEFAULT_LOCALE`].
#[must_use]
pub fn normalize_locale(raw: &str) -> Locale {
    parse_locale(raw).unwrap_or_else(|| DEFAULT_LOCALE.to_owned())
}

/// Drop the `.codeset` and `@modifier` parts and use `-` as separator.
///
/// `C` and `POSIX` carry no language and map to [`DEFAULT_LOCALE`].
pub(crate) fn parse_locale(raw: &str) -> Option<Locale> {
    let tag = raw.trim().split(['.', '@']).next().unwrap_or_default().trim();
    match tag {
        "" => None,
        t if t.eq_ignore_ascii_case("c") || t.eq_ignore_ascii_case("posix") => {
            Some(DEFAULT_LOCALE.to_owned())
        }
        t => Some(t.replace('_', "-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn lc_all_wins_over_lang() {
        let env = [("LC_ALL", "de_AT.UTF-8"), ("LANG", "en_GB.UTF-8")];
        assert_eq!(detect_locale_with(vars(&env)), "de-AT");
    }

    #[test]
    fn blank_lc_all_defers_to_lang() {
        let env = [("LC_ALL", "  "), ("LANG", "de_DE")];
        assert_eq!(detect_locale_with(vars(&env)), "de-DE");
    }

    #[test]
    fn empty_environment_is_english() {
        assert_eq!(detect_locale_with(vars(&[])), DEFAULT_LOCALE);
    }

    #[test]
    fn codeset_and_modifier_are_dropped() {
        assert_eq!(normalize_locale("sr_RS.UTF-8@latin"), "sr-RS");
        assert_eq!(normalize_locale("pt_BR@euro"), "pt-BR");
    }

    #[test]
    fn c_and_posix_are_english() {
        assert_eq!(normalize_locale("C.UTF-8"), "en");
        assert_eq!(normalize_locale("posix"), "en");
        assert_eq!(normalize_locale(""), "en");
    }
}
