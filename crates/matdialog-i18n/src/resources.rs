#![forbid(unsafe_code)]

//! Resource table with locale fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: every lookup tries the active locale,
//!    then its base language (`de` for `de-DE`), then walks the chain
//!    exactly once, returning `None` if no locale provides the id.
//!
//! 2. **Entries are typed**: a text lookup never returns an array entry and
//!    vice versa.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing id | Id not in any locale | Returns `None` |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Wrong entry kind | Text looked up as array | Returns `None` |
//! | Duplicate id | Same id inserted twice in one locale | `I18nError::DuplicateKey` |

use std::fmt;

use ahash::AHashMap;

use crate::locale::{Locale, detect_system_locale, normalize_locale, parse_locale};

/// Numeric resource identifier.
///
/// `0` is reserved and never resolves; setters treat it as "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// The reserved "no resource" id.
    pub const NONE: Self = Self(0);

    /// Whether this is the reserved `0` id.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:#010x}", self.0)
    }
}

/// Errors from resource table construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    /// A locale string was empty or malformed.
    #[error("invalid locale: {0:?}")]
    InvalidLocale(String),
    /// The same id was inserted twice into one locale.
    #[error("duplicate resource {id} in locale '{locale}'")]
    DuplicateKey { locale: String, id: ResourceId },
}

/// Lookup contract for resource-id forms of dialog setters.
///
/// Implementations resolve ids against whatever locale they consider active.
pub trait Resources {
    /// Resolve a text resource.
    fn text(&self, id: ResourceId) -> Option<String>;

    /// Resolve a text-array resource (list rows).
    fn text_array(&self, id: ResourceId) -> Option<Vec<String>>;
}

/// A single resource entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceEntry {
    /// A plain string.
    Text(String),
    /// An ordered array of strings.
    TextArray(Vec<String>),
}

/// Resources for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleResources {
    entries: AHashMap<ResourceId, ResourceEntry>,
}

impl LocaleResources {
    /// Create an empty resource set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a text entry, replacing nothing.
    pub fn insert_text(
        &mut self,
        id: ResourceId,
        value: impl Into<String>,
    ) -> Result<(), DuplicateId> {
        self.insert(id, ResourceEntry::Text(value.into()))
    }

    /// Insert a text-array entry, replacing nothing.
    pub fn insert_array<I, S>(&mut self, id: ResourceId, values: I) -> Result<(), DuplicateId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.insert(id, ResourceEntry::TextArray(values))
    }

    fn insert(&mut self, id: ResourceId, entry: ResourceEntry) -> Result<(), DuplicateId> {
        if self.entries.contains_key(&id) {
            return Err(DuplicateId(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&ResourceEntry> {
        self.entries.get(&id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returned by [`LocaleResources`] inserts when an id is already present.
///
/// Converted into [`I18nError::DuplicateKey`] once the locale is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateId(pub ResourceId);

impl DuplicateId {
    /// Attach the locale the insert was aimed at.
    #[must_use]
    pub fn in_locale(self, locale: &str) -> I18nError {
        I18nError::DuplicateKey {
            locale: locale.to_string(),
            id: self.0,
        }
    }
}

/// Resource table with an active locale and a fallback chain.
///
/// # Example
///
/// ```
/// use matdialog_i18n::{LocaleResources, ResourceId, ResourceTable, Resources};
///
/// const TITLE: ResourceId = ResourceId(0x7f0b_0001);
///
/// let mut en = LocaleResources::new();
/// en.insert_text(TITLE, "Send Mailer").unwrap();
///
/// let mut table = ResourceTable::new("en");
/// table.add_locale("en", en).unwrap();
///
/// assert_eq!(table.text(TITLE).as_deref(), Some("Send Mailer"));
/// assert_eq!(table.text(ResourceId(42)), None);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceTable {
    locales: AHashMap<Locale, LocaleResources>,
    fallback_chain: Vec<Locale>,
    active: Locale,
}

/// An empty table in the [detected system locale](detect_system_locale).
impl Default for ResourceTable {
    fn default() -> Self {
        Self::new(detect_system_locale())
    }
}

impl ResourceTable {
    /// Create an empty table with the given active locale.
    ///
    /// Malformed locales normalise to `"en"`.
    #[must_use]
    pub fn new(locale: impl AsRef<str>) -> Self {
        Self {
            locales: AHashMap::new(),
            fallback_chain: Vec::new(),
            active: normalize_locale(locale.as_ref()),
        }
    }

    /// Add resources for a locale.
    pub fn add_locale(
        &mut self,
        locale: &str,
        resources: LocaleResources,
    ) -> Result<(), I18nError> {
        let locale = parse_locale(locale)
            .ok_or_else(|| I18nError::InvalidLocale(locale.to_string()))?;
        self.locales.insert(locale, resources);
        Ok(())
    }

    /// Insert one text entry into a locale, creating the locale if needed.
    pub fn insert_text(
        &mut self,
        locale: &str,
        id: ResourceId,
        value: impl Into<String>,
    ) -> Result<(), I18nError> {
        let key = parse_locale(locale)
            .ok_or_else(|| I18nError::InvalidLocale(locale.to_string()))?;
        self.locales
            .entry(key.clone())
            .or_default()
            .insert_text(id, value)
            .map_err(|dup| dup.in_locale(&key))
    }

    /// Insert one text-array entry into a locale, creating the locale if needed.
    pub fn insert_array<I, S>(
        &mut self,
        locale: &str,
        id: ResourceId,
        values: I,
    ) -> Result<(), I18nError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = parse_locale(locale)
            .ok_or_else(|| I18nError::InvalidLocale(locale.to_string()))?;
        self.locales
            .entry(key.clone())
            .or_default()
            .insert_array(id, values)
            .map_err(|dup| dup.in_locale(&key))
    }

    /// Set the fallback chain (tried in order when an id is missing).
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain
            .into_iter()
            .filter_map(|l| parse_locale(&l))
            .collect();
    }

    /// Switch the active locale.
    pub fn set_locale(&mut self, locale: impl AsRef<str>) {
        self.active = normalize_locale(locale.as_ref());
    }

    /// The active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.active
    }

    /// Look up an entry starting at `locale`, then its base language, then
    /// walking the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &str, id: ResourceId) -> Option<&ResourceEntry> {
        if id.is_none() {
            return None;
        }
        let base = locale.split_once('-').map(|(lang, _)| lang);
        std::iter::once(locale)
            .chain(base)
            .chain(self.fallback_chain.iter().map(String::as_str))
            .find_map(|tag| self.locales.get(tag).and_then(|r| r.get(id)))
    }

    /// Look up a text entry in a specific locale (with fallback).
    #[must_use]
    pub fn text_in(&self, locale: &str, id: ResourceId) -> Option<&str> {
        match self.get(locale, id)? {
            ResourceEntry::Text(s) => Some(s.as_str()),
            ResourceEntry::TextArray(_) => None,
        }
    }

    /// Look up a text-array entry in a specific locale (with fallback).
    #[must_use]
    pub fn text_array_in(&self, locale: &str, id: ResourceId) -> Option<&[String]> {
        match self.get(locale, id)? {
            ResourceEntry::TextArray(v) => Some(v.as_slice()),
            ResourceEntry::Text(_) => None,
        }
    }

    /// All registered locale tags.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }
}

impl Resources for ResourceTable {
    fn text(&self, id: ResourceId) -> Option<String> {
        self.text_in(&self.active, id).map(str::to_string)
    }

    fn text_array(&self, id: ResourceId) -> Option<Vec<String>> {
        self.text_array_in(&self.active, id).map(<[String]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: ResourceId = ResourceId(1);
    const SAVE: ResourceId = ResourceId(2);
    const ITEMS: ResourceId = ResourceId(3);

    fn english_table() -> ResourceTable {
        let mut table = ResourceTable::new("en");
        table.insert_text("en", TITLE, "Send Mailer").unwrap();
        table
            .insert_array("en", ITEMS, ["Red", "Green", "Blue"])
            .unwrap();
        table.set_fallback_chain(vec!["en".into()]);
        table
    }

    #[test]
    fn text_lookup() {
        let table = english_table();
        assert_eq!(table.text(TITLE).as_deref(), Some("Send Mailer"));
    }

    #[test]
    fn array_lookup() {
        let table = english_table();
        assert_eq!(
            table.text_array(ITEMS),
            Some(vec!["Red".to_string(), "Green".into(), "Blue".into()])
        );
    }

    #[test]
    fn entry_kinds_do_not_cross() {
        let table = english_table();
        assert_eq!(table.text(ITEMS), None);
        assert_eq!(table.text_array(TITLE), None);
    }

    #[test]
    fn reserved_zero_id_never_resolves() {
        let mut table = english_table();
        table.insert_text("en", ResourceId::NONE, "nope").unwrap();
        assert_eq!(table.text(ResourceId::NONE), None);
    }

    #[test]
    fn missing_locale_falls_back() {
        let mut table = english_table();
        table.set_locale("fr_FR.UTF-8");
        assert_eq!(table.locale(), "fr-FR");
        assert_eq!(table.text(TITLE).as_deref(), Some("Send Mailer"));
    }

    #[test]
    fn region_falls_back_to_base_language() {
        let mut table = ResourceTable::new("de_CH.UTF-8");
        table.insert_text("en", TITLE, "Send Mailer").unwrap();
        table.insert_text("de", TITLE, "Mail senden").unwrap();
        table.set_fallback_chain(vec!["en".into()]);
        assert_eq!(table.text(TITLE).as_deref(), Some("Mail senden"));
    }

    #[test]
    fn fallback_chain_order() {
        let mut table = ResourceTable::new("es-MX");
        table.insert_text("en", TITLE, "Title").unwrap();
        table.insert_text("en", SAVE, "Hello").unwrap();
        table.insert_text("es", SAVE, "Hola").unwrap();
        table.insert_text("es-MX", SAVE, "Qué onda").unwrap();
        table.set_fallback_chain(vec!["es-MX".into(), "es".into(), "en".into()]);

        assert_eq!(table.text(SAVE).as_deref(), Some("Qué onda"));
        assert_eq!(table.text(TITLE).as_deref(), Some("Title"));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut table = english_table();
        let err = table.insert_text("en", TITLE, "Again").unwrap_err();
        assert_eq!(
            err,
            I18nError::DuplicateKey {
                locale: "en".into(),
                id: TITLE
            }
        );
        assert_eq!(table.text(TITLE).as_deref(), Some("Send Mailer"));
    }

    #[test]
    fn invalid_locale_is_rejected() {
        let mut table = ResourceTable::default();
        let err = table.add_locale("  ", LocaleResources::new()).unwrap_err();
        assert!(matches!(err, I18nError::InvalidLocale(_)));
    }

    #[test]
    fn default_table_uses_detected_locale() {
        assert_eq!(ResourceTable::default().locale(), detect_system_locale());
    }

    #[test]
    fn display_formats_hex() {
        assert_eq!(ResourceId(0x7f0b_0001).to_string(), "@0x7f0b0001");
    }

    #[test]
    fn locale_listing() {
        let table = english_table();
        assert_eq!(table.locales(), vec!["en"]);
    }

    proptest::proptest! {
        #[test]
        fn active_locale_is_always_normalised(raw in "[a-zA-Z_.@ ]{0,16}") {
            let table = ResourceTable::new(raw.as_str());
            proptest::prop_assert!(!table.locale().is_empty());
            proptest::prop_assert!(!table.locale().contains(['_', '.', '@']));
        }
    }
}
