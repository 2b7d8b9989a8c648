#![forbid(unsafe_code)]

//! Resource lookup for matdialog.
//!
//! Dialog text can be declared literally or by resource id. This crate owns
//! the id side: a [`Resources`] lookup contract, a locale-aware
//! [`ResourceTable`] implementation, and locale detection that picks the
//! table's starting locale.

pub mod locale;
pub mod resources;

pub use locale::{
    DEFAULT_LOCALE, LOCALE_VARS, Locale, detect_locale_with, detect_system_locale, normalize_locale,
};
pub use resources::{
    DuplicateId, I18nError, LocaleResources, ResourceEntry, ResourceId, ResourceTable, Resources,
};
