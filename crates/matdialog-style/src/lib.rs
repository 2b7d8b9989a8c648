#![forbid(unsafe_code)]

//! Theme primitives for matdialog.
//!
//! This crate provides:
//! - [`ThemeId`] and the built-in dialog themes
//! - [`ThemeAttributes`], the ambient attribute lookup a platform supplies
//! - [`resolve_theme`], the deterministic explicit → attribute → default chain

pub mod theme;

pub use theme::{
    ATTR_MATERIAL_DIALOG_THEME, AttrId, AttributeMap, BuiltinTheme, ResolvedTheme, ThemeAttributes,
    ThemeId, ThemeSource, TypedValue, resolve_theme,
};
