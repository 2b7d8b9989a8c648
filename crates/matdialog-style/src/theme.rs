#![forbid(unsafe_code)]

//! Dialog theme identifiers and resolution.
//!
//! A dialog is always created with a concrete theme. The caller may pass one
//! explicitly; otherwise the ambient theme context is asked for the
//! `MaterialDialogTheme` attribute, and if that does not name a style the
//! built-in light theme is used.
//!
//! # Resolution rule
//!
//! ```text
//! explicit != 0                      -> explicit
//! attr MaterialDialogTheme = @ref>0  -> ref
//! otherwise                          -> Theme.MaterialDialog (light)
//! ```
//!
//! Only `0` counts as "unset". Any other explicit id, built-in or not, is
//! returned untouched and the attribute is never consulted.

use ahash::AHashMap;

/// Style resource identifier for a dialog theme. `0` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ThemeId(pub u32);

impl ThemeId {
    /// The sentinel "no theme requested" value.
    pub const UNSET: Self = Self(0);

    /// Whether this is the unset sentinel.
    #[inline]
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// The built-in theme this id names, if any.
    #[must_use]
    pub fn builtin(self) -> Option<BuiltinTheme> {
        BuiltinTheme::ALL.into_iter().find(|t| t.id() == self)
    }
}

/// Themes shipped with the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTheme {
    /// `Theme.MaterialDialog`, the light default.
    Default,
    /// `Theme.MaterialDialog.Light`.
    Light,
    /// `Theme.MaterialDialog.Dark`.
    Dark,
}

impl BuiltinTheme {
    /// Every built-in theme.
    pub const ALL: [Self; 3] = [Self::Default, Self::Light, Self::Dark];

    /// Style id of this theme.
    #[must_use]
    pub const fn id(self) -> ThemeId {
        match self {
            Self::Default => ThemeId(0x7f0d_0090),
            Self::Light => ThemeId(0x7f0d_0091),
            Self::Dark => ThemeId(0x7f0d_0092),
        }
    }

    /// Style name as it appears in resource tables.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "Theme.MaterialDialog",
            Self::Light => "Theme.MaterialDialog.Light",
            Self::Dark => "Theme.MaterialDialog.Dark",
        }
    }

    /// Whether the theme uses a dark surface.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Theme attribute identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrId(pub u32);

/// The `MaterialDialogTheme` attribute consulted when no explicit theme is given.
pub const ATTR_MATERIAL_DIALOG_THEME: AttrId = AttrId(0x7f01_0000);

/// Value an attribute resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// Attribute defined but empty.
    Null,
    /// Reference to another resource (a style, for theme attributes).
    Reference(u32),
    /// Inline integer.
    Integer(i64),
    /// Inline string.
    String(String),
}

/// Ambient theme attribute lookup supplied by the platform.
///
/// Any `Fn(AttrId) -> Option<TypedValue>` closure is a valid lookup.
pub trait ThemeAttributes {
    /// Resolve `attr` against the current theme context.
    fn resolve_attribute(&self, attr: AttrId) -> Option<TypedValue>;
}

impl<F> ThemeAttributes for F
where
    F: Fn(AttrId) -> Option<TypedValue>,
{
    fn resolve_attribute(&self, attr: AttrId) -> Option<TypedValue> {
        self(attr)
    }
}

/// A fixed attribute table.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    values: AHashMap<AttrId, TypedValue>,
}

impl AttributeMap {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value, returning the table.
    #[must_use]
    pub fn with(mut self, attr: AttrId, value: TypedValue) -> Self {
        self.set(attr, value);
        self
    }

    /// Set an attribute value.
    pub fn set(&mut self, attr: AttrId, value: TypedValue) {
        self.values.insert(attr, value);
    }

    /// Remove an attribute.
    pub fn remove(&mut self, attr: AttrId) -> Option<TypedValue> {
        self.values.remove(&attr)
    }
}

impl ThemeAttributes for AttributeMap {
    fn resolve_attribute(&self, attr: AttrId) -> Option<TypedValue> {
        self.values.get(&attr).cloned()
    }
}

/// Which branch of the resolution chain produced a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// The caller passed a non-zero theme.
    Explicit,
    /// The ambient `MaterialDialogTheme` attribute named a style.
    Attribute,
    /// Nothing else applied; built-in default.
    Default,
}

/// Result of [`resolve_theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTheme {
    /// The theme to instantiate the dialog with. Never [`ThemeId::UNSET`].
    pub id: ThemeId,
    /// How it was chosen.
    pub source: ThemeSource,
}

/// Resolve the theme a dialog should be created with.
#[must_use]
pub fn resolve_theme<A>(explicit: ThemeId, attrs: &A) -> ResolvedTheme
where
    A: ThemeAttributes + ?Sized,
{
    if !explicit.is_unset() {
        tracing::debug!(theme = explicit.0, "theme resolved from explicit id");
        return ResolvedTheme {
            id: explicit,
            source: ThemeSource::Explicit,
        };
    }

    if let Some(TypedValue::Reference(style)) = attrs.resolve_attribute(ATTR_MATERIAL_DIALOG_THEME)
        && style > 0
    {
        tracing::debug!(theme = style, "theme resolved from MaterialDialogTheme attribute");
        return ResolvedTheme {
            id: ThemeId(style),
            source: ThemeSource::Attribute,
        };
    }

    let id = BuiltinTheme::Default.id();
    tracing::debug!(theme = id.0, "theme resolved to built-in default");
    ResolvedTheme {
        id,
        source: ThemeSource::Default,
    }
}
