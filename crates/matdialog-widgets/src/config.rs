#![forbid(unsafe_code)]

//! Construction-time configuration for dialogs.

use matdialog_style::ThemeId;

/// Window layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DialogLayout {
    /// Fixed-height content region.
    #[default]
    Standard,
    /// Content region scrolls when it overflows.
    Scrollable,
}

/// Dialog construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogConfig {
    /// Requested theme; [`ThemeId::UNSET`] defers to the context.
    pub theme: ThemeId,
    /// Window layout.
    pub layout: DialogLayout,
    /// Whether Back/Escape cancels.
    pub cancelable: bool,
    /// Whether a touch outside the window cancels (only while cancelable).
    pub canceled_on_touch_outside: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            theme: ThemeId::UNSET,
            layout: DialogLayout::Standard,
            cancelable: true,
            canceled_on_touch_outside: true,
        }
    }
}

impl DialogConfig {
    /// Set the requested theme.
    #[must_use]
    pub fn theme(mut self, theme: ThemeId) -> Self {
        self.theme = theme;
        self
    }

    /// Set the layout variant.
    #[must_use]
    pub fn layout(mut self, layout: DialogLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Shorthand for [`DialogLayout::Scrollable`].
    #[must_use]
    pub fn scrollable(self) -> Self {
        self.layout(DialogLayout::Scrollable)
    }

    /// Set whether the dialog is cancelable.
    #[must_use]
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Set whether touching outside cancels.
    #[must_use]
    pub fn canceled_on_touch_outside(mut self, cancel: bool) -> Self {
        self.canceled_on_touch_outside = cancel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_dialogs() {
        let config = DialogConfig::default();
        assert!(config.theme.is_unset());
        assert_eq!(config.layout, DialogLayout::Standard);
        assert!(config.cancelable);
        assert!(config.canceled_on_touch_outside);
    }

    #[test]
    fn builder_methods_chain() {
        let config = DialogConfig::default()
            .theme(ThemeId(9))
            .scrollable()
            .cancelable(false);
        assert_eq!(config.theme, ThemeId(9));
        assert_eq!(config.layout, DialogLayout::Scrollable);
        assert!(!config.cancelable);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields() {
        let config: DialogConfig = serde_json::from_str(r#"{"layout":"scrollable","theme":7}"#)
            .expect("deserialize config");
        assert_eq!(config.layout, DialogLayout::Scrollable);
        assert_eq!(config.theme, ThemeId(7));
        assert!(config.cancelable);
    }
}
