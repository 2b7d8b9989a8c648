#![forbid(unsafe_code)]

//! Themeable modal dialog: public facade and prelude.
//!
//! ```ignore
//! use matdialog::prelude::*;
//!
//! let ctx = Rc::new(HeadlessContext::new());
//! let mut dialog = DialogBuilder::new(ctx)
//!     .title("Delete draft?")
//!     .positive_button("Delete", ButtonAction::None)
//!     .negative_button("Keep", ButtonAction::SimpleDismiss)
//!     .show();
//! dialog.click_button(ButtonSlot::Negative)?;
//! ```

pub use matdialog_i18n as i18n;
pub use matdialog_style as style;
pub use matdialog_widgets as widgets;

pub use matdialog_i18n::{ResourceId, ResourceTable, Resources};
pub use matdialog_style::{BuiltinTheme, ThemeId, resolve_theme};
pub use matdialog_widgets::{
    ButtonAction, ButtonSlot, ClickOutcome, Context, DialogBuilder, DialogConfig, DialogError,
    DialogLayout, HeadlessContext, MaterialDialog, Window,
};

/// The types most applications need.
pub mod prelude {
    pub use std::rc::Rc;

    pub use matdialog_i18n::{ResourceId, Resources};
    pub use matdialog_style::{BuiltinTheme, ThemeId};
    pub use matdialog_widgets::{
        ButtonAction, ButtonSlot, ChoiceMode, ClickOutcome, Context, DialogBuilder, DialogConfig,
        DialogError, DialogLayout, HeadlessContext, ImageHandle, KeyCode, KeyEvent, ListAdapter,
        MaterialDialog, MultiChoiceAction, RowAction, ViewHandle, VisibilityState, Window,
    };
}
