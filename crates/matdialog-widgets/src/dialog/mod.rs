#![forbid(unsafe_code)]

//! The themeable modal dialog.
//!
//! - [`DialogContentModel`] holds what was declared and derives
//!   [`VisibilityState`] from it.
//! - [`MaterialDialog`] drives a platform window from that model and
//!   dispatches button and row clicks.
//! - [`DialogBuilder`] collects declarations and produces one wired dialog.
//!
//! # Example
//!
//! ```ignore
//! use matdialog_widgets::dialog::{ButtonAction, ButtonSlot, DialogBuilder};
//!
//! let mut dialog = DialogBuilder::new(ctx)
//!     .title("Send Mailer")
//!     .message("Please enter your email address")
//!     .positive_button("Save", ButtonAction::None)
//!     .neutral_button("Save Draft", ButtonAction::intercept(|_, _| true))
//!     .show();
//!
//! dialog.click_button(ButtonSlot::Neutral)?; // stays open
//! dialog.click_button(ButtonSlot::Positive)?; // dismissed
//! ```

mod builder;
mod button;
mod content;
mod list;
mod material;

pub use builder::DialogBuilder;
pub use button::{ButtonAction, ButtonSlot, ButtonSpec, ClickOutcome, OnClick, OnClickDelegate};
pub use content::{
    BodyContent, DialogContent, DialogContentModel, ImageHandle, ViewHandle, VisibilityState,
};
pub use list::{
    ChoiceMode, ListAdapter, ListBinding, ListSpec, ListState, MultiChoiceAction,
    OnMultiChoiceClick, OnRowClick, OnRowDelegate, RowAction,
};
pub use material::{MaterialDialog, OnCancel, OnDismiss, OnKey};
