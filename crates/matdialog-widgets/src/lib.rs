#![forbid(unsafe_code)]

//! Themeable modal dialog widget.
//!
//! The dialog is a headless model: it decides what is visible and what a
//! click does, and pushes the result to a platform [`Window`] obtained from
//! a [`Context`]. [`headless`] provides in-memory implementations of both.

pub mod config;
pub mod dialog;
pub mod error;
pub mod event;
pub mod headless;
pub mod platform;

pub use config::{DialogConfig, DialogLayout};
pub use dialog::{
    BodyContent, ButtonAction, ButtonSlot, ButtonSpec, ChoiceMode, ClickOutcome, DialogBuilder,
    DialogContent, DialogContentModel, ImageHandle, ListAdapter, ListBinding, ListSpec, ListState,
    MaterialDialog, MultiChoiceAction, RowAction, ViewHandle, VisibilityState,
};
pub use error::{DialogError, ErrorKind};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use headless::{HeadlessContext, HeadlessWindow, WindowProbe, WindowRecord};
pub use platform::{Context, Window};
