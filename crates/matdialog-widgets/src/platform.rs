#![forbid(unsafe_code)]

//! Contracts with the windowing platform.
//!
//! The dialog model never draws. It asks a [`Context`] for strings, images,
//! theme attributes and a [`Window`], then pushes every content change to
//! that window as a [`DialogContent`] plus its derived [`VisibilityState`].

use matdialog_i18n::{ResourceId, Resources};
use matdialog_style::{ThemeAttributes, ThemeId};

use crate::config::DialogLayout;
use crate::dialog::{DialogContent, ImageHandle, ListState, VisibilityState};

/// Ambient platform services a dialog is created against.
pub trait Context: Resources + ThemeAttributes {
    /// Resolve an image resource. Id `0` never resolves.
    fn drawable(&self, id: ResourceId) -> Option<ImageHandle>;

    /// Create the window shell for a dialog with an already resolved theme.
    fn create_window(&self, theme: ThemeId, layout: DialogLayout) -> Box<dyn Window>;
}

/// The visual shell a dialog drives.
pub trait Window {
    /// Make the window visible.
    fn show(&mut self);

    /// Hide and release the window.
    fn dismiss(&mut self);

    /// Whether the window is currently visible.
    fn is_showing(&self) -> bool;

    /// Apply declared content and the visibility derived from it.
    fn project(&mut self, content: &DialogContent, visibility: &VisibilityState) {
        let _ = (content, visibility);
    }

    /// Apply the checked state of the declared list.
    fn project_selection(&mut self, state: &ListState) {
        let _ = state;
    }
}
