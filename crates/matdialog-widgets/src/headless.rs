#![forbid(unsafe_code)]

//! Platform-free [`Context`] and [`Window`] implementations.
//!
//! [`HeadlessContext`] serves strings from a [`ResourceTable`], theme
//! attributes from an [`AttributeMap`] and images from a fixed table. Every
//! window it creates records what the dialog pushed to it; the matching
//! [`WindowProbe`] lets callers inspect that record after the dialog took
//! ownership of the window.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use matdialog_i18n::{ResourceId, ResourceTable, Resources};
use matdialog_style::{AttrId, AttributeMap, ThemeAttributes, ThemeId, TypedValue};

use crate::config::DialogLayout;
use crate::dialog::{DialogContent, ImageHandle, ListState, VisibilityState};
use crate::platform::{Context, Window};

/// Everything a headless window has been told.
#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub theme: ThemeId,
    pub layout: DialogLayout,
    pub showing: bool,
    pub show_count: usize,
    pub dismiss_count: usize,
    /// Number of content projections received.
    pub projections: usize,
    pub content: Option<DialogContent>,
    pub visibility: Option<VisibilityState>,
    pub selection: Option<ListState>,
}

impl WindowRecord {
    fn new(theme: ThemeId, layout: DialogLayout) -> Self {
        Self {
            theme,
            layout,
            showing: false,
            show_count: 0,
            dismiss_count: 0,
            projections: 0,
            content: None,
            visibility: None,
            selection: None,
        }
    }
}

/// Shared view of a [`HeadlessWindow`]'s record.
#[derive(Debug, Clone)]
pub struct WindowProbe(Rc<RefCell<WindowRecord>>);

impl WindowProbe {
    /// Copy of the current record.
    #[must_use]
    pub fn snapshot(&self) -> WindowRecord {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn theme(&self) -> ThemeId {
        self.0.borrow().theme
    }

    #[must_use]
    pub fn layout(&self) -> DialogLayout {
        self.0.borrow().layout
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.0.borrow().showing
    }

    #[must_use]
    pub fn show_count(&self) -> usize {
        self.0.borrow().show_count
    }

    #[must_use]
    pub fn dismiss_count(&self) -> usize {
        self.0.borrow().dismiss_count
    }

    /// Last visibility pushed to the window.
    #[must_use]
    pub fn visibility(&self) -> Option<VisibilityState> {
        self.0.borrow().visibility
    }

    /// Last checked-row flags pushed to the window.
    #[must_use]
    pub fn checked_items(&self) -> Option<Vec<usize>> {
        self.0.borrow().selection.as_ref().map(ListState::checked_items)
    }
}

/// A [`Window`] that only records calls.
#[derive(Debug)]
pub struct HeadlessWindow {
    record: Rc<RefCell<WindowRecord>>,
}

impl HeadlessWindow {
    /// Create a window and the probe observing it.
    #[must_use]
    pub fn new(theme: ThemeId, layout: DialogLayout) -> (Self, WindowProbe) {
        let record = Rc::new(RefCell::new(WindowRecord::new(theme, layout)));
        let probe = WindowProbe(Rc::clone(&record));
        (Self { record }, probe)
    }
}

impl Window for HeadlessWindow {
    fn show(&mut self) {
        let mut record = self.record.borrow_mut();
        record.showing = true;
        record.show_count += 1;
    }

    fn dismiss(&mut self) {
        let mut record = self.record.borrow_mut();
        record.showing = false;
        record.dismiss_count += 1;
    }

    fn is_showing(&self) -> bool {
        self.record.borrow().showing
    }

    fn project(&mut self, content: &DialogContent, visibility: &VisibilityState) {
        let mut record = self.record.borrow_mut();
        record.projections += 1;
        record.content = Some(content.clone());
        record.visibility = Some(*visibility);
    }

    fn project_selection(&mut self, state: &ListState) {
        self.record.borrow_mut().selection = Some(state.clone());
    }
}

/// A [`Context`] backed by in-memory tables.
#[derive(Debug, Default)]
pub struct HeadlessContext {
    resources: ResourceTable,
    attributes: AttributeMap,
    drawables: AHashMap<ResourceId, ImageHandle>,
    windows: RefCell<Vec<WindowProbe>>,
}

impl HeadlessContext {
    /// An empty context: no strings, no attributes, no images.
    ///
    /// The resource table starts in the detected system locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the resource table.
    #[must_use]
    pub fn with_resources(mut self, resources: ResourceTable) -> Self {
        self.resources = resources;
        self
    }

    /// Replace the attribute table.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set one theme attribute.
    #[must_use]
    pub fn with_attribute(mut self, attr: AttrId, value: TypedValue) -> Self {
        self.attributes.set(attr, value);
        self
    }

    /// Register an image resource.
    #[must_use]
    pub fn with_drawable(mut self, id: ResourceId, image: ImageHandle) -> Self {
        self.drawables.insert(id, image);
        self
    }

    /// The resource table.
    #[must_use]
    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    /// Mutable access to the resource table.
    pub fn resources_mut(&mut self) -> &mut ResourceTable {
        &mut self.resources
    }

    /// Probes for every window created so far, oldest first.
    #[must_use]
    pub fn windows(&self) -> Vec<WindowProbe> {
        self.windows.borrow().clone()
    }

    /// Probe for the most recently created window.
    #[must_use]
    pub fn last_window(&self) -> Option<WindowProbe> {
        self.windows.borrow().last().cloned()
    }
}

impl Resources for HeadlessContext {
    fn text(&self, id: ResourceId) -> Option<String> {
        self.resources.text(id)
    }

    fn text_array(&self, id: ResourceId) -> Option<Vec<String>> {
        self.resources.text_array(id)
    }
}

impl ThemeAttributes for HeadlessContext {
    fn resolve_attribute(&self, attr: AttrId) -> Option<TypedValue> {
        self.attributes.resolve_attribute(attr)
    }
}

impl Context for HeadlessContext {
    fn drawable(&self, id: ResourceId) -> Option<ImageHandle> {
        if id.is_none() {
            return None;
        }
        self.drawables.get(&id).copied()
    }

    fn create_window(&self, theme: ThemeId, layout: DialogLayout) -> Box<dyn Window> {
        let (window, probe) = HeadlessWindow::new(theme, layout);
        tracing::trace!(theme = theme.0, ?layout, "headless window created");
        self.windows.borrow_mut().push(probe);
        Box::new(window)
    }
}
