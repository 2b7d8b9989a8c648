#![forbid(unsafe_code)]

//! The live dialog: content setters, click dispatch and lifecycle.
//!
//! A [`MaterialDialog`] owns one [`DialogContentModel`] and one platform
//! [`Window`]. Every content setter updates the model and immediately pushes
//! the new content and its derived visibility to the window.
//!
//! # Click dispatch
//!
//! | Target | Handler | Dismisses |
//! |--------|---------|-----------|
//! | button | none / simple dismiss | always |
//! | button | notify | always, after the callback |
//! | button | intercept | only when the delegate returns `false` |
//! | plain row | none / notify | always |
//! | plain row | intercept | only when the delegate returns `false` |
//! | single-choice row | any | never; the row becomes the selection |
//! | multi-choice row | any | never; the row toggles first |
//!
//! Handlers receive `&mut MaterialDialog` and may freely call setters,
//! `dismiss()` or `cancel()`.
//!
//! # Failure Modes
//!
//! - Clicking an undeclared button slot is [`ClickOutcome::Ignored`], never an
//!   error. Only a raw slot id outside `-1..=-3` fails.
//! - Row clicks outside the declared list fail with
//!   [`DialogError::RowOutOfRange`] and run nothing.

use std::fmt;
use std::rc::Rc;

use matdialog_i18n::ResourceId;
use matdialog_style::{ThemeId, resolve_theme};

use crate::config::{DialogConfig, DialogLayout};
use crate::dialog::button::{ButtonAction, ButtonSlot, ClickOutcome};
use crate::dialog::content::{
    DialogContent, DialogContentModel, ImageHandle, ViewHandle, VisibilityState,
};
use crate::dialog::list::{
    ListAdapter, ListBinding, ListSpec, ListState, MultiChoiceAction, RowAction,
};
use crate::error::DialogError;
use crate::event::KeyEvent;
use crate::platform::{Context, Window};

/// Cancel listener.
pub type OnCancel = Rc<dyn Fn(&mut MaterialDialog)>;

/// Dismiss listener.
pub type OnDismiss = Rc<dyn Fn(&mut MaterialDialog)>;

/// Key listener; returning `true` consumes the event.
pub type OnKey = Rc<dyn Fn(&mut MaterialDialog, &KeyEvent) -> bool>;

/// A themeable modal dialog.
pub struct MaterialDialog {
    context: Rc<dyn Context>,
    theme: ThemeId,
    layout: DialogLayout,
    model: DialogContentModel,
    list_binding: Option<ListBinding>,
    window: Box<dyn Window>,
    cancelable: bool,
    canceled_on_touch_outside: bool,
    cancel_sent: bool,
    on_cancel: Option<OnCancel>,
    on_dismiss: Option<OnDismiss>,
    on_key: Option<OnKey>,
}

impl MaterialDialog {
    /// Create a dialog with the default configuration.
    pub fn new(context: Rc<dyn Context>) -> Self {
        Self::with_config(context, DialogConfig::default())
    }

    /// Create a dialog with an explicit theme (`ThemeId::UNSET` defers to the context).
    pub fn with_theme(context: Rc<dyn Context>, theme: ThemeId) -> Self {
        Self::with_config(context, DialogConfig::default().theme(theme))
    }

    /// Create a dialog from a full configuration.
    pub fn with_config(context: Rc<dyn Context>, config: DialogConfig) -> Self {
        let resolved = resolve_theme(config.theme, &*context);
        Self::from_resolved(context, resolved.id, config)
    }

    /// Create a dialog whose theme has already been resolved.
    pub(crate) fn from_resolved(
        context: Rc<dyn Context>,
        theme: ThemeId,
        config: DialogConfig,
    ) -> Self {
        let window = context.create_window(theme, config.layout);
        let mut dialog = Self {
            context,
            theme,
            layout: config.layout,
            model: DialogContentModel::new(),
            list_binding: None,
            window,
            cancelable: config.cancelable,
            canceled_on_touch_outside: config.canceled_on_touch_outside,
            cancel_sent: false,
            on_cancel: None,
            on_dismiss: None,
            on_key: None,
        };
        dialog.refresh();
        dialog
    }

    // --- Accessors ---

    /// The theme the window was created with.
    #[must_use]
    pub fn theme(&self) -> ThemeId {
        self.theme
    }

    /// The window layout variant.
    #[must_use]
    pub fn layout(&self) -> DialogLayout {
        self.layout
    }

    /// The platform context this dialog was created against.
    #[must_use]
    pub fn context(&self) -> &Rc<dyn Context> {
        &self.context
    }

    /// Current declared content.
    #[must_use]
    pub fn content(&self) -> &DialogContent {
        self.model.content()
    }

    /// Fresh visibility derived from the current content.
    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        self.model.visibility()
    }

    /// Checked state of the declared list, if the body is a list.
    #[must_use]
    pub fn list_state(&self) -> Option<&ListState> {
        self.model.list_state()
    }

    /// Whether Back/Escape cancels the dialog.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Whether a touch outside the window cancels the dialog.
    #[must_use]
    pub fn is_canceled_on_touch_outside(&self) -> bool {
        self.canceled_on_touch_outside
    }

    /// Whether the window is currently shown.
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.window.is_showing()
    }

    // --- Content ---

    /// Set the title text. An empty string hides the title row.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.model.set_title(title);
        self.refresh();
    }

    /// Set the title from a string resource.
    pub fn set_title_res(&mut self, id: ResourceId) -> Result<(), DialogError> {
        let title = self.lookup_text(id)?;
        self.set_title(title);
        Ok(())
    }

    /// Set the icon, or remove it with `None`.
    pub fn set_icon(&mut self, icon: Option<ImageHandle>) {
        self.model.set_icon(icon);
        self.refresh();
    }

    /// Set the icon from an image resource. Id `0` removes the icon.
    pub fn set_icon_res(&mut self, id: ResourceId) -> Result<(), DialogError> {
        let icon = self.lookup_icon(id)?;
        self.set_icon(icon);
        Ok(())
    }

    /// Show a message, replacing any custom view or list.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.model.set_message(message);
        self.list_binding = None;
        self.refresh();
    }

    /// Show a message from a string resource.
    pub fn set_message_res(&mut self, id: ResourceId) -> Result<(), DialogError> {
        let message = self.lookup_text(id)?;
        self.set_message(message);
        Ok(())
    }

    /// Show a custom view, or clear the body with `None`.
    pub fn set_view(&mut self, view: Option<ViewHandle>) {
        self.model.set_custom_view(view);
        self.list_binding = None;
        self.refresh();
    }

    // --- Buttons ---

    /// Declare a button by slot or raw platform id.
    ///
    /// Fails with [`DialogError::InvalidButtonSlot`] and changes nothing if
    /// `which` is not a slot.
    pub fn set_button<W>(
        &mut self,
        which: W,
        text: impl Into<String>,
        action: ButtonAction,
    ) -> Result<(), DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        self.model.set_button(which, text, action)?;
        self.refresh();
        Ok(())
    }

    /// Declare a button whose text is a string resource.
    pub fn set_button_res<W>(
        &mut self,
        which: W,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<(), DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        let slot = which.try_into().map_err(DialogError::from).inspect_err(|err| {
            tracing::warn!(%err, "rejected button declaration");
        })?;
        let text = self.lookup_text(text)?;
        self.install_button(slot, text, action);
        Ok(())
    }

    /// Declare the positive button.
    pub fn set_positive_button(&mut self, text: impl Into<String>, action: ButtonAction) {
        self.install_button(ButtonSlot::Positive, text.into(), action);
    }

    /// Declare the negative button.
    pub fn set_negative_button(&mut self, text: impl Into<String>, action: ButtonAction) {
        self.install_button(ButtonSlot::Negative, text.into(), action);
    }

    /// Declare the neutral button.
    pub fn set_neutral_button(&mut self, text: impl Into<String>, action: ButtonAction) {
        self.install_button(ButtonSlot::Neutral, text.into(), action);
    }

    /// Declare the positive button with resource text.
    pub fn set_positive_button_res(
        &mut self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<(), DialogError> {
        self.set_button_res(ButtonSlot::Positive, text, action)
    }

    /// Declare the negative button with resource text.
    pub fn set_negative_button_res(
        &mut self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<(), DialogError> {
        self.set_button_res(ButtonSlot::Negative, text, action)
    }

    /// Declare the neutral button with resource text.
    pub fn set_neutral_button_res(
        &mut self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<(), DialogError> {
        self.set_button_res(ButtonSlot::Neutral, text, action)
    }

    pub(crate) fn install_button(
        &mut self,
        slot: ButtonSlot,
        text: String,
        action: ButtonAction,
    ) {
        self.model.install_button(slot, text, action);
        self.refresh();
    }

    // --- Lists ---

    /// Show a plain action list.
    pub fn set_items(&mut self, rows: impl ListAdapter, action: RowAction) {
        self.set_list(ListSpec::plain(rows), ListBinding::Plain(action));
    }

    /// Show a plain action list from an array resource.
    pub fn set_items_res(&mut self, rows: ResourceId, action: RowAction) -> Result<(), DialogError> {
        let rows = self.lookup_rows(rows)?;
        self.set_items(rows, action);
        Ok(())
    }

    /// Show a single-choice list with an optional initially checked row.
    pub fn set_single_choice_items(
        &mut self,
        rows: impl ListAdapter,
        checked: Option<usize>,
        action: RowAction,
    ) -> Result<(), DialogError> {
        let spec = ListSpec::single_choice(rows, checked).inspect_err(|err| {
            tracing::warn!(%err, "rejected single-choice list");
        })?;
        self.set_list(spec, ListBinding::SingleChoice(action));
        Ok(())
    }

    /// Show a single-choice list from an array resource.
    pub fn set_single_choice_items_res(
        &mut self,
        rows: ResourceId,
        checked: Option<usize>,
        action: RowAction,
    ) -> Result<(), DialogError> {
        let rows = self.lookup_rows(rows)?;
        self.set_single_choice_items(rows, checked, action)
    }

    /// Show a multi-choice list; `checked` must have one entry per row.
    pub fn set_multi_choice_items(
        &mut self,
        rows: impl ListAdapter,
        checked: Option<Vec<bool>>,
        action: MultiChoiceAction,
    ) -> Result<(), DialogError> {
        let spec = ListSpec::multi_choice(rows, checked).inspect_err(|err| {
            tracing::warn!(%err, "rejected multi-choice list");
        })?;
        self.set_list(spec, ListBinding::MultiChoice(action));
        Ok(())
    }

    /// Show a multi-choice list from an array resource.
    pub fn set_multi_choice_items_res(
        &mut self,
        rows: ResourceId,
        checked: Option<Vec<bool>>,
        action: MultiChoiceAction,
    ) -> Result<(), DialogError> {
        let rows = self.lookup_rows(rows)?;
        self.set_multi_choice_items(rows, checked, action)
    }

    /// Install a validated list and its handlers. Modes always agree.
    pub(crate) fn set_list(&mut self, spec: ListSpec, binding: ListBinding) {
        debug_assert_eq!(spec.mode(), binding.mode());
        self.model.set_list(spec);
        self.list_binding = Some(binding);
        self.refresh();
    }

    // --- Dispatch ---

    /// Click a button by slot or raw platform id.
    pub fn click_button<W>(&mut self, which: W) -> Result<ClickOutcome, DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        let slot = which.try_into().map_err(DialogError::from).inspect_err(|err| {
            tracing::warn!(%err, "rejected button click");
        })?;
        let Some(spec) = self.model.button(slot) else {
            tracing::debug!(%slot, "click on undeclared button ignored");
            return Ok(ClickOutcome::Ignored);
        };
        let action = spec.action.clone();

        let dismiss = match &action {
            ButtonAction::None | ButtonAction::SimpleDismiss => true,
            ButtonAction::Notify(callback) => {
                callback(self, slot);
                true
            }
            ButtonAction::Intercept(delegate) => !delegate(self, slot),
        };
        if dismiss {
            self.dismiss();
        }
        tracing::debug!(
            %slot,
            action = action.kind_name(),
            dismissed = dismiss,
            "button click dispatched"
        );
        Ok(Self::outcome(dismiss))
    }

    /// Click row `index` of the declared list.
    pub fn click_row(&mut self, index: usize) -> Result<ClickOutcome, DialogError> {
        let len = self.model.list_state().map_or(0, ListState::len);
        if index >= len {
            let err = DialogError::RowOutOfRange { index, len };
            tracing::warn!(%err, "rejected row click");
            return Err(err);
        }
        let Some(binding) = self.list_binding.clone() else {
            return Err(DialogError::RowOutOfRange { index, len: 0 });
        };

        let checked = match self.model.list_state_mut() {
            Some(state) => state.click(index),
            None => false,
        };
        if let Some(state) = self.model.list_state() {
            self.window.project_selection(state);
        }

        let dismiss = match &binding {
            ListBinding::Plain(action) => match action {
                RowAction::None => true,
                RowAction::Notify(callback) => {
                    callback(self, index);
                    true
                }
                RowAction::Intercept(delegate) => !delegate(self, index),
            },
            ListBinding::SingleChoice(action) => {
                match action {
                    RowAction::None => {}
                    RowAction::Notify(callback) => callback(self, index),
                    RowAction::Intercept(delegate) => {
                        let _ = delegate(self, index);
                    }
                }
                false
            }
            ListBinding::MultiChoice(action) => {
                if let MultiChoiceAction::Notify(callback) = action {
                    callback(self, index, checked);
                }
                false
            }
        };
        if dismiss {
            self.dismiss();
        }
        tracing::debug!(
            row = index,
            mode = ?binding.mode(),
            action = binding.action_name(),
            checked,
            dismissed = dismiss,
            "row click dispatched"
        );
        Ok(Self::outcome(dismiss))
    }

    fn outcome(dismissed: bool) -> ClickOutcome {
        if dismissed {
            ClickOutcome::Dismissed
        } else {
            ClickOutcome::StayedOpen
        }
    }

    // --- Lifecycle ---

    /// Show the window. No-op while already showing.
    pub fn show(&mut self) {
        if self.window.is_showing() {
            return;
        }
        self.cancel_sent = false;
        self.window.show();
        tracing::debug!(theme = self.theme.0, "dialog shown");
    }

    /// Hide the window and notify the dismiss listener.
    ///
    /// No-op when the dialog is not showing, so the listener runs at most
    /// once per [`show`](Self::show).
    pub fn dismiss(&mut self) {
        if !self.window.is_showing() {
            return;
        }
        self.window.dismiss();
        tracing::debug!("dialog dismissed");
        if let Some(listener) = self.on_dismiss.clone() {
            listener(self);
        }
    }

    /// Notify the cancel listener, then dismiss.
    ///
    /// The cancel listener runs at most once per show.
    pub fn cancel(&mut self) {
        if !self.cancel_sent
            && let Some(listener) = self.on_cancel.clone()
        {
            self.cancel_sent = true;
            listener(self);
        }
        tracing::debug!("dialog canceled");
        self.dismiss();
    }

    /// Allow or forbid Back/Escape cancellation.
    pub fn set_cancelable(&mut self, cancelable: bool) {
        self.cancelable = cancelable;
    }

    /// Enabling touch-outside cancel also makes the dialog cancelable.
    pub fn set_canceled_on_touch_outside(&mut self, cancel: bool) {
        if cancel && !self.cancelable {
            self.cancelable = true;
        }
        self.canceled_on_touch_outside = cancel;
    }

    /// Run `listener` when the dialog is canceled.
    pub fn set_on_cancel_listener(&mut self, listener: impl Fn(&mut Self) + 'static) {
        self.on_cancel = Some(Rc::new(listener));
    }

    /// Run `listener` each time the dialog is dismissed.
    pub fn set_on_dismiss_listener(&mut self, listener: impl Fn(&mut Self) + 'static) {
        self.on_dismiss = Some(Rc::new(listener));
    }

    /// Run `listener` before default key handling.
    pub fn set_on_key_listener(&mut self, listener: impl Fn(&mut Self, &KeyEvent) -> bool + 'static) {
        self.on_key = Some(Rc::new(listener));
    }

    pub(crate) fn install_listeners(
        &mut self,
        on_cancel: Option<OnCancel>,
        on_dismiss: Option<OnDismiss>,
        on_key: Option<OnKey>,
    ) {
        self.on_cancel = on_cancel;
        self.on_dismiss = on_dismiss;
        self.on_key = on_key;
    }

    /// Deliver a key event. Returns whether it was consumed.
    ///
    /// The key listener sees the event first. Otherwise a Back/Escape press
    /// cancels a showing, cancelable dialog.
    pub fn dispatch_key(&mut self, event: KeyEvent) -> bool {
        if !self.window.is_showing() {
            return false;
        }
        if let Some(listener) = self.on_key.clone()
            && listener(self, &event)
        {
            tracing::trace!(?event, "key consumed by listener");
            return true;
        }
        if event.is_cancel_press() && self.cancelable {
            self.cancel();
            return true;
        }
        false
    }

    /// Deliver a touch outside the window bounds. Returns whether it canceled.
    pub fn touch_outside(&mut self) -> bool {
        if self.window.is_showing() && self.cancelable && self.canceled_on_touch_outside {
            self.cancel();
            return true;
        }
        false
    }

    // --- Internals ---

    fn refresh(&mut self) {
        let visibility = self.model.visibility();
        self.window.project(self.model.content(), &visibility);
        if let Some(state) = self.model.list_state() {
            self.window.project_selection(state);
        }
    }

    fn lookup_text(&self, id: ResourceId) -> Result<String, DialogError> {
        self.context
            .text(id)
            .ok_or(DialogError::ResourceNotFound(id))
            .inspect_err(|err| tracing::warn!(%err, "string resource lookup failed"))
    }

    fn lookup_rows(&self, id: ResourceId) -> Result<Vec<String>, DialogError> {
        self.context
            .text_array(id)
            .ok_or(DialogError::ResourceNotFound(id))
            .inspect_err(|err| tracing::warn!(%err, "array resource lookup failed"))
    }

    pub(crate) fn lookup_icon(&self, id: ResourceId) -> Result<Option<ImageHandle>, DialogError> {
        if id.is_none() {
            return Ok(None);
        }
        self.context
            .drawable(id)
            .map(Some)
            .ok_or(DialogError::ResourceNotFound(id))
            .inspect_err(|err| tracing::warn!(%err, "image resource lookup failed"))
    }
}

impl fmt::Debug for MaterialDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialDialog")
            .field("theme", &self.theme)
            .field("layout", &self.layout)
            .field("title", &self.model.title())
            .field("body", &self.model.body().kind_name())
            .field("list_binding", &self.list_binding)
            .field("showing", &self.window.is_showing())
            .field("cancelable", &self.cancelable)
            .finish_non_exhaustive()
    }
}
