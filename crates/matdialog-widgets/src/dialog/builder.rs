#![forbid(unsafe_code)]

//! Deferred dialog construction.
//!
//! A [`DialogBuilder`] only records declarations. Nothing reaches the
//! platform until [`DialogBuilder::build`] instantiates the window with the
//! theme resolved when the builder was made, then pushes content in a fixed
//! order: title, icon, message, custom view, list, buttons. Because message,
//! custom view and list share one body, a later group wins: a declared list
//! beats a custom view, which beats a message.
//!
//! # Example
//!
//! ```ignore
//! let dialog = DialogBuilder::new(ctx)
//!     .title("Send Mailer")
//!     .message("Please enter your email address")
//!     .positive_button("Save", ButtonAction::None)
//!     .negative_button("Cancel", ButtonAction::SimpleDismiss)
//!     .show();
//! ```

use std::fmt;
use std::rc::Rc;

use matdialog_i18n::ResourceId;
use matdialog_style::{ResolvedTheme, ThemeId, resolve_theme};

use crate::config::DialogConfig;
use crate::dialog::button::{ButtonAction, ButtonSlot, ButtonSpec};
use crate::dialog::content::{ImageHandle, ViewHandle};
use crate::dialog::list::{ListAdapter, ListBinding, ListSpec, MultiChoiceAction, RowAction};
use crate::dialog::material::{MaterialDialog, OnCancel, OnDismiss, OnKey};
use crate::error::DialogError;
use crate::event::KeyEvent;
use crate::platform::Context;

/// Accumulates dialog declarations for a single [`build`](Self::build).
pub struct DialogBuilder {
    context: Rc<dyn Context>,
    theme: ResolvedTheme,
    config: DialogConfig,
    title: Option<String>,
    icon: Option<ImageHandle>,
    message: Option<String>,
    view: Option<ViewHandle>,
    list: Option<(ListSpec, ListBinding)>,
    buttons: [Option<ButtonSpec>; 3],
    on_cancel: Option<OnCancel>,
    on_dismiss: Option<OnDismiss>,
    on_key: Option<OnKey>,
}

impl DialogBuilder {
    /// Start a builder with the default configuration.
    pub fn new(context: Rc<dyn Context>) -> Self {
        Self::with_config(context, DialogConfig::default())
    }

    /// Start a builder with an explicit theme (`ThemeId::UNSET` defers to the context).
    pub fn with_theme(context: Rc<dyn Context>, theme: ThemeId) -> Self {
        Self::with_config(context, DialogConfig::default().theme(theme))
    }

    /// Start a builder from a full configuration. The theme is resolved now.
    pub fn with_config(context: Rc<dyn Context>, config: DialogConfig) -> Self {
        let theme = resolve_theme(config.theme, &*context);
        Self {
            context,
            theme,
            config,
            title: None,
            icon: None,
            message: None,
            view: None,
            list: None,
            buttons: [None, None, None],
            on_cancel: None,
            on_dismiss: None,
            on_key: None,
        }
    }

    /// The theme the built dialog will use, and how it was chosen.
    #[must_use]
    pub fn theme(&self) -> ResolvedTheme {
        self.theme
    }

    /// The context the dialog will be created against.
    #[must_use]
    pub fn context(&self) -> &Rc<dyn Context> {
        &self.context
    }

    // --- Content ---

    /// Set the title text.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title from a string resource.
    pub fn title_res(self, id: ResourceId) -> Result<Self, DialogError> {
        let title = self.lookup_text(id)?;
        Ok(self.title(title))
    }

    /// Set the icon, or remove it with `None`.
    #[must_use]
    pub fn icon(mut self, icon: Option<ImageHandle>) -> Self {
        self.icon = icon;
        self
    }

    /// Icon from an image resource. Id `0` means no icon.
    pub fn icon_res(self, id: ResourceId) -> Result<Self, DialogError> {
        if id.is_none() {
            return Ok(self.icon(None));
        }
        let icon = self
            .context
            .drawable(id)
            .ok_or(DialogError::ResourceNotFound(id))
            .inspect_err(|err| tracing::warn!(%err, "image resource lookup failed"))?;
        Ok(self.icon(Some(icon)))
    }

    /// Show a message in the body.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Show a message from a string resource.
    pub fn message_res(self, id: ResourceId) -> Result<Self, DialogError> {
        let message = self.lookup_text(id)?;
        Ok(self.message(message))
    }

    /// Custom view for the body; overrides any message.
    #[must_use]
    pub fn view(mut self, view: Option<ViewHandle>) -> Self {
        self.view = view;
        self
    }

    // --- Lists ---

    /// Plain action list; overrides any message or custom view.
    #[must_use]
    pub fn items(mut self, rows: impl ListAdapter, action: RowAction) -> Self {
        self.list = Some((ListSpec::plain(rows), ListBinding::Plain(action)));
        self
    }

    /// Show a plain action list from an array resource.
    pub fn items_res(self, rows: ResourceId, action: RowAction) -> Result<Self, DialogError> {
        let rows = self.lookup_rows(rows)?;
        Ok(self.items(rows, action))
    }

    /// Single-choice list. Fails if `checked` is not a row index.
    pub fn single_choice_items(
        mut self,
        rows: impl ListAdapter,
        checked: Option<usize>,
        action: RowAction,
    ) -> Result<Self, DialogError> {
        let spec = ListSpec::single_choice(rows, checked).inspect_err(|err| {
            tracing::warn!(%err, "rejected single-choice list");
        })?;
        self.list = Some((spec, ListBinding::SingleChoice(action)));
        Ok(self)
    }

    /// Show a single-choice list from an array resource.
    pub fn single_choice_items_res(
        self,
        rows: ResourceId,
        checked: Option<usize>,
        action: RowAction,
    ) -> Result<Self, DialogError> {
        let rows = self.lookup_rows(rows)?;
        self.single_choice_items(rows, checked, action)
    }

    /// Multi-choice list. Fails if `checked` does not have one entry per row.
    pub fn multi_choice_items(
        mut self,
        rows: impl ListAdapter,
        checked: Option<Vec<bool>>,
        action: MultiChoiceAction,
    ) -> Result<Self, DialogError> {
        let spec = ListSpec::multi_choice(rows, checked).inspect_err(|err| {
            tracing::warn!(%err, "rejected multi-choice list");
        })?;
        self.list = Some((spec, ListBinding::MultiChoice(action)));
        Ok(self)
    }

    /// Show a multi-choice list from an array resource.
    pub fn multi_choice_items_res(
        self,
        rows: ResourceId,
        checked: Option<Vec<bool>>,
        action: MultiChoiceAction,
    ) -> Result<Self, DialogError> {
        let rows = self.lookup_rows(rows)?;
        self.multi_choice_items(rows, checked, action)
    }

    // --- Buttons ---

    /// Declare a button by slot or raw platform id.
    pub fn button<W>(
        mut self,
        which: W,
        text: impl Into<String>,
        action: ButtonAction,
    ) -> Result<Self, DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        let slot = which.try_into().map_err(DialogError::from).inspect_err(|err| {
            tracing::warn!(%err, "rejected button declaration");
        })?;
        self.buttons[slot.index()] = Some(ButtonSpec::new(text, action));
        Ok(self)
    }

    /// Declare a button by slot or raw platform id, with resource text.
    ///
    /// The slot is checked before the resource is looked up.
    pub fn button_res<W>(
        self,
        which: W,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<Self, DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        let slot = which.try_into().map_err(DialogError::from).inspect_err(|err| {
            tracing::warn!(%err, "rejected button declaration");
        })?;
        let text = self.lookup_text(text)?;
        Ok(self.slot_button(slot, text, action))
    }

    /// Declare the positive button.
    #[must_use]
    pub fn positive_button(self, text: impl Into<String>, action: ButtonAction) -> Self {
        self.slot_button(ButtonSlot::Positive, text.into(), action)
    }

    /// Declare the negative button.
    #[must_use]
    pub fn negative_button(self, text: impl Into<String>, action: ButtonAction) -> Self {
        self.slot_button(ButtonSlot::Negative, text.into(), action)
    }

    /// Declare the neutral button.
    #[must_use]
    pub fn neutral_button(self, text: impl Into<String>, action: ButtonAction) -> Self {
        self.slot_button(ButtonSlot::Neutral, text.into(), action)
    }

    /// Declare the positive button with resource text.
    pub fn positive_button_res(
        self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<Self, DialogError> {
        let text = self.lookup_text(text)?;
        Ok(self.positive_button(text, action))
    }

    /// Declare the negative button with resource text.
    pub fn negative_button_res(
        self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<Self, DialogError> {
        let text = self.lookup_text(text)?;
        Ok(self.negative_button(text, action))
    }

    /// Declare the neutral button with resource text.
    pub fn neutral_button_res(
        self,
        text: ResourceId,
        action: ButtonAction,
    ) -> Result<Self, DialogError> {
        let text = self.lookup_text(text)?;
        Ok(self.neutral_button(text, action))
    }

    fn slot_button(mut self, slot: ButtonSlot, text: String, action: ButtonAction) -> Self {
        self.buttons[slot.index()] = Some(ButtonSpec::new(text, action));
        self
    }

    // --- Lifecycle ---

    /// Allow or forbid Back/Escape cancellation.
    #[must_use]
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.config.cancelable = cancelable;
        self
    }

    /// Cancel on a touch outside the window.
    #[must_use]
    pub fn canceled_on_touch_outside(mut self, cancel: bool) -> Self {
        self.config.canceled_on_touch_outside = cancel;
        self
    }

    /// Run `listener` when the dialog is canceled.
    #[must_use]
    pub fn on_cancel(mut self, listener: impl Fn(&mut MaterialDialog) + 'static) -> Self {
        self.on_cancel = Some(Rc::new(listener));
        self
    }

    /// Run `listener` each time the dialog is dismissed.
    #[must_use]
    pub fn on_dismiss(mut self, listener: impl Fn(&mut MaterialDialog) + 'static) -> Self {
        self.on_dismiss = Some(Rc::new(listener));
        self
    }

    /// Run `listener` before default key handling.
    #[must_use]
    pub fn on_key(
        mut self,
        listener: impl Fn(&mut MaterialDialog, &KeyEvent) -> bool + 'static,
    ) -> Self {
        self.on_key = Some(Rc::new(listener));
        self
    }

    // --- Terminal ---

    /// Build the dialog without showing it.
    pub fn build(self) -> MaterialDialog {
        let span = tracing::debug_span!(
            "dialog_build",
            theme = self.theme.id.0,
            source = ?self.theme.source,
            body = self.body_kind(),
        );
        let _guard = span.enter();

        let mut dialog = MaterialDialog::from_resolved(self.context, self.theme.id, self.config);
        if let Some(title) = self.title {
            dialog.set_title(title);
        }
        if self.icon.is_some() {
            dialog.set_icon(self.icon);
        }
        if let Some(message) = self.message {
            dialog.set_message(message);
        }
        if self.view.is_some() {
            dialog.set_view(self.view);
        }
        if let Some((spec, binding)) = self.list {
            dialog.set_list(spec, binding);
        }
        for (slot, spec) in ButtonSlot::ALL.into_iter().zip(self.buttons) {
            if let Some(ButtonSpec { text, action }) = spec {
                dialog.install_button(slot, text, action);
            }
        }
        dialog.install_listeners(self.on_cancel, self.on_dismiss, self.on_key);
        tracing::debug!("dialog built");
        dialog
    }

    /// Same as [`build`](Self::build).
    pub fn create(self) -> MaterialDialog {
        self.build()
    }

    /// Build the dialog and show it.
    pub fn show(self) -> MaterialDialog {
        let mut dialog = self.create();
        dialog.show();
        dialog
    }

    fn body_kind(&self) -> &'static str {
        if self.list.is_some() {
            "list"
        } else if self.view.is_some() {
            "custom_view"
        } else if self.message.is_some() {
            "message"
        } else {
            "none"
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
}

impl fmt::Debug for DialogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogBuilder")
            .field("theme", &self.theme)
            .field("config", &self.config)
            .field("title", &self.title)
            .field("body", &self.body_kind())
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}
