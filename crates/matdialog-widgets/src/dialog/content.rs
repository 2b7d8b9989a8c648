#![forbid(unsafe_code)]

//! Declared dialog content and the visibility it implies.
//!
//! [`DialogContentModel`] is the single source of truth for "what is shown,
//! given what was declared". Visibility is never stored: every call to
//! [`DialogContentModel::visibility`] derives a fresh [`VisibilityState`]
//! from the current [`DialogContent`].
//!
//! # Invariants
//!
//! - The body is exactly one of none, message, custom view or list. Setting
//!   one replaces whatever was there (last writer wins).
//! - `top_region == icon || title` for every content state.
//! - A button slot without a [`ButtonSpec`] is hidden.
//! - Setters are idempotent: equal input twice yields equal visibility.
//!
//! # Failure Modes
//!
//! - `set_button` with an unknown raw slot id fails with
//!   [`DialogError::InvalidButtonSlot`] before touching any state.

use crate::dialog::button::{ButtonAction, ButtonSlot, ButtonSpec};
use crate::dialog::list::{ListSpec, ListState};
use crate::error::DialogError;

/// Opaque image handle supplied by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Opaque view handle supplied by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// The single active content mode of the dialog's main region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BodyContent {
    #[default]
    None,
    Message(String),
    CustomView(ViewHandle),
    List(ListSpec),
}

impl BodyContent {
    /// Short name for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Message(_) => "message",
            Self::CustomView(_) => "custom_view",
            Self::List(_) => "list",
        }
    }
}

/// Everything a dialog declares.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialogContent {
    pub title: Option<String>,
    pub icon: Option<ImageHandle>,
    pub body: BodyContent,
    pub buttons: [Option<ButtonSpec>; 3],
}

impl DialogContent {
    /// The button declared for `slot`, if any.
    #[must_use]
    pub fn button(&self, slot: ButtonSlot) -> Option<&ButtonSpec> {
        self.buttons[slot.index()].as_ref()
    }
}

/// Show/hide flags derived from [`DialogContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisibilityState {
    pub top_region: bool,
    pub icon: bool,
    pub title: bool,
    /// Standard content region (message + list). Hidden by a custom view.
    pub body_region: bool,
    pub message: bool,
    pub list: bool,
    pub custom_panel: bool,
    pub button_row: bool,
    /// Reserves vertical space when there are no buttons.
    pub no_button_spacer: bool,
    pub positive_button: bool,
    pub negative_button: bool,
    pub neutral_button: bool,
}

impl VisibilityState {
    /// Derive visibility from content.
    #[must_use]
    pub fn of(content: &DialogContent) -> Self {
        let icon = content.icon.is_some();
        let title = content.title.as_deref().is_some_and(|t| !t.is_empty());
        let has_custom_view = matches!(content.body, BodyContent::CustomView(_));
        let message = matches!(&content.body, BodyContent::Message(m) if !m.is_empty());
        let list = matches!(&content.body, BodyContent::List(spec) if !spec.is_empty());

        let [positive, negative, neutral] = [
            ButtonSlot::Positive,
            ButtonSlot::Negative,
            ButtonSlot::Neutral,
        ]
        .map(|slot| content.button(slot).is_some());
        let button_row = positive || negative || neutral;

        Self {
            top_region: icon || title,
            icon,
            title,
            body_region: !has_custom_view,
            message,
            list,
            custom_panel: has_custom_view,
            button_row,
            no_button_spacer: !button_row,
            positive_button: positive,
            negative_button: negative,
            neutral_button: neutral,
        }
    }

    /// Visibility of one button slot.
    #[must_use]
    pub const fn button(&self, slot: ButtonSlot) -> bool {
        match slot {
            ButtonSlot::Positive => self.positive_button,
            ButtonSlot::Negative => self.negative_button,
            ButtonSlot::Neutral => self.neutral_button,
        }
    }
}

/// Holder of a dialog's declared content.
///
/// Also owns the live checked state of a declared list, which is reset
/// whenever the body changes.
#[derive(Debug, Clone, Default)]
pub struct DialogContentModel {
    content: DialogContent,
    list_state: Option<ListState>,
}

impl DialogContentModel {
    /// Create an empty model: nothing declared, only the no-button spacer visible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current declared content.
    #[must_use]
    pub fn content(&self) -> &DialogContent {
        &self.content
    }

    /// Fresh visibility derived from the current content.
    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        let state = VisibilityState::of(&self.content);
        tracing::trace!(
            top = state.top_region,
            body = state.body_region,
            message = state.message,
            list = state.list,
            custom = state.custom_panel,
            buttons = state.button_row,
            "visibility derived"
        );
        state
    }

    /// The declared title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.content.title.as_deref()
    }

    /// The declared icon, if any.
    #[must_use]
    pub fn icon(&self) -> Option<ImageHandle> {
        self.content.icon
    }

    /// The active body content.
    #[must_use]
    pub fn body(&self) -> &BodyContent {
        &self.content.body
    }

    /// The button declared for `slot`, if any.
    #[must_use]
    pub fn button(&self, slot: ButtonSlot) -> Option<&ButtonSpec> {
        self.content.button(slot)
    }

    /// The declared list, when the body is a list.
    #[must_use]
    pub fn list(&self) -> Option<&ListSpec> {
        match &self.content.body {
            BodyContent::List(spec) => Some(spec),
            _ => None,
        }
    }

    /// Checked state of the declared list, when the body is a list.
    #[must_use]
    pub fn list_state(&self) -> Option<&ListState> {
        self.list_state.as_ref()
    }

    pub(crate) fn list_state_mut(&mut self) -> Option<&mut ListState> {
        self.list_state.as_mut()
    }

    /// Set the title text. An empty string keeps the title row hidden.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.content.title = Some(title.into());
    }

    /// Set the icon, or remove it with `None`.
    pub fn set_icon(&mut self, icon: Option<ImageHandle>) {
        self.content.icon = icon;
    }

    /// Make the body a message, replacing any custom view or list.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.replace_body(BodyContent::Message(message.into()));
    }

    /// Make the body a custom view, or clear the body with `None`.
    ///
    /// Clearing does not bring back an earlier message or list.
    pub fn set_custom_view(&mut self, view: Option<ViewHandle>) {
        let body = view.map_or(BodyContent::None, BodyContent::CustomView);
        self.replace_body(body);
    }

    /// Make the body a list, replacing any message or custom view.
    pub fn set_list(&mut self, spec: ListSpec) {
        let state = ListState::from_spec(&spec);
        self.replace_body(BodyContent::List(spec));
        self.list_state = Some(state);
    }

    /// Install a button.
    ///
    /// `which` is a [`ButtonSlot`] or a raw platform id (`-1`, `-2`, `-3`).
    pub fn set_button<W>(
        &mut self,
        which: W,
        text: impl Into<String>,
        action: ButtonAction,
    ) -> Result<ButtonSlot, DialogError>
    where
        W: TryInto<ButtonSlot>,
        DialogError: From<W::Error>,
    {
        let slot = which.try_into().map_err(DialogError::from).inspect_err(|err| {
            tracing::warn!(%err, "rejected button declaration");
        })?;
        self.install_button(slot, text, action);
        Ok(slot)
    }

    /// Install a button in a known slot.
    pub fn install_button(
        &mut self,
        slot: ButtonSlot,
        text: impl Into<String>,
        action: ButtonAction,
    ) {
        self.content.buttons[slot.index()] = Some(ButtonSpec::new(text, action));
    }

    fn replace_body(&mut self, body: BodyContent) {
        self.content.body = body;
        self.list_state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::list::ChoiceMode;
    use proptest::prelude::*;

    #[test]
    fn empty_model_shows_only_spacer() {
        let model = DialogContentModel::new();
        let vis = model.visibility();
        assert!(!vis.top_region);
        assert!(vis.body_region);
        assert!(!vis.message);
        assert!(!vis.list);
        assert!(!vis.custom_panel);
        assert!(!vis.button_row);
        assert!(vis.no_button_spacer);
    }

    #[test]
    fn title_drives_top_region() {
        let mut model = DialogContentModel::new();
        model.set_title("Send Mailer");
        let vis = model.visibility();
        assert!(vis.top_region);
        assert!(vis.title);
        assert!(!vis.icon);
    }

    #[test]
    fn empty_title_is_hidden() {
        let mut model = DialogContentModel::new();
        model.set_title("");
        assert!(!model.visibility().top_region);
        assert_eq!(model.title(), Some(""));
    }

    #[test]
    fn icon_alone_shows_top_region() {
        let mut model = DialogContentModel::new();
        model.set_icon(Some(ImageHandle(7)));
        let vis = model.visibility();
        assert!(vis.top_region);
        assert!(vis.icon);
        assert!(!vis.title);

        model.set_icon(None);
        assert!(!model.visibility().top_region);
    }

    #[test]
    fn message_replaces_custom_view() {
        let mut model = DialogContentModel::new();
        model.set_custom_view(Some(ViewHandle(1)));
        model.set_message("hello");
        assert_eq!(model.body(), &BodyContent::Message("hello".into()));
        let vis = model.visibility();
        assert!(vis.body_region);
        assert!(vis.message);
        assert!(!vis.custom_panel);
    }

    #[test]
    fn custom_view_replaces_message() {
        let mut model = DialogContentModel::new();
        model.set_message("hello");
        model.set_custom_view(Some(ViewHandle(1)));
        assert_eq!(model.body(), &BodyContent::CustomView(ViewHandle(1)));
        let vis = model.visibility();
        assert!(!vis.body_region);
        assert!(!vis.message);
        assert!(vis.custom_panel);
    }

    #[test]
    fn clearing_custom_view_does_not_restore_message() {
        let mut model = DialogContentModel::new();
        model.set_message("hello");
        model.set_custom_view(Some(ViewHandle(1)));
        model.set_custom_view(None);
        assert_eq!(model.body(), &BodyContent::None);
        let vis = model.visibility();
        assert!(vis.body_region);
        assert!(!vis.message);
        assert!(!vis.custom_panel);
    }

    #[test]
    fn empty_message_hides_message_but_not_region() {
        let mut model = DialogContentModel::new();
        model.set_message("");
        let vis = model.visibility();
        assert!(vis.body_region);
        assert!(!vis.message);
    }

    #[test]
    fn list_replaces_message_and_resets_state() {
        let mut model = DialogContentModel::new();
        model.set_message("hello");
        model.set_list(ListSpec::single_choice(["a", "b", "c"], Some(1)).unwrap());
        assert!(model.list().is_some());
        assert_eq!(model.list_state().unwrap().checked_item(), Some(1));
        let vis = model.visibility();
        assert!(vis.list);
        assert!(!vis.message);

        model.set_message("again");
        assert!(model.list().is_none());
        assert!(model.list_state().is_none());
    }

    #[test]
    fn empty_list_is_hidden() {
        let mut model = DialogContentModel::new();
        model.set_list(ListSpec::plain(Vec::<&str>::new()));
        assert!(!model.visibility().list);
        assert_eq!(model.list().unwrap().mode(), ChoiceMode::Plain);
    }

    #[test]
    fn button_declaration_shows_row() {
        let mut model = DialogContentModel::new();
        let slot = model
            .set_button(ButtonSlot::Negative, "Cancel", ButtonAction::None)
            .unwrap();
        assert_eq!(slot, ButtonSlot::Negative);
        let vis = model.visibility();
        assert!(vis.button_row);
        assert!(!vis.no_button_spacer);
        assert!(vis.negative_button);
        assert!(!vis.positive_button);
        assert!(!vis.button(ButtonSlot::Neutral));
    }

    #[test]
    fn raw_slot_ids_are_accepted() {
        let mut model = DialogContentModel::new();
        let slot = model
            .set_button(ButtonSlot::BUTTON_NEUTRAL, "Later", ButtonAction::SimpleDismiss)
            .unwrap();
        assert_eq!(slot, ButtonSlot::Neutral);
        assert_eq!(model.button(ButtonSlot::Neutral).unwrap().text, "Later");
    }

    #[test]
    fn invalid_slot_leaves_state_unchanged() {
        let mut model = DialogContentModel::new();
        model.set_title("t");
        model
            .set_button(ButtonSlot::Positive, "OK", ButtonAction::None)
            .unwrap();
        let before = model.content().clone();
        let vis_before = model.visibility();

        let err = model.set_button(42, "Bogus", ButtonAction::None).unwrap_err();
        assert_eq!(err, DialogError::InvalidButtonSlot(42));
        assert!(err.is_invalid_argument());
        assert_eq!(model.content(), &before);
        assert_eq!(model.visibility(), vis_before);
    }

    #[test]
    fn redeclaring_a_slot_replaces_it() {
        let mut model = DialogContentModel::new();
        model
            .set_button(ButtonSlot::Positive, "OK", ButtonAction::None)
            .unwrap();
        model
            .set_button(ButtonSlot::Positive, "Save", ButtonAction::SimpleDismiss)
            .unwrap();
        let spec = model.button(ButtonSlot::Positive).unwrap();
        assert_eq!(spec.text, "Save");
        assert_eq!(spec.action, ButtonAction::SimpleDismiss);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Title(String),
        Icon(Option<u64>),
        Message(String),
        View(Option<u64>),
        List(Vec<String>),
        Button(i32, String),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{0,4}".prop_map(Op::Title),
            proptest::option::of(0u64..4).prop_map(Op::Icon),
            "[a-z]{0,4}".prop_map(Op::Message),
            proptest::option::of(0u64..4).prop_map(Op::View),
            proptest::collection::vec("[a-z]{1,3}", 0..4).prop_map(Op::List),
            (-5i32..2, "[A-Z]{0,3}").prop_map(|(w, t)| Op::Button(w, t)),
        ]
    }

    fn apply(model: &mut DialogContentModel, op: &Op) -> Result<(), DialogError> {
        match op {
            Op::Title(t) => model.set_title(t.clone()),
            Op::Icon(i) => model.set_icon(i.map(ImageHandle)),
            Op::Message(m) => model.set_message(m.clone()),
            Op::View(v) => model.set_custom_view(v.map(ViewHandle)),
            Op::List(rows) => model.set_list(ListSpec::plain(rows)),
            Op::Button(w, t) => {
                model.set_button(*w, t.clone(), ButtonAction::None)?;
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn top_region_is_icon_or_title(ops in proptest::collection::vec(op(), 0..16)) {
            let mut model = DialogContentModel::new();
            for op in &ops {
                let _ = apply(&mut model, op);
                let vis = model.visibility();
                prop_assert_eq!(vis.top_region, vis.icon || vis.title);
                prop_assert_eq!(vis.no_button_spacer, !vis.button_row);
                prop_assert_eq!(vis.body_region, !vis.custom_panel);
            }
        }

        #[test]
        fn at_most_one_body_region_is_populated(ops in proptest::collection::vec(op(), 0..16)) {
            let mut model = DialogContentModel::new();
            for op in &ops {
                let _ = apply(&mut model, op);
                let vis = model.visibility();
                let shown = [vis.message, vis.list, vis.custom_panel]
                    .iter()
                    .filter(|&&v| v)
                    .count();
                prop_assert!(shown <= 1);
                prop_assert_eq!(model.list_state().is_some(), model.list().is_some());
            }
        }

        #[test]
        fn setters_are_idempotent(ops in proptest::collection::vec(op(), 1..8)) {
            let mut model = DialogContentModel::new();
            for op in &ops {
                let _ = apply(&mut model, op);
                let once = model.visibility();
                let _ = apply(&mut model, op);
                prop_assert_eq!(model.visibility(), once);
            }
        }

        #[test]
        fn failed_button_declaration_is_atomic(ops in proptest::collection::vec(op(), 0..8), bad in 1i32..100) {
            let mut model = DialogContentModel::new();
            for op in &ops {
                let _ = apply(&mut model, op);
            }
            let before = model.content().clone();
            prop_assert!(model.set_button(bad, "x", ButtonAction::None).is_err());
            prop_assert_eq!(model.content(), &before);
        }
    }
}
