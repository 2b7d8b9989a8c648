#![forbid(unsafe_code)]

//! Reference fixtures for driving dialogs in tests.
//!
//! - [`mailer_context`] / [`mailer_resources`]: a headless context with the
//!   strings, arrays and images used by the scenario tests.
//! - [`CallLog`]: records every callback a dialog fires, in order.
//! - [`visible_regions`]: the names of the visible regions, for readable
//!   layout assertions.
//! - [`init_test_logging`]: opt-in log output via `MATDIALOG_LOG`.

use std::cell::RefCell;
use std::rc::Rc;

use matdialog_i18n::{LocaleResources, ResourceId, ResourceTable};
use matdialog_style::{ATTR_MATERIAL_DIALOG_THEME, TypedValue};
use matdialog_widgets::{
    ButtonAction, ButtonSlot, HeadlessContext, ImageHandle, KeyCode, MaterialDialog,
    MultiChoiceAction, RowAction, VisibilityState,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resource ids known to [`mailer_resources`].
pub mod ids {
    use matdialog_i18n::ResourceId;

    pub const TITLE: ResourceId = ResourceId(0x7f0c_0001);
    pub const MESSAGE: ResourceId = ResourceId(0x7f0c_0002);
    pub const SAVE: ResourceId = ResourceId(0x7f0c_0003);
    pub const CANCEL: ResourceId = ResourceId(0x7f0c_0004);
    pub const SAVE_DRAFT: ResourceId = ResourceId(0x7f0c_0005);
    pub const RECIPIENTS: ResourceId = ResourceId(0x7f0a_0001);
    pub const MAIL_ICON: ResourceId = ResourceId(0x7f02_0001);
    /// A style id served through the `MaterialDialogTheme` attribute.
    pub const MAILER_THEME: u32 = 0x7f0e_0100;
}

/// Image handle served for [`ids::MAIL_ICON`].
pub const MAIL_ICON_HANDLE: ImageHandle = ImageHandle(0x1c0);

/// English and German strings for the mailer dialogs.
///
/// German lacks the recipients array, so lookups for it fall back to English.
#[must_use]
pub fn mailer_resources(locale: &str) -> ResourceTable {
    let mut table = ResourceTable::new(locale);
    table.set_fallback_chain(vec!["en".into()]);

    let mut en = LocaleResources::new();
    let entries = [
        (ids::TITLE, "Send Mailer"),
        (ids::MESSAGE, "Please enter your email address"),
        (ids::SAVE, "Save"),
        (ids::CANCEL, "Cancel"),
        (ids::SAVE_DRAFT, "Save Draft"),
    ];
    for (id, text) in entries {
        insert_text(&mut en, id, text);
    }
    insert_array(&mut en, ids::RECIPIENTS, ["Alice", "Bob", "Carol"]);

    let mut de = LocaleResources::new();
    let entries = [
        (ids::TITLE, "Mail senden"),
        (ids::MESSAGE, "Bitte E-Mail-Adresse eingeben"),
        (ids::SAVE, "Speichern"),
        (ids::CANCEL, "Abbrechen"),
    ];
    for (id, text) in entries {
        insert_text(&mut de, id, text);
    }

    for (locale, resources) in [("en", en), ("de", de)] {
        if let Err(err) = table.add_locale(locale, resources) {
            panic!("fixture locale {locale} rejected: {err}");
        }
    }
    table
}

fn insert_text(resources: &mut LocaleResources, id: ResourceId, text: &str) {
    if let Err(dup) = resources.insert_text(id, text) {
        panic!("fixture resource {} inserted twice", dup.0);
    }
}

fn insert_array<const N: usize>(resources: &mut LocaleResources, id: ResourceId, rows: [&str; N]) {
    if let Err(dup) = resources.insert_array(id, rows) {
        panic!("fixture resource {} inserted twice", dup.0);
    }
}

/// A headless context serving [`mailer_resources`] in `locale`.
///
/// No `MaterialDialogTheme` attribute is set.
#[must_use]
pub fn mailer_context(locale: &str) -> Rc<HeadlessContext> {
    Rc::new(
        HeadlessContext::new()
            .with_resources(mailer_resources(locale))
            .with_drawable(ids::MAIL_ICON, MAIL_ICON_HANDLE),
    )
}

/// Like [`mailer_context`], with `MaterialDialogTheme` pointing at [`ids::MAILER_THEME`].
#[must_use]
pub fn themed_mailer_context(locale: &str) -> Rc<HeadlessContext> {
    Rc::new(
        HeadlessContext::new()
            .with_resources(mailer_resources(locale))
            .with_drawable(ids::MAIL_ICON, MAIL_ICON_HANDLE)
            .with_attribute(
                ATTR_MATERIAL_DIALOG_THEME,
                TypedValue::Reference(ids::MAILER_THEME),
            ),
    )
}

/// One recorded callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Button(ButtonSlot),
    Row(usize),
    MultiChoice(usize, bool),
    Cancel,
    Dismiss,
    Key(KeyCode),
}

/// Ordered record of dialog callbacks.
///
/// Clones share the same log, so handlers built from one `CallLog` all
/// append to it.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Every call so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Number of calls matching `call`.
    #[must_use]
    pub fn count(&self, call: Call) -> usize {
        self.0.borrow().iter().filter(|&&c| c == call).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// A notify button action that records its slot.
    #[must_use]
    pub fn button_notify(&self) -> ButtonAction {
        let log = self.clone();
        ButtonAction::notify(move |_, slot| log.push(Call::Button(slot)))
    }

    /// An intercept button action that records its slot and returns `handled`.
    #[must_use]
    pub fn button_delegate(&self, handled: bool) -> ButtonAction {
        let log = self.clone();
        ButtonAction::intercept(move |_, slot| {
            log.push(Call::Button(slot));
            handled
        })
    }

    /// A notify row action that records the row.
    #[must_use]
    pub fn row_notify(&self) -> RowAction {
        let log = self.clone();
        RowAction::notify(move |_, row| log.push(Call::Row(row)))
    }

    /// An intercept row action that records the row and returns `handled`.
    #[must_use]
    pub fn row_delegate(&self, handled: bool) -> RowAction {
        let log = self.clone();
        RowAction::intercept(move |_, row| {
            log.push(Call::Row(row));
            handled
        })
    }

    /// A multi-choice action that records the row and its new state.
    #[must_use]
    pub fn multi_choice(&self) -> MultiChoiceAction {
        let log = self.clone();
        MultiChoiceAction::notify(move |_, row, checked| log.push(Call::MultiChoice(row, checked)))
    }

    /// Install cancel, dismiss and key listeners that record into this log.
    ///
    /// The key listener never consumes events.
    pub fn attach_listeners(&self, dialog: &mut MaterialDialog) {
        let log = self.clone();
        dialog.set_on_cancel_listener(move |_| log.push(Call::Cancel));
        let log = self.clone();
        dialog.set_on_dismiss_listener(move |_| log.push(Call::Dismiss));
        let log = self.clone();
        dialog.set_on_key_listener(move |_, event| {
            log.push(Call::Key(event.code));
            false
        });
    }
}

/// Names of the visible regions, in layout order.
#[must_use]
pub fn visible_regions(vis: &VisibilityState) -> Vec<&'static str> {
    [
        ("top", vis.top_region),
        ("icon", vis.icon),
        ("title", vis.title),
        ("body", vis.body_region),
        ("message", vis.message),
        ("list", vis.list),
        ("custom", vis.custom_panel),
        ("buttons", vis.button_row),
        ("positive", vis.positive_button),
        ("negative", vis.negative_button),
        ("neutral", vis.neutral_button),
        ("spacer", vis.no_button_spacer),
    ]
    .into_iter()
    .filter_map(|(name, shown)| shown.then_some(name))
    .collect()
}

/// Install a test-writer subscriber filtered by `MATDIALOG_LOG` (default `warn`).
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_env("MATDIALOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
    tracing::trace!("test logging ready");
}
