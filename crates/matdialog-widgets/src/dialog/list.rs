#![forbid(unsafe_code)]

//! Selectable list body: declaration, selection state and row handlers.
//!
//! # Invariants
//!
//! - A [`ListSpec`]'s mode is fixed; changing the list means declaring a new
//!   spec, which also resets [`ListState`].
//! - `initial_single_selection` is only ever set for `SingleChoice` lists and
//!   is always `< rows.len()`.
//! - `initial_multi_selection` is only ever set for `MultiChoice` lists and
//!   always has exactly `rows.len()` entries.
//! - A `SingleChoice` [`ListState`] has at most one checked row; a `Plain`
//!   one has none.

use std::fmt;
use std::rc::Rc;

use crate::dialog::MaterialDialog;
use crate::error::DialogError;

/// Row click callback; receives the row index.
pub type OnRowClick = Rc<dyn Fn(&mut MaterialDialog, usize)>;

/// Row click delegate; returning `true` means "handled, stay open".
pub type OnRowDelegate = Rc<dyn Fn(&mut MaterialDialog, usize) -> bool>;

/// Multi-choice callback; receives the row index and its new checked state.
pub type OnMultiChoiceClick = Rc<dyn Fn(&mut MaterialDialog, usize, bool)>;

/// Source of row labels.
///
/// Rows are read once, when the list is declared.
pub trait ListAdapter {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Label of row `index` (`index < row_count()`).
    fn row_label(&self, index: usize) -> String;
}

impl<S: AsRef<str>> ListAdapter for [S] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_label(&self, index: usize) -> String {
        self[index].as_ref().to_string()
    }
}

impl<S: AsRef<str>, const N: usize> ListAdapter for [S; N] {
    fn row_count(&self) -> usize {
        N
    }

    fn row_label(&self, index: usize) -> String {
        self[index].as_ref().to_string()
    }
}

impl<S: AsRef<str>> ListAdapter for Vec<S> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn row_label(&self, index: usize) -> String {
        self[index].as_ref().to_string()
    }
}

impl<A: ListAdapter + ?Sized> ListAdapter for &A {
    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn row_label(&self, index: usize) -> String {
        (**self).row_label(index)
    }
}

fn snapshot<A: ListAdapter + ?Sized>(adapter: &A) -> Vec<String> {
    (0..adapter.row_count())
        .map(|i| adapter.row_label(i))
        .collect()
}

/// How rows react to clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceMode {
    /// Rows are actions; no checked state.
    Plain,
    /// Exactly zero or one row is checked.
    SingleChoice,
    /// Each row toggles independently.
    MultiChoice,
}

/// A declared list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    mode: ChoiceMode,
    rows: Vec<String>,
    initial_single: Option<usize>,
    initial_multi: Option<Vec<bool>>,
}

impl ListSpec {
    /// A plain action list.
    pub fn plain(rows: impl ListAdapter) -> Self {
        Self {
            mode: ChoiceMode::Plain,
            rows: snapshot(&rows),
            initial_single: None,
            initial_multi: None,
        }
    }

    /// A single-choice list with an optional initially checked row.
    ///
    /// Fails with [`DialogError::SelectionOutOfRange`] if `checked` is not a
    /// row index.
    pub fn single_choice(
        rows: impl ListAdapter,
        checked: Option<usize>,
    ) -> Result<Self, DialogError> {
        let rows = snapshot(&rows);
        if let Some(index) = checked
            && index >= rows.len()
        {
            return Err(DialogError::SelectionOutOfRange {
                index,
                len: rows.len(),
            });
        }
        Ok(Self {
            mode: ChoiceMode::SingleChoice,
            rows,
            initial_single: checked,
            initial_multi: None,
        })
    }

    /// A multi-choice list. `checked`, when present, must have one entry per row.
    ///
    /// Fails with [`DialogError::CheckedItemsLength`] on a length mismatch.
    pub fn multi_choice(
        rows: impl ListAdapter,
        checked: Option<Vec<bool>>,
    ) -> Result<Self, DialogError> {
        let rows = snapshot(&rows);
        if let Some(flags) = &checked
            && flags.len() != rows.len()
        {
            return Err(DialogError::CheckedItemsLength {
                expected: rows.len(),
                actual: flags.len(),
            });
        }
        Ok(Self {
            mode: ChoiceMode::MultiChoice,
            rows,
            initial_single: None,
            initial_multi: checked,
        })
    }

    #[must_use]
    pub fn mode(&self) -> ChoiceMode {
        self.mode
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn initial_single_selection(&self) -> Option<usize> {
        self.initial_single
    }

    #[must_use]
    pub fn initial_multi_selection(&self) -> Option<&[bool]> {
        self.initial_multi.as_deref()
    }
}

/// Live checked state of a declared list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    mode: ChoiceMode,
    checked: Vec<bool>,
}

impl ListState {
    /// Fresh state for a newly declared list.
    #[must_use]
    pub fn from_spec(spec: &ListSpec) -> Self {
        let mut checked = vec![false; spec.len()];
        match spec.mode {
            ChoiceMode::Plain => {}
            ChoiceMode::SingleChoice => {
                if let Some(index) = spec.initial_single {
                    checked[index] = true;
                }
            }
            ChoiceMode::MultiChoice => {
                if let Some(initial) = &spec.initial_multi {
                    checked.copy_from_slice(initial);
                }
            }
        }
        Self {
            mode: spec.mode,
            checked,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ChoiceMode {
        self.mode
    }

    /// Number of rows tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Whether row `index` is checked. Out-of-range rows are unchecked.
    #[must_use]
    pub fn is_item_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// The checked row of a single-choice list.
    #[must_use]
    pub fn checked_item(&self) -> Option<usize> {
        match self.mode {
            ChoiceMode::SingleChoice => self.checked.iter().position(|&c| c),
            ChoiceMode::Plain | ChoiceMode::MultiChoice => None,
        }
    }

    /// Indices of every checked row, ascending.
    #[must_use]
    pub fn checked_items(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
            .collect()
    }

    /// Apply a click on `index` and return the row's new checked state.
    pub(crate) fn click(&mut self, index: usize) -> bool {
        match self.mode {
            ChoiceMode::Plain => false,
            ChoiceMode::SingleChoice => {
                self.checked.iter_mut().for_each(|c| *c = false);
                self.checked[index] = true;
                true
            }
            ChoiceMode::MultiChoice => {
                let flag = &mut self.checked[index];
                *flag = !*flag;
                *flag
            }
        }
    }
}

/// What a plain or single-choice row click runs.
#[derive(Clone, Default)]
pub enum RowAction {
    /// No handler.
    #[default]
    None,
    /// Invoke the callback.
    Notify(OnRowClick),
    /// Invoke the delegate; for plain lists its result decides dismissal.
    Intercept(OnRowDelegate),
}

impl RowAction {
    /// Build a [`RowAction::Notify`] from a closure.
    pub fn notify(f: impl Fn(&mut MaterialDialog, usize) + 'static) -> Self {
        Self::Notify(Rc::new(f))
    }

    /// Build a [`RowAction::Intercept`] from a closure.
    pub fn intercept(f: impl Fn(&mut MaterialDialog, usize) -> bool + 'static) -> Self {
        Self::Intercept(Rc::new(f))
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Notify(_) => "notify",
            Self::Intercept(_) => "intercept",
        }
    }
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowAction::{}", self.kind_name())
    }
}

/// What a multi-choice row click runs after toggling the row.
#[derive(Clone, Default)]
pub enum MultiChoiceAction {
    #[default]
    None,
    Notify(OnMultiChoiceClick),
}

impl MultiChoiceAction {
    /// Build a [`MultiChoiceAction::Notify`] from a closure.
    pub fn notify(f: impl Fn(&mut MaterialDialog, usize, bool) + 'static) -> Self {
        Self::Notify(Rc::new(f))
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Notify(_) => "notify",
        }
    }
}

impl fmt::Debug for MultiChoiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiChoiceAction::{}", self.kind_name())
    }
}

/// Row handlers bound to a declared list, shaped by its mode.
#[derive(Debug, Clone)]
pub enum ListBinding {
    Plain(RowAction),
    SingleChoice(RowAction),
    MultiChoice(MultiChoiceAction),
}

impl ListBinding {
    /// The list mode these handlers belong to.
    #[must_use]
    pub fn mode(&self) -> ChoiceMode {
        match self {
            Self::Plain(_) => ChoiceMode::Plain,
            Self::SingleChoice(_) => ChoiceMode::SingleChoice,
            Self::MultiChoice(_) => ChoiceMode::MultiChoice,
        }
    }

    /// Short name of the bound handler for logs.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Plain(a) | Self::SingleChoice(a) => a.kind_name(),
            Self::MultiChoice(a) => a.kind_name(),
        }
    }
}
