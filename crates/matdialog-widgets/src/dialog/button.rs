#![forbid(unsafe_code)]

//! Button slots and click actions.
//!
//! A dialog has exactly three button positions. Each slot either carries a
//! [`ButtonSpec`] (text plus a single resolved [`ButtonAction`]) or is absent,
//! in which case it is hidden and cannot be clicked.

use std::fmt;
use std::rc::Rc;

use crate::dialog::MaterialDialog;
use crate::error::DialogError;

/// Plain click callback; the dialog always dismisses afterwards.
pub type OnClick = Rc<dyn Fn(&mut MaterialDialog, ButtonSlot)>;

/// Delegating click callback; returning `true` means "handled, stay open".
pub type OnClickDelegate = Rc<dyn Fn(&mut MaterialDialog, ButtonSlot) -> bool>;

/// One of the three fixed button positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonSlot {
    Positive,
    Negative,
    Neutral,
}

impl ButtonSlot {
    /// Every slot, in layout order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Platform identifier for the positive button.
    pub const BUTTON_POSITIVE: i32 = -1;
    /// Platform identifier for the negative button.
    pub const BUTTON_NEGATIVE: i32 = -2;
    /// Platform identifier for the neutral button.
    pub const BUTTON_NEUTRAL: i32 = -3;

    /// Dense index for per-slot arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Negative => 1,
            Self::Neutral => 2,
        }
    }

    /// Platform identifier passed to callbacks as `which`.
    #[must_use]
    pub const fn which(self) -> i32 {
        match self {
            Self::Positive => Self::BUTTON_POSITIVE,
            Self::Negative => Self::BUTTON_NEGATIVE,
            Self::Neutral => Self::BUTTON_NEUTRAL,
        }
    }
}

impl TryFrom<i32> for ButtonSlot {
    type Error = DialogError;

    fn try_from(which: i32) -> Result<Self, Self::Error> {
        match which {
            Self::BUTTON_POSITIVE => Ok(Self::Positive),
            Self::BUTTON_NEGATIVE => Ok(Self::Negative),
            Self::BUTTON_NEUTRAL => Ok(Self::Neutral),
            other => Err(DialogError::InvalidButtonSlot(other)),
        }
    }
}

impl fmt::Display for ButtonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

/// What clicking a button does.
///
/// Precedence between callback shapes is settled when the action is built,
/// never at click time.
#[derive(Clone, Default)]
pub enum ButtonAction {
    /// Nothing declared; the click dismisses.
    #[default]
    None,
    /// Explicit dismiss-only button.
    SimpleDismiss,
    /// Invoke the callback, then dismiss.
    Notify(OnClick),
    /// Invoke the delegate; dismiss only when it returns `false`.
    Intercept(OnClickDelegate),
}

impl ButtonAction {
    /// Build a [`ButtonAction::Notify`] from a closure.
    pub fn notify(f: impl Fn(&mut MaterialDialog, ButtonSlot) + 'static) -> Self {
        Self::Notify(Rc::new(f))
    }

    /// Build a [`ButtonAction::Intercept`] from a closure.
    pub fn intercept(f: impl Fn(&mut MaterialDialog, ButtonSlot) -> bool + 'static) -> Self {
        Self::Intercept(Rc::new(f))
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SimpleDismiss => "dismiss",
            Self::Notify(_) => "notify",
            Self::Intercept(_) => "intercept",
        }
    }
}

impl fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ButtonAction::{}", self.kind_name())
    }
}

impl PartialEq for ButtonAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::SimpleDismiss, Self::SimpleDismiss) => true,
            (Self::Notify(a), Self::Notify(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            (Self::Intercept(a), Self::Intercept(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// A declared button: visible text and its action.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    pub text: String,
    pub action: ButtonAction,
}

impl ButtonSpec {
    /// Create a button spec.
    pub fn new(text: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// What a click did to the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The target is not declared; nothing ran.
    Ignored,
    /// Handlers ran and the dialog stays open.
    StayedOpen,
    /// Handlers ran and the dialog was dismissed.
    Dismissed,
}

impl ClickOutcome {
    /// Whether the click dismissed the dialog.
    #[must_use]
    pub const fn dismissed(self) -> bool {
        matches!(self, Self::Dismissed)
    }
}
