#![forbid(unsafe_code)]

//! Integration tests: end-to-end dialog scenarios through the builder.

use matdialog_harness::{
    Call, CallLog, MAIL_ICON_HANDLE, ids, init_test_logging, mailer_context,
    themed_mailer_context, visible_regions,
};
use matdialog_i18n::detect_locale_with;
use matdialog_style::{BuiltinTheme, ThemeId, ThemeSource};
use matdialog_widgets::{
    BodyContent, ButtonAction, ButtonSlot, ClickOutcome, DialogBuilder, DialogConfig, DialogError,
    DialogLayout, RowAction, ViewHandle,
};

// ============================================================================
// Send Mailer
// ============================================================================

#[test]
fn send_mailer_neutral_delegate_keeps_dialog_open() {
    init_test_logging();
    let ctx = mailer_context("en");
    let log = CallLog::new();

    let mut dialog = DialogBuilder::new(ctx.clone())
        .title("Send Mailer")
        .message("Please enter your email address")
        .positive_button("Save", log.button_notify())
        .negative_button("Cancel", ButtonAction::None)
        .neutral_button("Save Draft", log.button_delegate(true))
        .show();

    assert_eq!(
        visible_regions(&dialog.visibility()),
        vec![
            "top", "title", "body", "message", "buttons", "positive", "negative", "neutral"
        ]
    );

    let outcome = dialog.click_button(ButtonSlot::Neutral).unwrap();
    assert_eq!(outcome, ClickOutcome::StayedOpen);
    assert!(dialog.is_showing());
    assert_eq!(log.calls(), vec![Call::Button(ButtonSlot::Neutral)]);

    let outcome = dialog.click_button(ButtonSlot::Positive).unwrap();
    assert_eq!(outcome, ClickOutcome::Dismissed);
    assert!(!dialog.is_showing());
    assert_eq!(
        log.calls(),
        vec![
            Call::Button(ButtonSlot::Neutral),
            Call::Button(ButtonSlot::Positive)
        ]
    );

    let probe = ctx.last_window().unwrap();
    assert_eq!(probe.show_count(), 1);
    assert_eq!(probe.dismiss_count(), 1);
}

#[test]
fn send_mailer_from_resources() {
    let ctx = mailer_context("de");
    let dialog = DialogBuilder::new(ctx)
        .title_res(ids::TITLE)
        .and_then(|b| b.message_res(ids::MESSAGE))
        .and_then(|b| b.icon_res(ids::MAIL_ICON))
        .and_then(|b| b.positive_button_res(ids::SAVE, ButtonAction::None))
        .and_then(|b| b.neutral_button_res(ids::SAVE_DRAFT, ButtonAction::None))
        .unwrap()
        .create();

    let content = dialog.content();
    assert_eq!(content.title.as_deref(), Some("Mail senden"));
    assert_eq!(content.icon, Some(MAIL_ICON_HANDLE));
    assert_eq!(content.button(ButtonSlot::Positive).unwrap().text, "Speichern");
    // Missing in German, served from the English fallback.
    assert_eq!(content.button(ButtonSlot::Neutral).unwrap().text, "Save Draft");
    assert!(dialog.visibility().icon);
}

#[test]
fn resource_setters_follow_detected_locale() {
    let env = |var: &str| (var == "LANG").then(|| "de_DE.UTF-8".to_owned());
    let locale = detect_locale_with(env);
    assert_eq!(locale, "de-DE");

    let mut dialog = DialogBuilder::new(mailer_context(&locale))
        .title_res(ids::TITLE)
        .unwrap()
        .create();
    assert_eq!(dialog.content().title.as_deref(), Some("Mail senden"));

    dialog.set_message_res(ids::MESSAGE).unwrap();
    assert_eq!(
        dialog.content().body,
        BodyContent::Message("Bitte E-Mail-Adresse eingeben".into())
    );
}

#[test]
fn negative_button_without_action_dismisses() {
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .negative_button("Cancel", ButtonAction::None)
        .show();
    for _ in 0..2 {
        let outcome = dialog.click_button(ButtonSlot::BUTTON_NEGATIVE).unwrap();
        assert_eq!(outcome, ClickOutcome::Dismissed);
        assert!(!dialog.is_showing());
        dialog.show();
    }
}

// ============================================================================
// Custom view
// ============================================================================

#[test]
fn custom_view_without_buttons() {
    let dialog = DialogBuilder::new(mailer_context("en"))
        .view(Some(ViewHandle(42)))
        .create();
    let vis = dialog.visibility();
    assert!(!vis.top_region);
    assert!(vis.custom_panel);
    assert!(!vis.body_region);
    assert!(!vis.button_row);
    assert!(vis.no_button_spacer);
    assert_eq!(visible_regions(&vis), vec!["custom", "spacer"]);
}

#[test]
fn clearing_custom_view_leaves_empty_body() {
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .message("before")
        .create();
    dialog.set_view(Some(ViewHandle(1)));
    dialog.set_view(None);
    let vis = dialog.visibility();
    assert!(vis.body_region);
    assert!(!vis.message);
    assert!(!vis.custom_panel);
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn single_choice_initial_selection_and_click() {
    let log = CallLog::new();
    let ctx = mailer_context("en");
    let mut dialog = DialogBuilder::new(ctx.clone())
        .single_choice_items(["Small", "Medium", "Large"], Some(1), log.row_notify())
        .unwrap()
        .show();

    let state = dialog.list_state().unwrap();
    assert_eq!(state.checked_item(), Some(1));
    assert!(!state.is_item_checked(0));
    assert!(state.is_item_checked(1));
    assert!(!state.is_item_checked(2));

    let outcome = dialog.click_row(2).unwrap();
    assert_eq!(outcome, ClickOutcome::StayedOpen);
    assert!(dialog.is_showing());
    assert_eq!(log.calls(), vec![Call::Row(2)]);
    assert_eq!(dialog.list_state().unwrap().checked_item(), Some(2));
    assert_eq!(ctx.last_window().unwrap().checked_items(), Some(vec![2]));
}

#[test]
fn single_choice_delegate_result_is_ignored() {
    let log = CallLog::new();
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .single_choice_items(["a", "b"], None, log.row_delegate(false))
        .unwrap()
        .show();
    assert_eq!(dialog.click_row(0).unwrap(), ClickOutcome::StayedOpen);
    assert!(dialog.is_showing());
}

#[test]
fn multi_choice_never_dismisses() {
    let log = CallLog::new();
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .multi_choice_items_res(ids::RECIPIENTS, Some(vec![true, false, false]), log.multi_choice())
        .unwrap()
        .positive_button("Done", ButtonAction::None)
        .show();

    assert_eq!(dialog.click_row(1).unwrap(), ClickOutcome::StayedOpen);
    assert_eq!(dialog.click_row(0).unwrap(), ClickOutcome::StayedOpen);
    assert!(dialog.is_showing());
    assert_eq!(
        log.calls(),
        vec![Call::MultiChoice(1, true), Call::MultiChoice(0, false)]
    );
    assert_eq!(dialog.list_state().unwrap().checked_items(), vec![1]);

    assert!(dialog.click_button(ButtonSlot::Positive).unwrap().dismissed());
}

#[test]
fn multi_choice_length_mismatch_is_rejected() {
    let err = DialogBuilder::new(mailer_context("en"))
        .multi_choice_items(["a", "b", "c"], Some(vec![true]), Default::default())
        .unwrap_err();
    assert_eq!(
        err,
        DialogError::CheckedItemsLength {
            expected: 3,
            actual: 1
        }
    );
    assert!(err.is_invalid_argument());
}

#[test]
fn plain_list_dismisses_after_notify() {
    let log = CallLog::new();
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .items_res(ids::RECIPIENTS, log.row_notify())
        .unwrap()
        .show();
    assert!(dialog.click_row(2).unwrap().dismissed());
    assert_eq!(log.calls(), vec![Call::Row(2)]);
}

#[test]
fn plain_list_delegate_controls_dismissal() {
    let log = CallLog::new();
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .items(["keep", "close"], log.row_delegate(true))
        .show();
    assert_eq!(dialog.click_row(0).unwrap(), ClickOutcome::StayedOpen);
    dialog.set_items(["keep", "close"], RowAction::intercept(|_, row| row == 0));
    assert_eq!(dialog.click_row(1).unwrap(), ClickOutcome::Dismissed);
}

#[test]
fn empty_list_hides_list_region() {
    let dialog = DialogBuilder::new(mailer_context("en"))
        .items(Vec::<String>::new(), RowAction::None)
        .create();
    assert!(!dialog.visibility().list);
    assert!(dialog.visibility().body_region);
}

// ============================================================================
// Slots
// ============================================================================

#[test]
fn invalid_slot_fails_and_changes_nothing() {
    let mut dialog = DialogBuilder::new(mailer_context("en"))
        .title("t")
        .positive_button("OK", ButtonAction::None)
        .create();
    let before = dialog.content().clone();
    let vis = dialog.visibility();

    let err = dialog.set_button(3, "Nope", ButtonAction::None).unwrap_err();
    assert_eq!(err, DialogError::InvalidButtonSlot(3));
    assert_eq!(dialog.content(), &before);
    assert_eq!(dialog.visibility(), vis);

    assert_eq!(
        dialog.click_button(-4),
        Err(DialogError::InvalidButtonSlot(-4))
    );
}

// ============================================================================
// Themes and configuration
// ============================================================================

#[test]
fn theme_attribute_is_used_when_unset() {
    let ctx = themed_mailer_context("en");
    let builder = DialogBuilder::new(ctx.clone());
    assert_eq!(builder.theme().source, ThemeSource::Attribute);
    let _dialog = builder.create();
    assert_eq!(
        ctx.last_window().unwrap().theme(),
        ThemeId(ids::MAILER_THEME)
    );
}

#[test]
fn explicit_non_builtin_theme_is_honoured() {
    let ctx = themed_mailer_context("en");
    let dialog = DialogBuilder::with_theme(ctx, ThemeId(0x7f0e_0999)).create();
    assert_eq!(dialog.theme(), ThemeId(0x7f0e_0999));
}

#[test]
fn no_attribute_falls_back_to_light_default() {
    let builder = DialogBuilder::new(mailer_context("en"));
    assert_eq!(builder.theme().source, ThemeSource::Default);
    assert_eq!(builder.theme().id, BuiltinTheme::Default.id());
    assert!(!BuiltinTheme::Default.is_dark());
}

#[test]
fn scrollable_layout_reaches_window() {
    let ctx = mailer_context("en");
    let config = DialogConfig::default().scrollable().cancelable(false);
    let dialog = DialogBuilder::with_config(ctx.clone(), config).create();
    assert_eq!(dialog.layout(), DialogLayout::Scrollable);
    assert!(!dialog.is_cancelable());
    assert_eq!(
        ctx.last_window().unwrap().layout(),
        DialogLayout::Scrollable
    );
}
