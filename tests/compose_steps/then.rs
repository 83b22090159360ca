//! Then steps for compose BDD scenarios.

use super::world::ComposeWorld;
use draftline::draft::error::{DraftError, ValidationError};
use eyre::eyre;
use rstest_bdd_macros::then;

#[then("the draft text is \"abc example User 0 def 123\"")]
fn draft_text_after_mention(world: &mut ComposeWorld) -> eyre::Result<()> {
    assert_eq!(world.service()?.draft().text(), "abc example User 0 def 123");
    Ok(())
}

#[then("the draft renders \"abc [example User 0](pn-user://example.user.0) def 123\"")]
fn draft_renders_mention(world: &mut ComposeWorld) -> eyre::Result<()> {
    assert_eq!(
        world.service()?.draft().render(),
        "abc [example User 0](pn-user://example.user.0) def 123"
    );
    Ok(())
}

#[then("only suggestions for \"exam\" are delivered")]
fn only_latest_suggestions(world: &mut ComposeWorld) -> eyre::Result<()> {
    let current = world.service()?.epoch();
    let set = world
        .delivered
        .first()
        .ok_or_else(|| eyre!("expected a suggestion set for the latest edit"))?;

    assert_eq!(world.delivered.len(), 1);
    assert_eq!(set.trigger.query, "exam");
    assert_eq!(set.epoch, current);
    Ok(())
}

#[then("the edit is rejected as overlapping")]
fn rejected_as_overlapping(world: &mut ComposeWorld) -> eyre::Result<()> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre!("expected error"))?;

    assert!(matches!(
        error,
        DraftError::Validation(ValidationError::Overlap(_))
    ));
    Ok(())
}

#[then("the edit is rejected as cross-channel")]
fn rejected_as_cross_channel(world: &mut ComposeWorld) -> eyre::Result<()> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre!("expected error"))?;

    assert!(matches!(error, DraftError::CrossChannel { .. }));
    assert!(world.service()?.draft().quoted_message().is_none());
    Ok(())
}

#[then("the sender received \"abc [example User 0](pn-user://example.user.0) def 123\"")]
fn sender_received_markup(world: &mut ComposeWorld) -> eyre::Result<()> {
    let sent = world.sender.sent();
    let [message] = sent.as_slice() else {
        return Err(eyre!("expected one sent message, got {}", sent.len()));
    };

    assert_eq!(
        message.message.text,
        "abc [example User 0](pn-user://example.user.0) def 123"
    );
    assert_eq!(message.message.plain_text, "abc @example User 0 def 123");
    Ok(())
}

#[then("the draft is empty")]
fn draft_is_empty(world: &mut ComposeWorld) -> eyre::Result<()> {
    assert!(world.service()?.draft().is_empty());
    Ok(())
}
