//! When steps for compose BDD scenarios.

use super::world::{ComposeWorld, run_async};
use draftline::draft::domain::{ChannelId, MessageId, QuotedMessage, SendOptions, UserId};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::when;

#[when("I type \"abc @exa def 123\"")]
fn type_mention_sentence(world: &mut ComposeWorld) -> eyre::Result<()> {
    let service = world.service()?;
    let end = service.draft().len();
    service
        .insert_text(end, "abc @exa def 123")
        .wrap_err("insert text")
}

#[when("I type \"@exa\" and then \"m\" before suggestions arrive")]
fn type_over_pending_lookup(world: &mut ComposeWorld) -> eyre::Result<()> {
    let service = world.service()?;
    service.insert_text(0, "@exa").wrap_err("insert trigger")?;
    service.insert_text(4, "m").wrap_err("extend trigger")?;

    let mut delivered = Vec::new();
    while let Some(set) = run_async(service.next_suggestions()) {
        delivered.push(set);
    }
    world.delivered = delivered;
    Ok(())
}

#[when("I accept the first mention suggestion")]
fn accept_first_mention(world: &mut ComposeWorld) -> eyre::Result<()> {
    let service = world.service()?;
    let set = run_async(service.next_suggestions())
        .ok_or_else(|| eyre!("no suggestions delivered"))?;
    let suggestion = set
        .suggestions
        .first()
        .ok_or_else(|| eyre!("suggestion set for '{}' is empty", set.trigger.query))?
        .clone();
    service
        .insert_suggestion(&suggestion)
        .wrap_err("accept suggestion")?;
    Ok(())
}

#[when("I link \"docs\" to \"https://example.com\" inside the mention")]
fn link_inside_mention(world: &mut ComposeWorld) -> eyre::Result<()> {
    let service = world.service()?;
    let result = service.add_linked_text("docs", "https://example.com", 6);
    world.last_error = result.err();
    Ok(())
}

#[when("I quote a message from the random channel")]
fn quote_other_channel(world: &mut ComposeWorld) -> eyre::Result<()> {
    let quote = QuotedMessage::new(
        MessageId::new(),
        ChannelId::new("random"),
        UserId::new("someone.else"),
        "hello from random",
    );
    let result = world.service()?.add_quote(quote);
    world.last_error = result.err();
    Ok(())
}

#[when("I send the draft")]
fn send_draft(world: &mut ComposeWorld) -> eyre::Result<()> {
    let service = world.service()?;
    run_async(service.send(SendOptions::default())).wrap_err("send draft")?;
    Ok(())
}
