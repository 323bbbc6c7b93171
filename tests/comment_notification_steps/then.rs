//! Then steps for comment notification BDD scenarios.

use super::world::{CommentNotificationWorld, run_async};
use rstest_bdd_macros::then;

#[then("the fan-out sends {count:usize} notification emails")]
fn fan_out_sends(world: &CommentNotificationWorld, count: usize) -> Result<(), eyre::Report> {
    let notices = world.comment_notices();
    if notices.len() != count {
        return Err(eyre::eyre!(
            "expected {count} notification emails, found {}",
            notices.len()
        ));
    }
    Ok(())
}

#[then(r#""{email}" receives a comment notice"#)]
fn receives_comment_notice(
    world: &CommentNotificationWorld,
    email: String,
) -> Result<(), eyre::Report> {
    let found = world
        .comment_notices()
        .iter()
        .any(|m| m.to == email && m.subject.starts_with("New Comment on Task:"));
    if !found {
        return Err(eyre::eyre!("no comment notice was sent to {email}"));
    }
    Ok(())
}

#[then(r#""{email}" receives a mention notice"#)]
fn receives_mention_notice(
    world: &CommentNotificationWorld,
    email: String,
) -> Result<(), eyre::Report> {
    let found = world
        .comment_notices()
        .iter()
        .any(|m| m.to == email && m.subject.starts_with("You were tagged in a comment:"));
    if !found {
        return Err(eyre::eyre!("no mention notice was sent to {email}"));
    }
    Ok(())
}

#[then(r#"the comment is stored with tag "{email}""#)]
fn comment_stored_with_tag(
    world: &CommentNotificationWorld,
    email: String,
) -> Result<(), eyre::Report> {
    let comment = match world.last_comment.as_ref() {
        Some(Ok(comment)) => comment,
        Some(Err(err)) => return Err(eyre::eyre!("comment creation failed: {err}")),
        None => return Err(eyre::eyre!("missing comment result in scenario world")),
    };
    if !comment.tags().contains(&email) {
        return Err(eyre::eyre!(
            "expected tag {email}, found {:?}",
            comment.tags()
        ));
    }

    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let detail = run_async(world.board.find_task_with_comments(task.id()))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task vanished from the store"))?;
    if !detail.comments.iter().any(|c| c.id() == comment.id()) {
        return Err(eyre::eyre!("stored comment is not attached to the task"));
    }
    Ok(())
}
