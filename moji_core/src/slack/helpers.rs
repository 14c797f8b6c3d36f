use super::dto::SlackEvent;
use crate::config::dto::MentionPolicy;
use crate::helpers::messages;
use crate::summarize::error::{SummarizeError, UpstreamFailure};

/// Whether `event` is a user message addressed to the bot.
///
/// Anything carrying a `subtype` (bot posts, edits, joins) is ignored.
pub fn is_bot_mention(event: &SlackEvent, mention: &str, policy: MentionPolicy) -> bool {
    if event.subtype.as_deref().is_some_and(|subtype| !subtype.is_empty()) {
        log::debug!("Ignoring event with subtype {:?}", event.subtype);
        return false;
    }

    let Some(text) = event.text.as_deref() else {
        return false;
    };

    let matched = match policy {
        MentionPolicy::Prefix => text.starts_with(mention),
        MentionPolicy::Contains => text.starts_with(mention) || text.contains(mention),
    };

    log::debug!("Mention check on {:?} with {:?}: {}", text, policy, matched);
    matched
}

/// Replies go into the existing thread, or start one under the message itself.
pub fn reply_thread_ts(event: &SlackEvent) -> Option<String> {
    event
        .thread_ts
        .clone()
        .filter(|ts| !ts.is_empty())
        .or_else(|| event.ts.clone())
}

pub fn summarize_failure_reply(error: &SummarizeError) -> &'static str {
    match error.upstream_failure() {
        Some(UpstreamFailure::AuthInvalid) => messages::API_KEY_INVALID,
        Some(UpstreamFailure::QuotaExceeded) => messages::QUOTA_EXCEEDED,
        _ => messages::SLACK_SUMMARIZE_FAILED,
    }
}
