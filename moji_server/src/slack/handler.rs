use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Form, Json, State, rejection::FormRejection, rejection::JsonRejection},
    http::StatusCode,
};
use moji_core::{
    helpers::messages,
    slack::{
        dto::{SlackCommandForm, SlackEnvelope},
        helpers::{is_bot_mention, reply_thread_ts, summarize_failure_reply},
    },
    summarize::handler::fetch_captions,
    youtube::helpers::extract_video_id,
};

use crate::state::ServerState;

/// Where an inbound event stopped. Every variant except `Challenge` is a
/// fixed reply text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Challenge(String),
    DuplicateEvent,
    NotAddressedToBot,
    LinkNotFound,
    UserCredentialMissing,
    CaptionsUnavailable,
    SummarizeFailed(&'static str),
    Processed,
}

impl EventOutcome {
    pub fn reply(&self) -> String {
        match self {
            EventOutcome::Challenge(challenge) => challenge.clone(),
            EventOutcome::DuplicateEvent => messages::DUPLICATE_EVENT.to_string(),
            EventOutcome::NotAddressedToBot => messages::NOT_TARGET_MENTION.to_string(),
            EventOutcome::LinkNotFound => messages::LINK_NOT_FOUND.to_string(),
            EventOutcome::UserCredentialMissing => messages::API_KEY_NOT_REGISTERED.to_string(),
            EventOutcome::CaptionsUnavailable => messages::SLACK_CAPTIONS_UNAVAILABLE.to_string(),
            EventOutcome::SummarizeFailed(reply) => reply.to_string(),
            EventOutcome::Processed => messages::EVENT_PROCESSED.to_string(),
        }
    }
}

pub async fn process_event(
    server_state: &ServerState,
    envelope: SlackEnvelope,
) -> Result<EventOutcome> {
    if let Some(challenge) = envelope.challenge {
        return Ok(EventOutcome::Challenge(challenge));
    }

    if let (Some(event_id), Some(_)) = (envelope.event_id.as_deref(), envelope.event_time) {
        if !server_state.seen_events().check_and_record(event_id).await {
            log::info!("Dropping duplicate Slack event {}", event_id);
            return Ok(EventOutcome::DuplicateEvent);
        }
    }

    let Some(event) = envelope.event else {
        return Ok(EventOutcome::NotAddressedToBot);
    };

    let config = server_state.config();
    if !is_bot_mention(&event, &config.slack_bot_name, config.slack_mention_policy) {
        return Ok(EventOutcome::NotAddressedToBot);
    }

    let Some(video_id) = event.text.as_deref().and_then(extract_video_id) else {
        return Ok(EventOutcome::LinkNotFound);
    };

    let user = event.user.clone().unwrap_or_default();
    let api_key = if user.is_empty() {
        None
    } else {
        server_state.api_keys().get_api_key(&user)?
    };
    let Some(api_key) = api_key else {
        return Ok(EventOutcome::UserCredentialMissing);
    };

    let Ok(captions) = fetch_captions(server_state.captions(), &video_id).await else {
        return Ok(EventOutcome::CaptionsUnavailable);
    };

    let summary = match server_state.summarizer().summarize(&api_key, &captions).await {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Summarizing {} for {} failed: {}", video_id, user, e);
            return Ok(EventOutcome::SummarizeFailed(summarize_failure_reply(&e)));
        }
    };

    match event.channel.as_deref().filter(|channel| !channel.is_empty()) {
        Some(channel) => {
            if let Err(e) = server_state
                .slack()
                .post_message(channel, &summary, reply_thread_ts(&event))
                .await
            {
                log::error!("Failed to post summary to {}: {}", channel, e);
            }
        }
        None => log::warn!("Event for {} has no channel, summary not posted", video_id),
    }

    Ok(EventOutcome::Processed)
}

pub async fn events(
    State(server_state): State<Arc<ServerState>>,
    payload: Result<Json<SlackEnvelope>, JsonRejection>,
) -> (StatusCode, String) {
    let envelope = match payload {
        Ok(Json(envelope)) => envelope,
        Err(e) => {
            log::error!("Rejected Slack event body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::SLACK_SUMMARIZE_FAILED.to_string(),
            );
        }
    };

    match process_event(&server_state, envelope).await {
        Ok(outcome) => (StatusCode::OK, outcome.reply()),
        Err(e) => {
            log::error!("Slack event handling failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::SLACK_SUMMARIZE_FAILED.to_string(),
            )
        }
    }
}

pub async fn command(
    State(server_state): State<Arc<ServerState>>,
    payload: Result<Form<SlackCommandForm>, FormRejection>,
) -> (StatusCode, String) {
    let form = match payload {
        Ok(Form(form)) => form,
        Err(e) => {
            log::error!("Rejected slash command body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::COMMAND_FAILED.to_string(),
            );
        }
    };

    if form.user_id.is_empty() {
        return (StatusCode::BAD_REQUEST, messages::USER_ID_MISSING.to_string());
    }

    let api_keys = server_state.api_keys();
    let result = match form.command.as_str() {
        "/setapikey" => {
            let api_key = form.text.trim();
            if api_key.is_empty() {
                return (StatusCode::BAD_REQUEST, messages::SET_API_KEY_USAGE.to_string());
            }
            api_keys
                .set_api_key(&form.user_id, api_key)
                .map(|_| messages::API_KEY_REGISTERED)
        }
        "/deleteapikey" => api_keys
            .delete_api_key(&form.user_id)
            .map(|_| messages::API_KEY_DELETED),
        other => {
            log::warn!("Unknown slash command {:?} from {}", other, form.user_id);
            return (StatusCode::BAD_REQUEST, messages::UNKNOWN_COMMAND.to_string());
        }
    };

    match result {
        Ok(reply) => {
            log::info!("{} handled for {}", form.command, form.user_id);
            (StatusCode::OK, reply.to_string())
        }
        Err(e) => {
            log::error!("{} failed for {}: {}", form.command, form.user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::COMMAND_FAILED.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use moji_core::summarizer::helpers::MOCK_SHORT_SUMMARY;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{router::router, state::test_support::state_for};

    const VIDEO_ID: &str = "dQw4w9WgXcQ";

    async fn read_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn post_event(state: Arc<ServerState>, body: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        (response.status(), read_text(response).await)
    }

    async fn post_command(state: Arc<ServerState>, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/slack/command")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        (response.status(), read_text(response).await)
    }

    fn mention_event(text: &str) -> Value {
        json!({
            "type": "event_callback",
            "event_id": "Ev01",
            "event_time": 1_700_000_000,
            "event": {
                "type": "app_mention",
                "text": text,
                "user": "U123",
                "channel": "C456",
                "ts": "1700000000.000100"
            }
        })
    }

    async fn mount_captions(server: &MockServer) {
        let page = format!(
            r#"<script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{}/api/timedtext?v={}&lang=ja","vssId":".ja","languageCode":"ja"}}]}}}}}};</script>"#,
            server.uri(),
            VIDEO_ID
        );
        Mock::given(method("GET"))
            .and(path("/watch"))
            .and(query_param("v", VIDEO_ID))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/timedtext"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0" dur="1.5">こんにちは</text><text start="1.5" dur="2">世界</text></transcript>"#,
            ))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_challenge_echo() {
        let server = MockServer::start().await;

        let (status, body) = post_event(
            state_for(&server.uri(), true),
            json!({"type": "url_verification", "challenge": "abc123"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "abc123");
    }

    #[tokio::test]
    async fn test_duplicate_event() {
        let server = MockServer::start().await;
        let state = state_for(&server.uri(), true);
        let payload = mention_event("hello without the bot");

        let (_, first) = post_event(state.clone(), payload.clone()).await;
        let (status, second) = post_event(state.clone(), payload).await;

        assert_eq!(first, messages::NOT_TARGET_MENTION);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second, messages::DUPLICATE_EVENT);
        assert!(!state.seen_events().check_and_record("Ev01").await);
    }

    #[tokio::test]
    async fn test_dedup_needs_event_time() {
        let server = MockServer::start().await;
        let state = state_for(&server.uri(), true);
        let payload = json!({"event_id": "Ev02", "event": {"text": "hi"}});

        post_event(state.clone(), payload.clone()).await;
        let (_, body) = post_event(state.clone(), payload).await;

        assert_eq!(body, messages::NOT_TARGET_MENTION);
        assert!(state.seen_events().check_and_record("Ev02").await);
    }

    #[tokio::test]
    async fn test_not_target_mention() {
        let server = MockServer::start().await;

        let no_event = json!({"type": "event_callback"});
        let (_, body) = post_event(state_for(&server.uri(), true), no_event).await;
        assert_eq!(body, messages::NOT_TARGET_MENTION);

        let mut bot_post = mention_event("@動画より文字派 https://youtu.be/dQw4w9WgXcQ");
        bot_post["event"]["subtype"] = json!("bot_message");
        let (_, body) = post_event(state_for(&server.uri(), true), bot_post).await;
        assert_eq!(body, messages::NOT_TARGET_MENTION);
    }

    #[tokio::test]
    async fn test_non_message_event_is_recorded_and_ignored() {
        let server = MockServer::start().await;
        let state = state_for(&server.uri(), true);
        let payload = json!({
            "event_id": "Ev9",
            "event_time": 1,
            "event": {"type": "user_change", "user": {"id": "U1"}}
        });

        let (status, body) = post_event(state.clone(), payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::NOT_TARGET_MENTION);

        let (status, body) = post_event(state, payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::DUPLICATE_EVENT);
    }

    #[tokio::test]
    async fn test_link_not_found() {
        let server = MockServer::start().await;

        let (status, body) = post_event(
            state_for(&server.uri(), true),
            mention_event("@動画より文字派 これを要約して"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::LINK_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_credential_missing() {
        let server = MockServer::start().await;

        let (_, body) = post_event(
            state_for(&server.uri(), true),
            mention_event("@動画より文字派 https://youtu.be/dQw4w9WgXcQ"),
        )
        .await;

        assert_eq!(body, messages::API_KEY_NOT_REGISTERED);
    }

    #[tokio::test]
    async fn test_captions_unavailable_reply() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        let state = state_for(&server.uri(), true);
        state.api_keys().set_api_key("U123", "sk-user").unwrap();

        let (_, body) = post_event(
            state,
            mention_event("@動画より文字派 https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        )
        .await;

        assert_eq!(body, messages::SLACK_CAPTIONS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_summary_posted_in_thread() {
        let server = MockServer::start().await;
        mount_captions(&server).await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(bearer_token("xoxb-test"))
            .and(body_partial_json(json!({
                "channel": "C456",
                "thread_ts": "1700000000.000100"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let state = state_for(&server.uri(), true);
        state.api_keys().set_api_key("U123", "sk-user").unwrap();

        let (status, body) = post_event(
            state,
            mention_event("@動画より文字派 https://youtu.be/dQw4w9WgXcQ"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::EVENT_PROCESSED);

        let requests = server.received_requests().await.unwrap();
        let posted = requests
            .iter()
            .find(|request| request.url.path() == "/chat.postMessage")
            .unwrap();
        let posted: Value = serde_json::from_slice(&posted.body).unwrap();
        assert_eq!(posted["text"], MOCK_SHORT_SUMMARY);
    }

    #[tokio::test]
    async fn test_post_failure_still_processed() {
        let server = MockServer::start().await;
        mount_captions(&server).await;
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": false, "error": "channel_not_found"})),
            )
            .mount(&server)
            .await;

        let state = state_for(&server.uri(), true);
        state.api_keys().set_api_key("U123", "sk-user").unwrap();

        let mut payload = mention_event("@動画より文字派 https://youtu.be/dQw4w9WgXcQ");
        payload["event"]["thread_ts"] = json!("1699999999.000001");
        let (_, body) = post_event(state, payload).await;

        assert_eq!(body, messages::EVENT_PROCESSED);
    }

    #[tokio::test]
    async fn test_malformed_event_body() {
        let server = MockServer::start().await;
        let request = Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let response = router(state_for(&server.uri(), true))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_text(response).await, messages::SLACK_SUMMARIZE_FAILED);
    }

    #[tokio::test]
    async fn test_set_and_delete_api_key() {
        let server = MockServer::start().await;
        let state = state_for(&server.uri(), true);

        let (status, body) =
            post_command(state.clone(), "command=%2Fsetapikey&text=+sk-abc+&user_id=U1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::API_KEY_REGISTERED);
        assert_eq!(
            state.api_keys().get_api_key("U1").unwrap().as_deref(),
            Some("sk-abc")
        );

        let (status, body) =
            post_command(state.clone(), "command=%2Fdeleteapikey&user_id=U1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, messages::API_KEY_DELETED);
        assert_eq!(state.api_keys().get_api_key("U1").unwrap(), None);
    }

    #[tokio::test]
    async fn test_command_rejections() {
        let server = MockServer::start().await;
        let state = state_for(&server.uri(), true);

        let (status, body) = post_command(state.clone(), "command=%2Fsetapikey&text=sk-abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, messages::USER_ID_MISSING);

        let (status, body) =
            post_command(state.clone(), "command=%2Fsetapikey&text=&user_id=U1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, messages::SET_API_KEY_USAGE);

        let (status, body) = post_command(state.clone(), "command=%2Fhelp&user_id=U1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, messages::UNKNOWN_COMMAND);
    }

    #[test]
    fn test_outcome_replies() {
        assert_eq!(EventOutcome::Challenge("xyz".into()).reply(), "xyz");
        assert_eq!(
            EventOutcome::SummarizeFailed(messages::QUOTA_EXCEEDED).reply(),
            messages::QUOTA_EXCEEDED
        );
        assert_eq!(EventOutcome::Processed.reply(), messages::EVENT_PROCESSED);
    }
}
