//! Integration tests for the chat API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use famcal::ai::agents::calendar::APOLOGY_MESSAGE;
    use famcal::api::public::chat::{ChatResponse, ChatTranscriptResponse};
    use serde_json::json;
    use tower::util::ServiceExt;

    use crate::test_utils::{
        body_to_string, completion_text, completion_tool_call, test_app, test_app_with_llm,
    };

    fn post_chat(message: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/api/chat")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(message.to_string()))
            .unwrap()
    }

    /// Tests the transcript starts with the welcome message
    #[tokio::test]
    async fn it_gets_welcome_transcript() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        let transcript: ChatTranscriptResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(transcript.messages.len(), 1);
        assert_eq!(transcript.messages[0].id, "welcome");
    }

    /// Tests a turn where the model creates an event
    #[tokio::test]
    async fn it_creates_an_event_through_chat() {
        let mut server = mockito::Server::new_async().await;
        let _mock1 = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_tool_call(
                "call_1",
                "createEvent",
                json!({
                    "summary": "Dentist",
                    "start": "2025-05-01T10:00:00",
                    "end": "2025-05-01T11:00:00"
                }),
            ))
            .expect(1)
            .create();
        let _mock2 = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_text("Tandlægen er booket."))
            .expect(1)
            .create();

        let (app, store) = test_app_with_llm(&server.url());

        let response = app
            .clone()
            .oneshot(post_chat(json!({"message": "Book tandlæge 1. maj kl 10"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        let chat: ChatResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(chat.reply.text, "Tandlægen er booket.");
        assert!(!chat.reply.is_error);
        assert_eq!(chat.events.len(), 3);
        assert!(chat.events.iter().any(|e| e.summary == "Dentist"));
        assert_eq!(store.len(), 3);

        // Welcome, user, model
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        let transcript: ChatTranscriptResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(transcript.messages.len(), 3);
    }

    /// Tests an unreachable provider yields the apology as an error entry
    #[tokio::test]
    async fn it_reports_provider_failure() {
        let (app, store) = test_app();
        let before = store.list();

        let response = app
            .oneshot(post_chat(json!({"message": "Hej"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        let chat: ChatResponse = serde_json::from_str(&body).unwrap();
        assert!(chat.reply.is_error);
        assert_eq!(chat.reply.text, APOLOGY_MESSAGE);
        assert_eq!(store.list(), before);
    }

    /// Tests blank messages are rejected
    #[tokio::test]
    async fn it_returns_400_for_blank_message() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(post_chat(json!({"message": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests chat POST returns 422 for missing message
    #[tokio::test]
    async fn it_returns_422_for_missing_message() {
        let (app, _store) = test_app();

        let response = app
            .oneshot(post_chat(json!({"text": "Hej"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
