//! Chat session: questions, answers and the transcript

use tracing::{debug, info, warn};

use crate::app::context::AppContext;
use crate::app::state::AppState;
use crate::app::view::LoadingGuard;
use crate::domain::{AskOutcome, ChatMessage, DomainError, MessageFormat};

pub(crate) const NO_ANSWER: &str = "No valid answer received, please try rephrasing the question";
pub(crate) const NETWORK_FAILED: &str =
    "Network request failed, please check the connection and retry";

/// Ask the selected knowledge base a question.
///
/// Blank input is rejected before anything is rendered or sent. The
/// loading indicator is shown for the duration of the request and removed
/// on every path.
pub async fn submit_question(
    state: &mut AppState,
    ctx: &AppContext,
    question: &str,
) -> Result<(), DomainError> {
    let question = question.trim();

    if question.is_empty() {
        debug!("Ignoring empty question");
        return Err(DomainError::validation("Question cannot be empty"));
    }

    push_message(state, ctx, ChatMessage::user(question));

    let knowledge_base = state.query_scope().to_string();
    info!(knowledge_base = %knowledge_base, "Submitting question");

    let result = {
        let _loading = LoadingGuard::show(ctx.view.as_ref());
        ctx.backend.ask(question, &knowledge_base).await
    };

    let (reply, outcome) = match result {
        Ok(AskOutcome::Answer { text, metadata }) => {
            let format = if ctx.options.render_markdown {
                MessageFormat::Markdown
            } else {
                MessageFormat::Plain
            };

            let mut reply = ChatMessage::assistant(text).with_format(format);
            if ctx.options.show_metadata {
                reply = reply.with_metadata(metadata);
            }

            (reply, Ok(()))
        }
        Ok(AskOutcome::BackendError { message }) => {
            warn!(error = %message, "Backend reported an error for the question");
            (
                ChatMessage::assistant(format!("System error: {}", message)),
                Err(DomainError::backend(message)),
            )
        }
        Ok(AskOutcome::NoAnswer) => (
            ChatMessage::assistant(NO_ANSWER),
            Err(DomainError::malformed("response carried no answer")),
        ),
        Err(e @ DomainError::MalformedResponse { .. }) => {
            warn!(error = %e, "Unreadable answer payload");
            (ChatMessage::assistant(NO_ANSWER), Err(e))
        }
        Err(e) if e.is_network() => {
            warn!(error = %e, "Question request failed");
            (ChatMessage::assistant(NETWORK_FAILED), Err(e))
        }
        Err(e) => {
            warn!(error = %e, "Question could not be answered");
            let message = e
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            (ChatMessage::assistant(format!("System error: {}", message)), Err(e))
        }
    };

    push_message(state, ctx, reply);
    outcome
}

/// Drop the transcript
pub fn clear_chat(state: &mut AppState, ctx: &AppContext) {
    state.transcript.clear();
    ctx.view.clear_messages();
}

fn push_message(state: &mut AppState, ctx: &AppContext, message: ChatMessage) {
    ctx.view.append_message(&message);
    state.transcript.push(message);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::app::context::ChatOptions;
    use crate::app::view::testing::{RecordingView, ViewEvent};
    use crate::domain::{AnswerMetadata, MessageRole, MockKnowledgeBaseBackend};

    fn context(backend: MockKnowledgeBaseBackend, view: Arc<RecordingView>) -> AppContext {
        AppContext::new(Arc::new(backend), view, ChatOptions::default())
    }

    fn selected_state() -> AppState {
        let mut state = AppState::new();
        state.knowledge_bases = vec!["java".into()];
        state.selected = Some("java".into());
        state
    }

    #[tokio::test]
    async fn test_blank_question_sends_nothing() {
        let mut backend = MockKnowledgeBaseBackend::new();
        backend.expect_ask().never();

        let view = Arc::new(RecordingView::new());
        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        assert!(submit_question(&mut state, &ctx, "").await.is_err());
        assert!(submit_question(&mut state, &ctx, "  \n\t ").await.is_err());

        assert!(state.transcript.is_empty());
        assert!(view.events().is_empty());
    }

    #[tokio::test]
    async fn test_answer_is_appended_with_metadata() {
        let mut backend = MockKnowledgeBaseBackend::new();
        backend
            .expect_ask()
            .with(eq("What is the JVM?"), eq("java"))
            .times(1)
            .returning(|_, _| {
                Ok(AskOutcome::Answer {
                    text: "**Java Virtual Machine**".to_string(),
                    metadata: AnswerMetadata {
                        confidence: Some(0.92),
                        matched_kbs: Some(vec!["java".to_string()]),
                        context_length: Some(300),
                    },
                })
            });

        let view = Arc::new(RecordingView::new());
        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        submit_question(&mut state, &ctx, "  What is the JVM? ")
            .await
            .unwrap();

        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[0].role, MessageRole::User);
        assert_eq!(state.transcript[0].text, "What is the JVM?");

        let answer = &state.transcript[1];
        assert_eq!(answer.role, MessageRole::Assistant);
        assert_eq!(answer.format, MessageFormat::Markdown);
        assert_eq!(answer.to_html(), "<strong>Java Virtual Machine</strong>");
        assert_eq!(
            answer.annotation().as_deref(),
            Some("confidence: 92.0% | knowledge bases: java | context: 300 chars")
        );
        assert_eq!(view.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_options_disable_markdown_and_metadata() {
        let mut backend = MockKnowledgeBaseBackend::new();
        backend.expect_ask().returning(|_, _| {
            Ok(AskOutcome::Answer {
                text: "plain".to_string(),
                metadata: AnswerMetadata {
                    confidence: Some(0.5),
                    matched_kbs: Some(vec![]),
                    context_length: None,
                },
            })
        });

        let view = Arc::new(RecordingView::new());
        let options = ChatOptions {
            render_markdown: false,
            show_metadata: false,
            ..ChatOptions::default()
        };
        let ctx = AppContext::new(Arc::new(backend), view, options);
        let mut state = selected_state();

        submit_question(&mut state, &ctx, "q").await.unwrap();

        let answer = &state.transcript[1];
        assert_eq!(answer.format, MessageFormat::Plain);
        assert!(answer.metadata.is_none());
    }

    #[tokio::test]
    async fn test_loading_visible_only_while_in_flight() {
        let view = Arc::new(RecordingView::new());

        let mut backend = MockKnowledgeBaseBackend::new();
        let probe = view.clone();
        backend.expect_ask().returning(move |_, _| {
            assert!(probe.is_loading());
            Ok(AskOutcome::Answer {
                text: "ok".to_string(),
                metadata: AnswerMetadata::default(),
            })
        });

        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        submit_question(&mut state, &ctx, "q").await.unwrap();

        assert!(!view.is_loading());
        let events = view.events();
        let shown = events.iter().position(|e| *e == ViewEvent::LoadingShown);
        let hidden = events.iter().position(|e| *e == ViewEvent::LoadingHidden);
        assert!(shown.unwrap() < hidden.unwrap());
    }

    #[tokio::test]
    async fn test_network_failure_appends_fallback_and_hides_loading() {
        let view = Arc::new(RecordingView::new());

        let mut backend = MockKnowledgeBaseBackend::new();
        let probe = view.clone();
        backend.expect_ask().returning(move |_, _| {
            assert!(probe.is_loading());
            Err(DomainError::transport("connection reset"))
        });

        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        assert!(submit_question(&mut state, &ctx, "q").await.is_err());

        assert!(!view.is_loading());
        assert_eq!(state.transcript[1].text, NETWORK_FAILED);
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported_as_network_failure() {
        let view = Arc::new(RecordingView::new());

        let mut backend = MockKnowledgeBaseBackend::new();
        let probe = view.clone();
        backend.expect_ask().returning(move |_, _| {
            assert!(probe.is_loading());
            Err(DomainError::http(500, Some("boom".to_string())))
        });

        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        let err = submit_question(&mut state, &ctx, "q").await.unwrap_err();

        assert!(matches!(err, DomainError::Http { status: 500, .. }));
        assert!(!view.is_loading());
        assert_eq!(state.transcript[1].text, NETWORK_FAILED);
        assert!(!state.transcript[1].text.contains("boom"));
    }

    #[tokio::test]
    async fn test_client_side_failure_is_a_system_error() {
        let mut backend = MockKnowledgeBaseBackend::new();
        backend
            .expect_ask()
            .returning(|_, _| Err(DomainError::configuration("Backend URL cannot be a base")));

        let view = Arc::new(RecordingView::new());
        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        assert!(submit_question(&mut state, &ctx, "q").await.is_err());
        assert_eq!(
            state.transcript[1].text,
            "System error: Configuration error: Backend URL cannot be a base"
        );
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_backend_error_and_missing_answer() {
        let mut backend = MockKnowledgeBaseBackend::new();
        let mut calls = 0;
        backend.expect_ask().times(3).returning(move |_, _| {
            calls += 1;
            match calls {
                1 => Ok(AskOutcome::BackendError {
                    message: "model offline".to_string(),
                }),
                2 => Ok(AskOutcome::NoAnswer),
                _ => Err(DomainError::malformed("expected value at line 1")),
            }
        });

        let view = Arc::new(RecordingView::new());
        let ctx = context(backend, view.clone());
        let mut state = selected_state();

        assert!(submit_question(&mut state, &ctx, "one").await.is_err());
        assert!(submit_question(&mut state, &ctx, "two").await.is_err());
        assert!(submit_question(&mut state, &ctx, "three").await.is_err());

        let replies: Vec<&str> = state
            .transcript
            .iter()
            .filter(|m| !m.is_user())
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            replies,
            vec!["System error: model offline", NO_ANSWER, NO_ANSWER]
        );
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_question_without_selection_uses_empty_scope() {
        let mut backend = MockKnowledgeBaseBackend::new();
        backend
            .expect_ask()
            .with(eq("q"), eq(""))
            .times(1)
            .returning(|_, _| Ok(AskOutcome::NoAnswer));

        let view = Arc::new(RecordingView::new());
        let ctx = context(backend, view);
        let mut state = AppState::new();

        let _ = submit_question(&mut state, &ctx, "q").await;
    }

    #[test]
    fn test_clear_chat() {
        let view = Arc::new(RecordingView::new());
        let ctx = context(MockKnowledgeBaseBackend::new(), view.clone());
        let mut state = selected_state();
        state.transcript.push(ChatMessage::user("hello"));

        clear_chat(&mut state, &ctx);

        assert!(state.transcript.is_empty());
        assert_eq!(view.events(), vec![ViewEvent::Cleared]);
    }
}
