//! Explicit per-session state. The calling surface (CLI, web page, test)
//! owns a `Session` and passes it around; nothing here lives in globals.

use tracing::info;

use crate::client::{CompletionClient, CompletionOptions};
use crate::error::SessionError;
use crate::prompts;

/// A finished generation: the chosen title, the keyword list that was fed
/// to the prompt, and the generated body.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub title: String,
    pub keywords: String,
    pub content: String,
}

impl BlogDraft {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// One interactive user's working state: generated titles, collected
/// keywords, and the latest draft.
pub struct Session {
    client: CompletionClient,
    model: String,
    max_retries: u32,
    pub titles: Option<String>,
    pub keywords: Vec<String>,
    pub draft: Option<BlogDraft>,
}

impl Session {
    pub fn new(client: CompletionClient, model: String, max_retries: u32) -> Self {
        Session {
            client,
            model,
            max_retries,
            titles: None,
            keywords: Vec::new(),
            draft: None,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: String) {
        self.model = model;
    }

    /// Add a keyword, trimmed. Blank and duplicate entries are dropped;
    /// returns whether the keyword was actually added.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn clear_keywords(&mut self) {
        self.keywords.clear();
    }

    pub fn clear_titles(&mut self) {
        self.titles = None;
    }

    pub fn clear_draft(&mut self) {
        self.draft = None;
    }

    /// Generate 10 candidate titles for a topic and keep them on the
    /// session. Empty topics are rejected before any network call.
    pub async fn generate_titles(&mut self, topic: &str) -> Result<&str, SessionError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        info!("generating titles for topic: {}", topic);
        let spec = prompts::title_prompt(topic);
        let titles = self
            .client
            .complete(spec.messages, &self.model, &self.with_retries(spec.options))
            .await?;

        Ok(self.titles.insert(titles).as_str())
    }

    /// Generate a full post for a chosen title using the session's
    /// keywords, and keep the draft on the session.
    pub async fn generate_blog(
        &mut self,
        title: &str,
        word_count: u32,
    ) -> Result<&BlogDraft, SessionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SessionError::EmptyTitle);
        }

        info!("generating ~{} word blog for title: {}", word_count, title);
        let spec = prompts::blog_prompt(title, &self.keywords, word_count);
        let content = self
            .client
            .complete(spec.messages, &self.model, &self.with_retries(spec.options))
            .await?;

        let draft = BlogDraft {
            title: title.to_string(),
            keywords: prompts::format_keywords(&self.keywords),
            content,
        };
        Ok(self.draft.insert(draft))
    }

    fn with_retries(&self, options: CompletionOptions) -> CompletionOptions {
        CompletionOptions {
            max_retries: self.max_retries,
            ..options
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChatTransport, TransportFault, TransportReply};
    use crate::error::CompletionError;
    use crate::schemas::chat::ChatRequest;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CannedTransport {
        content: String,
        calls: AtomicU32,
    }

    impl CannedTransport {
        fn new(content: &str) -> Arc<Self> {
            Arc::new(CannedTransport {
                content: content.to_string(),
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl ChatTransport for CannedTransport {
        async fn send(&self, _request: &ChatRequest) -> Result<TransportReply, TransportFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": self.content}}]
            });
            Ok(TransportReply {
                status: StatusCode::OK,
                body: body.to_string(),
            })
        }
    }

    fn session(transport: Arc<CannedTransport>) -> Session {
        let client = CompletionClient::with_transport(transport);
        Session::new(client, "test-model".to_string(), 3)
    }

    #[test]
    fn keywords_are_trimmed_and_deduplicated() {
        let mut session = session(CannedTransport::new(""));
        assert!(session.add_keyword("  Python "));
        assert!(!session.add_keyword("Python"));
        assert!(!session.add_keyword("   "));
        assert!(session.add_keyword("AI"));
        assert_eq!(session.keywords, vec!["Python", "AI"]);

        session.clear_keywords();
        assert!(session.keywords.is_empty());
    }

    #[tokio::test]
    async fn empty_topic_is_rejected_before_any_call() {
        let transport = CannedTransport::new("1. Title");
        let mut session = session(transport.clone());
        let result = session.generate_titles("   ").await;
        assert_eq!(result, Err(SessionError::EmptyTopic));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(session.titles.is_none());
    }

    #[tokio::test]
    async fn empty_title_is_rejected_before_any_call() {
        let transport = CannedTransport::new("body");
        let mut session = session(transport.clone());
        let result = session.generate_blog("", 400).await;
        assert_eq!(result, Err(SessionError::EmptyTitle));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generated_titles_are_kept_on_the_session() {
        let mut session = session(CannedTransport::new("1. One\n2. Two"));
        let titles = session.generate_titles(" Rust ").await.unwrap().to_string();
        assert_eq!(titles, "1. One\n2. Two");
        assert_eq!(session.titles.as_deref(), Some("1. One\n2. Two"));

        session.clear_titles();
        assert!(session.titles.is_none());
    }

    #[tokio::test]
    async fn generated_draft_records_formatted_keywords() {
        let mut session = session(CannedTransport::new("word ".repeat(5).trim()));
        session.add_keyword("Python");
        session.add_keyword("AI");
        let draft = session.generate_blog(" My Title ", 300).await.unwrap();
        assert_eq!(draft.title, "My Title");
        assert_eq!(draft.keywords, "Python, AI");
        assert_eq!(draft.word_count(), 5);
    }

    #[tokio::test]
    async fn draft_keywords_fall_back_when_none_collected() {
        let mut session = session(CannedTransport::new("body"));
        let draft = session.generate_blog("My Title", 300).await.unwrap();
        assert_eq!(draft.keywords, "general topics");
    }

    #[test]
    fn completion_errors_convert_for_display() {
        let error: SessionError = CompletionError::RateLimited.into();
        assert_eq!(
            error.to_string(),
            "rate limit exceeded, wait a minute and try again"
        );
    }
}
