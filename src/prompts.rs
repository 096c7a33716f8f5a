//! The two call-site policies built on top of the completion client:
//! title generation and blog generation.

use crate::client::CompletionOptions;
use crate::schemas::chat::ChatMessage;

/// A ready-to-send conversation plus the sampling knobs it was designed for.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

/// Hard cap on blog generation regardless of requested word count.
const BLOG_MAX_TOKENS_CAP: u32 = 2000;

/// Prompt for exactly 10 numbered candidate titles. The caller must reject
/// empty-after-trim topics before getting here.
pub fn title_prompt(topic: &str) -> PromptSpec {
    let messages = vec![
        ChatMessage::system(
            "You are a creative blog title generator. Generate exactly 10 numbered \
             blog titles, one per line.",
        ),
        ChatMessage::user(format!(
            "Generate 10 creative, attention-grabbing blog post titles about '{}'. \
             Target audience: beginners and tech enthusiasts. Format: numbered list \
             1-10, no explanations.",
            topic
        )),
    ];

    PromptSpec {
        messages,
        options: CompletionOptions {
            temperature: 0.8,
            max_tokens: 400,
            ..CompletionOptions::default()
        },
    }
}

/// Prompt for a full blog post. Token budget is twice the word count,
/// capped at 2000.
pub fn blog_prompt(title: &str, keywords: &[String], word_count: u32) -> PromptSpec {
    let keywords = format_keywords(keywords);
    let messages = vec![
        ChatMessage::system(format!(
            "You are a professional blog writer. Write informative, engaging, and \
             well-structured blog posts of approximately {} words.",
            word_count
        )),
        ChatMessage::user(format!(
            "Write a comprehensive blog post with the following specifications:\n\n\
             Title: {}\n\
             Keywords to include: {}\n\
             Target length: {} words\n\
             Target audience: beginners\n\n\
             Structure your blog post with:\n\
             1. An engaging introduction\n\
             2. Well-organized main content with clear points\n\
             3. A strong conclusion\n\n\
             Make it informative, easy to understand, and engaging.",
            title, keywords, word_count
        )),
    ];

    PromptSpec {
        messages,
        options: CompletionOptions {
            temperature: 0.7,
            max_tokens: (word_count * 2).min(BLOG_MAX_TOKENS_CAP),
            ..CompletionOptions::default()
        },
    }
}

/// Comma-joined keyword list, or the generic fallback when none were given.
pub fn format_keywords(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "general topics".to_string()
    } else {
        keywords.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_requests_ten_numbered_items() {
        for topic in ["Rust for beginners", "a", "🚀"] {
            let spec = title_prompt(topic);
            assert_eq!(spec.messages[0].role, "system");
            assert!(spec.messages[0].content.contains("exactly 10 numbered"));
            assert_eq!(spec.messages[1].role, "user");
            assert!(spec.messages[1].content.contains(topic));
            assert_eq!(spec.options.temperature, 0.8);
            assert_eq!(spec.options.max_tokens, 400);
        }
    }

    #[test]
    fn blog_max_tokens_is_twice_word_count_capped() {
        assert_eq!(blog_prompt("t", &[], 400).options.max_tokens, 800);
        assert_eq!(blog_prompt("t", &[], 1000).options.max_tokens, 2000);
        assert_eq!(blog_prompt("t", &[], 1200).options.max_tokens, 2000);
        assert_eq!(blog_prompt("t", &[], 50).options.max_tokens, 100);
    }

    #[test]
    fn blog_prompt_embeds_title_keywords_and_length() {
        let keywords = vec!["Python".to_string(), "AI".to_string()];
        let spec = blog_prompt("My Title", &keywords, 400);
        let user = &spec.messages[1].content;
        assert!(user.contains("Title: My Title"));
        assert!(user.contains("Keywords to include: Python, AI"));
        assert!(user.contains("Target length: 400 words"));
        assert_eq!(spec.options.temperature, 0.7);
    }

    #[test]
    fn empty_keywords_fall_back_to_general_topics() {
        assert_eq!(format_keywords(&[]), "general topics");
        let spec = blog_prompt("My Title", &[], 300);
        assert!(spec.messages[1].content.contains("Keywords to include: general topics"));
    }
}
