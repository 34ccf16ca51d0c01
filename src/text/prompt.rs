//! Answer prompt rendered around the retrieved context

use super::context::{ContextDocument, format_context};

pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are an AI assistant specializing in Physical AI & Humanoid Robotics.
Use the following pieces of context to answer the question at the end.
If you don't know the answer, just say that you don't know, don't try to make up an answer.
Keep the answer concise but informative and cite sources when possible.";

pub const CONTEXT_HEADING: &str = "Context from the Physical AI & Robotics textbook:";

/// Render the answer prompt for an already formatted context block
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "{ASSISTANT_INSTRUCTIONS}\n\n{CONTEXT_HEADING}\n{context}\n\nQuestion: {}\nHelpful Answer:",
        question.trim()
    )
}

pub fn build_prompt_from_documents(docs: &[ContextDocument], question: &str) -> String {
    build_prompt(&format_context(docs), question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::context::NO_CONTEXT;

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("Document 1 (Source: a, Title: b):\nbody\n---\n", "  What is ROS?\n");
        assert!(prompt.starts_with("You are an AI assistant specializing in Physical AI"));
        assert!(prompt.contains(
            "Context from the Physical AI & Robotics textbook:\nDocument 1 (Source: a, Title: b):\nbody\n---\n"
        ));
        assert!(prompt.ends_with("Question: What is ROS?\nHelpful Answer:"));
    }

    #[test]
    fn test_prompt_without_documents() {
        let prompt = build_prompt_from_documents(&[], "What is a humanoid?");
        assert!(prompt.contains(&format!("{CONTEXT_HEADING}\n{NO_CONTEXT}\n")));
    }

    #[test]
    fn test_prompt_keeps_document_order() {
        let docs = vec![
            ContextDocument::new("first").with_source("1.md"),
            ContextDocument::new("second").with_source("2.md"),
        ];
        let prompt = build_prompt_from_documents(&docs, "q");
        let first = prompt.find("Document 1 (Source: 1.md").unwrap();
        let second = prompt.find("Document 2 (Source: 2.md").unwrap();
        assert!(first < second);
    }
}
