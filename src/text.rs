pub mod chunking;
pub mod context;
pub mod prompt;

use regex::Regex;

/// Splits text into sentences at runs of terminator characters.
///
/// Each fragment between terminator runs is trimmed and closed with a period,
/// or with its original terminator run when `preserve_terminators` is set.
/// Fragments that are empty after trimming are dropped, unless the whole text
/// has no other content.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    terminator_run: Regex,
    preserve_terminators: bool,
}

impl SentenceSplitter {
    pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

    // every sentence is closed with this unless terminators are preserved
    pub const NORMALIZED_TERMINATOR: &'static str = ".";

    pub fn new(
        terminators: Option<&[char]>,
        preserve_terminators: bool,
    ) -> Result<Self, regex::Error> {
        let class: String = terminators
            .unwrap_or(&Self::TERMINATORS)
            .iter()
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        // an empty class fails to compile, which is the error we want for no terminators
        let terminator_run = Regex::new(&format!("[{class}]+"))?;
        Ok(SentenceSplitter {
            terminator_run,
            preserve_terminators,
        })
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = vec![];
        let mut prev = 0;
        for m in self.terminator_run.find_iter(text) {
            self.push_sentence(&mut sentences, &text[prev..m.start()], m.as_str());
            prev = m.end();
        }
        // trailing fragment has no terminator of its own
        self.push_sentence(&mut sentences, &text[prev..], "");
        if sentences.is_empty() && !text.is_empty() {
            return self.terminator_sentences(text);
        }
        sentences
    }

    /// Text with nothing but terminators and whitespace still yields one
    /// closing mark per fragment.
    fn terminator_sentences(&self, text: &str) -> Vec<String> {
        let runs: Vec<&str> = self.terminator_run.find_iter(text).map(|m| m.as_str()).collect();
        if self.preserve_terminators && !runs.is_empty() {
            return runs.into_iter().map(str::to_string).collect();
        }
        vec![Self::NORMALIZED_TERMINATOR.to_string(); runs.len() + 1]
    }

    fn push_sentence(&self, sentences: &mut Vec<String>, fragment: &str, terminator: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        let terminator = if self.preserve_terminators {
            terminator
        } else {
            Self::NORMALIZED_TERMINATOR
        };
        sentences.push(format!("{fragment}{terminator}"));
    }
}
