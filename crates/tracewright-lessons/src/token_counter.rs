//! Token counter — tiktoken-rs wrapper, same caching shape as
//! `drift-context::tokenization::counter::TokenCounter`.

use std::sync::OnceLock;

pub struct TokenCounter {
    model: String,
    bpe: OnceLock<Option<tiktoken_rs::CoreBPE>>,
}

impl TokenCounter {
    pub fn new(model: &str) -> Self {
        Self { model: model.to_string(), bpe: OnceLock::new() }
    }

    fn get_bpe(&self) -> Option<&tiktoken_rs::CoreBPE> {
        self.bpe
            .get_or_init(|| {
                tiktoken_rs::get_bpe_from_model(&self.model).or_else(|_| tiktoken_rs::get_bpe_from_model("gpt-4")).ok()
            })
            .as_ref()
    }

    /// Count tokens, falling back to the 4-chars-per-token approximation if
    /// no tokenizer could be loaded for either the requested or fallback model.
    pub fn count(&self, text: &str) -> usize {
        match self.get_bpe() {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => Self::count_approximate(text),
        }
    }

    pub fn count_approximate(text: &str) -> usize {
        text.len().div_ceil(4)
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new("gpt-4")
    }
}
