//! Approximate token counting for the admission check.
//!
//! There is no exact tokenizer for the deployed model here; the check only
//! needs to reject clearly oversized prompts before they hit the wire, so a
//! conservative character-based estimate is enough. Mixed Korean/English
//! review prompts land around 2-4 characters per token; we divide by 3 and
//! round up, which overestimates for plain English and stays safe for CJK.

/// Fixed per-request framing overhead, in tokens.
pub const REQUEST_OVERHEAD_TOKENS: usize = 8;

/// Estimates the token count of `text`. Upper-bound oriented.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.chars().count().div_ceil(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn rounds_up() {
        assert_eq!(estimate_tokens("ab"), 1);
        assert_eq!(estimate_tokens("abcd"), 2);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 6 Korean syllables = 18 bytes but 6 chars.
        assert_eq!(estimate_tokens("리뷰를시작함"), 2);
    }
}
