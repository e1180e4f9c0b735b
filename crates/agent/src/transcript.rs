//! Free-text transcript heuristics
//!
//! The hosted model answers in free text, so the turn pipeline leans on two
//! of its conventions: new content arrives as the final line of the
//! transcript, and a continued transcript echoes the candidate's utterance
//! ahead of the new reply. Both conventions live here and nowhere else, so
//! a structured model API would replace exactly one module.

use ai_interviewer_core::{ACKNOWLEDGMENT, CANDIDATE_MARKER, INTERVIEWER_MARKER, SEED_QUESTION};

/// The most recent line of the model's transcript, which by convention is
/// the question to ask next. An empty transcript falls back to the seed
/// question.
pub fn first_question(conversation: &str) -> String {
    conversation
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| SEED_QUESTION.to_string())
}

/// The new portion of the model's reply: everything after the first echo of
/// the candidate's just-submitted utterance, with the joining punctuation
/// dropped. If the utterance is not echoed the whole text is the reply; if
/// nothing remains, a fixed acknowledgment stands in.
pub fn extract_reply(full_response: &str, utterance: &str) -> String {
    let tail = match full_response.split_once(utterance) {
        Some((_, rest)) => rest,
        None => full_response,
    };
    let tail = tail
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | ':' | ';'))
        .trim_end();
    if tail.is_empty() {
        ACKNOWLEDGMENT.to_string()
    } else {
        tail.to_string()
    }
}

/// Append one candidate/interviewer exchange to the caller-supplied history.
/// Appending is the transcript's only mutation, and it happens only here.
pub fn append_exchange(history: &str, utterance: &str, reply: &str) -> String {
    format!("{history}\n\n{CANDIDATE_MARKER} {utterance}\n\n{INTERVIEWER_MARKER} {reply}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_question_is_last_line() {
        assert_eq!(first_question("Q1\nQ2\nQ3"), "Q3");
        assert_eq!(first_question("Q1\nQ2\nQ3\n"), "Q3");
        assert_eq!(first_question("Only question"), "Only question");
    }

    #[test]
    fn test_first_question_skips_trailing_blanks() {
        assert_eq!(first_question("Q1\nQ2\n\n   \n"), "Q2");
    }

    #[test]
    fn test_first_question_empty_transcript_seeds() {
        assert_eq!(first_question(""), SEED_QUESTION);
        assert_eq!(first_question("\n  \n"), SEED_QUESTION);
    }

    #[test]
    fn test_extract_reply_takes_suffix_after_utterance() {
        let reply = extract_reply("I like Go. Great, tell me more.", "I like Go");
        assert_eq!(reply, "Great, tell me more.");
    }

    #[test]
    fn test_extract_reply_without_echo_keeps_whole_text() {
        let reply = extract_reply("Interesting. Next question: why Rust?", "I like Go");
        assert_eq!(reply, "Interesting. Next question: why Rust?");
    }

    #[test]
    fn test_extract_reply_empty_remainder_acknowledges() {
        assert_eq!(extract_reply("I like Go", "I like Go"), ACKNOWLEDGMENT);
        assert_eq!(extract_reply("I like Go.  ", "I like Go"), ACKNOWLEDGMENT);
    }

    #[test]
    fn test_append_exchange_shape() {
        let updated = append_exchange("**AI:** Why Rust?", "I like Go", "Great, tell me more.");
        assert_eq!(
            updated,
            "**AI:** Why Rust?\n\n**You:** I like Go\n\n**AI:** Great, tell me more."
        );
    }
}
