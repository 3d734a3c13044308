use tracing::debug;

use crate::models::ParsedAnswer;

pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";
pub const FOLLOW_UP_MARKER: &str = "\nFollow-up:";
pub const DEFAULT_FOLLOW_UP: &str = "Would you like more details?";

/// Extract the answer and follow-up question from a raw completion.
///
/// Best effort and total: text without the `Final Answer:` marker becomes the
/// whole answer, and a missing or blank follow-up falls back to
/// [`DEFAULT_FOLLOW_UP`].
pub fn parse_llm_response(raw: &str) -> ParsedAnswer {
    let Some((_, tail)) = raw.split_once(FINAL_ANSWER_MARKER) else {
        debug!("Completion has no final answer marker, using the whole text");
        return ParsedAnswer::new(raw.trim(), DEFAULT_FOLLOW_UP);
    };

    // The marker owns its leading newline, so split before trimming.
    let (answer, follow_up) = match tail.split_once(FOLLOW_UP_MARKER) {
        Some((answer, rest)) => {
            // Only the first follow-up counts
            let follow_up = rest.split(FOLLOW_UP_MARKER).next().unwrap_or_default().trim();
            (answer, Some(follow_up))
        }
        None => (tail, None),
    };

    let follow_up = follow_up
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FOLLOW_UP);

    ParsedAnswer::new(answer.trim(), follow_up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_answer_and_follow_up() {
        let parsed = parse_llm_response(
            "blah Final Answer: Sales rose 10%.\nFollow-up: Want a breakdown by region?",
        );
        assert_eq!(parsed.answer, "Sales rose 10%.");
        assert_eq!(parsed.follow_up, "Want a breakdown by region?");
    }

    #[test]
    fn test_missing_marker_uses_whole_text() {
        let parsed = parse_llm_response("  Sessions peaked in March.\n");
        assert_eq!(parsed.answer, "Sessions peaked in March.");
        assert_eq!(parsed.follow_up, DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_empty_input_is_well_formed() {
        let parsed = parse_llm_response("");
        assert_eq!(parsed.answer, "");
        assert_eq!(parsed.follow_up, DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_marker_without_follow_up_uses_default() {
        let parsed = parse_llm_response("Reasoning...\nFinal Answer: Mobile drives 60% of traffic.  ");
        assert_eq!(parsed.answer, "Mobile drives 60% of traffic.");
        assert_eq!(parsed.follow_up, DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_follow_up_directly_after_marker() {
        let parsed = parse_llm_response("Final Answer:\nFollow-up: Compare with last month?");
        assert_eq!(parsed.answer, "");
        assert_eq!(parsed.follow_up, "Compare with last month?");
    }

    #[test]
    fn test_follow_up_marker_needs_preceding_newline() {
        let parsed = parse_llm_response("Final Answer: Flat traffic. Follow-up: inline?");
        assert_eq!(parsed.answer, "Flat traffic. Follow-up: inline?");
        assert_eq!(parsed.follow_up, DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_blank_follow_up_uses_default() {
        let parsed = parse_llm_response("Final Answer: Stable.\nFollow-up:   ");
        assert_eq!(parsed.answer, "Stable.");
        assert_eq!(parsed.follow_up, DEFAULT_FOLLOW_UP);
    }

    #[test]
    fn test_uses_first_final_answer_marker() {
        let parsed = parse_llm_response(
            "Final Answer: Users grew. Final Answer: again\nFollow-up: More?\nFollow-up: Extra?",
        );
        assert_eq!(parsed.answer, "Users grew. Final Answer: again");
        assert_eq!(parsed.follow_up, "More?");
    }

    #[test]
    fn test_keeps_chart_marker_in_answer() {
        let parsed = parse_llm_response("Final Answer: [CHART] Sessions trend upward.\nFollow-up: By device?");
        assert_eq!(parsed.answer, "[CHART] Sessions trend upward.");
    }
}
