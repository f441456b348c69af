use std::sync::Arc;

use assist::{AssistError, CompletionClient, Prompt};
use thiserror::Error;

use crate::config::{PhraseConfig, PhraseError};
use crate::frequency::rank_by_frequency;

const SYSTEM_PROMPT: &str = "You analyse website copy to detect cloned sites. \
Answer with a JSON array of strings and nothing else.";

/// Why an LLM extraction attempt was abandoned.
#[derive(Debug, Error)]
pub(crate) enum LlmFailure {
    #[error(transparent)]
    Collaborator(#[from] AssistError),
    #[error(transparent)]
    Parse(#[from] PhraseError),
    #[error("deadline exceeded")]
    Timeout,
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub(crate) fn build_prompt(text: &str, cfg: &PhraseConfig) -> Prompt {
    let excerpt = truncate_chars(text, cfg.llm_input_chars);
    Prompt::new(format!(
        "Extract up to {max} key phrases that most distinguish this specific business \
         from its competitors (brand names, product names, slogans, unusual wording). \
         Return them as a JSON array of strings, most distinctive first.\n\nWebsite text:\n{excerpt}",
        max = cfg.max_phrases,
    ))
    .with_system(SYSTEM_PROMPT)
    .with_deadline(cfg.llm_timeout())
}

/// Parse a model answer into phrases.
///
/// Accepts a bare JSON array, or an array wrapped in prose or a fenced code
/// block. Entries are trimmed; blanks and duplicates (ignoring case) dropped.
pub fn parse_phrase_list(answer: &str, max_phrases: usize) -> Result<Vec<String>, PhraseError> {
    let start = answer.find('[');
    let end = answer.rfind(']');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &answer[start..=end],
        _ => return Err(PhraseError::NotAList("no JSON array found".into())),
    };

    let raw: Vec<String> =
        serde_json::from_str(json).map_err(|e| PhraseError::NotAList(e.to_string()))?;

    let mut seen = fxhash::FxHashSet::default();
    let phrases: Vec<String> = raw
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.to_lowercase()))
        .take(max_phrases)
        .collect();

    if phrases.is_empty() {
        return Err(PhraseError::EmptyList);
    }
    Ok(phrases)
}

pub(crate) async fn extract_via_llm(
    client: &Arc<dyn CompletionClient>,
    text: &str,
    cfg: &PhraseConfig,
) -> Result<Vec<String>, LlmFailure> {
    let prompt = build_prompt(text, cfg);
    // The client honours the prompt deadline; this outer bound covers
    // implementations that ignore it.
    let answer = tokio::time::timeout(cfg.llm_timeout(), client.complete(&prompt))
        .await
        .map_err(|_| LlmFailure::Timeout)??;
    Ok(parse_phrase_list(&answer, cfg.max_phrases)?)
}

/// Deterministic result used whenever the collaborator path fails.
pub(crate) fn fallback(text: &str, cfg: &PhraseConfig) -> Vec<String> {
    rank_by_frequency(text, cfg)
}
