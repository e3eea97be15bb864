//! Prompt assembly for the chat collaborator.
//!
//! The gateway does not call an LLM itself; these helpers describe how a
//! rolling summary is folded into a prompt before a completion call, and how
//! a finished turn is turned into text for `append_and_compress`.

const PERSONA: &str =
    "Eres el asistente A.R.I.A. Responde en español, de forma profesional, precisa y accionable.";
const CITATION_INSTRUCTION: &str =
    "Responde citando fuentes normativas chilenas (BCN/Diario Oficial) cuando corresponda.";
const TRUNCATION_MARKER: &str = "\n[...]";

/// Character budget for the agent constitution inside a prompt.
pub const CONSTITUTION_MAX_CHARS: usize = 6000;
/// Character budget for prior context inside a prompt.
pub const CONTEXT_MAX_CHARS: usize = 3000;
/// Characters of an answer recorded into the rolling summary per turn.
pub const TURN_ANSWER_MAX_CHARS: usize = 1200;

/// Inputs for [`build_prompt`].
#[derive(Debug, Clone, Default)]
pub struct PromptInputs<'a> {
    pub question: &'a str,
    pub constitution: &'a str,
    pub principles: &'a [String],
    pub legal_focus: &'a [String],
    pub context: Option<&'a str>,
}

/// Keep the first characters of `text`, marking the cut with `[...]`.
///
/// Unlike summaries, prompt sections keep their beginning: constitutions and
/// retrieved context front-load what matters.
pub fn head_truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(20);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Label a rolling summary as prior context.
pub fn rolling_context(summary: &str) -> String {
    format!("Resumen previo:\n{summary}")
}

/// Text appended to a session's summary after a completed turn.
pub fn format_turn(question: &str, answer: &str) -> String {
    let answer: String = answer.chars().take(TURN_ANSWER_MAX_CHARS).collect();
    format!("Q: {question}\nA: {answer}")
}

/// Build a compact prompt: persona, constitution, metadata, optional context,
/// then the question.
pub fn build_prompt(inputs: &PromptInputs<'_>) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);
    parts.push(PERSONA.to_string());
    parts.push(head_truncate(
        inputs.constitution.trim(),
        CONSTITUTION_MAX_CHARS,
    ));

    let mut meta_lines = Vec::new();
    if !inputs.principles.is_empty() {
        meta_lines.push(format!("Principios: {}", inputs.principles.join(", ")));
    }
    if !inputs.legal_focus.is_empty() {
        meta_lines.push(format!("Enfoque legal: {}", inputs.legal_focus.join(", ")));
    }
    if !meta_lines.is_empty() {
        parts.push(meta_lines.join("\n"));
    }

    if let Some(context) = inputs.context.filter(|c| !c.is_empty()) {
        parts.push(format!(
            "Contexto relevante:\n{}",
            head_truncate(context, CONTEXT_MAX_CHARS)
        ));
    }

    parts.push(format!("Pregunta del usuario:\n{}", inputs.question));
    parts.push(CITATION_INSTRUCTION.to_string());

    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
