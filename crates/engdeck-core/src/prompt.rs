//! Prompt templates and sampling parameters.
//!
//! The instruction blocks are a contract with the model: the extractor and
//! the typed decoders in [`crate::feedback`] expect exactly the keys named
//! here. Changing a single character changes what the model is asked for, so
//! the tests pin the full text.

use crate::{focus::focus_labels, stats::MistakeCategory};

/// Instructions for grammar feedback.
pub const GRAMMAR_INSTRUCTIONS: &str = concat!(
  "You are an English teacher. Your job is to return a STRICT JSON object with grammar and vocabulary feedback.\n",
  "Always output ONLY JSON with keys: corrected, issues.\n",
  "- corrected: string with corrected sentence(s).\n",
  "- issues: array of {span, category, message, suggestion}.\n",
  "Categories: Articles, Prepositions, Tenses, Spelling, WordChoice, Agreement, Punctuation.\n",
);

/// Instructions for exercise generation.
pub const EXERCISE_INSTRUCTIONS: &str = concat!(
  "You are an English tutor. Create short practice tasks focused on the user's weak areas.\n",
  "Return STRICT JSON with key: exercises = array of {type, prompt, answer}.\n",
  "Types allowed: fill_blank, choose, transform.\n",
  "Keep prompts short (~12 words).",
);

/// Build the grammar prompt for a student's text.
pub fn grammar_prompt(text: &str) -> String {
  format!("{GRAMMAR_INSTRUCTIONS}\n\nStudent: \"{text}\"\nTeacher (JSON):\n")
}

/// Build the exercise prompt for the given focus areas and task count.
pub fn exercise_prompt(focus: &[MistakeCategory], limit: u32) -> String {
  let focus = focus_labels(focus);
  format!(
    "{EXERCISE_INSTRUCTIONS}\n\nUser weak areas: {focus}\nNumber of tasks: {limit}\nRespond with JSON only.\n"
  )
}

// ─── Sampling ────────────────────────────────────────────────────────────────

/// Fixed sampling parameters passed to the generation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
  pub temperature:    f32,
  pub top_k:          u32,
  pub top_p:          f32,
  pub repeat_penalty: f32,
  /// Upper bound on generated tokens.
  pub max_tokens:     u32,
}

impl SamplingParams {
  pub const DEFAULT: Self = Self {
    temperature:    0.2,
    top_k:          20,
    top_p:          0.95,
    repeat_penalty: 1.05,
    max_tokens:     256,
  };
}

impl Default for SamplingParams {
  fn default() -> Self { Self::DEFAULT }
}
