use super::rules;
use crate::ComplexityTier;

/// Pattern-based complexity classifier.
///
/// Pure and total: every input maps to a tier, no failure mode. Evaluation
/// is ordered and short-circuiting; reasoning and complexity signals are
/// checked before the length-based medium heuristics so that a short but
/// mathematically dense message is not misclassified as simple merely
/// because it is short.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternClassifier;

impl PatternClassifier {
    /// Classifies task text and its conversation signals into a tier.
    ///
    /// Precedence, first match wins:
    /// 1. short text with a simple signal (or very short) → simple
    /// 2. reasoning signal → reasoning
    /// 3. complex signal → complex
    /// 4. long text with repeated tool mentions → complex
    /// 5. very long text → complex
    /// 6. medium signal → medium
    /// 7. moderately long text or a deep conversation → medium
    /// 8. simple signal → simple
    /// 9. default → medium
    #[must_use]
    pub fn classify(&self, text: &str, conversation_depth: u32, tool_mentions: u32) -> ComplexityTier {
        let trimmed = text.trim();
        let length = trimmed.chars().count();
        let banks = rules::banks();

        if length < 20
            && !banks.reasoning.matches(trimmed)
            && (banks.simple.matches(trimmed) || length < 10)
        {
            return ComplexityTier::Simple;
        }

        if banks.reasoning.matches(trimmed) {
            return ComplexityTier::Reasoning;
        }

        if banks.complex.matches(trimmed) {
            return ComplexityTier::Complex;
        }

        if length > 500 && tool_mentions >= 2 {
            return ComplexityTier::Complex;
        }

        if length > 1000 {
            return ComplexityTier::Complex;
        }

        if banks.medium.matches(trimmed) {
            return ComplexityTier::Medium;
        }

        if length > 100 || conversation_depth > 5 {
            return ComplexityTier::Medium;
        }

        if banks.simple.matches(trimmed) {
            return ComplexityTier::Simple;
        }

        ComplexityTier::Medium
    }
}
