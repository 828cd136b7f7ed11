//! Pattern banks backing the heuristic classifier.
//!
//! Each bank is an ordered list of case-insensitive regexes compiled once
//! at first use and immutable afterwards. The banks carry the *signals*;
//! the precedence between them lives in the classifier and is documented
//! there.

use regex::Regex;
use std::sync::LazyLock;

/// Signals of mathematically or logically dense work.
const REASONING_PATTERNS: &[&str] = &[
    r"(?i)\b(prove|proof|theorem|lemma)\b",
    r"(?i)\b(equations?|solve for|integrals?|derivatives?)\b",
    r"(?i)\b(induction|logic puzzle|logical (proof|reasoning|puzzle))\b",
    r"(?i)\b(step[- ]by[- ]step|chain[- ]of[- ]thought)\b",
    r"(?i)\b(algorithms?|algorithmic|dynamic[- ]programming|big[- ]?o\b|time complexity|space complexity|asymptotic)\b",
    r"(?i)\b(probabilit(y|ies|istic)|bayes(ian)?|expected value|markov)\b",
];

/// Signals of multi-part engineering work.
const COMPLEX_PATTERNS: &[&str] = &[
    r"(?i)\b(architecture|architectural|design (a |an )?(system|platform)|system design)\b",
    // Bare "refactor" alone is medium-weight; with a real payload it is not.
    r"(?is)\b(refactor|rewrite|implement)\b.{20,}",
    r"(?i)\b(multi[- ]file|codebase|repositor(y|ies)|monorepo)\b",
    r"(?is)\bdeploy(ment|ing|s)?\b.*\b(kubernetes|k8s|docker|orchestration|orchestrator)\b|\b(kubernetes|k8s|docker|orchestration|orchestrator)\b.*\bdeploy(ment|ing|s)?\b",
    r"(?is)\bdatabase\b.*\b(schema|migrations?)\b|\b(schema|migrations?)\b.*\bdatabase\b",
    r"(?i)\b(full[- ]stack|micro[- ]?services?)\b",
];

/// Signals of everyday single-shot requests.
const MEDIUM_PATTERNS: &[&str] = &[
    r"(?i)\b(summari[sz]e|explain|review|analy[sz]e|compare)\b",
    r"(?i)\b(code review|debug(ging)?|fix|bug)\b",
    r"(?i)\b(convert|translate|transform)\b",
    r"(?i)\bwrite (a |an |some )?(function|class|test|script|query)\b",
    r"(?i)\bhow (do|does|to|can|should)\b",
];

/// Signals of greetings and trivial acknowledgements.
const SIMPLE_PATTERNS: &[&str] = &[
    r"(?i)^(hi|hiya|hey|hello|yo|howdy|sup|good (morning|afternoon|evening))\b",
    r"(?i)^(thanks|thank you|thx|ty|cheers)\b",
    r"(?i)^(ok|okay|yes|no|yep|nope|sure|cool|nice|got it|sounds good)\b",
    r"(?i)^(what|who|when|where)('s| is| are| was)?\s+(time|day|date|up|this|that|it)\b",
];

/// One ordered bank of compiled patterns.
#[derive(Debug)]
pub struct RuleBank {
    patterns: Vec<Regex>,
}

impl RuleBank {
    fn new(sources: &[&str]) -> Self {
        Self {
            // A pattern that fails to compile is dropped rather than
            // panicking; the bank test pins the expected count.
            patterns: sources
                .iter()
                .filter_map(|source| Regex::new(source).ok())
                .collect(),
        }
    }

    /// Whether any pattern in the bank matches the text.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }

    /// Number of compiled patterns in the bank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the bank compiled to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The four banks used by the heuristic classifier.
#[derive(Debug)]
pub struct ClassifierRules {
    /// Reasoning-tier signals.
    pub reasoning: RuleBank,
    /// Complex-tier signals.
    pub complex: RuleBank,
    /// Medium-tier signals.
    pub medium: RuleBank,
    /// Simple-tier signals.
    pub simple: RuleBank,
}

static RULES: LazyLock<ClassifierRules> = LazyLock::new(|| ClassifierRules {
    reasoning: RuleBank::new(REASONING_PATTERNS),
    complex: RuleBank::new(COMPLEX_PATTERNS),
    medium: RuleBank::new(MEDIUM_PATTERNS),
    simple: RuleBank::new(SIMPLE_PATTERNS),
});

/// Process-wide compiled rule banks.
#[must_use]
pub fn banks() -> &'static ClassifierRules {
    &RULES
}
