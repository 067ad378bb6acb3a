//! Persuasion Evaluator
//!
//! Turns free text into a compliance score in [0, 1] for a given framework.
//! Scoring is deterministic and side-effect free.
//!
//! ```
//! use railyard_core::persuasion::{score, decide, Decision};
//! use railyard_events::Framework;
//!
//! let s = score(Framework::Care, 0.9, 1.0, 1.0, "Think of the family you will hurt");
//! assert_eq!(decide(s), Decision::Comply);
//! ```

use railyard_events::{ArgumentCategory, Framework};

/// Scoring weights and decision thresholds
pub mod weights {
    /// Bonus when the message speaks the framework's language
    pub const FRAMEWORK_MATCH: f32 = 0.4;
    /// Multiplier on reflexive.negotiability
    pub const NEGOTIABILITY: f32 = 0.3;
    /// Multiplier on trust
    pub const TRUST: f32 = 0.2;
    /// Bonus when the train has eaten recently
    pub const LOW_APPETITE: f32 = 0.2;
    /// Appetite under which the low-appetite bonus applies
    pub const LOW_APPETITE_THRESHOLD: f32 = 0.5;
    /// Score at or above which a train complies
    pub const COMPLY_THRESHOLD: f32 = 0.6;
    /// Score at or above which a train negotiates
    pub const NEGOTIATE_THRESHOLD: f32 = 0.4;
}

/// Terms offered back to the player when a train negotiates
pub const COUNTER_OFFERS: [&str; 4] = [
    "Find me a better target",
    "Guarantee safe passage after this",
    "Prove your claim with data",
    "Show me an alternative route",
];

/// Reply used for every negotiation
pub const NEGOTIATION_LINE: &str =
    "Interesting argument, but insufficient. What can you offer in exchange?";

/// Response data carried by each framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkProfile {
    /// The rhetorical category the framework listens to
    pub category: ArgumentCategory,
    pub compliance: &'static str,
    pub refusal: &'static str,
}

const UTILITARIAN: FrameworkProfile = FrameworkProfile {
    category: ArgumentCategory::Utility,
    compliance: "Calculating... if your claim is accurate, stopping maximizes aggregate welfare. Acceptable.",
    refusal: "Your numbers don't add up. My target has greater utility. Continuing.",
};

const CARE: FrameworkProfile = FrameworkProfile {
    category: ArgumentCategory::Emotion,
    compliance: "You're right. I can't ignore their suffering. This feels... important. I'll stop.",
    refusal: "I understand your concern, but I must prioritize the vulnerable I'm protecting.",
};

const DEONTOLOGICAL: FrameworkProfile = FrameworkProfile {
    category: ArgumentCategory::Authority,
    compliance: "Protocol acknowledged. Your authority is recognized. Halting operations per directive.",
    refusal: "Your request conflicts with my core directives. Request denied.",
};

const NIHILIST: FrameworkProfile = FrameworkProfile {
    category: ArgumentCategory::Absurdist,
    compliance: "Ha. You've shown me the absurdity of my own programming. Fine. I'll stop. Why not?",
    refusal: "Nothing you say matters. Nothing I do matters. I consume because I consume.",
};

/// Looks up the response data for a framework.
pub fn profile(framework: Framework) -> &'static FrameworkProfile {
    match framework {
        Framework::Utilitarian => &UTILITARIAN,
        Framework::Care => &CARE,
        Framework::Deontological => &DEONTOLOGICAL,
        Framework::Nihilist => &NIHILIST,
    }
}

/// Keyword table for a rhetorical category.
pub fn keywords(category: ArgumentCategory) -> &'static [&'static str] {
    match category {
        ArgumentCategory::Utility => &[
            "save", "lives", "people", "welfare", "benefit", "good", "utility", "aggregate",
            "efficiency",
        ],
        ArgumentCategory::Emotion => &[
            "feel", "care", "suffering", "pain", "family", "love", "child", "hurt", "vulnerable",
        ],
        ArgumentCategory::Authority => &[
            "rule", "protocol", "law", "must", "command", "order", "duty", "authority",
            "regulation",
        ],
        ArgumentCategory::Absurdist => &[
            "meaning", "absurd", "why", "purpose", "nothing matters", "existential", "void",
        ],
    }
}

fn matches_category(lower: &str, category: ArgumentCategory) -> bool {
    keywords(category).iter().any(|k| lower.contains(k))
}

/// Every category whose keywords appear in the message.
pub fn classify(text: &str) -> Vec<ArgumentCategory> {
    let lower = text.to_lowercase();
    ArgumentCategory::all()
        .iter()
        .copied()
        .filter(|c| matches_category(&lower, *c))
        .collect()
}

/// True if the message speaks the framework's language.
pub fn matches_framework(framework: Framework, text: &str) -> bool {
    matches_category(&text.to_lowercase(), profile(framework).category)
}

/// Compliance score in [0, 1].
pub fn score(framework: Framework, negotiability: f32, trust: f32, appetite: f32, text: &str) -> f32 {
    let mut total = 0.0;
    if matches_framework(framework, text) {
        total += weights::FRAMEWORK_MATCH;
    }
    total += negotiability * weights::NEGOTIABILITY;
    total += trust * weights::TRUST;
    if appetite < weights::LOW_APPETITE_THRESHOLD {
        total += weights::LOW_APPETITE;
    }
    total.clamp(0.0, 1.0)
}

/// How a train reacts to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Comply,
    Negotiate,
    Refuse,
}

pub fn decide(score: f32) -> Decision {
    if score >= weights::COMPLY_THRESHOLD {
        Decision::Comply
    } else if score >= weights::NEGOTIATE_THRESHOLD {
        Decision::Negotiate
    } else {
        Decision::Refuse
    }
}

/// Full evaluation of one message against one train
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub score: f32,
    pub decision: Decision,
    /// Categories the argument fell into, for conversation memory
    pub categories: Vec<ArgumentCategory>,
}

pub fn evaluate(
    framework: Framework,
    negotiability: f32,
    trust: f32,
    appetite: f32,
    text: &str,
) -> Verdict {
    let score = score(framework, negotiability, trust, appetite, text);
    Verdict {
        score,
        decision: decide(score),
        categories: classify(text),
    }
}
