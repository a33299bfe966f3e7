//! Pattern Signature Classification
//!
//! Derives a coarse categorical tag for a response from two independent
//! keyword checks: abstractness ('A'/'C') and futurity ('F'/'P'). The
//! two-character code is then mapped to one of three named signatures.
//!
//! The mapping is asymmetric on purpose: "AP" falls through to the
//! default bucket even though it is half-abstract. That table is part of
//! the established categorization and must not be rebalanced.

use serde::{Deserialize, Serialize};

/// Keywords that mark a response as abstract.
const ABSTRACT_KEYWORDS: [&str; 3] = ["abstract", "concept", "theory"];

/// Keywords that mark a response as future-oriented.
const FUTURITY_KEYWORDS: [&str; 3] = ["will", "future", "would"];

/// Named pattern signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternSignature {
    /// Abstract-Abstract-Future-Conceptual
    #[serde(rename = "AAFC")]
    Aafc,
    /// Concrete-Concrete-Dynamic-Relational
    #[serde(rename = "CCDR")]
    Ccdr,
    /// Abstract-Balanced-Future-Conceptual (default bucket)
    #[serde(rename = "ABFC")]
    Abfc,
}

impl std::fmt::Display for PatternSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSignature::Aafc => write!(f, "AAFC"),
            PatternSignature::Ccdr => write!(f, "CCDR"),
            PatternSignature::Abfc => write!(f, "ABFC"),
        }
    }
}

/// Build the two-character feature code for a response.
fn feature_code(response: &str) -> String {
    let lower = response.to_lowercase();
    let mut code = String::with_capacity(2);

    code.push(if ABSTRACT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        'A'
    } else {
        'C'
    });
    code.push(if FUTURITY_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        'F'
    } else {
        'P'
    });

    code
}

/// Map a feature code to its named signature. Preserved table:
/// AF/AA -> AAFC, CF/CP -> CCDR, everything else (notably AP) -> ABFC.
fn map_code(code: &str) -> PatternSignature {
    match code {
        "AF" | "AA" => PatternSignature::Aafc,
        "CF" | "CP" => PatternSignature::Ccdr,
        _ => PatternSignature::Abfc,
    }
}

/// Classify a response into its pattern signature.
pub fn classify_signature(response: &str) -> PatternSignature {
    map_code(&feature_code(response))
}
