//! Keyword-driven intent classification.
//!
//! Two declarative tables map intents to keyword sets. Both are evaluated in
//! the fixed order of [`Intent::ALL`] with plain substring tests on the
//! lowercased query; there is no scoring.

use serde::Serialize;
use std::fmt;

/// Kind of official information a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Contact,
    Address,
    Fee,
    Requirement,
    Procedure,
}

impl Intent {
    /// Priority order used by every table.
    pub const ALL: [Intent; 5] = [
        Intent::Contact,
        Intent::Address,
        Intent::Fee,
        Intent::Requirement,
        Intent::Procedure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Contact => "contact",
            Intent::Address => "address",
            Intent::Fee => "fee",
            Intent::Requirement => "requirement",
            Intent::Procedure => "procedure",
        }
    }

    /// Keywords that send a query to the official store.
    pub fn routing_keywords(&self) -> &'static [&'static str] {
        match self {
            Intent::Contact => &["contact", "email", "phone", "hotline"],
            Intent::Address => &["address", "location", "where"],
            Intent::Fee => &["fee", "fees", "cost", "price", "how much", "rate"],
            Intent::Requirement => &["requirement", "requirements", "documents needed"],
            Intent::Procedure => &["procedure", "process", "steps", "apply"],
        }
    }

    /// Keywords that select a record collection inside the official store.
    ///
    /// A superset of the routing keywords for fees, requirements and
    /// procedures.
    pub fn lookup_keywords(&self) -> &'static [&'static str] {
        match self {
            Intent::Contact => &["contact", "email", "phone", "hotline"],
            Intent::Address => &["address", "location", "where"],
            Intent::Fee => &["fee", "fees", "cost", "how much", "price", "charge", "rate"],
            Intent::Requirement => &[
                "requirement",
                "requirements",
                "documents needed",
                "needed documents",
            ],
            Intent::Procedure => &["procedure", "process", "steps", "how to apply", "apply"],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an already lowercased query contains any keyword.
pub fn mentions_any(query_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query_lower.contains(k))
}

/// First intent, in priority order, whose routing keywords the query mentions.
pub fn classify(query: &str) -> Option<Intent> {
    let q = query.to_lowercase();
    Intent::ALL
        .into_iter()
        .find(|intent| mentions_any(&q, intent.routing_keywords()))
}
