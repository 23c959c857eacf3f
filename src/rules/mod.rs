//! Rule-based contract risk scoring.
//!
//! - [`clauses`]: the individual rules (termination, penalty, jurisdiction,
//!   arbitration, non-compete) and the clause findings they attach.
//! - [`currency`]: rupee amount detection used by the penalty rule.
//!
//! [`analyze`] runs every rule in [`RULES`] order and sums their deltas into a
//! raw score. Keyword tests are case-insensitive; regex extraction sees the
//! original text.

use crate::models::{ClauseFinding, ClauseFindings};

pub mod clauses;
pub mod currency;

/// Contract text with a lowercased copy for keyword matching.
pub struct ContractText<'a> {
    original: &'a str,
    lower: String,
}

impl<'a> ContractText<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            lower: original.to_lowercase(),
        }
    }

    pub fn original(&self) -> &str {
        self.original
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }
}

/// A clause finding as declared by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause {
    pub name: &'static str,
    pub description: &'static str,
    pub severity: u8,
}

impl Clause {
    pub fn to_finding(self) -> ClauseFinding {
        ClauseFinding {
            description: self.description.to_string(),
            severity: self.severity,
        }
    }
}

/// What a single rule contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub label: Option<&'static str>,
    pub clause: Option<Clause>,
    pub delta: i32,
}

impl RuleOutcome {
    /// Rule did not fire.
    pub fn none() -> Self {
        Self::score(0)
    }

    /// Score change only.
    pub fn score(delta: i32) -> Self {
        Self {
            label: None,
            clause: None,
            delta,
        }
    }

    /// Risk label without a clause finding.
    pub fn flag(label: &'static str, delta: i32) -> Self {
        Self {
            label: Some(label),
            clause: None,
            delta,
        }
    }

    pub fn finding(label: &'static str, clause: Clause, delta: i32) -> Self {
        Self {
            label: Some(label),
            clause: Some(clause),
            delta,
        }
    }
}

pub type Rule = fn(&ContractText) -> RuleOutcome;

/// Every rule, in evaluation (and display) order.
pub const RULES: [(&str, Rule); 5] = [
    ("termination", clauses::termination),
    ("penalty", clauses::penalty),
    ("jurisdiction", clauses::jurisdiction),
    ("arbitration", clauses::arbitration),
    ("non-compete", clauses::non_compete),
];

/// Labels, clause findings and raw (unclamped) score for one contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskAnalysis {
    pub risks: Vec<String>,
    pub clauses: ClauseFindings,
    pub raw_score: i32,
}

/// Run every rule over `text`.
pub fn analyze(text: &str) -> RiskAnalysis {
    let text = ContractText::new(text);
    let mut analysis = RiskAnalysis::default();

    for (name, rule) in RULES.iter() {
        let outcome = rule(&text);
        if outcome == RuleOutcome::none() {
            continue;
        }
        tracing::debug!(rule = *name, delta = outcome.delta, label = ?outcome.label, "rule fired");

        if let Some(label) = outcome.label {
            analysis.risks.push(label.to_string());
        }
        if let Some(clause) = outcome.clause {
            analysis.clauses.insert(clause.name, clause.to_finding());
        }
        analysis.raw_score += outcome.delta;
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text_only_flags_missing_arbitration() {
        let analysis = analyze("");
        assert_eq!(
            analysis.risks,
            vec!["No arbitration or dispute resolution clause".to_string()]
        );
        assert!(analysis.clauses.is_empty());
        assert_eq!(analysis.raw_score, 20);
    }

    #[test]
    fn test_one_sided_contract() {
        let text = "This agreement may terminate at any time without notice. \
                    A penalty of ₹10,000 applies. Sole jurisdiction of Mumbai courts. \
                    No arbitration.";
        let analysis = analyze(text);

        // "No arbitration." still contains the word, so the arbitration rule
        // takes its -5 branch.
        assert_eq!(
            analysis.risks,
            vec![
                "Unilateral termination clause".to_string(),
                "High fixed penalty amount".to_string(),
                "Jurisdiction favors one party".to_string(),
            ]
        );
        assert_eq!(analysis.raw_score, 25 + 25 + 15 - 5);
        let names: Vec<&str> = analysis.clauses.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["Termination Clause", "Penalty Clause", "Jurisdiction Clause"]
        );
    }

    #[test]
    fn test_every_rule_fires() {
        let text = "Company may terminate without notice. A fine applies. \
                    Jurisdiction only in Delhi. Employee will not work elsewhere.";
        let analysis = analyze(text);
        assert_eq!(analysis.risks.len(), 5);
        assert_eq!(analysis.raw_score, 25 + 15 + 15 + 20 + 20);
        let penalty = analysis
            .clauses
            .iter()
            .find(|(name, _)| *name == "Penalty Clause")
            .map(|(_, f)| f.severity);
        assert_eq!(penalty, Some(20));
    }

    #[test]
    fn test_raw_score_can_go_negative() {
        let analysis = analyze("Disputes are settled by arbitration.");
        assert_eq!(analysis.raw_score, -5);
        assert!(analysis.risks.is_empty());
    }

    proptest! {
        /// Mutual termination wording always scores 5 with no label.
        #[test]
        fn mutual_termination_scores_five(prefix in "[a-z ]{0,40}", suffix in "[a-z ]{0,40}") {
            let text = format!("{} either party may terminate {}", prefix, suffix);
            let outcome = clauses::termination(&ContractText::new(&text));
            prop_assert_eq!(outcome, RuleOutcome::score(5));
        }

        /// Unilateral wording without mutual wording scores 25 with a finding.
        #[test]
        fn unilateral_termination_scores_twenty_five(filler in "[a-z ]{0,60}") {
            let lower = filler.to_lowercase();
            prop_assume!(!lower.contains("either party") && !lower.contains("both parties"));
            let text = format!("Vendor may terminate without notice. {}", filler);
            let outcome = clauses::termination(&ContractText::new(&text));
            prop_assert_eq!(outcome.delta, 25);
            prop_assert_eq!(outcome.label, Some("Unilateral termination clause"));
            prop_assert_eq!(outcome.clause.map(|c| c.severity), Some(30));
        }

        /// Penalty scoring depends only on whether a rupee amount is present.
        #[test]
        fn penalty_amount_presence(amount in 1u32..10_000_000, filler in "[a-z ]{0,40}") {
            let with_amount = format!("penalty of ₹{} {}", amount, filler);
            let outcome = clauses::penalty(&ContractText::new(&with_amount));
            prop_assert_eq!(outcome.delta, 25);
            prop_assert_eq!(outcome.label, Some("High fixed penalty amount"));

            let without = format!("penalty {}", filler);
            let outcome = clauses::penalty(&ContractText::new(&without));
            prop_assert_eq!(outcome.delta, 15);
            prop_assert_eq!(outcome.label, Some("Ambiguous penalty clause"));
        }

        /// Missing arbitration is always flagged; present arbitration always credits.
        #[test]
        fn arbitration_presence(text in "\\PC{0,200}") {
            let analysis = analyze(&text);
            let flagged = analysis
                .risks
                .iter()
                .any(|r| r == "No arbitration or dispute resolution clause");
            let has_word = text.to_lowercase().contains("arbitration");
            prop_assert_eq!(flagged, !has_word);

            let outcome = clauses::arbitration(&ContractText::new(&text));
            prop_assert_eq!(outcome.delta, if has_word { -5 } else { 20 });
        }

        /// The engine is pure: same input, same output.
        #[test]
        fn analyze_is_idempotent(text in "\\PC{0,300}") {
            prop_assert_eq!(analyze(&text), analyze(&text));
        }
    }
}
