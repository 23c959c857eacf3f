//! The individual contract rules.
//!
//! Each rule is a pure function of the contract text and is evaluated
//! independently of the others.

use super::currency::rupee_amounts;
use super::{Clause, ContractText, RuleOutcome};

pub const UNILATERAL_TERMINATION: Clause = Clause {
    name: "Termination Clause",
    description: "One party can terminate without notice.",
    severity: 30,
};

pub const FIXED_PENALTY: Clause = Clause {
    name: "Penalty Clause",
    description: "Fixed monetary penalty imposed.",
    severity: 30,
};

pub const AMBIGUOUS_PENALTY: Clause = Clause {
    name: "Penalty Clause",
    description: "Penalty amount not clearly defined.",
    severity: 20,
};

pub const ONE_SIDED_JURISDICTION: Clause = Clause {
    name: "Jurisdiction Clause",
    description: "Jurisdiction is one-sided.",
    severity: 20,
};

pub fn termination(text: &ContractText) -> RuleOutcome {
    if !text.contains_any(&["terminate", "termination"]) {
        return RuleOutcome::none();
    }

    if text.contains_any(&["either party", "both parties"]) {
        // mutual termination rights
        RuleOutcome::score(5)
    } else if text.contains_any(&["without notice", "any time"]) {
        RuleOutcome::finding("Unilateral termination clause", UNILATERAL_TERMINATION, 25)
    } else {
        RuleOutcome::score(15)
    }
}

pub fn penalty(text: &ContractText) -> RuleOutcome {
    if !text.contains_any(&["penalty", "fine"]) {
        return RuleOutcome::none();
    }

    if rupee_amounts(text.original()).is_empty() {
        RuleOutcome::finding("Ambiguous penalty clause", AMBIGUOUS_PENALTY, 15)
    } else {
        RuleOutcome::finding("High fixed penalty amount", FIXED_PENALTY, 25)
    }
}

pub fn jurisdiction(text: &ContractText) -> RuleOutcome {
    if !text.contains("jurisdiction") {
        return RuleOutcome::none();
    }

    if text.contains_any(&["sole", "only"]) {
        RuleOutcome::finding("Jurisdiction favors one party", ONE_SIDED_JURISDICTION, 15)
    } else {
        RuleOutcome::score(5)
    }
}

pub fn arbitration(text: &ContractText) -> RuleOutcome {
    if text.contains("arbitration") {
        RuleOutcome::score(-5)
    } else {
        RuleOutcome::flag("No arbitration or dispute resolution clause", 20)
    }
}

pub fn non_compete(text: &ContractText) -> RuleOutcome {
    if text.contains_any(&["non-compete", "not work"]) {
        RuleOutcome::flag("Restrictive non-compete clause", 20)
    } else {
        RuleOutcome::none()
    }
}
