//! The three standard scheduling policies.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{rules, EarliestAvailable, EarliestFinish, ProcessorSelector, RuleEngine};
use crate::error::SchedulingError;

/// A named pairing of task ordering and processor selection.
///
/// | Policy | Task order | Processor choice |
/// |--------|-----------|------------------|
/// | FCFS | arrival time (stable) | earliest available |
/// | SJF | execution time (stable) | earliest available |
/// | EFT | as given | earliest hypothetical finish |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Policy {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First.
    Sjf,
    /// Earliest-Finish-Time.
    Eft,
}

impl Policy {
    /// All policies, in their conventional comparison order.
    pub const ALL: [Policy; 3] = [Policy::Fcfs, Policy::Sjf, Policy::Eft];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Eft => "EFT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First-Come-First-Served",
            Policy::Sjf => "Shortest Job First",
            Policy::Eft => "Earliest Finish Time",
        }
    }

    /// Task ordering used by this policy.
    pub fn rule_engine(&self) -> RuleEngine {
        match self {
            Policy::Fcfs => RuleEngine::new().with_rule(rules::Fifo),
            Policy::Sjf => RuleEngine::new().with_rule(rules::Spt),
            Policy::Eft => RuleEngine::new(),
        }
    }

    /// Processor selection used by this policy.
    pub fn selector(&self) -> Arc<dyn ProcessorSelector> {
        match self {
            Policy::Fcfs | Policy::Sjf => Arc::new(EarliestAvailable),
            Policy::Eft => Arc::new(EarliestFinish),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Policy::Fcfs),
            "SJF" => Ok(Policy::Sjf),
            "EFT" => Ok(Policy::Eft),
            other => Err(SchedulingError::invalid(format!(
                "unknown scheduling policy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("fcfs".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!(" SJF ".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!("Eft".parse::<Policy>().unwrap(), Policy::Eft);
        assert!(matches!(
            "rr".parse::<Policy>(),
            Err(SchedulingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_components() {
        assert_eq!(Policy::Fcfs.rule_engine().rule_names(), vec!["FIFO"]);
        assert_eq!(Policy::Sjf.rule_engine().rule_names(), vec!["SPT"]);
        assert!(Policy::Eft.rule_engine().is_empty());

        assert_eq!(Policy::Fcfs.selector().name(), "EARLIEST_AVAILABLE");
        assert_eq!(Policy::Sjf.selector().name(), "EARLIEST_AVAILABLE");
        assert_eq!(Policy::Eft.selector().name(), "EARLIEST_FINISH");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Policy::Sjf).unwrap(), r#""SJF""#);
        let p: Policy = serde_json::from_str(r#""EFT""#).unwrap();
        assert_eq!(p, Policy::Eft);
    }
}
