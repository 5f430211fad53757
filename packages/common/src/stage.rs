//! Client-side mirror of an award's judging progression.
//!
//! The server owns the real state; these types only describe it so the client
//! can offer the one legal "complete" action and label where judging stands.

use std::fmt;

use thiserror::Error;

use crate::models::{Award, AwardRound};

/// Where an award's judging currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvaluationStage {
    /// Initial triage before any scored round.
    Screening,
    /// A scored, non-final round (by ordinal number).
    Round(u32),
    /// The round flagged final. Terminal.
    Final(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("This award has no rounds to move into")]
    NoRounds,
    #[error("Round {0} is not part of this award")]
    UnknownRound(u32),
    #[error("Round {0} has no following round")]
    NoNextRound(u32),
    #[error("The final round cannot be completed from here")]
    FinalRound,
}

/// A round as placed in the ordered plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRound {
    pub uuid: String,
    pub number: u32,
    pub name: String,
    pub is_final: bool,
}

/// An award's rounds in ordinal order.
///
/// When no round carries the final flag, the last round is treated as final.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundPlan {
    rounds: Vec<PlannedRound>,
}

impl RoundPlan {
    pub fn from_rounds(rounds: &[AwardRound]) -> Self {
        let mut planned = rounds
            .iter()
            .map(|r| PlannedRound {
                uuid: r.uuid.clone(),
                number: r.number,
                name: r.display_name(),
                is_final: r.is_final,
            })
            .collect::<Vec<_>>();
        planned.sort_by_key(|r| r.number);

        if !planned.iter().any(|r| r.is_final)
            && let Some(last) = planned.last_mut()
        {
            last.is_final = true;
        }
        Self { rounds: planned }
    }

    pub fn from_award(award: &Award) -> Self {
        Self::from_rounds(&award.rounds)
    }

    pub fn rounds(&self) -> &[PlannedRound] {
        &self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn get(&self, number: u32) -> Option<&PlannedRound> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub fn by_uuid(&self, uuid: &str) -> Option<&PlannedRound> {
        self.rounds.iter().find(|r| r.uuid == uuid)
    }

    fn next_after(&self, number: u32) -> Option<&PlannedRound> {
        self.rounds.iter().find(|r| r.number > number)
    }

    /// The stage a planned round represents.
    pub fn stage_of(&self, round: &PlannedRound) -> EvaluationStage {
        if round.is_final {
            EvaluationStage::Final(round.number)
        } else {
            EvaluationStage::Round(round.number)
        }
    }
}

/// Result of a legal "complete" action: the stage entered and the round it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: EvaluationStage,
    pub to: EvaluationStage,
    pub opens_round: String,
}

impl EvaluationStage {
    /// Read the stage from the server's round flags.
    pub fn from_award(award: &Award) -> Self {
        let plan = RoundPlan::from_award(award);
        match award.current_round().and_then(|r| plan.by_uuid(&r.uuid)) {
            Some(round) => plan.stage_of(round),
            None => Self::Screening,
        }
    }

    pub fn round_number(&self) -> Option<u32> {
        match self {
            Self::Screening => None,
            Self::Round(n) | Self::Final(n) => Some(*n),
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }

    /// The single transition out of this stage.
    pub fn complete(&self, plan: &RoundPlan) -> Result<Transition, TransitionError> {
        let next = match self {
            Self::Screening => plan.rounds().first().ok_or(TransitionError::NoRounds)?,
            Self::Round(n) => {
                plan.get(*n).ok_or(TransitionError::UnknownRound(*n))?;
                plan.next_after(*n).ok_or(TransitionError::NoNextRound(*n))?
            }
            Self::Final(_) => return Err(TransitionError::FinalRound),
        };
        Ok(Transition {
            from: *self,
            to: plan.stage_of(next),
            opens_round: next.uuid.clone(),
        })
    }

    pub fn can_complete(&self, plan: &RoundPlan) -> bool {
        self.complete(plan).is_ok()
    }

    /// Label for the action button that completes this stage.
    pub fn complete_label(&self) -> &'static str {
        match self {
            Self::Screening => "Complete Screening",
            Self::Round(_) | Self::Final(_) => "Complete Round",
        }
    }
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screening => f.write_str("Screening"),
            Self::Round(n) => write!(f, "Round {n}"),
            Self::Final(n) => write!(f, "Final round (Round {n})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(uuid: &str, number: u32, is_final: bool, is_current: bool) -> AwardRound {
        AwardRound {
            uuid: uuid.into(),
            award_uuid: Some("a1".into()),
            number,
            name: String::new(),
            minimum_score: 0.0,
            is_final,
            is_current,
        }
    }

    fn award(rounds: Vec<AwardRound>) -> Award {
        let mut award: Award = serde_json::from_str(r#"{"uuid":"a1","title":"A"}"#).unwrap();
        award.rounds = rounds;
        award
    }

    #[test]
    fn test_stage_without_current_round_is_screening() {
        let a = award(vec![round("r1", 1, false, false), round("r2", 2, true, false)]);
        assert_eq!(EvaluationStage::from_award(&a), EvaluationStage::Screening);
    }

    #[test]
    fn test_stage_follows_current_flag() {
        let a = award(vec![round("r2", 2, true, true), round("r1", 1, false, false)]);
        assert_eq!(EvaluationStage::from_award(&a), EvaluationStage::Final(2));
    }

    #[test]
    fn test_walks_screening_to_final() {
        let a = award(vec![
            round("r3", 3, true, false),
            round("r1", 1, false, false),
            round("r2", 2, false, false),
        ]);
        let plan = RoundPlan::from_award(&a);

        let t = EvaluationStage::Screening.complete(&plan).unwrap();
        assert_eq!(t.to, EvaluationStage::Round(1));
        assert_eq!(t.opens_round, "r1");

        let t = t.to.complete(&plan).unwrap();
        assert_eq!(t.to, EvaluationStage::Round(2));

        let t = t.to.complete(&plan).unwrap();
        assert_eq!(t.to, EvaluationStage::Final(3));

        assert_eq!(t.to.complete(&plan), Err(TransitionError::FinalRound));
    }

    #[test]
    fn test_last_round_is_final_when_unflagged() {
        let plan = RoundPlan::from_rounds(&[round("a", 1, false, false), round("b", 2, false, false)]);
        assert!(plan.get(2).unwrap().is_final);
        assert!(!plan.get(1).unwrap().is_final);
    }

    #[test]
    fn test_screening_without_rounds_cannot_complete() {
        let plan = RoundPlan::default();
        assert_eq!(
            EvaluationStage::Screening.complete(&plan),
            Err(TransitionError::NoRounds)
        );
        assert!(!EvaluationStage::Screening.can_complete(&plan));
    }

    #[test]
    fn test_unknown_round_is_rejected() {
        let plan = RoundPlan::from_rounds(&[round("a", 1, true, false)]);
        assert_eq!(
            EvaluationStage::Round(4).complete(&plan),
            Err(TransitionError::UnknownRound(4))
        );
    }
}
