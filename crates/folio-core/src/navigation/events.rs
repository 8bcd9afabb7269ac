use crate::scroll::AnimationToken;
use crate::section::SectionId;

/// Journal of state-machine transitions, drained by hosts
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    /// `navigate()` applied the requested section
    Started {
        section: SectionId,
        token: AnimationToken,
        animated: bool,
    },
    /// A live animation was replaced before finishing; its token never settles
    Superseded {
        section: Option<SectionId>,
        token: AnimationToken,
    },
    /// Navigation finished, the single completion of `token`
    Settled {
        section: SectionId,
        token: AnimationToken,
    },
    /// The requested section had no mounted element; settled in place
    TargetMissing {
        section: SectionId,
        token: AnimationToken,
    },
    /// Passive detection moved the current section
    Observed { section: SectionId },
    /// Full page load requested to leave a standalone view
    External { url: String },
}

/// What a `navigate()` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// Animation started; settles on a later frame
    Animating(AnimationToken),
    /// Settled synchronously (no scrolling requested, or already there)
    Settled(AnimationToken),
    /// Same target already in flight; that animation is left to finish
    AlreadyNavigating(AnimationToken),
    /// Element not mounted; settled synchronously without scrolling
    TargetMissing(AnimationToken),
}

impl NavigateOutcome {
    pub fn token(&self) -> AnimationToken {
        match self {
            NavigateOutcome::Animating(t)
            | NavigateOutcome::Settled(t)
            | NavigateOutcome::AlreadyNavigating(t)
            | NavigateOutcome::TargetMissing(t) => *t,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            NavigateOutcome::Animating(_) | NavigateOutcome::AlreadyNavigating(_)
        )
    }
}
