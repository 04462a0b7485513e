use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::foundation::core::NodeId;
use crate::foundation::error::{ShimmerError, ShimmerResult};
use crate::scene::host::SceneHost;
use crate::scene::model::{Action, HostTransition, Reaction, Trigger};

/// Dwell time in Start before the sweep begins.
pub const SWEEP_DELAY_MS: u32 = 600;
/// Duration of the Start -> End sweep.
pub const SWEEP_DURATION_MS: u32 = 1200;
/// Dwell time in End before the reset. Host timers reject a zero delay.
pub const RESET_DELAY_MS: u32 = 1;

/// The two visual states of a shimmer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShimmerState {
    /// Gradient parked left of the text.
    Start,
    /// Gradient swept past the right edge.
    End,
}

impl ShimmerState {
    /// State a fresh instance shows.
    pub const INITIAL: Self = Self::Start;

    /// The state each rule leads to.
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// How a rule moves between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Jump cut.
    Instant,
    /// Smart-animate matching layers.
    Smart {
        /// Duration in milliseconds.
        duration_ms: u32,
        /// Easing curve.
        easing: Ease,
    },
}

impl Animation {
    /// Zero for instant cuts.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Instant => 0,
            Self::Smart { duration_ms, .. } => duration_ms,
        }
    }
}

/// Directed timed edge of the shimmer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Source state.
    pub from: ShimmerState,
    /// Destination state.
    pub to: ShimmerState,
    /// Dwell time in `from` before the rule fires.
    pub delay_ms: u32,
    /// Transition style.
    pub animation: Animation,
}

impl TransitionRule {
    /// Host reaction implementing this rule, targeting `destination`.
    pub fn to_reaction(self, destination: NodeId) -> Reaction {
        let transition = match self.animation {
            Animation::Instant => None,
            Animation::Smart {
                duration_ms,
                easing,
            } => Some(HostTransition::SmartAnimate {
                duration_ms,
                easing,
            }),
        };
        Reaction {
            trigger: Trigger::AfterTimeout {
                timeout_ms: self.delay_ms,
            },
            actions: vec![Action::ChangeTo {
                destination,
                transition,
            }],
        }
    }
}

/// The asymmetric 2-cycle: pause, eased sweep, instant reset.
pub fn shimmer_rules() -> [TransitionRule; 2] {
    [
        TransitionRule {
            from: ShimmerState::Start,
            to: ShimmerState::End,
            delay_ms: SWEEP_DELAY_MS,
            animation: Animation::Smart {
                duration_ms: SWEEP_DURATION_MS,
                easing: Ease::EaseOut,
            },
        },
        TransitionRule {
            from: ShimmerState::End,
            to: ShimmerState::Start,
            delay_ms: RESET_DELAY_MS,
            animation: Animation::Instant,
        },
    ]
}

/// Check that `rules` form exactly one outgoing edge per state and close a 2-cycle.
pub fn validate_rules(rules: &[TransitionRule]) -> ShimmerResult<()> {
    if rules.len() != 2 {
        return Err(ShimmerError::validation(format!(
            "expected 2 transition rules, got {}",
            rules.len()
        )));
    }
    for state in [ShimmerState::Start, ShimmerState::End] {
        let outgoing: Vec<_> = rules.iter().filter(|r| r.from == state).collect();
        if outgoing.len() != 1 || outgoing[0].to != state.other() {
            return Err(ShimmerError::validation(format!(
                "state {state:?} must have exactly one edge to {:?}",
                state.other()
            )));
        }
    }
    if rules.iter().any(|r| r.delay_ms == 0) {
        return Err(ShimmerError::validation("transition delays must be > 0 ms"));
    }
    Ok(())
}

/// Component handles the rules are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateNodes {
    /// Start component.
    pub start: NodeId,
    /// End component.
    pub end: NodeId,
}

impl StateNodes {
    /// Component for `state`.
    pub fn node(&self, state: ShimmerState) -> NodeId {
        match state {
            ShimmerState::Start => self.start,
            ShimmerState::End => self.end,
        }
    }
}

/// Attach `rules` to the variant components, one awaited host call per rule.
#[tracing::instrument(skip(host, rules))]
pub async fn wire_transitions<H: SceneHost>(
    host: &mut H,
    nodes: StateNodes,
    rules: &[TransitionRule],
) -> ShimmerResult<()> {
    validate_rules(rules)?;
    for rule in rules {
        let reaction = rule.to_reaction(nodes.node(rule.to));
        host.set_reactions(nodes.node(rule.from), vec![reaction])
            .await?;
        tracing::debug!(from = ?rule.from, to = ?rule.to, delay_ms = rule.delay_ms, "reaction set");
    }
    Ok(())
}

/// Playback-time view of one loop sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoopSample {
    /// State the viewer is in (the source state while a transition runs).
    pub state: ShimmerState,
    /// Eased progress of the running transition, if any.
    pub transition_progress: Option<f64>,
    /// Gradient x relative to its container.
    pub gradient_x: f64,
}

/// Evaluates the state machine over wall-clock time as the host would play it back.
#[derive(Debug, Clone)]
pub struct ShimmerLoop {
    rules: [TransitionRule; 2],
    width: f64,
}

impl ShimmerLoop {
    /// Loop over validated `rules` for a container `width` wide.
    pub fn new(rules: [TransitionRule; 2], width: f64) -> ShimmerResult<Self> {
        validate_rules(&rules)?;
        if !width.is_finite() || width <= 0.0 {
            return Err(ShimmerError::validation("loop width must be finite and > 0"));
        }
        Ok(Self { rules, width })
    }

    /// Length of one full cycle in milliseconds.
    pub fn period_ms(&self) -> u64 {
        self.rules
            .iter()
            .map(|r| u64::from(r.delay_ms) + u64::from(r.animation.duration_ms()))
            .sum()
    }

    fn gradient_x(&self, state: ShimmerState) -> f64 {
        match state {
            ShimmerState::Start => -self.width,
            ShimmerState::End => self.width,
        }
    }

    fn rule_from(&self, state: ShimmerState) -> &TransitionRule {
        // validate_rules guarantees one outgoing edge per state.
        if self.rules[0].from == state {
            &self.rules[0]
        } else {
            &self.rules[1]
        }
    }

    /// Sample the loop `t_ms` after entering Start. Negative or non-finite times sample the
    /// loop's first instant.
    pub fn sample(&self, t_ms: f64) -> LoopSample {
        let period = self.period_ms() as f64;
        let mut t = if t_ms.is_finite() {
            t_ms.max(0.0) % period
        } else {
            0.0
        };
        let mut state = ShimmerState::INITIAL;
        // One outgoing edge per state: walking every rule once covers a whole period.
        for _ in 0..self.rules.len() {
            let rule = self.rule_from(state);
            let delay = f64::from(rule.delay_ms);
            if t < delay {
                return self.at_rest(state);
            }
            t -= delay;
            if let Animation::Smart {
                duration_ms,
                easing,
            } = rule.animation
            {
                let duration = f64::from(duration_ms);
                if t < duration {
                    let p = easing.apply(t / duration);
                    let from = self.gradient_x(rule.from);
                    let to = self.gradient_x(rule.to);
                    return LoopSample {
                        state,
                        transition_progress: Some(p),
                        gradient_x: from + (to - from) * p,
                    };
                }
                t -= duration;
            }
            state = rule.to;
        }
        self.at_rest(state)
    }

    fn at_rest(&self, state: ShimmerState) -> LoopSample {
        LoopSample {
            state,
            transition_progress: None,
            gradient_x: self.gradient_x(state),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/transitions.rs"]
mod tests;
