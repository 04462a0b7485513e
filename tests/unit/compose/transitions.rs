use super::*;
use crate::test_support::block_on;
use crate::{Document, NodeKind, SceneHost};

#[test]
fn rules_form_an_asymmetric_two_cycle() {
    let rules = shimmer_rules();
    validate_rules(&rules).unwrap();

    let sweep = rules
        .iter()
        .find(|r| r.from == ShimmerState::Start)
        .unwrap();
    assert_eq!(sweep.to, ShimmerState::End);
    assert_eq!(sweep.delay_ms, 600);
    assert_eq!(
        sweep.animation,
        Animation::Smart {
            duration_ms: 1200,
            easing: Ease::EaseOut
        }
    );

    let reset = rules.iter().find(|r| r.from == ShimmerState::End).unwrap();
    assert_eq!(reset.to, ShimmerState::Start);
    assert_eq!(reset.delay_ms, 1);
    assert_eq!(reset.animation, Animation::Instant);
}

#[test]
fn validate_rejects_broken_cycles() {
    let [sweep, reset] = shimmer_rules();
    assert!(validate_rules(&[sweep]).is_err());
    assert!(validate_rules(&[sweep, sweep]).is_err());

    let zero = TransitionRule {
        delay_ms: 0,
        ..reset
    };
    assert!(validate_rules(&[sweep, zero]).is_err());
}

#[test]
fn instant_rule_maps_to_reaction_without_transition() {
    let [_, reset] = shimmer_rules();
    let reaction = reset.to_reaction(NodeId(3));
    assert_eq!(reaction.trigger, Trigger::AfterTimeout { timeout_ms: 1 });
    assert_eq!(
        reaction.actions,
        vec![Action::ChangeTo {
            destination: NodeId(3),
            transition: None
        }]
    );
}

#[test]
fn wiring_attaches_one_reaction_per_component() {
    let mut doc = Document::new();
    let start = doc.create_component().unwrap();
    let end = doc.create_component().unwrap();
    let nodes = StateNodes { start, end };
    block_on(wire_transitions(&mut doc, nodes, &shimmer_rules())).unwrap();

    let start_reactions = &doc.node(start).unwrap().reactions;
    let end_reactions = &doc.node(end).unwrap().reactions;
    assert_eq!(start_reactions.len(), 1);
    assert_eq!(end_reactions.len(), 1);
    assert_eq!(
        start_reactions[0].actions[0],
        Action::ChangeTo {
            destination: end,
            transition: Some(HostTransition::SmartAnimate {
                duration_ms: 1200,
                easing: Ease::EaseOut
            })
        }
    );
    assert_eq!(
        end_reactions[0].actions[0],
        Action::ChangeTo {
            destination: start,
            transition: None
        }
    );
    assert!(matches!(doc.node(start).unwrap().kind, NodeKind::Component));
}

#[test]
fn loop_period_and_phases() {
    let lp = ShimmerLoop::new(shimmer_rules(), 100.0).unwrap();
    assert_eq!(lp.period_ms(), 1801);

    let s = lp.sample(0.0);
    assert_eq!(s.state, ShimmerState::Start);
    assert_eq!(s.gradient_x, -100.0);
    assert_eq!(s.transition_progress, None);

    let s = lp.sample(599.0);
    assert_eq!(s.gradient_x, -100.0);

    let s = lp.sample(1200.0);
    assert_eq!(s.state, ShimmerState::Start);
    let p = s.transition_progress.unwrap();
    assert!(p > 0.5 && p < 1.0);
    assert!(s.gradient_x > 0.0 && s.gradient_x < 100.0);

    let s = lp.sample(1800.5);
    assert_eq!(s.state, ShimmerState::End);
    assert_eq!(s.gradient_x, 100.0);

    let s = lp.sample(1801.0);
    assert_eq!(s.state, ShimmerState::Start);
    assert_eq!(s.gradient_x, -100.0);
}

#[test]
fn loop_rejects_bad_width() {
    assert!(ShimmerLoop::new(shimmer_rules(), 0.0).is_err());
}

#[test]
fn non_finite_times_sample_the_first_instant() {
    let lp = ShimmerLoop::new(shimmer_rules(), 200.0).unwrap();
    for t in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let s = lp.sample(t);
        assert_eq!(s.state, ShimmerState::Start);
        assert_eq!(s.gradient_x, -200.0);
        assert_eq!(s.transition_progress, None);
    }
}

#[test]
fn huge_times_wrap_into_one_period() {
    let lp = ShimmerLoop::new(shimmer_rules(), 100.0).unwrap();
    let s = lp.sample(1801.0 * 1_000_000.0 + 1200.0);
    assert_eq!(s.state, ShimmerState::Start);
    assert!(s.transition_progress.is_some());
}
