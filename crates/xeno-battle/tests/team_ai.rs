use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use xeno_battle::{
    Battle, BattleConfig, BattleEvent, BattleError, CombatantAi, CombatantStats, EventSink,
    RosterMut, TeamAi, TurnContext, TurnState,
};
use xeno_core::{CombatantId, TeamId, TickContext, Voxel};
use xeno_nav::VoxelTerrain;

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<BattleEvent>>>);

impl EventSink for RcSink {
    fn emit(&mut self, event: BattleEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Answers `update` from a script and records who was asked.
struct ScriptedAi {
    answers: VecDeque<bool>,
    calls: Rc<RefCell<Vec<CombatantId>>>,
}

impl CombatantAi<Battle> for ScriptedAi {
    fn update(
        &mut self,
        _ctx: &TickContext,
        turn: &TurnContext,
        me: CombatantId,
        _world: &mut Battle,
    ) -> bool {
        assert_eq!(turn.team, TeamId(0));
        self.calls.borrow_mut().push(me);
        self.answers.pop_front().unwrap_or(false)
    }
}

struct Fixture {
    battle: Battle,
    events: Rc<RefCell<Vec<BattleEvent>>>,
    calls: Rc<RefCell<Vec<CombatantId>>>,
    squad: [CombatantId; 3],
    ai: TeamAi<Battle>,
}

fn fixture() -> Fixture {
    let terrain = VoxelTerrain::from_ascii(&[[".....", "....."]]).unwrap();
    let sink = RcSink::default();
    let events = sink.0.clone();
    let mut battle = Battle::new(terrain, BattleConfig::default()).with_event_sink(sink);

    let humans = battle.add_team("humans").unwrap();
    let aliens = battle.add_team("aliens").unwrap();
    let stats = CombatantStats::default();
    let squad = [0, 1, 2].map(|x| {
        battle
            .spawn_combatant(humans, format!("s{x}"), Voxel::new(x, 0, 0), stats)
            .unwrap()
    });
    battle
        .spawn_combatant(aliens, "sectoid", Voxel::new(4, 1, 0), stats)
        .unwrap();

    Fixture {
        battle,
        events,
        calls: Rc::default(),
        squad,
        ai: TeamAi::<Battle>::new(humans, aliens).unwrap(),
    }
}

fn scripted(f: &Fixture, answers: &[bool]) -> Box<dyn CombatantAi<Battle>> {
    Box::new(ScriptedAi {
        answers: answers.iter().copied().collect(),
        calls: f.calls.clone(),
    })
}

#[test]
fn team_cannot_fight_itself() {
    let err = TeamAi::<Battle>::new(TeamId(1), TeamId(1));
    assert!(matches!(err, Err(BattleError::InvalidArgument(_))));
}

#[test]
fn focus_skips_incapacitated_and_sticks_to_busy_combatants() {
    let mut f = fixture();
    let [s0, s1, s2] = f.squad;

    f.battle.combatant_mut(s0).unwrap().add_stun(100);
    let ai0 = scripted(&f, &[true, true]);
    let ai1 = scripted(&f, &[true, true, false]);
    let ai2 = scripted(&f, &[true, false]);
    f.ai.assign(s0, ai0);
    f.ai.assign(s1, ai1);
    f.ai.assign(s2, ai2);

    let ctx = TickContext::new(0, 0.1, 0);
    assert_eq!(f.ai.state(), TurnState::Idle);
    f.ai.on_start_team_turn(&mut f.battle).unwrap();
    assert_eq!(f.ai.state(), TurnState::Acting);

    let results: Vec<bool> = (0..4).map(|_| f.ai.update(&ctx, &mut f.battle)).collect();
    assert_eq!(results, vec![true, true, true, false]);
    assert_eq!(*f.calls.borrow(), vec![s1, s1, s1, s2, s2]);
    assert_eq!(f.ai.state(), TurnState::Done);
    assert_eq!(f.ai.cursor(), 3);

    let events = f.events.borrow();
    assert_eq!(
        *events,
        vec![
            BattleEvent::CombatantSkipped { combatant: s0 },
            BattleEvent::CombatantFinished { combatant: s1 },
            BattleEvent::CombatantFinished { combatant: s2 },
        ]
    );
}

#[test]
fn update_outside_a_team_turn_is_a_no_op() {
    let mut f = fixture();
    let ai = scripted(&f, &[true]);
    f.ai.assign(f.squad[0], ai);
    let ctx = TickContext::new(0, 0.1, 0);

    assert!(!f.ai.update(&ctx, &mut f.battle));
    assert!(f.calls.borrow().is_empty());

    f.ai.on_start_team_turn(&mut f.battle).unwrap();
    assert!(f.ai.update(&ctx, &mut f.battle));
    assert!(!f.ai.update(&ctx, &mut f.battle));
    assert_eq!(f.ai.state(), TurnState::Done);

    // Done stays done until the next team turn.
    assert!(!f.ai.update(&ctx, &mut f.battle));
    assert_eq!(f.calls.borrow().len(), 2);
}

#[test]
fn combatants_without_ai_are_finished() {
    let mut f = fixture();
    let ctx = TickContext::new(0, 0.1, 0);
    f.ai.on_start_team_turn(&mut f.battle).unwrap();

    assert!(!f.ai.update(&ctx, &mut f.battle));
    let finished = f
        .events
        .borrow()
        .iter()
        .filter(|e| matches!(e, BattleEvent::CombatantFinished { .. }))
        .count();
    assert_eq!(finished, 3);
}

#[test]
fn next_team_turn_restarts_from_the_top() {
    let mut f = fixture();
    let [s0, _, _] = f.squad;
    let ai = scripted(&f, &[true, false, true, false]);
    f.ai.assign(s0, ai);
    let ctx = TickContext::new(0, 0.1, 0);

    f.ai.on_start_team_turn(&mut f.battle).unwrap();
    assert!(f.ai.update(&ctx, &mut f.battle));
    assert!(!f.ai.update(&ctx, &mut f.battle));

    f.ai.on_start_team_turn(&mut f.battle).unwrap();
    assert_eq!(f.ai.cursor(), 0);
    assert!(f.ai.update(&ctx, &mut f.battle));
    assert!(!f.ai.update(&ctx, &mut f.battle));
    assert_eq!(*f.calls.borrow(), vec![s0; 4]);
}
