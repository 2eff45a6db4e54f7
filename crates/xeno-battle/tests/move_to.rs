use std::cell::RefCell;
use std::rc::Rc;

use xeno_battle::{
    Battle, BattleConfig, BattleEvent, CombatantStats, EventSink, MoveToAi, NullEventSink, Roster,
    TeamAi,
};
use xeno_core::{CombatantId, TeamId, TickContext, Voxel};
use xeno_nav::{NavWorldMut, Terrain, VoxelTerrain};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<BattleEvent>>>);

impl EventSink for RcSink {
    fn emit(&mut self, event: BattleEvent) {
        self.0.borrow_mut().push(event);
    }
}

const STEP: f32 = 0.25;

struct Setup {
    battle: Battle,
    humans: TeamId,
    mover: CombatantId,
    blocker: CombatantId,
    ai: TeamAi<Battle>,
}

fn setup(config: BattleConfig, time_units: u32, goal: Voxel) -> Setup {
    let terrain = VoxelTerrain::from_ascii(&[["......", "......", "......"]]).unwrap();
    let mut battle = Battle::new(terrain, config);
    let humans = battle.add_team("humans").unwrap();
    let aliens = battle.add_team("aliens").unwrap();

    let stats = CombatantStats {
        max_time_units: time_units,
        ..CombatantStats::default()
    };
    let mover = battle
        .spawn_combatant(humans, "runner", Voxel::new(0, 0, 0), stats)
        .unwrap();
    let blocker = battle
        .spawn_combatant(aliens, "floater", Voxel::new(2, 1, 0), CombatantStats::default())
        .unwrap();

    let mut ai = TeamAi::<Battle>::new(humans, aliens).unwrap();
    ai.assign(mover, Box::new(MoveToAi::new(goal)));
    Setup {
        battle,
        humans,
        mover,
        blocker,
        ai,
    }
}

fn start_team_turn(s: &mut Setup) {
    use xeno_battle::BattleMut;
    s.battle.start_team_turn(s.humans).unwrap();
    s.ai.on_start_team_turn(&mut s.battle).unwrap();
}

fn position(s: &Setup) -> Voxel {
    s.battle.combatant(s.mover).unwrap().position()
}

#[test]
fn walks_one_voxel_per_step_interval() {
    let mut s = setup(BattleConfig::default(), 60, Voxel::new(4, 0, 0));
    let ctx = TickContext::new(0, STEP, 0);
    start_team_turn(&mut s);

    let results: Vec<bool> = (0..4).map(|_| s.ai.update(&ctx, &mut s.battle)).collect();
    assert_eq!(results, vec![true, true, true, false]);
    assert_eq!(position(&s), Voxel::new(4, 0, 0));
    assert_eq!(s.battle.combatant(s.mover).unwrap().time_units(), 60 - 4 * 4);
    assert_eq!(s.battle.terrain().occupant_at(Voxel::new(4, 0, 0)), Some(s.mover));
    assert_eq!(s.battle.terrain().occupant_at(Voxel::new(0, 0, 0)), None);
}

#[test]
fn running_out_of_time_units_resumes_next_turn() {
    let mut s = setup(BattleConfig::default(), 8, Voxel::new(4, 0, 0));
    let ctx = TickContext::new(0, 1.0, 0);

    start_team_turn(&mut s);
    assert!(!s.ai.update(&ctx, &mut s.battle));
    assert_eq!(position(&s), Voxel::new(2, 0, 0));
    assert_eq!(s.battle.combatant(s.mover).unwrap().time_units(), 0);

    start_team_turn(&mut s);
    assert!(!s.ai.update(&ctx, &mut s.battle));
    assert_eq!(position(&s), Voxel::new(4, 0, 0));
}

#[test]
fn replans_when_the_route_gets_blocked() {
    let mut s = setup(BattleConfig::default(), 60, Voxel::new(5, 0, 0));
    let sink = RcSink::default();
    let events = sink.0.clone();
    s.battle.replace_event_sink(Box::new(sink));
    let ctx = TickContext::new(0, STEP, 0);
    start_team_turn(&mut s);

    assert!(s.ai.update(&ctx, &mut s.battle));
    assert_eq!(position(&s), Voxel::new(1, 0, 0));

    // Someone steps onto the planned route.
    s.battle.step_agent(s.blocker, Voxel::new(2, 0, 0)).unwrap();

    let mut visited = vec![position(&s)];
    for _ in 0..20 {
        let busy = s.ai.update(&ctx, &mut s.battle);
        visited.push(position(&s));
        if !busy {
            break;
        }
    }

    assert_eq!(position(&s), Voxel::new(5, 0, 0));
    assert!(!visited.contains(&Voxel::new(2, 0, 0)));
    assert!(events.borrow().contains(&BattleEvent::PathBlocked {
        combatant: s.mover,
        at: Voxel::new(2, 0, 0),
    }));
}

#[test]
fn gives_up_when_no_replans_are_left() {
    let mut config = BattleConfig::default();
    config.movement.max_replans = 0;
    let mut s = setup(config, 60, Voxel::new(5, 0, 0));
    let ctx = TickContext::new(0, STEP, 0);
    start_team_turn(&mut s);

    assert!(s.ai.update(&ctx, &mut s.battle));
    s.battle.step_agent(s.blocker, Voxel::new(2, 0, 0)).unwrap();

    assert!(!s.ai.update(&ctx, &mut s.battle));
    assert_eq!(position(&s), Voxel::new(1, 0, 0));
}

#[test]
fn unreachable_goal_finishes_immediately() {
    let mut s = setup(BattleConfig::default(), 60, Voxel::new(2, 1, 0));
    s.battle.replace_event_sink(Box::new(NullEventSink));
    let ctx = TickContext::new(0, STEP, 0);
    start_team_turn(&mut s);

    // The goal is held by the blocker.
    assert!(!s.ai.update(&ctx, &mut s.battle));
    assert_eq!(position(&s), Voxel::new(0, 0, 0));
}
