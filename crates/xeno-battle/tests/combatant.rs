use xeno_battle::{BattleError, Combatant, CombatantStats, Combatants, Team};
use xeno_core::{CombatantId, TeamId, Voxel};

fn soldier(id: u32) -> Combatant {
    Combatant::new(
        CombatantId(id),
        format!("soldier {id}"),
        TeamId(0),
        Voxel::new(id as i32, 0, 0),
        CombatantStats::default(),
    )
    .unwrap()
}

#[test]
fn construction_rejects_bad_arguments() {
    let at = Voxel::new(0, 0, 0);
    let err = Combatant::new(CombatantId(0), "  ", TeamId(0), at, CombatantStats::default());
    assert!(matches!(err, Err(BattleError::InvalidArgument(_))));

    let stats = CombatantStats {
        max_health: 0,
        ..CombatantStats::default()
    };
    let err = Combatant::new(CombatantId(0), "a", TeamId(0), at, stats);
    assert!(matches!(err, Err(BattleError::InvalidArgument(_))));

    let stats = CombatantStats {
        max_time_units: 0,
        ..CombatantStats::default()
    };
    let err = Combatant::new(CombatantId(0), "a", TeamId(0), at, stats);
    assert!(matches!(err, Err(BattleError::InvalidArgument(_))));

    assert!(Team::new(TeamId(0), "").is_err());
}

#[test]
fn fresh_combatant_can_take_orders() {
    let c = soldier(0);
    assert!(c.can_take_orders());
    assert_eq!(c.health(), 30);
    assert_eq!(c.time_units(), 60);
    assert_eq!(c.morale(), 100);
}

#[test]
fn stun_at_or_above_health_knocks_out() {
    let mut c = soldier(0);
    c.add_stun(29);
    assert!(c.can_take_orders());
    c.add_stun(1);
    assert!(!c.is_conscious());
    assert!(!c.can_take_orders());

    // Recovery is one point per turn.
    c.on_start_turn(0);
    assert_eq!(c.stun(), 29);
    assert!(c.can_take_orders());
}

#[test]
fn panic_and_death_remove_orders() {
    let mut c = soldier(0);
    c.lower_morale(250);
    assert!(c.is_panicked());
    assert!(!c.can_take_orders());
    c.on_start_turn(10);
    assert_eq!(c.morale(), 10);
    assert!(c.can_take_orders());

    assert!(!c.take_damage(29));
    assert!(c.take_damage(5));
    assert!(!c.is_alive());
    assert!(!c.can_take_orders());
    // Already dead: no second kill.
    assert!(!c.take_damage(5));
}

#[test]
fn start_of_turn_refills_time_units() {
    let mut c = soldier(0);
    assert!(c.spend_time_units(50));
    assert!(!c.spend_time_units(11));
    assert_eq!(c.time_units(), 10);

    c.on_start_turn(10);
    assert_eq!(c.time_units(), 60);
    assert_eq!(c.morale(), 100);
}

fn roster(n: u32) -> (Combatants, Team) {
    let mut all = Combatants::new();
    let mut team = Team::new(TeamId(0), "squad").unwrap();
    for id in 0..n {
        let c = soldier(id);
        team.add(all.insert(c).unwrap());
    }
    (all, team)
}

#[test]
fn arena_ids_are_dense() {
    let mut all = Combatants::new();
    assert_eq!(all.insert(soldier(0)).unwrap(), CombatantId(0));
    assert!(all.insert(soldier(5)).is_err());
    assert_eq!(all.len(), 1);
}

#[test]
fn empty_team_is_defeated() {
    let (all, team) = roster(0);
    assert!(team.is_empty());
    assert!(team.is_defeated(&all));
}

#[test]
fn team_is_defeated_only_when_nobody_can_act() {
    use xeno_battle::RosterMut;

    let (mut all, team) = roster(3);
    assert!(!team.is_defeated(&all));

    all.combatant_mut(CombatantId(0)).unwrap().take_damage(100);
    all.combatant_mut(CombatantId(1)).unwrap().add_stun(100);
    assert!(!team.is_defeated(&all));
    assert_eq!(team.active_count(&all), 1);

    all.combatant_mut(CombatantId(2)).unwrap().lower_morale(100);
    assert!(team.is_defeated(&all));
}

#[test]
fn team_start_turn_reaches_every_member() {
    use xeno_battle::{Roster, RosterMut};

    let (mut all, team) = roster(2);
    for id in team.roster() {
        all.combatant_mut(*id).unwrap().spend_time_units(40);
    }
    team.on_start_turn(&mut all, 0);
    for id in team.roster() {
        assert_eq!(all.combatant(*id).unwrap().time_units(), 60);
    }
}

#[test]
fn huge_morale_recovery_caps_at_full() {
    let mut c = soldier(0);
    c.lower_morale(40);
    c.on_start_turn(u32::MAX);
    assert_eq!(c.morale(), 100);
}
