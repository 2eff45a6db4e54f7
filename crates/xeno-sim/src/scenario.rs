//! Scenario files: terrain, teams and tunables for one battle, loaded from YAML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use xeno_battle::{AiSpec, Battle, BattleConfig, CombatantStats, TeamAi, TurnController};
use xeno_core::{TickContext, Voxel};
use xeno_nav::VoxelTerrain;

/// RNG stream reserved for combatant AIs.
const AI_STREAM: u64 = 0xA1;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub seed: u64,

    /// Simulated seconds handed to the acting combatant per tick.
    #[serde(default = "default_seconds_per_tick")]
    pub seconds_per_tick: f32,

    /// Stop after this many full game turns if nobody has won.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    #[serde(default)]
    pub config: BattleConfig,

    /// Levels bottom-up, each a list of rows north to south.
    pub terrain: Vec<Vec<String>>,

    pub teams: Vec<TeamSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    #[serde(default)]
    pub combatants: Vec<CombatantSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub position: Voxel,
    #[serde(default)]
    pub stats: CombatantStats,
    #[serde(default = "default_ai")]
    pub ai: AiSpec,
}

fn default_seconds_per_tick() -> f32 {
    0.25
}
fn default_max_turns() -> u32 {
    50
}
fn default_ai() -> AiSpec {
    AiSpec::Hold
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load scenario from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content).context("Invalid scenario YAML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if self.teams.len() != 2 {
            bail!("a scenario needs exactly two teams, found {}", self.teams.len());
        }
        if self.seconds_per_tick.is_nan() || self.seconds_per_tick <= 0.0 {
            bail!("seconds_per_tick must be positive");
        }
        if self.max_turns == 0 {
            bail!("max_turns must be at least 1");
        }
        self.config.validate().context("Invalid battle config")?;
        Ok(())
    }

    /// Set up the battle and its turn controller. `seed` drives every AI's dice.
    pub fn build(&self, seed: u64) -> Result<(Battle, TurnController<Battle>)> {
        let terrain = VoxelTerrain::from_ascii(&self.terrain).context("Invalid terrain")?;
        let mut battle = Battle::new(terrain, self.config);
        let ctx = TickContext::new(0, self.seconds_per_tick, seed);

        let mut ids = Vec::with_capacity(self.teams.len());
        for spec in &self.teams {
            ids.push(battle.add_team(spec.name.as_str())?);
        }

        let mut team_ais = Vec::with_capacity(self.teams.len());
        for (i, spec) in self.teams.iter().enumerate() {
            let team = ids[i];
            let enemy = ids[(i + 1) % ids.len()];
            let mut ai = TeamAi::<Battle>::new(team, enemy)?;

            for c in &spec.combatants {
                let id = battle
                    .spawn_combatant(team, c.name.as_str(), c.position, c.stats)
                    .with_context(|| format!("Cannot spawn {} for {}", c.name, spec.name))?;
                let brain = c
                    .ai
                    .build::<Battle>(ctx.rng_for_agent(id, AI_STREAM))
                    .with_context(|| format!("Invalid AI for {}", c.name))?;
                ai.assign(id, brain);
            }
            team_ais.push(ai);
        }

        let turns = TurnController::new(team_ais)?;
        Ok((battle, turns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xeno_battle::{BattleView, TurnProgress};

    const SKIRMISH: &str = include_str!("../scenarios/skirmish.yaml");

    #[test]
    fn sample_scenario_builds() {
        let scenario = Scenario::parse(SKIRMISH).unwrap();
        assert_eq!(scenario.teams.len(), 2);

        let (battle, turns) = scenario.build(scenario.seed).unwrap();
        assert_eq!(battle.teams().len(), 2);
        let total: usize = scenario.teams.iter().map(|t| t.combatants.len()).sum();
        assert_eq!(battle.combatants().len(), total);
        assert!(!turns.is_over());
        assert_eq!(battle.config().combat.attack_cost, 18);
    }

    #[test]
    fn sample_scenario_plays_deterministically() {
        let scenario = Scenario::parse(SKIRMISH).unwrap();

        let play = || {
            let (mut battle, mut turns) = scenario.build(7).unwrap();
            let mut ctx = TickContext::new(0, scenario.seconds_per_tick, 7);
            let mut log = Vec::new();
            for _ in 0..20_000 {
                let progress = turns.update(&ctx, &mut battle).unwrap();
                log.push(progress);
                match progress {
                    TurnProgress::BattleOver { .. } => break,
                    TurnProgress::TurnComplete { turn } if turn >= 10 => break,
                    _ => {}
                }
                ctx = ctx.next();
            }
            log
        };

        assert_eq!(play(), play());
    }

    #[test]
    fn rejects_wrong_team_count() {
        let yaml = r#"
terrain:
  - ["..."]
teams:
  - name: loners
"#;
        let err = Scenario::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("exactly two teams"));
    }

    #[test]
    fn rejects_spawn_inside_walls() {
        let yaml = r#"
terrain:
  - [".#."]
teams:
  - name: humans
    combatants:
      - name: stuck
        position: { x: 1, y: 0, z: 0 }
  - name: aliens
"#;
        let scenario = Scenario::parse(yaml).unwrap();
        let Err(err) = scenario.build(0) else {
            panic!("spawning inside a wall should fail");
        };
        assert!(format!("{err:#}").contains("stuck"));
    }

    #[test]
    fn rejects_infinite_step_time() {
        let yaml = r#"
config:
  movement:
    seconds_per_step: .inf
terrain:
  - ["..."]
teams:
  - name: humans
  - name: aliens
"#;
        let err = Scenario::parse(yaml).unwrap_err();
        assert!(format!("{err:#}").contains("seconds_per_step"));
    }
}
