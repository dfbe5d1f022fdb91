//! Forward model contract tests.
//!
//! These exercise the public surface the way a search agent does: copy a
//! state, enumerate legal actions, check and execute them, and compare
//! snapshots.

use rust_tribes::actions::{
    Action, ActionType, Attack, Build, ClearForest, Command, EndTurn, Move, Subject,
};
use rust_tribes::actors::UnitType;
use rust_tribes::agent::{play_game, Agent, RandomAgent};
use rust_tribes::core::{
    ActorId, Building, GameConfig, GameRng, Position, Technology, Terrain, TribeId,
};
use rust_tribes::game::GameState;
use rust_tribes::setup::GameBuilder;

fn generated(seed: u64) -> GameState {
    GameBuilder::new(12)
        .with_config(GameConfig::new().with_max_turns(50))
        .generated(seed)
        .build(seed)
        .unwrap()
}

fn advanced(seed: u64, actions: usize) -> GameState {
    let mut gs = generated(seed);
    let mut agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomAgent::new(seed + 1)),
        Box::new(RandomAgent::new(seed + 2)),
    ];
    play_game(&mut gs, &mut agents, actions).unwrap();
    gs
}

fn capital(gs: &GameState, tribe: TribeId) -> ActorId {
    gs.tribe(tribe).unwrap().capital.unwrap()
}

/// Every concrete action of every kind for every subject of the active tribe.
fn all_variants(gs: &GameState) -> Vec<Action> {
    let Some(tribe) = gs.active_tribe() else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for kind in ActionType::TRIBE {
        out.extend(kind.variants(gs, Subject::Tribe(tribe)));
    }
    for city in gs.cities_of(tribe) {
        for kind in ActionType::CITY {
            out.extend(kind.variants(gs, Subject::Actor(city.id)));
        }
    }
    for unit in gs.units_of(tribe) {
        for kind in ActionType::UNIT {
            out.extend(kind.variants(gs, Subject::Actor(unit.id)));
        }
    }
    out
}

// =============================================================================
// Copy Independence
// =============================================================================

#[test]
fn test_copy_is_independent_of_original() {
    for seed in [3, 8, 21] {
        let gs = advanced(seed, 60);
        let before = gs.snapshot().unwrap();

        let mut branch = gs.copy();
        let mut rng = GameRng::new(seed);
        for _ in 0..80 {
            let legal = branch.legal_actions();
            let Some(action) = rng.choose(&legal).copied() else {
                break;
            };
            assert!(branch.execute(&action).unwrap());
        }

        assert_eq!(gs.snapshot().unwrap(), before, "seed {seed}");
        assert_ne!(branch.snapshot().unwrap(), before, "seed {seed}");
    }
}

#[test]
fn test_copy_replays_identically() {
    let gs = advanced(5, 40);
    let mut a = gs.copy();
    let mut b = gs.copy();
    for _ in 0..30 {
        let legal = a.legal_actions();
        let Some(action) = legal.last().copied() else {
            break;
        };
        assert!(a.execute(&action).unwrap());
        assert!(b.execute(&action).unwrap());
    }
    assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
}

#[test]
fn test_clone_state_forks_randomness() {
    let mut gs = advanced(9, 20);
    let before = gs.copy();
    let forked = gs.clone_state();
    assert_eq!(forked.board(), gs.board());
    assert_eq!(forked.turn(), gs.turn());
    // Forking advanced the parent's fork counter, nothing else
    assert_eq!(gs.board(), before.board());
    assert_eq!(gs.history(), before.history());
}

// =============================================================================
// Feasibility and Execution
// =============================================================================

#[test]
fn test_execute_matches_feasibility() {
    let gs = advanced(13, 50);
    let tribe = gs.active_tribe().unwrap();
    let city = capital(&gs, tribe);

    let mut candidates = gs.legal_actions();
    candidates.push(Action::from(Build {
        city,
        building: Building::Temple,
        position: Position::new(-1, 0),
    }));
    candidates.push(Action::from(Move {
        unit: ActorId::new(9_999),
        destination: Position::new(0, 0),
    }));
    candidates.push(Action::from(EndTurn {
        tribe: TribeId::new((tribe.index() as u8 + 1) % 2),
    }));

    for action in candidates {
        let mut trial = gs.copy();
        let before = trial.snapshot().unwrap();
        let feasible = action.is_feasible(&trial);
        let applied = trial.execute(&action).unwrap();
        assert_eq!(feasible, applied, "{action:?}");
        if !applied {
            assert_eq!(trial.snapshot().unwrap(), before, "{action:?}");
        }
    }
}

#[test]
fn test_nothing_is_feasible_once_terminal() {
    let mut gs = GameBuilder::new(8)
        .with_config(GameConfig::new().with_max_turns(1))
        .with_capital(TribeId::new(0), Position::new(1, 1))
        .with_capital(TribeId::new(1), Position::new(6, 6))
        .build(2)
        .unwrap();
    gs.perform(&Action::from(EndTurn { tribe: TribeId::new(0) }))
        .unwrap();
    gs.perform(&Action::from(EndTurn { tribe: TribeId::new(1) }))
        .unwrap();
    assert!(gs.is_terminal());
    assert!(gs.legal_actions().is_empty());
    let before = gs.snapshot().unwrap();
    assert!(!gs
        .execute(&Action::from(EndTurn { tribe: TribeId::new(0) }))
        .unwrap());
    assert_eq!(gs.snapshot().unwrap(), before);
}

#[test]
fn test_perform_reports_illegal_action() {
    let mut gs = generated(4);
    let err = gs
        .perform(&Action::from(EndTurn { tribe: TribeId::new(1) }))
        .unwrap_err();
    assert!(err.to_string().contains("not available"), "{err}");
}

// =============================================================================
// Variant Soundness
// =============================================================================

#[test]
fn test_every_variant_is_feasible() {
    for seed in [1, 2, 3, 4] {
        for steps in [0, 25, 90] {
            let gs = advanced(seed, steps);
            for action in all_variants(&gs) {
                assert!(action.is_feasible(&gs), "seed {seed} step {steps}: {action:?}");
            }
        }
    }
}

#[test]
fn test_variants_are_order_stable() {
    let gs = advanced(6, 45);
    assert_eq!(gs.legal_actions(), gs.legal_actions());
    assert_eq!(gs.legal_actions(), gs.copy().legal_actions());
}

#[test]
fn test_legal_actions_always_offer_end_turn() {
    let gs = advanced(7, 33);
    let tribe = gs.active_tribe().unwrap();
    assert!(gs
        .legal_actions()
        .contains(&Action::from(EndTurn { tribe })));
}

// =============================================================================
// Economy
// =============================================================================

fn temple_game(stars: u32) -> GameState {
    GameBuilder::new(8)
        .with_capital(TribeId::new(0), Position::new(2, 2))
        .with_capital(TribeId::new(1), Position::new(6, 6))
        .with_stars(TribeId::new(0), stars)
        .with_tech(TribeId::new(0), Technology::FreeSpirit)
        .build(31)
        .unwrap()
}

#[test]
fn test_temple_scenario() {
    let mut gs = temple_game(50);
    let build = Action::from(Build {
        city: capital(&gs, TribeId::new(0)),
        building: Building::Temple,
        position: Position::new(3, 2),
    });
    assert!(gs.execute(&build).unwrap());
    assert_eq!(gs.tribe(TribeId::new(0)).unwrap().stars(), 30);
    assert_eq!(
        gs.board().building_at(Position::new(3, 2)).unwrap(),
        Some(Building::Temple)
    );
}

#[test]
fn test_build_spends_exactly_its_cost() {
    for stars in [19, 20, 21, 45] {
        let mut gs = temple_game(stars);
        let build = Action::from(Build {
            city: capital(&gs, TribeId::new(0)),
            building: Building::Temple,
            position: Position::new(3, 2),
        });
        let applied = gs.execute(&build).unwrap();
        let left = gs.tribe(TribeId::new(0)).unwrap().stars();
        if stars >= 20 {
            assert!(applied);
            assert_eq!(left, stars - 20);
        } else {
            assert!(!applied);
            assert_eq!(left, stars);
        }
    }
}

#[test]
fn test_monument_built_once() {
    let t0 = TribeId::new(0);
    let mut gs = GameBuilder::new(8)
        .with_capital(t0, Position::new(2, 2))
        .with_city(t0, Position::new(5, 2))
        .with_capital(TribeId::new(1), Position::new(6, 6))
        .with_monument_available(t0, Building::EyeOfGod)
        .build(12)
        .unwrap();
    let capital = capital(&gs, t0);
    let other = gs
        .cities_of(t0)
        .find(|c| c.id != capital)
        .map(|c| c.id)
        .unwrap();

    let first = Action::from(Build {
        city: capital,
        building: Building::EyeOfGod,
        position: Position::new(1, 2),
    });
    assert!(gs.execute(&first).unwrap());
    assert_eq!(gs.tribe(t0).unwrap().monuments.built_count(), 1);
    assert!(gs.board().is_fully_observed(t0));

    let again = Action::from(Build {
        city: other,
        building: Building::EyeOfGod,
        position: Position::new(5, 1),
    });
    assert!(!gs.execute(&again).unwrap());
    assert_eq!(gs.tribe(t0).unwrap().monuments.built_count(), 1);
}

#[test]
fn test_clear_forest_variants_follow_forestry() {
    let build = |tech: Technology| {
        GameBuilder::new(8)
            .with_capital(TribeId::new(0), Position::new(2, 2))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_terrain(Position::new(1, 1), Terrain::Forest)
            .with_terrain(Position::new(3, 1), Terrain::Forest)
            .with_terrain(Position::new(2, 3), Terrain::Forest)
            .with_terrain(Position::new(5, 5), Terrain::Forest)
            .with_tech(TribeId::new(0), tech)
            .build(3)
            .unwrap()
    };

    let gs = build(Technology::Forestry);
    let city = capital(&gs, TribeId::new(0));
    let mut targets: Vec<Position> = ClearForest::variants(&gs, city)
        .into_iter()
        .map(|action| match action {
            Action::City(rust_tribes::actions::CityAction::ClearForest(c)) => c.position,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    targets.sort();
    assert_eq!(
        targets,
        vec![Position::new(1, 1), Position::new(2, 3), Position::new(3, 1)]
    );

    let gs = build(Technology::Farming);
    let city = capital(&gs, TribeId::new(0));
    assert!(ClearForest::variants(&gs, city).is_empty());
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn test_dead_units_leave_board_and_legal_actions() {
    let t0 = TribeId::new(0);
    let t1 = TribeId::new(1);
    let mut gs = GameBuilder::new(10)
        .with_capital(t0, Position::new(1, 1))
        .with_capital(t1, Position::new(8, 8))
        .with_unit(t0, UnitType::Warrior, Position::new(4, 4))
        .with_unit(t1, UnitType::Warrior, Position::new(5, 4))
        .build(19)
        .unwrap();
    let a = gs.board().unit_at(Position::new(4, 4)).unwrap().unwrap();
    let d = gs.board().unit_at(Position::new(5, 4)).unwrap().unwrap();
    let ids = [a, d];

    // Trade blows until one side falls
    for _ in 0..10 {
        let Some(tribe) = gs.active_tribe() else {
            break;
        };
        let (mine, theirs) = if tribe == t0 { (a, d) } else { (d, a) };
        let attack = Action::from(Attack {
            unit: mine,
            target: theirs,
        });
        if attack.is_feasible(&gs) {
            assert!(gs.execute(&attack).unwrap());
        }
        if gs.unit(a).is_none() || gs.unit(d).is_none() {
            break;
        }
        gs.perform(&Action::from(EndTurn { tribe })).unwrap();
    }

    let dead: Vec<ActorId> = ids.into_iter().filter(|id| gs.unit(*id).is_none()).collect();
    assert_eq!(dead.len(), 1);
    let dead = dead[0];
    for pos in gs.board().positions() {
        assert_ne!(gs.board().unit_at(pos).unwrap(), Some(dead));
    }
    for action in gs.legal_actions() {
        if let Action::Unit(unit_action) = action {
            assert_ne!(unit_action.subject(), Subject::Actor(dead));
        }
    }
    for unit in gs.units() {
        assert!(unit.hp > 0 && unit.hp <= unit.max_hp);
    }
    gs.check_invariants().unwrap();
}
