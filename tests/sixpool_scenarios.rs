use sixpool_agent::policy::create_policy;
use sixpool_agent::{Command, FrameSnapshot, PlayerView, Position, ProducibleSet, UnitId, UnitKind, UnitView};

fn unit(id: u32, kind: UnitKind, x: i32, y: i32, idle: bool, completed: bool) -> UnitView {
    UnitView {
        id: UnitId(id),
        kind,
        pos: Position::new(x, y),
        idle,
        completed,
    }
}

fn player(supply_used: u32, supply_total: u32) -> PlayerView {
    PlayerView {
        minerals: 0,
        supply_used,
        supply_total,
    }
}

fn morphs_into(commands: &[Command], kind: UnitKind) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, Command::Morph { into, .. } if *into == kind))
        .count()
}

fn builds(commands: &[Command]) -> Vec<&Command> {
    commands
        .iter()
        .filter(|c| matches!(c, Command::Build { .. }))
        .collect()
}

fn attacks(commands: &[Command]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, Command::Attack { .. }))
        .count()
}

#[test]
fn below_worker_target_morphs_exactly_one_drone() {
    // Four busy drones, one overlord, three idle larvae, only the drone kind
    // producible: one worker conversion, nothing else.
    let snapshot = FrameSnapshot {
        frame_count: 10,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::Overlord, 1060, 910, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
            unit(4, UnitKind::Drone, 980, 1050, false, true),
            unit(5, UnitKind::Drone, 1000, 1050, false, true),
            unit(6, UnitKind::Drone, 1020, 1050, false, true),
            unit(7, UnitKind::Larva, 1000, 1030, true, true),
            unit(8, UnitKind::Larva, 1020, 1030, true, true),
            unit(9, UnitKind::Larva, 1040, 1030, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(4, 10),
        producible: [UnitKind::Drone].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(morphs_into(&commands, UnitKind::Drone), 1);
    assert!(builds(&commands).is_empty());
    assert_eq!(attacks(&commands), 0);
    assert_eq!(morphs_into(&commands, UnitKind::Overlord), 0);
    assert_eq!(morphs_into(&commands, UnitKind::Zergling), 0);
}

#[test]
fn at_worker_target_no_drone_morph() {
    let mut my_units = vec![unit(1, UnitKind::Hatchery, 1000, 1000, true, true)];
    for i in 0..6 {
        my_units.push(unit(10 + i, UnitKind::Drone, 960, 1050, false, true));
    }
    my_units.push(unit(20, UnitKind::Larva, 1000, 1030, true, true));

    let snapshot = FrameSnapshot {
        frame_count: 50,
        my_units,
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(6, 10),
        producible: [UnitKind::Drone].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);
    assert_eq!(morphs_into(&commands, UnitKind::Drone), 0);
}

#[test]
fn supply_block_converts_every_idle_larva_to_overlord() {
    // 8 + 2 >= 9: all three larvae become overlords, no zergling morphs even
    // though the pool is done and zerglings are producible.
    let snapshot = FrameSnapshot {
        frame_count: 400,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::SpawningPool, 1060, 910, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
            unit(4, UnitKind::Drone, 980, 1050, false, true),
            unit(5, UnitKind::Drone, 1000, 1050, false, true),
            unit(6, UnitKind::Drone, 1020, 1050, false, true),
            unit(7, UnitKind::Drone, 1040, 1050, false, true),
            unit(8, UnitKind::Drone, 1060, 1050, false, true),
            unit(9, UnitKind::Larva, 1000, 1030, true, true),
            unit(10, UnitKind::Larva, 1020, 1030, true, true),
            unit(11, UnitKind::Larva, 1040, 1030, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(8, 9),
        producible: [UnitKind::Overlord, UnitKind::Zergling]
            .into_iter()
            .collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(morphs_into(&commands, UnitKind::Overlord), 3);
    assert_eq!(morphs_into(&commands, UnitKind::Zergling), 0);
}

#[test]
fn pool_ordered_once_at_the_overlord_position() {
    let anchor = Position::new(520, 410);
    let snapshot = FrameSnapshot {
        frame_count: 200,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::Overlord, anchor.x, anchor.y, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
            unit(4, UnitKind::Drone, 980, 1050, false, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(4, 10),
        producible: [UnitKind::SpawningPool].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    let build_commands = builds(&commands);
    assert_eq!(build_commands.len(), 1);
    match build_commands[0] {
        Command::Build {
            builder,
            building,
            at,
        } => {
            assert_eq!(*builder, UnitId(3));
            assert_eq!(*building, UnitKind::SpawningPool);
            assert_eq!(*at, anchor);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn pool_needs_both_a_worker_and_an_overlord() {
    let no_worker = FrameSnapshot {
        frame_count: 200,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::Overlord, 520, 410, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(2, 10),
        producible: [UnitKind::SpawningPool].into_iter().collect(),
    };
    let no_overlord = FrameSnapshot {
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
        ],
        ..no_worker.clone()
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    assert!(builds(&policy.frame(&no_worker)).is_empty());
    assert!(builds(&policy.frame(&no_overlord)).is_empty());
}

#[test]
fn existing_pool_suppresses_another_build() {
    // An in-progress pool counts: no second build order.
    let snapshot = FrameSnapshot {
        frame_count: 220,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::Overlord, 520, 410, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
            unit(4, UnitKind::SpawningPool, 520, 410, false, false),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(3, 10),
        producible: [UnitKind::SpawningPool].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    assert!(builds(&policy.frame(&snapshot)).is_empty());
}

#[test]
fn harvest_picks_first_in_range_patch_not_nearest() {
    let snapshot = FrameSnapshot {
        frame_count: 5,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 0, 40, true, true),
            unit(2, UnitKind::Drone, 0, 0, true, true),
        ],
        neutral_units: vec![
            // Enumerated first but out of range.
            unit(50, UnitKind::MineralField, 400, 0, true, true),
            // First in range: chosen even though the next one is closer.
            unit(51, UnitKind::MineralField, 250, 0, true, true),
            unit(52, UnitKind::MineralField, 100, 0, true, true),
        ],
        enemy_units: vec![],
        player: player(1, 10),
        producible: ProducibleSet::empty(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(
        commands,
        vec![Command::Harvest {
            worker: UnitId(2),
            patch: UnitId(51),
        }]
    );
}

#[test]
fn harvest_assignment_is_idempotent_for_identical_snapshots() {
    let snapshot = FrameSnapshot {
        frame_count: 5,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 0, 40, true, true),
            unit(2, UnitKind::Drone, 0, 0, true, true),
            unit(3, UnitKind::Drone, 10, 0, true, true),
        ],
        neutral_units: vec![
            unit(50, UnitKind::MineralField, 120, 0, true, true),
            unit(51, UnitKind::MineralField, 140, 0, true, true),
        ],
        enemy_units: vec![],
        player: player(2, 10),
        producible: ProducibleSet::empty(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let first = policy.frame(&snapshot);
    let second = policy.frame(&snapshot);
    assert_eq!(first, second);
}

#[test]
fn two_idle_workers_may_claim_the_same_patch() {
    let snapshot = FrameSnapshot {
        frame_count: 5,
        my_units: vec![
            unit(2, UnitKind::Drone, 0, 0, true, true),
            unit(3, UnitKind::Drone, 10, 0, true, true),
        ],
        neutral_units: vec![unit(50, UnitKind::MineralField, 120, 0, true, true)],
        enemy_units: vec![],
        player: player(2, 10),
        producible: ProducibleSet::empty(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(
        commands,
        vec![
            Command::Harvest {
                worker: UnitId(2),
                patch: UnitId(50),
            },
            Command::Harvest {
                worker: UnitId(3),
                patch: UnitId(50),
            },
        ]
    );
}

#[test]
fn idle_zergling_attacks_first_enumerated_enemy() {
    let far = Position::new(4000, 4000);
    let near = Position::new(300, 300);
    let snapshot = FrameSnapshot {
        frame_count: 700,
        my_units: vec![
            unit(1, UnitKind::SpawningPool, 1000, 1000, true, true),
            unit(2, UnitKind::Zergling, 200, 200, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![
            unit(80, UnitKind::CommandCenter, far.x, far.y, false, true),
            unit(81, UnitKind::Marine, near.x, near.y, false, true),
        ],
        player: player(1, 10),
        producible: ProducibleSet::empty(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(
        commands,
        vec![Command::Attack {
            unit: UnitId(2),
            target: far,
        }]
    );
}

#[test]
fn completed_pool_and_free_supply_morph_all_larvae_to_zerglings() {
    let snapshot = FrameSnapshot {
        frame_count: 500,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::SpawningPool, 1060, 910, true, true),
            unit(3, UnitKind::Drone, 960, 1050, false, true),
            unit(4, UnitKind::Drone, 980, 1050, false, true),
            unit(5, UnitKind::Drone, 1000, 1050, false, true),
            unit(6, UnitKind::Drone, 1020, 1050, false, true),
            unit(7, UnitKind::Drone, 1040, 1050, false, true),
            unit(8, UnitKind::Drone, 1060, 1050, false, true),
            unit(9, UnitKind::Larva, 1000, 1030, true, true),
            unit(10, UnitKind::Larva, 1020, 1030, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(6, 10),
        producible: [UnitKind::Zergling].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    let commands = policy.frame(&snapshot);

    assert_eq!(morphs_into(&commands, UnitKind::Zergling), 2);
    assert_eq!(morphs_into(&commands, UnitKind::Overlord), 0);
}

#[test]
fn incomplete_pool_blocks_zergling_morphs() {
    let snapshot = FrameSnapshot {
        frame_count: 300,
        my_units: vec![
            unit(1, UnitKind::Hatchery, 1000, 1000, true, true),
            unit(2, UnitKind::SpawningPool, 1060, 910, false, false),
            unit(9, UnitKind::Larva, 1000, 1030, true, true),
        ],
        neutral_units: vec![],
        enemy_units: vec![],
        player: player(1, 10),
        producible: [UnitKind::Zergling].into_iter().collect(),
    };

    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    policy.match_start();
    assert_eq!(morphs_into(&policy.frame(&snapshot), UnitKind::Zergling), 0);
}

#[test]
fn match_start_requests_development_toggles() {
    let mut policy = create_policy("sixpool").expect("sixpool in roster");
    let setup = policy.match_start();
    assert!(setup.user_input);
    assert!(setup.perfect_information);
    assert_eq!(setup.game_speed, 10);

    let mut fast = create_policy("sixpool-fast").expect("sixpool-fast in roster");
    assert_eq!(fast.match_start().game_speed, 0);
}
