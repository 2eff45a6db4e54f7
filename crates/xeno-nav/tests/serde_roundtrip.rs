#![cfg(feature = "serde")]

use xeno_core::{CombatantId, Voxel};
use xeno_nav::{Mobility, Path, Pathfinder, TerrainMut, VoxelTerrain};

fn stair_room() -> VoxelTerrain {
    VoxelTerrain::from_ascii(&[
        ["..H", ".#.", "..."],
        ["__.", "___", "___"],
    ])
    .unwrap()
}

#[test]
fn terrain_roundtrips_via_serde() {
    let mut terrain = stair_room();
    terrain
        .place_combatant(CombatantId(3), Voxel::new(1, 0, 0))
        .unwrap();

    let json = serde_json::to_string(&terrain).expect("serialize terrain");
    let terrain2: VoxelTerrain = serde_json::from_str(&json).expect("deserialize terrain");
    assert_eq!(terrain, terrain2);

    let start = Voxel::new(0, 0, 0);
    let dest = Voxel::new(2, 0, 1);
    let mut finder = Pathfinder::default();
    let p1 = finder.find_path(&terrain, start, dest, Mobility::WALKER);
    let p2 = finder.find_path(&terrain2, start, dest, Mobility::WALKER);
    assert!(p1.is_some());
    assert_eq!(p1, p2);

    let json = serde_json::to_string(&p1).expect("serialize path");
    let p3: Option<Path> = serde_json::from_str(&json).expect("deserialize path");
    assert_eq!(p1, p3);
}

#[test]
fn terrain_with_wrong_cell_count_is_rejected() {
    let json = r#"{"extent":{"width":2,"depth":1,"height":1},"kinds":["floor"]}"#;
    let err = serde_json::from_str::<VoxelTerrain>(json).unwrap_err();
    assert!(err.to_string().contains("extent needs 2"), "{err}");
}
