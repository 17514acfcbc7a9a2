use cavegen::export::{MONSTERS_LAYER, OBJECTS_LAYER, PREVIOUS_TERRAIN_LAYER, TERRAIN_LAYER};
use cavegen::{ExportLayer, GeneratorConfig, IdFormat, MapDocument, TileRecord, generate};
use tempfile::tempdir;

#[test]
fn three_known_records_survive_a_round_trip() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("map.json");
    let tiles = vec![
        TileRecord { id: "WALL_LR_2".to_string(), x: 4, y: 0 },
        TileRecord { id: "CHEST".to_string(), x: 2, y: 7 },
        TileRecord { id: "MONSTER".to_string(), x: 3, y: 6 },
    ];
    let document = MapDocument { layers: vec![ExportLayer { name: "probe".to_string(), tiles }] };

    document.write_atomic(&path).expect("write succeeds");
    let loaded = MapDocument::load(&path).expect("load succeeds");

    assert_eq!(loaded, document);
    let records = &loaded.layers[0].tiles;
    assert_eq!((records[1].id.as_str(), records[1].x, records[1].y), ("CHEST", 2, 7));
}

#[test]
fn generated_cave_exports_every_layer() {
    let config = GeneratorConfig {
        width: 20,
        height: 15,
        chest_prob: 1.0,
        monster_prob: 1.0,
        keep_previous: true,
        ..GeneratorConfig::default()
    };
    let cave = generate(&config, 31).expect("valid config");
    let document = cave.to_document(IdFormat::Symbolic);

    let names: Vec<&str> = document.layers.iter().map(|layer| layer.name.as_str()).collect();
    assert_eq!(names, [TERRAIN_LAYER, OBJECTS_LAYER, MONSTERS_LAYER, PREVIOUS_TERRAIN_LAYER]);
    assert_eq!(document.layers[0].tiles.len(), 20 * 15);
    assert_eq!(document.layers[3].tiles.len(), 20 * 15);
    assert_eq!(document.layers[1].tiles.len(), cave.chest_count() + cave.bag_count());
    assert_eq!(document.layers[2].tiles.len(), cave.monster_count());

    let first = &document.layers[0].tiles[0];
    assert_eq!((first.x, first.y), (0, 0));
    let last = &document.layers[0].tiles[20 * 15 - 1];
    assert_eq!((last.x, last.y), (19, 14));

    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("cave.json");
    document.write_atomic(&path).expect("write succeeds");
    assert_eq!(MapDocument::load(&path).expect("load succeeds"), document);
}

#[test]
fn texture_export_uses_numeric_ids() {
    let config = GeneratorConfig { width: 16, height: 16, ..GeneratorConfig::default() };
    let cave = generate(&config, 4).expect("valid config");
    let document = cave.to_document(IdFormat::Texture);
    let terrain = document.layer(TERRAIN_LAYER).expect("terrain layer");
    assert!(terrain.tiles.iter().all(|tile| tile.id.parse::<u16>().is_ok()));
}
