mod common;

use std::fs;
use std::path::Path;

use common::*;
use w3d::printer::TreeDump;
use w3d::{load_model, registry, save_model, ChunkId, Error, ReadOptions, UnknownChunkPolicy};

#[test]
fn save_then_load_reproduces_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.w3d");
    let model = sample_model();

    save_model(&model, &path).unwrap();
    assert!(!dir.path().join("sample.w3d.tmp").exists());

    let loaded = load_model(&path, &ReadOptions::default()).unwrap();
    assert_eq!(loaded.tree, model);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(fs::read(&path).unwrap(), model.to_bytes().unwrap());
}

#[test]
fn save_replaces_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SAMPLE.W3D");
    fs::write(&path, b"stale").unwrap();

    let model = w3d::ChunkTree::new(vec![sample_hierarchy()]);
    save_model(&model, &path).unwrap();
    let loaded = load_model(&path, &ReadOptions::default()).unwrap();
    assert_eq!(loaded.tree, model);
    assert!(loaded.warnings.is_empty());
}

#[test]
fn failed_save_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.w3d");
    let err = save_model(&sample_model(), &path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!path.exists());
}

#[test]
fn load_applies_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.w3d");
    fs::write(&path, container(ChunkId::ANIMATION, &[leaf(UNREGISTERED, &[1, 2, 3])])).unwrap();

    let options = ReadOptions {
        unknown_chunks: UnknownChunkPolicy::Discard,
        ..ReadOptions::default()
    };
    let loaded = load_model(&path, &options).unwrap();
    assert_eq!(loaded.tree.chunks[0].children()[0].payload, w3d::Payload::Empty);
}

#[test]
fn options_load_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("read.json");
    fs::write(&path, r#"{ "unknown_chunks": "discard", "max_depth": 8 }"#).unwrap();

    let options = ReadOptions::from_json(&path).unwrap();
    assert_eq!(options.unknown_chunks, UnknownChunkPolicy::Discard);
    assert_eq!(options.max_depth, 8);
    assert!(!options.strict_sizes);

    fs::write(&path, r#"{ "max_dept": 8 }"#).unwrap();
    assert!(matches!(ReadOptions::from_json(&path), Err(Error::Options(_))));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_model(&dir.path().join("nope.w3d"), &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn dump_lists_every_node() {
    let model = sample_model();
    let dump = TreeDump::new(&model, registry()).to_string();

    assert_eq!(dump.lines().count(), model.node_count());
    let first = dump.lines().next().unwrap();
    assert_eq!(first, "W3D_CHUNK_HIERARCHY 0x00000100 container [2] (172 bytes)");
    assert!(dump.contains("      W3D_CHUNK_TEXTURE_NAME 0x00000032 text \"triangle.tga\" (13 bytes)"));
    assert!(dump.contains("  unknown 0x00000202 raw (20 bytes)"));

    let verbose = TreeDump::new(&model, registry()).verbose(true).to_string();
    assert!(verbose.contains("frame_rate: 15.0"));
}

/// Round-trips every `.w3d` under `$W3D_SAMPLE_DIR`, when set.
#[test]
fn real_files_round_trip() {
    let Some(dir) = std::env::var_os("W3D_SAMPLE_DIR") else {
        eprintln!("skipping: W3D_SAMPLE_DIR not set");
        return;
    };
    let mut checked = 0;
    for entry in fs::read_dir(Path::new(&dir)).unwrap() {
        let path = entry.unwrap().path();
        if !path.extension().is_some_and(|e| e.eq_ignore_ascii_case("w3d")) {
            continue;
        }
        let bytes = fs::read(&path).unwrap();
        let loaded = load_model(&path, &ReadOptions::default())
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert_eq!(
            loaded.tree.to_bytes().unwrap(),
            bytes,
            "{} did not round-trip",
            path.display()
        );
        checked += 1;
    }
    eprintln!("round-tripped {checked} files");
}
