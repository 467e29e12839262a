use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use tempfile::{tempdir, TempDir};

use keypad_knight::config::RunConfig;
use keypad_knight::count::MoveCounter;
use keypad_knight::keypad::layout::KeypadLayout;
use keypad_knight::render::ascii::AsciiSurface;
use keypad_knight::render::frame_loop::FrameLoop;
use keypad_knight::render::scene::Scene;
use keypad_knight::render::svg::SvgSurface;

fn write_config(body: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keypad.json");
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn config_file_drives_a_bounded_watch() {
    let (_dir, path) =
        write_config(r#"{"moves": 3, "graph": "derived", "fps": 500, "frames": 4}"#);
    let cfg = RunConfig::load(&path).unwrap();

    let layout = KeypadLayout::phone();
    let graph = cfg.build_graph(&layout).unwrap();
    let report = MoveCounter::new(&graph)
        .with_strategy(cfg.strategy)
        .report(cfg.moves)
        .unwrap();
    let scene = Scene::build(&layout, &graph, &report, cfg.canvas);

    let mut surface = AsciiSurface::new(Vec::new());
    let close = AtomicBool::new(false);
    let frames = FrameLoop::new(cfg.fps)
        .with_max_frames(cfg.frames)
        .run(&mut surface, &scene, &close)
        .unwrap();
    assert_eq!(frames, 4);

    let out = String::from_utf8(surface.into_inner()).unwrap();
    assert_eq!(out.matches("Valid sequences with 3 move(s): 46").count(), 4);
}

#[test]
fn svg_surface_writes_one_document_per_frame() {
    let cfg = RunConfig::default();
    let layout = KeypadLayout::phone();
    let graph = cfg.build_graph(&layout).unwrap();
    let report = MoveCounter::new(&graph).report(cfg.moves).unwrap();
    let scene = Scene::build(&layout, &graph, &report, cfg.canvas);

    let mut surface = SvgSurface::new(Vec::new());
    let close = AtomicBool::new(false);
    FrameLoop::new(1000)
        .with_max_frames(Some(2))
        .run(&mut surface, &scene, &close)
        .unwrap();
    let out = String::from_utf8(surface.into_inner()).unwrap();
    assert_eq!(out.matches("</svg>").count(), 2);
}

#[test]
fn invalid_config_file_is_rejected() {
    let (_dir, path) = write_config(r#"{"moves": 0}"#);
    assert!(RunConfig::load(&path).is_err());
}
