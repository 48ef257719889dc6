use std::path::PathBuf;

use super::*;

fn solid(w: u32, v: u8) -> RgbaImage {
    RgbaImage::from_pixel(w, 1, image::Rgba([v, 0, 0, 255]))
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn frame_names_follow_pattern() {
    assert_eq!(frame_name("{index}.png", 7), "7.png");
    assert_eq!(frame_name("clock/3_{index}#.png", 12), "clock/3_12#.png");
}

#[test]
fn memory_sequence_loads_as_identity() {
    let mut store = MemoryImageStore::new();
    for i in 0..3u8 {
        store.insert(format!("f{i}.png"), solid(2, i));
    }
    let frames = load_sequence(&store, "f{index}.png", 3).unwrap();
    assert_eq!(frames.len(), 3);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index(), i);
        assert_eq!(f.src_index(), i);
        assert_eq!(f.image().get_pixel(0, 0)[0], i as u8);
    }
}

#[test]
fn missing_frame_fails_the_whole_load() {
    let mut store = MemoryImageStore::new();
    store.insert("0.png", solid(1, 0));
    let err = load_sequence(&store, "{index}.png", 2).unwrap_err();
    assert!(err.to_string().contains("1.png"));
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let mut store = MemoryImageStore::new();
    store.insert("0.png", solid(1, 0));
    store.insert("1.png", solid(2, 1));
    assert!(load_sequence(&store, "{index}.png", 2).is_err());
}

#[test]
fn pattern_without_placeholder_is_rejected() {
    let store = MemoryImageStore::new();
    assert!(load_sequence(&store, "frame.png", 2).is_err());
}

#[test]
fn store_copy_is_deep() {
    let store = MemoryImageStore::new();
    let a = solid(1, 5);
    let mut b = store.copy(&a);
    b.put_pixel(0, 0, image::Rgba([9, 9, 9, 9]));
    assert_eq!(a.get_pixel(0, 0)[0], 5);
    assert_eq!(store.dimensions(&b), (1, 1));
}

#[test]
fn dir_store_reads_pngs_from_disk() {
    let dir = PathBuf::from("target").join("dir_store_reads_pngs");
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..2u8 {
        solid(1, i).save(dir.join(format!("{i}.png"))).unwrap();
    }

    let store = DirImageStore::new(&dir);
    assert_eq!(store.root(), dir.as_path());
    let frames = load_sequence(&store, "{index}.png", 2).unwrap();
    assert_eq!(frames[1].image().get_pixel(0, 0)[0], 1);
    assert!(store.load("../escape.png").is_err());
}
