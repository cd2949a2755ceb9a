// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the gallery store and its persistence

use camera_widget::gallery::Gallery;
use camera_widget::pipelines::photo::{EncodedImage, EncodingFormat};
use camera_widget::storage::{FileStore, GalleryPersistence, MemoryStore};
use std::collections::HashSet;
use std::rc::Rc;

fn image(n: usize) -> EncodedImage {
    EncodedImage::from_payload(
        format!("data:image/webp;base64,UklGR{}", n),
        EncodingFormat::Webp,
        640,
        480,
    )
}

fn memory_gallery(store: &Rc<MemoryStore>) -> Gallery<Rc<MemoryStore>> {
    Gallery::new(GalleryPersistence::new(Rc::clone(store), "camera-gallery"))
}

#[test]
fn test_count_tracks_adds_and_removals_with_unique_ids() {
    let store = Rc::new(MemoryStore::new());
    let mut gallery = memory_gallery(&store);

    // Rapid captures land in the same millisecond more often than not
    for n in 0..50 {
        gallery.add(image(n)).unwrap();
    }
    let mut removed = 0;
    for _ in 0..5 {
        if gallery.remove_last().unwrap().is_some() {
            removed += 1;
        }
    }
    let some_id = gallery.records()[10].id;
    if gallery.remove_by_id(some_id).unwrap() {
        removed += 1;
    }

    assert_eq!(gallery.count(), 50 - removed);
    let ids: HashSet<u64> = gallery.records().iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), gallery.count());

    let ordered: Vec<u64> = gallery.records().iter().map(|r| r.id).collect();
    let mut sorted = ordered.clone();
    sorted.sort_unstable();
    assert_eq!(ordered, sorted, "Ids should increase in capture order");
}

#[test]
fn test_every_mutation_is_written() {
    let store = Rc::new(MemoryStore::new());
    let mut gallery = memory_gallery(&store);

    let first = gallery.add(image(1)).unwrap();
    gallery.add(image(2)).unwrap();
    gallery.remove_by_id(first.id).unwrap();
    gallery.remove_last().unwrap();
    assert_eq!(store.write_count(), 4);

    // No-ops are not written
    gallery.remove_last().unwrap();
    gallery.remove_by_id(first.id).unwrap();
    assert_eq!(store.write_count(), 4);
}

#[test]
fn test_load_reproduces_last_persisted_sequence() {
    let store = Rc::new(MemoryStore::new());
    let mut gallery = memory_gallery(&store);
    for n in 0..4 {
        gallery.add(image(n)).unwrap();
    }
    let second = gallery.records()[1].id;
    gallery.remove_by_id(second).unwrap();

    let mut reloaded = memory_gallery(&store);
    reloaded.load().unwrap();
    assert_eq!(reloaded.records(), gallery.records());
}

#[test]
fn test_ids_keep_increasing_after_reload() {
    let store = Rc::new(MemoryStore::new());
    let mut gallery = memory_gallery(&store);
    let before = gallery.add(image(1)).unwrap();

    let mut reloaded = memory_gallery(&store);
    reloaded.load().unwrap();
    let after = reloaded.add(image(2)).unwrap();
    assert!(after.id > before.id);
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut gallery = Gallery::new(GalleryPersistence::new(
            FileStore::new(dir.path()),
            "camera-gallery",
        ));
        gallery.load().unwrap();
        assert_eq!(gallery.count(), 0);
        gallery.add(image(1)).unwrap();
        gallery.add(image(2)).unwrap();
    }

    let mut gallery = Gallery::new(GalleryPersistence::new(
        FileStore::new(dir.path()),
        "camera-gallery",
    ));
    gallery.load().unwrap();
    assert_eq!(gallery.count(), 2);
    assert_eq!(gallery.records()[0].data, "data:image/webp;base64,UklGR1");
}
