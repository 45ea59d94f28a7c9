mod common;

use common::{RecordingBackend, photo_dir, write_garbage};
use picpickr::decode::PLACEHOLDER_SIZE;
use picpickr::photos::PhotoList;
use picpickr::render::backend::Extent;
use picpickr::thumbnails::{THUMBNAIL_SCALE, ThumbnailReport, free_thumbnails, load_thumbnails};
use tempfile::tempdir;

#[test]
fn one_thumbnail_per_photo_at_quarter_scale() {
    let tmp = tempdir().unwrap();
    let paths = photo_dir(tmp.path(), &["a.png", "b.png", "c.png"], 8, 4);
    let mut photos = PhotoList::from_paths(paths);
    let mut backend = RecordingBackend::default();

    let report = load_thumbnails(&mut photos, &mut backend, THUMBNAIL_SCALE);

    assert_eq!(
        report,
        ThumbnailReport {
            loaded: 3,
            placeholders: 0
        }
    );
    assert_eq!(photos.thumbnail_count(), photos.len());
    for photo in &photos {
        assert_eq!(photo.thumbnail().unwrap().extent(), (2, 1));
    }
    assert_eq!(backend.live(), 3);
}

#[test]
fn thumbnails_stay_aligned_with_their_photo() {
    let tmp = tempdir().unwrap();
    let mut paths = photo_dir(tmp.path(), &["wide.png"], 16, 8);
    paths.extend(photo_dir(tmp.path(), &["square.png"], 4, 4));
    paths.extend(photo_dir(tmp.path(), &["tall.png"], 8, 20));
    let mut photos = PhotoList::from_paths(paths);
    let mut backend = RecordingBackend::default();

    load_thumbnails(&mut photos, &mut backend, THUMBNAIL_SCALE);

    let sizes: Vec<_> = photos
        .iter()
        .map(|p| p.thumbnail().unwrap().extent())
        .collect();
    assert_eq!(sizes, vec![(4, 2), (1, 1), (2, 5)]);
}

#[test]
fn undecodable_photos_get_a_placeholder() {
    let tmp = tempdir().unwrap();
    let mut paths = photo_dir(tmp.path(), &["good.png"], 8, 8);
    let bad = tmp.path().join("bad.jpg");
    write_garbage(&bad);
    let raw = tmp.path().join("sensor.raw");
    write_garbage(&raw);
    paths.push(bad);
    paths.push(raw);
    let mut photos = PhotoList::from_paths(paths);
    let mut backend = RecordingBackend::default();

    let report = load_thumbnails(&mut photos, &mut backend, THUMBNAIL_SCALE);

    assert_eq!(report.loaded, 1);
    assert_eq!(report.placeholders, 2);
    assert_eq!(report.total(), photos.len());
    assert_eq!(photos.thumbnail_count(), 3);
    let expected = (PLACEHOLDER_SIZE.0 / 4, PLACEHOLDER_SIZE.1 / 4);
    assert_eq!(photos.get(1).unwrap().thumbnail().unwrap().extent(), expected);
    assert_eq!(photos.get(2).unwrap().thumbnail().unwrap().extent(), expected);
}

#[test]
fn free_releases_every_thumbnail() {
    let tmp = tempdir().unwrap();
    let paths = photo_dir(tmp.path(), &["a.png", "b.png"], 8, 4);
    let mut photos = PhotoList::from_paths(paths);
    let mut backend = RecordingBackend::default();
    load_thumbnails(&mut photos, &mut backend, THUMBNAIL_SCALE);

    let released = free_thumbnails(&mut photos, &mut backend);

    assert_eq!(released, 2);
    assert_eq!(photos.thumbnail_count(), 0);
    assert_eq!(backend.live(), 0);
    assert_eq!(free_thumbnails(&mut photos, &mut backend), 0);
}

#[test]
fn reloading_releases_previous_thumbnails() {
    let tmp = tempdir().unwrap();
    let paths = photo_dir(tmp.path(), &["a.png", "b.png"], 8, 4);
    let mut photos = PhotoList::from_paths(paths);
    let mut backend = RecordingBackend::default();

    load_thumbnails(&mut photos, &mut backend, THUMBNAIL_SCALE);
    load_thumbnails(&mut photos, &mut backend, 0.5);

    assert_eq!(backend.uploads.len(), 4);
    assert_eq!(backend.released, vec![0, 1]);
    assert_eq!(photos.get(0).unwrap().thumbnail().unwrap().extent(), (4, 2));
}
