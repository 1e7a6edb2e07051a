//! End-to-end pack tests for `msu1-rs`

mod fixture;

use std::fs;

use fixture::Fixture;
use msu1_rs::prelude::{Msu1Error, MsuFile, audio_file_path, pack};

#[test_log::test]
fn test_pack_round_trip() {
	let fixture = Fixture::new();
	fixture.chapter("intro", 0);
	fixture.frame("intro", "video_000001", (64, 8, 32), 0x10);
	fixture.frame("intro", "video_000002", (32, 4, 2), 0x20);
	fixture.audio("intro", b"MSU1\0\0\0\0\x01\x02\x03\x04");

	let summary = pack(&fixture.config()).unwrap();
	assert_eq!(summary.chapters, 1);
	assert_eq!(summary.frames, 4);
	assert_eq!(summary.audio_files, 1);
	assert_eq!(fs::metadata(fixture.output()).unwrap().len(), summary.bytes);

	let mut msu = MsuFile::open(fixture.output()).unwrap();
	assert_eq!(msu.header().title.as_str(), "DRAGON'S LAIR");
	assert_eq!(msu.header().fps, 24);
	assert_eq!(msu.verify().unwrap(), 4);

	let scene = msu.scene(0).unwrap();
	assert_eq!(scene.id, 0);
	let frames: Vec<_> = msu.iter_frames(&scene).collect::<Result<_, _>>().unwrap();
	assert_eq!(frames[0].tiles, vec![0x10; 64]);
	assert_eq!(frames[1].tilemap, vec![0x21; 4]);
	// last frame is held twice
	assert_eq!(frames[2].palette, frames[1].palette);
	assert_eq!(frames[3].tiles, frames[1].tiles);
	assert_eq!(frames[3].index, 3);

	let audio = fs::read(audio_file_path(&fixture.output(), 0)).unwrap();
	assert_eq!(audio, b"MSU1\0\0\0\0\x01\x02\x03\x04");
}

#[test_log::test]
fn test_chapter_without_audio_gets_empty_audio_file() {
	let fixture = Fixture::new();
	fixture.chapter("silent", 7);
	fixture.frame("silent", "f", (32, 2, 2), 0);

	let summary = pack(&fixture.config()).unwrap();
	assert_eq!(summary.audio_files, 1);

	let path = fixture.output().with_file_name("movie-7.pcm");
	assert_eq!(fs::metadata(path).unwrap().len(), 0);
}

#[test]
fn test_chapters_ordered_by_id() {
	let fixture = Fixture::new();
	fixture.chapter("a_outro", 9);
	fixture.frame("a_outro", "f", (32, 2, 2), 9);
	fixture.chapter("b_intro", 1);
	fixture.frame("b_intro", "f", (64, 2, 2), 1);
	fixture.frame("b_intro", "g", (64, 2, 2), 2);
	fixture.chapter("c_empty", 4);

	pack(&fixture.config()).unwrap();

	let mut msu = MsuFile::open(fixture.output()).unwrap();
	let scenes: Vec<_> = msu.iter_scenes().collect::<Result<_, _>>().unwrap();
	let ids: Vec<u8> = scenes.iter().map(|scene| scene.id).collect();
	assert_eq!(ids, [1, 4, 9]);
	assert_eq!(scenes[0].frame_count(), 4);
	assert_eq!(scenes[1].frame_count(), 0);
	assert_eq!(scenes[2].frame_count(), 3);

	// frame pointers continue across chapters
	let last_of_first = *scenes[0].frame_pointers.last().unwrap();
	let record = msu.frame_at(last_of_first).unwrap();
	assert_eq!(u64::from(last_of_first) + record.record_size(), u64::from(scenes[2].frame_pointers[0]));
	assert_eq!(msu.frame(2, 0).unwrap().tiles, vec![9; 32]);
}

#[test]
fn test_maximum_chapter_count() {
	let fixture = Fixture::new();
	for id in 0..255 {
		fixture.chapter(&format!("chapter_{id:03}"), id);
	}

	let summary = pack(&fixture.config()).unwrap();
	assert_eq!(summary.chapters, 255);
	assert_eq!(summary.frames, 0);

	let mut msu = MsuFile::open(fixture.output()).unwrap();
	assert_eq!(msu.header().chapter_count, 255);
	assert_eq!(msu.verify().unwrap(), 0);
	assert_eq!(summary.bytes, 0x20 + 255 * 4 + 255 * 4);
}

#[test]
fn test_too_many_chapters() {
	let fixture = Fixture::new();
	for index in 0..256u16 {
		fixture.chapter(&format!("chapter_{index:03}"), index % 256);
	}

	let result = pack(&fixture.config());
	assert!(matches!(
		result,
		Err(Msu1Error::TooManyChapters {
			count: 256,
			..
		})
	));
	assert!(!fixture.output().exists());
}

#[test]
fn test_no_chapters() {
	let fixture = Fixture::new();
	assert!(matches!(pack(&fixture.config()), Err(Msu1Error::NoChapters)));
	assert!(!fixture.output().exists());
}

#[test]
fn test_missing_input_base() {
	let fixture = Fixture::new();
	let mut config = fixture.config();
	config.input_base = config.input_base.join("missing");
	assert!(matches!(pack(&config), Err(Msu1Error::MissingInputBase(_))));
}

#[test]
fn test_chapter_asset_errors() {
	let fixture = Fixture::new();
	fixture.chapter("first", 3);
	fixture.chapter("second", 3);
	assert!(matches!(
		pack(&fixture.config()),
		Err(Msu1Error::DuplicateChapterId {
			id: 3,
			..
		})
	));

	let fixture = Fixture::new();
	fixture.folder("unmarked");
	assert!(matches!(
		pack(&fixture.config()),
		Err(Msu1Error::ChapterMarkerCount {
			found: 0,
			..
		})
	));

	let fixture = Fixture::new();
	fixture.chapter("broken", 1);
	fixture.frame("broken", "f", (32, 2, 2), 0);
	fs::remove_file(fixture.input().join("broken").join("f.gfx_video.palette")).unwrap();
	assert!(matches!(
		pack(&fixture.config()),
		Err(Msu1Error::MissingFrameAsset {
			asset: "palette",
			..
		})
	));

	let fixture = Fixture::new();
	fixture.chapter("too_big", 300);
	assert!(matches!(pack(&fixture.config()), Err(Msu1Error::InvalidChapterId { .. })));
}
