//! Warnings emitted while packing, captured through a recording logger

#[allow(dead_code)]
#[path = "../pack/fixture.rs"]
mod fixture;

use std::sync::{Mutex, Once};

use fixture::Fixture;
use log::{Level, LevelFilter, Log, Metadata, Record};
use msu1_rs::prelude::pack;

/// Keeps every record at warn level or above
struct RecordingLogger {
	records: Mutex<Vec<(Level, String)>>,
}

impl Log for RecordingLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= Level::Warn
	}

	fn log(&self, record: &Record) {
		if self.enabled(record.metadata()) {
			self.records.lock().unwrap().push((record.level(), record.args().to_string()));
		}
	}

	fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
	records: Mutex::new(Vec::new()),
};

fn install_logger() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		log::set_logger(&LOGGER).unwrap();
		log::set_max_level(LevelFilter::Warn);
	});
}

/// Warnings whose message mentions `needle`
fn warnings_about(needle: &str) -> Vec<String> {
	LOGGER
		.records
		.lock()
		.unwrap()
		.iter()
		.filter(|(level, message)| *level == Level::Warn && message.contains(needle))
		.map(|(_, message)| message.clone())
		.collect()
}

#[test]
fn test_missing_audio_and_empty_chapter_are_warned() {
	install_logger();

	let fixture = Fixture::new();
	fixture.chapter("silent_scene", 3);
	fixture.frame("silent_scene", "f", (32, 2, 2), 0);
	fixture.chapter("empty_scene", 4);
	fixture.audio("empty_scene", b"MSU1\0\0\0\0");

	let summary = pack(&fixture.config()).unwrap();
	assert_eq!(summary.chapters, 2);
	assert_eq!(summary.audio_files, 2);

	let silent = warnings_about("silent_scene");
	assert_eq!(silent.len(), 1);
	assert!(silent[0].contains("does not contain a msu1 pcm audio file"));

	let empty = warnings_about("empty_scene");
	assert_eq!(empty.len(), 1);
	assert!(empty[0].contains("contains no frames"));
}
