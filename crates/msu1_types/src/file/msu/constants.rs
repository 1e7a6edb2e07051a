//! Constants used in MSU-1 data files

/// Magic literal at the start of every data file
pub const MAGIC: [u8; 6] = *b"S-MSU1";

/// Size of the file header in bytes
pub const HEADER_SIZE: usize = 0x20;

/// Width of the space-padded title field in bytes
pub const TITLE_SIZE: usize = 21;

/// Offset of the title field within the header
pub const TITLE_OFFSET: usize = 0x06;

/// Offset of the color depth code within the header
pub const COLOR_DEPTH_OFFSET: usize = 0x1B;

/// Offset of the frames-per-second byte within the header
pub const FPS_OFFSET: usize = 0x1C;

/// Offset of the chapter count byte within the header
pub const CHAPTER_COUNT_OFFSET: usize = 0x1D;

/// Size of one absolute pointer in bytes
pub const POINTER_SIZE: usize = 4;

/// Size of a scene descriptor header (id + 24-bit frame count)
pub const SCENE_HEADER_SIZE: usize = 4;

/// Size of a frame record header (16-bit index + packed length header)
pub const FRAME_HEADER_SIZE: usize = 6;

/// Maximum number of chapters, bound by the one-byte header field
pub const MAX_CHAPTERS: usize = 0xFF;

/// Maximum number of frames per chapter, bound by the 16-bit frame index
pub const MAX_FRAMES: usize = 0x1_0000;

/// Highest allowed frames-per-second value
pub const MAX_FPS: u8 = 60;

/// Number of extra copies of the last frame appended to every chapter
pub const HOLD_FRAMES: usize = 2;

/// File name prefix of chapter id marker files
pub const CHAPTER_MARKER: &str = "chapter.id";

/// File name fragment identifying frame tile files
pub const FRAME_TILES_MARKER: &str = "gfx_video.tiles";

/// File name fragment identifying chapter audio blobs
pub const AUDIO_MARKER: &str = "sfx_video.pcm";

/// Extension of frame tile files
pub const TILES_EXTENSION: &str = "tiles";

/// Extension of frame tilemap files
pub const TILEMAP_EXTENSION: &str = "tilemap";

/// Extension of frame palette files
pub const PALETTE_EXTENSION: &str = "palette";

/// Extension of side-channel audio files
pub const AUDIO_EXTENSION: &str = "pcm";
