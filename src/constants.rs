// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Autoplay interval bounds (milliseconds)
pub const MIN_AUTOPLAY_INTERVAL_MS: u64 = 2500;
pub const MAX_AUTOPLAY_INTERVAL_MS: u64 = 9000;
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 4000;

// Map fallback view when a day has no points and no region
pub const DEFAULT_CENTER: (f64, f64) = (35.0, 135.0);
pub const DEFAULT_ZOOM: u8 = 6;

// Gallery thumbnails are scaled to fit this box, aspect ratio preserved
pub const THUMBNAIL_SIZE: u32 = 320;
pub const THUMBNAIL_JPEG_QUALITY: u8 = 82;

// SSE
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
pub const HEARTBEAT_SECS: u64 = 30;
