pub mod detection_stats;
pub mod fps_meter;
