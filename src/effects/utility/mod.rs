pub mod stereo_duplicate;
