pub mod kh;
mod misc;
