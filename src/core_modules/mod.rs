pub mod frame;
pub mod frame_sequence;
pub mod luminance_scanner;
pub mod neighborhood;
pub mod pixel;
pub mod utils;
