pub mod hit_testing;

pub use hit_testing::{hit_test, text_box_rect, FALLBACK_TEXT_WIDTH};
