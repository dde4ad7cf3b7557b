mod bitmap_font;
mod candidate_selector;
mod caption;
mod composer;
mod export;
mod ffprobe_info;
mod frame_sampler;
mod palette;
mod path_validator;
mod style;
mod text_layout;

pub use bitmap_font::{char_advance, draw_text, line_height, text_width};
pub use candidate_selector::{CandidateSet, MAX_CANDIDATES};
pub use caption::{
    CAPTION_FAILURE_PREFIX, CaptionEntry, Captioner, CommandCaptioner, run_caption_pipeline,
};
pub use composer::{
    TARGET_ASPECT_H, TARGET_ASPECT_W, accent_band_height, center_crop_to_aspect, compose,
    gradient_ramp_height, panel_top,
};
pub use export::{save_thumbnail, thumbnail_to_png_bytes, write_caption_file};
pub use ffprobe_info::{VideoInfo, get_video_info};
pub use frame_sampler::{Frame, FrameIter, SampleInterval, SamplePlan, VideoSource};
pub use palette::{Palette, TextTone};
pub use path_validator::{ensure_directory_exists, validate_input_file};
pub use style::{MAX_HEADLINE_CHARS, MAX_SUBTITLE_CHARS, StyleConfig, TextAlignment};
pub use text_layout::{TextBlock, layout_text_block, max_chars_for_width, wrap_words};
