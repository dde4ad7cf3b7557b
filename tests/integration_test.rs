//! 整合測試 - 不依賴 ffmpeg 的記憶體內管線驗證

use anyhow::bail;
use image::{Rgb, RgbImage};
use std::fs;

use video_thumbnail_studio::error::StudioError;
use video_thumbnail_studio::tools::{
    CandidateSet, CaptionEntry, Captioner, Frame, MAX_CANDIDATES, Palette, StyleConfig,
    TextAlignment, accent_band_height, compose, panel_top, run_caption_pipeline, save_thumbnail,
    thumbnail_to_png_bytes, wrap_words, write_caption_file,
};

fn solid_frame(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

fn make_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|i| Frame {
            frame_index: i as u64 * 60,
            timestamp: i as f64 * 2.0,
            image: solid_frame(64, 36, [i as u8 * 10, 0, 0]),
        })
        .collect()
}

/// 測試 1: 零強度、無文字的合成是恆等轉換
#[test]
fn test_compose_zero_strength_identity() {
    let frame = solid_frame(640, 360, [33, 144, 77]);
    let style = StyleConfig::new(Palette::CreatorNeon, 0.0, "", "", TextAlignment::Left).unwrap();

    let out = compose(&frame, &style);

    assert_eq!(out.dimensions(), (640, 360));
    assert!(
        out.pixels().zip(frame.pixels()).all(|(a, b)| a == b),
        "α = 0 時所有像素都應與輸入一致"
    );
}

/// 測試 2: 滿強度時色板本體為純主色
#[test]
fn test_compose_full_strength_solid_panel() {
    let frame = solid_frame(640, 360, [180, 20, 20]);
    let palette = Palette::FreshMint;
    let style = StyleConfig::new(palette, 1.0, "", "", TextAlignment::Left).unwrap();

    let out = compose(&frame, &style);

    // 點綴帶以下整個色板區域應與主色完全一致
    let body_top = panel_top(360) + accent_band_height(360);
    for y in body_top..360 {
        for x in [0, 100, 320, 639] {
            assert_eq!(
                out.get_pixel(x, y).0,
                palette.primary(),
                "({x}, {y}) 應為主色"
            );
        }
    }
}

/// 測試 3: 半強度混色逐像素驗證（0.5 × 幀 + 0.5 × 主色）
#[test]
fn test_compose_half_strength_blend() {
    let base = [100u8, 100, 100];
    let frame = solid_frame(640, 360, base);
    let palette = Palette::VibrantCoral; // 主色 (255, 94, 98)
    let style = StyleConfig::new(palette, 0.5, "", "", TextAlignment::Left).unwrap();

    let out = compose(&frame, &style);

    let y = panel_top(360) + accent_band_height(360) + 10;
    for x in [5, 320, 600] {
        let pixel = out.get_pixel(x, y).0;
        for (channel, (frame_c, panel_c)) in pixel.iter().zip(base.iter().zip(palette.primary())) {
            let expected = 0.5 * f32::from(*frame_c) + 0.5 * f32::from(panel_c);
            assert!(
                (f32::from(*channel) - expected).abs() <= 1.0,
                "混色偏差過大: got {channel}, want {expected}"
            );
        }
    }
}

/// 測試 4: 換行永不折斷字詞
#[test]
fn test_wrapping_preserves_whole_words() {
    let inputs = [
        "ten tips for faster video editing workflows",
        "one",
        "a b c d e f g h i j k l m n o p",
    ];

    for input in inputs {
        let lines = wrap_words(input, 12);

        // 重新以單一空格連接應還原輸入（字詞與順序皆不變）
        assert_eq!(lines.join(" "), input, "輸入: {input}");
    }
}

/// 測試 5: 超長單字獨佔一行、不加連字號；縮字屬於排版而非截斷
#[test]
fn test_single_long_word_unwrapped() {
    let word = "supercalifragilisticexpialidociousword40"; // 40 字元
    let lines = wrap_words(word, 20);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], word);
    assert!(!lines[0].contains('-'));

    // 同樣的字放進合成也不得失敗
    let frame = solid_frame(640, 360, [90, 90, 90]);
    let style = StyleConfig::new(Palette::CreatorNeon, 0.7, word, "", TextAlignment::Left).unwrap();
    let out = compose(&frame, &style);
    assert_eq!(out.dimensions(), (640, 360));
}

/// 測試 6: 字幕管線順序與佔位字串
#[test]
fn test_caption_pipeline_partial_failure() {
    struct FlakyCaptioner;

    impl Captioner for FlakyCaptioner {
        fn caption(&self, image: &RgbImage) -> anyhow::Result<String> {
            // 以像素值區分幀：紅色值 20 的那張失敗
            if image.get_pixel(0, 0).0[0] == 20 {
                bail!("模擬模型失敗");
            }
            Ok(format!("frame r={}", image.get_pixel(0, 0).0[0]))
        }
    }

    let frames = make_frames(4);
    let entries = run_caption_pipeline(&FlakyCaptioner, &frames, 4);

    assert_eq!(entries.len(), 4, "字幕數量應等於送出的幀數");
    assert_eq!(entries[0].text, "frame r=0");
    assert_eq!(entries[1].text, "frame r=10");
    assert!(
        entries[2].text.contains("字幕產生失敗"),
        "失敗項應為佔位字串: {}",
        entries[2].text
    );
    assert_eq!(entries[3].text, "frame r=30");

    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.frame_index, i, "順序必須與輸入一致");
    }
}

/// 測試 7: 候選集合長度為 min(5, 可用幀數)
#[test]
fn test_candidate_set_bounds() {
    for available in [0, 1, 3, 5, 8, 20] {
        let set = CandidateSet::collect(make_frames(available).into_iter(), MAX_CANDIDATES);
        assert_eq!(set.len(), available.min(MAX_CANDIDATES));
    }
}

/// 測試 8: 主視覺幀預設與越界回報
#[test]
fn test_hero_selection_contract() {
    let set = CandidateSet::collect(make_frames(4).into_iter(), MAX_CANDIDATES);

    assert_eq!(set.hero(None).unwrap().frame_index, 0);
    assert_eq!(set.hero(Some(2)).unwrap().frame_index, 120);

    match set.hero(Some(9)).map(|_| ()) {
        Err(StudioError::IndexOutOfRange { index: 9, len: 4 }) => {}
        other => panic!("應回報 IndexOutOfRange: {other:?}"),
    }
}

/// 測試 9: 樣式驗證 - 未知調色盤與越界強度在建構時被拒絕
#[test]
fn test_style_validation() {
    assert!(matches!(
        Palette::from_name("nonexistent palette"),
        Err(StudioError::InvalidStyle(_))
    ));

    assert!(matches!(
        StyleConfig::new(Palette::FreshMint, 1.2, "t", "", TextAlignment::Left),
        Err(StudioError::InvalidStyle(_))
    ));
    assert!(matches!(
        StyleConfig::new(Palette::FreshMint, -0.2, "t", "", TextAlignment::Left),
        Err(StudioError::InvalidStyle(_))
    ));
}

/// 測試 10: 完整記憶體內流程 - 候選 → 主視覺 → 合成 → 輸出檔案
#[test]
fn test_full_pipeline_to_files() {
    let output_dir = tempfile::tempdir().unwrap();

    let set = CandidateSet::collect(make_frames(6).into_iter(), MAX_CANDIDATES);
    assert_eq!(set.len(), 5);

    let hero = set.hero(Some(1)).unwrap();
    let style = StyleConfig::new(
        Palette::MinimalSlate,
        0.65,
        "十分鐘剪出第一支片",
        "新手也能跟上的流程",
        TextAlignment::Center,
    )
    .unwrap();

    let thumbnail = compose(&hero.image, &style);

    // PNG 編碼可用且帶正確簽名
    let bytes = thumbnail_to_png_bytes(&thumbnail).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let thumb_path = output_dir.path().join("hero_thumbnail.png");
    save_thumbnail(&thumbnail, &thumb_path).unwrap();
    assert!(thumb_path.is_file());

    // 重新載入輸出，尺寸應符合 16:9 裁切
    let reloaded = image::open(&thumb_path).unwrap().to_rgb8();
    assert_eq!(reloaded.dimensions(), thumbnail.dimensions());

    let entries = vec![
        CaptionEntry {
            frame_index: 0,
            text: "a person editing video on a laptop".to_string(),
        },
        CaptionEntry {
            frame_index: 1,
            text: "close up of a timeline".to_string(),
        },
    ];
    let caption_path = output_dir.path().join("captions.txt");
    write_caption_file(&style.headline, &entries, &caption_path).unwrap();

    let content = fs::read_to_string(&caption_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "十分鐘剪出第一支片");
    assert_eq!(lines[1], "a person editing video on a laptop");
}
