use crate::config::{Config, add_recent_path, save_settings};
use crate::tools::{
    CandidateSet, CaptionEntry, CommandCaptioner, Frame, MAX_CANDIDATES, Palette,
    SampleInterval, StyleConfig, TextAlignment, VideoSource, compose, ensure_directory_exists,
    run_caption_pipeline, save_thumbnail, validate_input_file, write_caption_file,
};
use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單次執行的輸出摘要
#[derive(Debug)]
pub struct StudioResult {
    pub candidate_count: usize,
    pub caption_count: usize,
    pub thumbnail_path: PathBuf,
    pub caption_path: Option<PathBuf>,
}

/// 縮圖工作室
///
/// 從影片（或單張照片）到成品縮圖與字幕檔的完整互動流程
pub struct ThumbnailStudio {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl ThumbnailStudio {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style("=== 影片縮圖工作室 ===").cyan().bold());

        // 取得輸入檔案
        let input = self.prompt_input_path()?;
        let input_path = PathBuf::from(&input);
        validate_input_file(&input_path)?;

        // 取得輸出路徑
        let output = self.prompt_output_path()?;
        let output_dir = PathBuf::from(&output);
        ensure_directory_exists(&output_dir)?;

        let result = if self.config.media_type_table.is_video_file(&input_path) {
            self.process_video(&input_path, &output_dir)?
        } else if self.config.media_type_table.is_image_file(&input_path) {
            self.process_image(&input_path, &output_dir)?
        } else {
            bail!("不支援的檔案類型: {}", input_path.display());
        };

        self.print_summary(&result);

        // 記住這次的輸入路徑
        add_recent_path(&mut self.config.settings, &input);
        if let Err(e) = save_settings(&self.config.settings) {
            warn!("無法儲存設定: {e:#}");
        }

        Ok(())
    }

    fn prompt_input_path(&self) -> Result<String> {
        let mut prompt = Input::new().with_prompt("請輸入影片或照片路徑");

        if let Some(recent) = self.config.settings.recent_paths.first() {
            prompt = prompt.default(recent.clone());
        }

        let path: String = prompt.interact_text()?;
        Ok(path.trim().to_string())
    }

    fn prompt_output_path(&self) -> Result<String> {
        let path: String = Input::new()
            .with_prompt("請輸入輸出資料夾路徑")
            .default(".".to_string())
            .interact_text()?;
        Ok(path.trim().to_string())
    }

    /// 影片流程：取樣 → 字幕 → 選幀 → 樣式 → 合成
    fn process_video(&self, video_path: &Path, output_dir: &Path) -> Result<StudioResult> {
        // Stage A: 取得影片資訊
        print!("  {} 讀取影片資訊...", style("A").dim());
        let source = VideoSource::open(video_path)
            .with_context(|| format!("無法開啟影片: {}", video_path.display()))?;
        let info = source.info().clone();
        println!(
            " {:.1}s, {}x{} @ {:.2}fps",
            info.duration_seconds, info.width, info.height, info.frame_rate
        );

        // Stage B: 擷取候選幀
        println!("  {} 擷取候選幀...", style("B").dim());
        let interval = SampleInterval::from_seconds(self.config.settings.sample_interval_seconds)?;
        let candidates = self.collect_candidates(&source, interval)?;

        if candidates.is_empty() {
            bail!("無法從影片擷取任何幀");
        }
        println!(
            "  {} 取得 {} 張候選幀",
            style("✓").green(),
            candidates.len()
        );

        // Stage C: 產生字幕
        let captions = self.generate_captions(candidates.frames());

        // Stage D: 選擇主視覺幀
        let hero_index = self.prompt_hero_index(&candidates)?;
        let hero = candidates.hero(Some(hero_index))?;
        info!(
            "主視覺幀: 候選 #{hero_index}（第 {} 幀，{:.2}s）",
            hero.frame_index, hero.timestamp
        );

        // Stage E + F: 樣式、合成與輸出
        self.finish(video_path, output_dir, &hero.image, &captions, candidates.len())
    }

    /// 照片流程：跳過取樣，直接字幕與合成
    fn process_image(&self, image_path: &Path, output_dir: &Path) -> Result<StudioResult> {
        print!("  {} 讀取照片...", style("A").dim());
        let image = image::open(image_path)
            .with_context(|| format!("無法開啟照片: {}", image_path.display()))?
            .to_rgb8();
        println!(" {}x{}", image.width(), image.height());

        let frame = Frame {
            frame_index: 0,
            timestamp: 0.0,
            image,
        };
        let frames = [frame];
        let captions = self.generate_captions(&frames);

        let [frame] = frames;
        self.finish(image_path, output_dir, &frame.image, &captions, 1)
    }

    /// 以計畫數量為上限逐幀收集，期間回應中斷信號
    fn collect_candidates(
        &self,
        source: &VideoSource,
        interval: SampleInterval,
    ) -> Result<CandidateSet> {
        let mut iter = source.sample(interval)?;
        let expected = iter.planned_total().min(MAX_CANDIDATES);

        let progress_bar = ProgressBar::new(expected as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message("解碼中...");

        let mut collected: Vec<Frame> = Vec::with_capacity(expected);

        while collected.len() < MAX_CANDIDATES {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("操作已中斷");
                bail!("使用者中斷擷取");
            }

            match iter.next() {
                Some(frame) => {
                    collected.push(frame);
                    progress_bar.inc(1);
                }
                None => break,
            }
        }

        // 提前結束序列，釋放解碼子程序
        iter.close();
        progress_bar.finish_with_message("完成");

        Ok(CandidateSet::collect(collected.into_iter(), MAX_CANDIDATES))
    }

    /// Stage C: 產生字幕；未設定字幕命令時跳過
    fn generate_captions(&self, frames: &[Frame]) -> Vec<CaptionEntry> {
        let Some(command) = self.config.settings.caption_command.as_deref() else {
            println!(
                "  {} 未設定字幕命令（settings.json 的 caption_command），跳過字幕階段",
                style("⤳").dim()
            );
            return Vec::new();
        };

        let limit = self.config.settings.caption_count.min(frames.len()).max(1);
        println!("  {} 產生字幕（{} 張）...", style("C").dim(), limit);

        let captioner = CommandCaptioner::new(command);
        let entries = run_caption_pipeline(&captioner, frames, limit);

        for entry in &entries {
            println!("    {}. {}", entry.frame_index + 1, entry.text);
        }

        entries
    }

    /// Stage D: 選擇主視覺幀（預設第一張）
    fn prompt_hero_index(&self, candidates: &CandidateSet) -> Result<usize> {
        if candidates.len() == 1 {
            return Ok(0);
        }

        let items: Vec<String> = candidates
            .frames()
            .iter()
            .enumerate()
            .map(|(i, frame)| format!("候選 {}（{:.1} 秒，第 {} 幀）", i, frame.timestamp, frame.frame_index))
            .collect();

        let index = Select::new()
            .with_prompt("選擇主視覺幀")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(index)
    }

    /// Stage E: 樣式與文案；驗證失敗時重新詢問
    fn prompt_style(&self, captions: &[CaptionEntry]) -> Result<StyleConfig> {
        let palette_names: Vec<&str> = Palette::ALL.iter().map(Palette::name).collect();
        let default_palette = Palette::from_name(&self.config.settings.palette)
            .map(|p| Palette::ALL.iter().position(|q| *q == p).unwrap_or(0))
            .unwrap_or(0);

        let palette_index = Select::new()
            .with_prompt("選擇調色盤")
            .items(&palette_names)
            .default(default_palette)
            .interact()?;
        let palette = Palette::ALL[palette_index];

        let alignment = match Select::new()
            .with_prompt("文字對齊")
            .items(&["靠左", "置中"])
            .default(0)
            .interact()?
        {
            1 => TextAlignment::Center,
            _ => TextAlignment::Left,
        };

        // 原始字幕是文案的起點
        let default_headline = captions
            .first()
            .map_or_else(|| "吸睛大標題".to_string(), |c| c.text.clone());
        let default_subtitle = captions
            .get(1)
            .map_or_else(|| "一句話說明影片亮點".to_string(), |c| c.text.clone());

        loop {
            let strength: f32 = Input::new()
                .with_prompt("疊加強度 (0.0 - 1.0)")
                .default(self.config.settings.overlay_strength)
                .interact_text()?;

            let headline: String = Input::new()
                .with_prompt("主標題")
                .default(default_headline.clone())
                .interact_text()?;

            let subtitle: String = Input::new()
                .with_prompt("副標題（可留白）")
                .default(default_subtitle.clone())
                .allow_empty(true)
                .interact_text()?;

            match StyleConfig::new(palette, strength, headline.trim(), subtitle.trim(), alignment) {
                Ok(style_config) => return Ok(style_config),
                Err(e) => {
                    println!("  {} {e}", style("✗").red());
                }
            }
        }
    }

    /// Stage E + F: 樣式設定、合成與輸出
    fn finish(
        &self,
        input_path: &Path,
        output_dir: &Path,
        hero: &image::RgbImage,
        captions: &[CaptionEntry],
        candidate_count: usize,
    ) -> Result<StudioResult> {
        let style_config = self.prompt_style(captions)?;

        print!("  {} 合成縮圖...", style("F").dim());
        let thumbnail = compose(hero, &style_config);
        println!(" {}x{}", thumbnail.width(), thumbnail.height());

        let stem = input_path.file_stem().map_or_else(
            || "thumbnail".to_string(),
            |s| s.to_string_lossy().to_string(),
        );

        let thumbnail_path = output_dir.join(format!("{stem}_thumbnail.png"));
        save_thumbnail(&thumbnail, &thumbnail_path)
            .with_context(|| "縮圖輸出失敗")?;
        info!("縮圖已建立: {}", thumbnail_path.display());

        let caption_path = if captions.is_empty() && style_config.headline.is_empty() {
            None
        } else {
            let path = output_dir.join(format!("{stem}_captions.txt"));
            write_caption_file(&style_config.headline, captions, &path)
                .with_context(|| "字幕檔輸出失敗")?;
            info!("字幕檔已建立: {}", path.display());
            Some(path)
        };

        Ok(StudioResult {
            candidate_count,
            caption_count: captions.len(),
            thumbnail_path,
            caption_path,
        })
    }

    fn print_summary(&self, result: &StudioResult) {
        println!();
        println!("{}", style("=== 輸出摘要 ===").cyan().bold());
        println!("  候選幀: {} 張", result.candidate_count);
        println!("  字幕: {} 則", result.caption_count);
        println!(
            "  縮圖: {}",
            style(result.thumbnail_path.display()).green()
        );

        if let Some(caption_path) = &result.caption_path {
            println!("  字幕檔: {}", style(caption_path.display()).green());
        }

        info!(
            "工作室流程完成 - 候選: {}, 字幕: {}",
            result.candidate_count, result.caption_count
        );
    }
}
