//! Horizontal bar chart of partner scores, written as a PNG.
//!
//! Bars run top to bottom in tier order and are coloured by tier. Each bar
//! carries the practice name on the left and its score on the right, under a
//! title, with a score axis and a tier legend below. Rendering needs the
//! `chart` feature; without it callers get `ChartOutcome::Unavailable`.

use super::domain::Tier;
use super::report::format::truncate;
use super::scoring::{sort_by_tier, ScoredPractice};
use std::path::{Path, PathBuf};

pub const SCORES_PNG: &str = "rula_partner_scores.png";
pub const CHART_TITLE: &str = "Rula Referral Partner Scores by Tier";

const CHART_WIDTH: u32 = 1000;
const MARGIN: u32 = 24;
const GLYPH: u32 = 8;
const TITLE_SCALE: u32 = 2;
const LABEL_CHARS: usize = 30;
const ROW_HEIGHT: u32 = 32;
const BAR_HEIGHT: u32 = 22;
const MIN_ROWS: u32 = 6;
const PLOT_LEFT: u32 = MARGIN + LABEL_CHARS as u32 * GLYPH + 12;
const PLOT_RIGHT: u32 = CHART_WIDTH - MARGIN - 6 * GLYPH;
const PLOT_TOP: u32 = MARGIN + TITLE_SCALE * GLYPH + 24;
const FOOTER_HEIGHT: u32 = 64;
const SWATCH: u32 = 12;
const LEGEND_SPACING: u32 = 88;
const BACKGROUND: [u8; 3] = [0xff, 0xff, 0xff];
const GRID: [u8; 3] = [0xe0, 0xe0, 0xe0];
const AXIS: [u8; 3] = [0x21, 0x21, 0x21];
const THRESHOLD: [u8; 3] = [0x9e, 0x9e, 0x9e];
const TIER_THRESHOLDS: [f64; 2] = [50.0, 70.0];

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("too many practices to chart: {0}")]
    TooManyRows(usize),
    #[cfg(feature = "chart")]
    #[error("failed to write chart {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Written { path: PathBuf, bars: usize },
    Unavailable,
}

/// A run of 8x8 bitmap text, `scale` pixels per glyph dot, anchored at its
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartText {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub scale: u32,
}

impl ChartText {
    fn new(text: impl Into<String>, x: u32, y: u32, scale: u32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            scale,
        }
    }

    pub fn width(&self) -> u32 {
        text_width(&self.text, self.scale)
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    u32::try_from(text.chars().count())
        .unwrap_or(u32::MAX)
        .saturating_mul(GLYPH * scale)
}

/// One bar, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub name: String,
    pub score: f64,
    pub color: [u8; 3],
    pub top: u32,
    pub length: u32,
    pub label: ChartText,
    pub value: ChartText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: [u8; 3],
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub plot_bottom: u32,
    pub title: ChartText,
    pub bars: Vec<ChartBar>,
    pub axis_labels: Vec<ChartText>,
    pub legend: Vec<LegendEntry>,
}

fn plot_width() -> u32 {
    PLOT_RIGHT - PLOT_LEFT
}

/// Pixel offset of a score along the x axis, clamped to 0..=100.
fn x_for(score: f64) -> u32 {
    let share = if score.is_finite() {
        score.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };
    (share * f64::from(plot_width())).round() as u32
}

fn axis_labels(plot_bottom: u32) -> Vec<ChartText> {
    let mut labels: Vec<ChartText> = (0u32..=100)
        .step_by(20)
        .map(|tick| {
            let text = tick.to_string();
            let centre = PLOT_LEFT + x_for(f64::from(tick));
            let x = centre.saturating_sub(text_width(&text, 1) / 2);
            ChartText::new(text, x, plot_bottom + 6, 1)
        })
        .collect();

    let score = "Score";
    let centre = PLOT_LEFT + plot_width() / 2;
    labels.push(ChartText::new(
        score,
        centre.saturating_sub(text_width(score, 1) / 2),
        plot_bottom + 24,
        1,
    ));
    labels.push(ChartText::new("Practice", MARGIN, PLOT_TOP - GLYPH - 6, 1));
    labels
}

fn legend(plot_bottom: u32) -> Vec<LegendEntry> {
    let tiers = Tier::ordered();
    let start = PLOT_RIGHT.saturating_sub(LEGEND_SPACING * tiers.len() as u32);
    tiers
        .into_iter()
        .zip(0u32..)
        .map(|(tier, slot)| LegendEntry {
            label: tier.label(),
            color: tier.color(),
            x: start + slot * LEGEND_SPACING,
            y: plot_bottom + 44,
        })
        .collect()
}

pub fn layout(scored: &[ScoredPractice]) -> Result<ChartLayout, ChartError> {
    let rows = u32::try_from(scored.len()).map_err(|_| ChartError::TooManyRows(scored.len()))?;
    let plot_bottom = rows
        .max(MIN_ROWS)
        .checked_mul(ROW_HEIGHT)
        .and_then(|h| h.checked_add(PLOT_TOP))
        .ok_or(ChartError::TooManyRows(scored.len()))?;
    let height = plot_bottom
        .checked_add(FOOTER_HEIGHT + MARGIN)
        .ok_or(ChartError::TooManyRows(scored.len()))?;

    let mut ordered = scored.to_vec();
    sort_by_tier(&mut ordered);

    let bars = ordered
        .iter()
        .zip(0u32..)
        .map(|(s, row)| {
            let top = PLOT_TOP + row * ROW_HEIGHT + (ROW_HEIGHT - BAR_HEIGHT) / 2;
            let text_y = top + (BAR_HEIGHT - GLYPH) / 2;
            let length = x_for(s.score);
            let name = truncate(&s.practice.name, LABEL_CHARS);
            let label_x = PLOT_LEFT.saturating_sub(text_width(&name, 1) + 8);

            ChartBar {
                name: s.practice.name.clone(),
                score: s.score,
                color: s.tier.color(),
                top,
                length,
                label: ChartText::new(name, label_x, text_y, 1),
                value: ChartText::new(
                    format!("{:.1}", s.score),
                    PLOT_LEFT + length + 4,
                    text_y,
                    1,
                ),
            }
        })
        .collect();

    let title_x = (CHART_WIDTH.saturating_sub(text_width(CHART_TITLE, TITLE_SCALE))) / 2;

    Ok(ChartLayout {
        width: CHART_WIDTH,
        height,
        plot_bottom,
        title: ChartText::new(CHART_TITLE, title_x, MARGIN, TITLE_SCALE),
        bars,
        axis_labels: axis_labels(plot_bottom),
        legend: legend(plot_bottom),
    })
}

#[cfg(feature = "chart")]
fn draw_text(img: &mut image::RgbImage, text: &ChartText) {
    use font8x8::UnicodeFonts;

    for (ch, index) in text.text.chars().zip(0u32..) {
        let Some(glyph) = font8x8::BASIC_FONTS.get(ch) else {
            continue;
        };
        let origin_x = text.x + index * GLYPH * text.scale;
        for (&bits, row) in glyph.iter().zip(0u32..) {
            for col in (0u32..8).filter(|col| (bits >> *col) & 1 == 1) {
                for dy in 0..text.scale {
                    for dx in 0..text.scale {
                        let x = origin_x + col * text.scale + dx;
                        let y = text.y + row * text.scale + dy;
                        if x < img.width() && y < img.height() {
                            img.put_pixel(x, y, image::Rgb(AXIS));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(feature = "chart")]
pub fn render_score_chart(
    scored: &[ScoredPractice],
    path: &Path,
) -> Result<ChartOutcome, ChartError> {
    use image::{Rgb, RgbImage};

    let layout = layout(scored)?;
    let mut img = RgbImage::from_pixel(layout.width, layout.height, Rgb(BACKGROUND));
    let plot_bottom = layout.plot_bottom;

    for tick in (0u32..=100).step_by(10) {
        let x = PLOT_LEFT + x_for(f64::from(tick));
        for y in PLOT_TOP..plot_bottom {
            img.put_pixel(x, y, Rgb(GRID));
        }
    }
    for threshold in TIER_THRESHOLDS {
        let x = PLOT_LEFT + x_for(threshold);
        for y in (PLOT_TOP..plot_bottom).filter(|y| (y / 4) % 2 == 0) {
            img.put_pixel(x, y, Rgb(THRESHOLD));
        }
    }

    for bar in &layout.bars {
        for y in bar.top..bar.top + BAR_HEIGHT {
            for x in PLOT_LEFT..PLOT_LEFT + bar.length {
                img.put_pixel(x, y, Rgb(bar.color));
            }
        }
        draw_text(&mut img, &bar.label);
        draw_text(&mut img, &bar.value);
    }

    for x in PLOT_LEFT..=PLOT_RIGHT {
        img.put_pixel(x, plot_bottom, Rgb(AXIS));
    }
    for y in PLOT_TOP..=plot_bottom {
        img.put_pixel(PLOT_LEFT, y, Rgb(AXIS));
    }

    draw_text(&mut img, &layout.title);
    for label in &layout.axis_labels {
        draw_text(&mut img, label);
    }
    for entry in &layout.legend {
        for y in entry.y..entry.y + SWATCH {
            for x in entry.x..entry.x + SWATCH {
                img.put_pixel(x, y, Rgb(entry.color));
            }
        }
        let text = ChartText::new(entry.label, entry.x + SWATCH + 6, entry.y + 2, 1);
        draw_text(&mut img, &text);
    }

    img.save(path).map_err(|source| ChartError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bars = layout.bars.len(), "wrote score chart");

    Ok(ChartOutcome::Written {
        path: path.to_path_buf(),
        bars: layout.bars.len(),
    })
}

#[cfg(not(feature = "chart"))]
pub fn render_score_chart(
    scored: &[ScoredPractice],
    path: &Path,
) -> Result<ChartOutcome, ChartError> {
    layout(scored)?;
    tracing::warn!(path = %path.display(), "chart feature disabled; skipping score chart");
    Ok(ChartOutcome::Unavailable)
}
