//! Scrolling status-line overlay shown while the character is looking away.

use crate::constants::*;
use crate::smoothing::{per_frame_alpha, per_frame_retain};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Status strings the overlay draws from.
pub static STATUS_CATALOG: &[&str] = &[
    // retrieval
    "21 viable oocytes located",
    "oocyte maturation: complete",
    "retrieval window: 36hr post-trigger",
    "follicle aspiration underway",
    "mature oocytes: 12 (MII)",
    "oocyte quality: grade A",
    "vitrification complete",
    "oocytes stored: tank 4, canister 2",
    // hormones
    "estradiol: 2,310 pg/mL",
    "progesterone: 0.7 ng/mL",
    "LH surge detected",
    "FSH level: 5.9 mIU/mL",
    "AMH: 3.1 ng/mL",
    "hormone panel: within range",
    "estradiol rising as expected",
    // monitoring
    "ultrasound data received",
    "lead follicle: 18mm",
    "endometrial thickness: 9.0mm",
    "trilaminar pattern confirmed",
    "antral follicle count: 20",
    "ovarian response: optimal",
    "follicle mapping complete",
    // cycle tracking
    "cycle day: 11",
    "stimulation day: 7",
    "trigger shot: tonight 9pm",
    "baseline scan scheduled",
    "monitoring visit #3 complete",
    "next appointment: 48hr",
    "ovulation window: 24-36hr",
    "luteal support started",
    // embryology
    "scanning for viability...",
    "fertilization rate: 81%",
    "ICSI procedure complete",
    "embryo development: day 3",
    "blastocyst formation: day 5",
    "embryo grading: 4AB",
    "PGT-A biopsy complete",
    "genetic results pending",
    "embryo transfer scheduled",
    // comms
    "contacting partner lab",
    "syncing with care team",
    "transferring records...",
    "patient notified",
    "physician review requested",
    "secure message sent",
    "appointment confirmed",
    "consent forms received",
    // medications
    "stimulation protocol initiated",
    "dose adjustment: +75 IU",
    "medication inventory: OK",
    "refill request: processed",
    "injection reminder queued",
    // systems
    "syncing patient records...",
    "EMR update complete",
    "lab interface: connected",
    "imaging server: online",
    "backup verification: passed",
    "data encryption: active",
    // scheduling
    "procedure room: reserved",
    "anesthesia: confirmed",
    "pre-op labs: complete",
    "arrival time: 7:00am",
    "recovery room: available",
    // quality
    "lab QC: passed",
    "incubator temp: 37.0°C",
    "CO2 level: 6.0%",
    "humidity: 95%",
    "equipment calibration: due",
    "maintenance log: updated",
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub visible_lines: usize,
    pub seed_lines: usize,
    pub interval_sec: f32,
    pub line_height: f32,
    pub padding: f32,
    pub scroll_decay: f32,
    pub fade_rate: f32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_lines: NOTIFICATION_VISIBLE_LINES,
            seed_lines: NOTIFICATION_SEED_LINES,
            interval_sec: NOTIFICATION_INTERVAL_SEC,
            line_height: NOTIFICATION_LINE_HEIGHT,
            padding: NOTIFICATION_PADDING,
            scroll_decay: NOTIFICATION_SCROLL_DECAY,
            fade_rate: NOTIFICATION_FADE_RATE,
        }
    }
}

impl NotificationConfig {
    /// Most lines the buffer may hold after an insertion.
    pub fn capacity(&self) -> usize {
        self.visible_lines + 2
    }

    pub fn panel_height(&self) -> f32 {
        self.line_height * self.visible_lines as f32 + 2.0 * NOTIFICATION_PANEL_MARGIN
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NotificationLine {
    pub text: &'static str,
    pub insertion_index: u64,
}

/// One line ready to draw, positioned in panel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderedLine {
    pub text: &'static str,
    pub insertion_index: u64,
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

type Lines = SmallVec<[NotificationLine; 10]>;

/// Edge fade by normalized panel height (0 = bottom, 1 = top): ramps in over
/// `[-0.2, 0.05]`, full through the middle, out over the top 30%.
#[inline]
pub fn edge_fade(normalized_y: f32) -> f32 {
    let bottom = ((normalized_y + 0.2) * 4.0).clamp(0.0, 1.0);
    let top = (1.0 - (normalized_y - 0.7) * 4.0).clamp(0.0, 1.0);
    bottom * top
}

#[derive(Clone, Debug)]
pub struct NotificationScroller {
    config: NotificationConfig,
    catalog: &'static [&'static str],
    lines: Lines,
    next_index: u64,
    opacity: f32,
    scroll_offset: f32,
    last_line_at: f32,
    was_visible: bool,
}

impl NotificationScroller {
    pub fn new(config: NotificationConfig) -> Self {
        Self::with_catalog(config, STATUS_CATALOG)
    }

    pub fn with_catalog(config: NotificationConfig, catalog: &'static [&'static str]) -> Self {
        Self {
            config,
            catalog,
            lines: Lines::new(),
            next_index: 0,
            opacity: 0.0,
            scroll_offset: 0.0,
            last_line_at: 0.0,
            was_visible: false,
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, now: f32, dt_sec: f32, visible: bool, rng: &mut R) {
        if visible && !self.was_visible {
            self.reseed(now, rng);
            log::debug!("[notifications] shown at {:.2}", now);
        } else if !visible && self.was_visible {
            log::debug!("[notifications] hiding at {:.2}", now);
        }
        self.was_visible = visible;

        let target = if visible { 1.0 } else { 0.0 };
        let alpha = per_frame_alpha(self.config.fade_rate, dt_sec);
        self.opacity += (target - self.opacity) * alpha;
        if !visible && self.opacity < NOTIFICATION_SNAP_OPACITY {
            self.opacity = 0.0;
        }

        if visible && now - self.last_line_at > self.config.interval_sec {
            self.last_line_at = now;
            if let Some(text) = self.random_line(rng) {
                self.push(text);
                self.scroll_offset += self.config.line_height;
            }
        }

        self.scroll_offset *= per_frame_retain(self.config.scroll_decay, dt_sec);

        if !visible && self.opacity == 0.0 && !self.lines.is_empty() {
            self.lines.clear();
            self.scroll_offset = 0.0;
        }
    }

    fn reseed<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.lines.clear();
        self.scroll_offset = 0.0;
        self.last_line_at = now;
        if self.catalog.is_empty() {
            return;
        }
        let start = rng.gen_range(0..self.catalog.len());
        for i in 0..self.config.seed_lines {
            let text = self.catalog[(start + i) % self.catalog.len()];
            self.push(text);
        }
    }

    fn random_line<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        if self.catalog.is_empty() {
            return None;
        }
        Some(self.catalog[rng.gen_range(0..self.catalog.len())])
    }

    fn push(&mut self, text: &'static str) {
        self.lines.push(NotificationLine {
            text,
            insertion_index: self.next_index,
        });
        self.next_index += 1;
        if self.lines.len() > self.config.capacity() {
            let keep = self.config.visible_lines + 1;
            let drop = self.lines.len() - keep;
            self.lines.drain(..drop);
        }
    }

    pub fn shift(&mut self, by: f32) {
        self.last_line_at += by;
    }

    /// Lines to draw this frame. Empty once the panel has faded out.
    pub fn render(&self) -> Vec<RenderedLine> {
        if self.is_hidden() {
            return Vec::new();
        }
        let cfg = &self.config;
        let panel_h = cfg.panel_height();
        let half_h = panel_h / 2.0;
        let half_w = NOTIFICATION_PANEL_WIDTH / 2.0;
        let len = self.lines.len() as f32;
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let slot = i as f32 - len + cfg.visible_lines as f32;
                let y = slot * cfg.line_height - self.scroll_offset - half_h
                    + cfg.padding
                    + cfg.line_height / 2.0;
                let normalized = (y + half_h) / panel_h;
                let opacity = self.opacity * edge_fade(normalized) * NOTIFICATION_LINE_ALPHA;
                (opacity >= NOTIFICATION_LINE_MIN_OPACITY).then_some(RenderedLine {
                    text: line.text,
                    insertion_index: line.insertion_index,
                    x: -half_w + cfg.padding,
                    y,
                    opacity,
                })
            })
            .collect()
    }

    pub fn is_hidden(&self) -> bool {
        self.opacity < NOTIFICATION_HIDE_OPACITY
    }

    pub fn lines(&self) -> &[NotificationLine] {
        &self.lines
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }
}
