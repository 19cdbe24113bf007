//! The full scene: the primary mascot, its faceless companions, and a mini
//! mascot that stands in while a competing UI panel is open.

use crate::character::{Character, CharacterFrame, FrameInput};
use crate::config::CharacterConfig;
use crate::constants::*;
use crate::error::Result;
use crate::mesh::DetailLevel;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Companion(usize),
    Mini,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StagedFrame {
    pub role: Role,
    #[serde(flatten)]
    pub frame: CharacterFrame,
}

pub struct Stage {
    primary: Character,
    companions: Vec<Character>,
    mini: Character,
    competing_ui_open: bool,
}

impl Stage {
    /// Build the default cast around `primary`. Companions and the mini
    /// mascot inherit its detail level and derive their seeds from it.
    pub fn new(primary: CharacterConfig) -> Result<Self> {
        let detail = primary.detail;
        let seed = primary.seed;
        let companions = COMPANION_POSITIONS
            .iter()
            .zip(COMPANION_SCALES)
            .zip(COMPANION_COLORS)
            .enumerate()
            .map(|(i, ((pos, scale), color))| {
                let mut c = CharacterConfig::companion(*pos, scale, color)
                    .with_seed(seed.wrapping_add(i as u64 + 1));
                c.detail = detail;
                c.noise_seed = primary.noise_seed.wrapping_add(i as u32 + 1);
                Character::new(c)
            })
            .collect::<Result<Vec<_>>>()?;
        let mini = CharacterConfig {
            notifications: primary.notifications,
            ..CharacterConfig::mini().with_seed(seed.wrapping_add(100))
        };
        let stage = Self {
            primary: Character::new(primary)?,
            companions,
            mini: Character::new(mini)?,
            competing_ui_open: false,
        };
        log::info!(
            "[stage] built: primary + {} companions + mini, detail={}",
            stage.companions.len(),
            detail
        );
        Ok(stage)
    }

    /// Advance every visible character and return their frames in draw order.
    pub fn tick(&mut self, input: FrameInput) -> Vec<StagedFrame> {
        if self.competing_ui_open {
            return vec![StagedFrame {
                role: Role::Mini,
                frame: self.mini.tick(input),
            }];
        }
        let mut frames = Vec::with_capacity(1 + self.companions.len());
        frames.push(StagedFrame {
            role: Role::Primary,
            frame: self.primary.tick(input),
        });
        for (i, c) in self.companions.iter_mut().enumerate() {
            frames.push(StagedFrame {
                role: Role::Companion(i),
                frame: c.tick(input),
            });
        }
        frames
    }

    /// Click lands on whichever mascot is showing.
    pub fn click(&mut self) {
        if self.competing_ui_open {
            self.mini.click();
        } else {
            self.primary.click();
        }
    }

    /// Switch the body look. The mini mascot always stays smooth.
    pub fn set_detail(&mut self, detail: DetailLevel) {
        self.primary.set_detail(detail);
        for c in &mut self.companions {
            c.set_detail(detail);
        }
    }

    pub fn set_competing_ui_open(&mut self, open: bool) {
        if self.competing_ui_open != open {
            log::info!("[stage] competing ui {}", if open { "opened" } else { "closed" });
        }
        self.competing_ui_open = open;
    }

    pub fn competing_ui_open(&self) -> bool {
        self.competing_ui_open
    }

    /// Characters in the same order [`Stage::tick`] emits them.
    pub fn visible(&self) -> Vec<&Character> {
        if self.competing_ui_open {
            vec![&self.mini]
        } else {
            std::iter::once(&self.primary)
                .chain(self.companions.iter())
                .collect()
        }
    }

    pub fn visible_count(&self) -> usize {
        if self.competing_ui_open {
            1
        } else {
            1 + self.companions.len()
        }
    }

    pub fn visible_character(&self, index: usize) -> Option<&Character> {
        if self.competing_ui_open {
            (index == 0).then_some(&self.mini)
        } else if index == 0 {
            Some(&self.primary)
        } else {
            self.companions.get(index - 1)
        }
    }

    pub fn primary(&self) -> &Character {
        &self.primary
    }

    pub fn companions(&self) -> &[Character] {
        &self.companions
    }

    pub fn mini(&self) -> &Character {
        &self.mini
    }
}
