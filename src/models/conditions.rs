// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run condition codes (how the run felt, weather, terrain).
//!
//! The feed stores these as small integers. Codes we don't recognize are
//! kept on the [`Run`](super::Run) as raw values; only the label lookup
//! returns `None` for them.

use serde::{Deserialize, Serialize};

/// How the runner felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HowFelt {
    Awesome,
    Sluggish,
    SoSo,
    Injured,
}

impl HowFelt {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Awesome),
            2 => Some(Self::Sluggish),
            3 => Some(Self::SoSo),
            4 => Some(Self::Injured),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Awesome => "Awesome",
            Self::Sluggish => "Sluggish",
            Self::SoSo => "So-so",
            Self::Injured => "Injured",
        }
    }
}

/// Weather during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
}

impl Weather {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Sunny),
            2 => Some(Self::Rainy),
            3 => Some(Self::Cloudy),
            4 => Some(Self::Snowy),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Rainy => "Rainy",
            Self::Cloudy => "Cloudy",
            Self::Snowy => "Snowy",
        }
    }
}

/// Surface the run was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Road,
    Treadmill,
    Trail,
    Track,
}

impl Terrain {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Road),
            2 => Some(Self::Treadmill),
            3 => Some(Self::Trail),
            4 => Some(Self::Track),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Treadmill => "Treadmill",
            Self::Trail => "Trail",
            Self::Track => "Track",
        }
    }
}
