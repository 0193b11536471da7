//! Cluster labelling strategy and icon style tiers

use super::marker::Marker;

/// Default image prefix for the built-in style tiers
pub const DEFAULT_IMAGE_PATH: &str = "images/m";
/// Default image extension for the built-in style tiers
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";
/// Pixel sizes of the built-in style tiers, smallest cluster first
pub const DEFAULT_TIER_SIZES: [u32; 5] = [53, 56, 66, 78, 90];

/// Sums is what a cluster icon displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sums {
    /// Text drawn on the icon
    pub text: String,
    /// 1-based style tier; 0 and values past the last tier are clamped
    pub index: usize,
}

/// Computes the label of a cluster from its members
pub trait Calculator {
    fn calculate(&self, members: &[Marker], tier_count: usize) -> Sums;
}

impl<F> Calculator for F
where
    F: Fn(&[Marker], usize) -> Sums,
{
    fn calculate(&self, members: &[Marker], tier_count: usize) -> Sums {
        self(members, tier_count)
    }
}

/// Labels a cluster with its member count and picks the tier by the
/// number of decimal digits in that count
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitCountCalculator;

impl Calculator for DigitCountCalculator {
    fn calculate(&self, members: &[Marker], tier_count: usize) -> Sums {
        let count = members.len();
        let mut digits = 0;
        let mut rest = count;
        while rest != 0 {
            rest /= 10;
            digits += 1;
        }

        Sums {
            text: count.to_string(),
            index: digits.min(tier_count),
        }
    }
}

#[allow(dead_code)] // Part of public API, may be used by external code
/// ClusterStyle describes one icon tier; only the rendering layer reads it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStyle {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub text_color: Option<String>,
    pub text_size: Option<u32>,
    /// Text offset inside the icon as (top, left) pixels
    pub anchor: Option<(u32, u32)>,
    pub background_position: Option<String>,
}

impl ClusterStyle {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            text_color: None,
            text_size: None,
            anchor: None,
            background_position: None,
        }
    }
}

/// Builds the built-in tiers: `{image_path}1.{ext}` .. `{image_path}5.{ext}`
pub fn default_styles(image_path: &str, image_extension: &str) -> Vec<ClusterStyle> {
    DEFAULT_TIER_SIZES
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            ClusterStyle::new(format!("{}{}.{}", image_path, i + 1, image_extension), size, size)
        })
        .collect()
}

/// Picks the tier for a 1-based `index`, clamped into `styles`
pub fn style_for(styles: &[ClusterStyle], index: usize) -> Option<&ClusterStyle> {
    if styles.is_empty() {
        return None;
    }
    let i = index.saturating_sub(1).min(styles.len() - 1);
    styles.get(i)
}
