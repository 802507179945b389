use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: key → Color32
// ---------------------------------------------------------------------------

/// Assigns each key of a known set a distinct colour. Used for track curves
/// (keyed by column name) and for cluster labels.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone> ColorMap<K> {
    /// Keys receive hues in iteration order.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: 'a,
    {
        let keys: Vec<&K> = keys.into_iter().collect();
        let mapping = keys
            .iter()
            .zip(generate_palette(keys.len()))
            .map(|(k, c)| ((*k).clone(), c))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, key: &K) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ClusterLabel;

    #[test]
    fn test_palette_sizes_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn test_unknown_key_gets_default() {
        let tracks = vec!["GR".to_string(), "RHOB".to_string()];
        let map = ColorMap::new(&tracks);
        assert_ne!(map.color_for(&"GR".to_string()), Color32::GRAY);
        assert_ne!(map.color_for(&"RHOB".to_string()), Color32::GRAY);
        assert_eq!(map.color_for(&"DT".to_string()), Color32::GRAY);
    }

    #[test]
    fn test_cluster_colours_follow_label_order() {
        let labels: Vec<ClusterLabel> = vec![ClusterLabel(0), ClusterLabel(1), ClusterLabel(2)];
        let map = ColorMap::new(&labels);
        let palette = generate_palette(3);
        assert_eq!(map.color_for(&ClusterLabel(1)), palette[1]);
    }
}
