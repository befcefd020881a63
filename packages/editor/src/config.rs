use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "polyedit.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// What a delete gesture does to the polygon set
    #[serde(default)]
    pub delete_policy: DeletePolicy,

    /// Fit the map view to the first ring after loading stored text
    #[serde(default = "default_true")]
    pub fit_view_on_load: bool,

    /// Initial map view for hosts that create the surface
    #[serde(default)]
    pub map_defaults: MapDefaults,

    /// Styling handed to the surface for every registered ring
    #[serde(default)]
    pub ring_style: RingStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeletePolicy {
    /// Unregister the ring and rewrite the text without it
    #[default]
    Remove,

    /// Log the request and leave everything as is
    LogOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDefaults {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: LatLng {
                lat: -53.79087255,
                lng: -67.69589780000001,
            },
            zoom: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingStyle {
    #[serde(default = "default_true")]
    pub editable: bool,

    #[serde(default = "default_true")]
    pub clickable: bool,

    #[serde(default = "default_true")]
    pub draggable: bool,

    #[serde(default = "default_color")]
    pub stroke_color: String,

    #[serde(default = "default_color")]
    pub fill_color: String,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            editable: true,
            clickable: true,
            draggable: true,
            stroke_color: default_color(),
            fill_color: default_color(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    "#548ce5".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            delete_policy: DeletePolicy::default(),
            fit_view_on_load: true,
            map_defaults: MapDefaults::default(),
            ring_style: RingStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "deletePolicy": "logOnly",
            "fitViewOnLoad": false,
            "mapDefaults": { "center": { "lat": 10.5, "lng": -3 }, "zoom": 4 },
            "ringStyle": { "strokeColor": "#ff0000", "draggable": false }
        }"##;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.delete_policy, DeletePolicy::LogOnly);
        assert!(!config.fit_view_on_load);
        assert_eq!(config.map_defaults.zoom, 4);
        assert_eq!(config.map_defaults.center.lat, 10.5);
        assert_eq!(config.ring_style.stroke_color, "#ff0000");
        assert_eq!(config.ring_style.fill_color, "#548ce5");
        assert!(!config.ring_style.draggable);
        assert!(config.ring_style.editable);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.delete_policy, DeletePolicy::Remove);
        assert!(config.fit_view_on_load);
        assert_eq!(config.map_defaults.zoom, 16);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "deletePolicy": "logOnly" }"#,
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.delete_policy, DeletePolicy::LogOnly);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let result = EditorConfig::from_json(r#"{ "deletePolicy": "shred" }"#);
        assert!(matches!(result, Err(EditorError::Config(_))));
    }
}
