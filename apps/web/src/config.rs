use serde::Deserialize;

use crate::console;

/// Name of the optional global object that overrides [`PageConfig`] fields.
pub const GLOBAL_CONFIG_KEY: &str = "IAI_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StepAnimation {
    /// Named steps with explicit states, completed in a staggered sequence.
    Descriptive {
        #[serde(default = "default_stagger_ms", rename = "staggerMs")]
        stagger_ms: u32,
    },
    /// A single highlight cycling over the step nodes.
    Cyclic {
        #[serde(default = "default_interval_ms", rename = "intervalMs")]
        interval_ms: u32,
    },
}

impl Default for StepAnimation {
    fn default() -> Self {
        Self::Descriptive {
            stagger_ms: default_stagger_ms(),
        }
    }
}

const fn default_stagger_ms() -> u32 {
    150
}

const fn default_interval_ms() -> u32 {
    1600
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub endpoint: String,
    pub company_path: String,
    pub form_id: String,
    pub input_id: String,
    pub modal_id: String,
    pub radar_id: String,
    pub step_selector: String,
    pub hint_selector: String,
    pub card_selector: String,
    pub badge_selector: String,
    pub progress_selector: String,
    pub hidden_class: String,
    pub active_class: String,
    pub animation: StepAnimation,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/analyze".to_string(),
            company_path: "/company/".to_string(),
            form_id: "searchForm".to_string(),
            input_id: "companyInput".to_string(),
            modal_id: "pipelineModal".to_string(),
            radar_id: "radar".to_string(),
            step_selector: ".step".to_string(),
            hint_selector: ".pipeline-status".to_string(),
            card_selector: ".fact-card".to_string(),
            badge_selector: ".badge".to_string(),
            progress_selector: ".progress-bar".to_string(),
            hidden_class: "hidden".to_string(),
            active_class: "active".to_string(),
            animation: StepAnimation::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads `window.IAI_CONFIG` when present, either as an object or as a
    /// JSON string. A missing value means defaults; an invalid one is
    /// reported and also yields defaults.
    pub fn from_window(window: &web_sys::Window) -> Self {
        let value = match js_sys::Reflect::get(window, &GLOBAL_CONFIG_KEY.into()) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };

        let parsed = match value.as_string() {
            Some(raw) => Self::from_json(&raw).map_err(|error| error.to_string()),
            None => serde_wasm_bindgen::from_value::<Self>(value).map_err(|error| error.to_string()),
        };

        match parsed {
            Ok(config) => config,
            Err(error) => {
                console::warn(&format!(
                    "Ignoring invalid {GLOBAL_CONFIG_KEY}, using defaults: {error}"
                ));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageConfig, StepAnimation};

    #[test]
    fn empty_object_gives_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.endpoint, "/api/analyze");
        assert_eq!(config.company_path, "/company/");
        assert_eq!(config.animation, StepAnimation::Descriptive { stagger_ms: 150 });
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            PageConfig::from_json(r#"{"endpoint":"/v2/analyze","cardSelector":".score-card"}"#)
                .unwrap();
        assert_eq!(config.endpoint, "/v2/analyze");
        assert_eq!(config.card_selector, ".score-card");
        assert_eq!(config.form_id, "searchForm");
        assert_eq!(config.radar_id, "radar");
    }

    #[test]
    fn cyclic_mode_with_and_without_interval() {
        let config = PageConfig::from_json(r#"{"animation":{"mode":"cyclic","intervalMs":3000}}"#)
            .unwrap();
        assert_eq!(config.animation, StepAnimation::Cyclic { interval_ms: 3000 });

        let config = PageConfig::from_json(r#"{"animation":{"mode":"cyclic"}}"#).unwrap();
        assert_eq!(config.animation, StepAnimation::Cyclic { interval_ms: 1600 });
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(PageConfig::from_json(r#"{"animation":{"mode":"spinner"}}"#).is_err());
    }
}
