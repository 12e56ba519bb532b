use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub node_fill: String,
    pub node_border_color: String,
    pub text_color: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    /// Gray boxes and connectors on white, black labels.
    pub fn classic() -> Self {
        Self {
            font_family: "\"Microsoft Sans Serif\", Arial, sans-serif".to_string(),
            font_size: 11.0,
            node_fill: "none".to_string(),
            node_border_color: "#808080".to_string(),
            text_color: "#000000".to_string(),
            line_color: "#808080".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            node_fill: "#F8FAFF".to_string(),
            node_border_color: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
