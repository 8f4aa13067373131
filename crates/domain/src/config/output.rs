use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Label result lines with the raw input line instead of the cleaned domain
    #[serde(default)]
    pub preserve_input: bool,
}
