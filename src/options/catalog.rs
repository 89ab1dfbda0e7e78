use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// File naming scheme shared by every frame of the sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Frame Template", inline)]
#[serde(default)]
pub struct FrameTemplate {
    /// Text before the frame number.
    pub prefix: String,
    /// File extension without the leading dot.
    pub extension: String,
    /// Minimum digits of the zero-padded frame number.
    pub pad_width: usize,
}

impl Default for FrameTemplate {
    fn default() -> Self {
        Self {
            prefix: "animação1carrinhobrinqueco".into(),
            extension: "png".into(),
            pad_width: 4,
        }
    }
}

impl FrameTemplate {
    /// File name of frame `index`, e.g. `prefix0042.png`.
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            self.extension,
            width = self.pad_width
        )
    }
}

/// Where the frames live and how many there are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Catalog", inline)]
#[serde(default)]
pub struct CatalogOptions {
    /// Index of the final frame (N). The catalog holds N + 1 frames.
    #[schemars(title = "Last Frame", range(min = 0, max = 100_000))]
    pub last_frame: usize,
    /// Base path candidates probed in order; the first that serves frame 0
    /// wins.
    #[schemars(skip)]
    pub base_paths: Vec<String>,
    /// File naming scheme.
    #[schemars(skip)]
    pub template: FrameTemplate,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            last_frame: 1000,
            base_paths: vec![
                "./frames/".into(),
                "/frames/".into(),
                "frames/".into(),
                "../frames/".into(),
            ],
            template: FrameTemplate::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_pads_to_width() {
        let template = FrameTemplate::default();
        assert_eq!(template.file_name(0), "animação1carrinhobrinqueco0000.png");
        assert_eq!(template.file_name(37), "animação1carrinhobrinqueco0037.png");
        assert_eq!(template.file_name(1000), "animação1carrinhobrinqueco1000.png");
    }

    #[test]
    fn file_name_never_truncates() {
        let template = FrameTemplate {
            prefix: "f".into(),
            extension: "jpg".into(),
            pad_width: 2,
        };
        assert_eq!(template.file_name(7), "f07.jpg");
        assert_eq!(template.file_name(12345), "f12345.jpg");
    }
}
