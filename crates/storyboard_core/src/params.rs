//! Generation parameters passed to asset generators.

use crate::AssetKind;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storyboard_error::{ValidationError, ValidationErrorKind};

/// Frame shape of generated images and clips.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// Widescreen
    #[serde(rename = "16:9")]
    #[display("16:9")]
    Landscape,
    /// Vertical, for short-form platforms
    #[default]
    #[serde(rename = "9:16")]
    #[display("9:16")]
    Portrait,
    /// Square
    #[serde(rename = "1:1")]
    #[display("1:1")]
    Square,
}

impl std::str::FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            "1:1" => Ok(AspectRatio::Square),
            other => Err(format!(
                "Unsupported aspect ratio '{}', expected 16:9, 9:16 or 1:1",
                other
            )),
        }
    }
}

/// Selectable narration voice model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct VoiceOption {
    /// Voice model identifier passed to the generator
    id: String,
    /// Display name
    name: String,
}

impl VoiceOption {
    /// Create a voice option.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Narration settings.
///
/// # Examples
///
/// ```
/// use storyboard_core::VoiceSettingsBuilder;
///
/// let settings = VoiceSettingsBuilder::default()
///     .voice("voice2")
///     .stability(0.8)
///     .build()
///     .unwrap();
/// assert_eq!(settings.voice(), "voice2");
/// assert_eq!(*settings.clarity(), 0.7);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct VoiceSettings {
    /// Voice model identifier
    #[builder(default = "default_voice()")]
    #[serde(default = "default_voice")]
    voice: String,
    /// Voice stability (0.0-1.0)
    #[builder(default = "default_stability()")]
    #[serde(default = "default_stability")]
    stability: f64,
    /// Voice clarity (0.0-1.0)
    #[builder(default = "default_clarity()")]
    #[serde(default = "default_clarity")]
    clarity: f64,
}

fn default_voice() -> String {
    "voice1".to_string()
}

fn default_stability() -> f64 {
    0.5
}

fn default_clarity() -> f64 {
    0.7
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            stability: default_stability(),
            clarity: default_clarity(),
        }
    }
}

impl VoiceSettings {
    /// Check that the voice is named and both sliders are within 0.0-1.0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.voice.trim().is_empty() {
            return Err(invalid("voice", "voice model cannot be empty"));
        }
        unit_range("stability", self.stability)?;
        unit_range("clarity", self.clarity)?;
        Ok(())
    }
}

/// Settings for clip rendering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct VideoSettings {
    /// Frame shape of each clip
    #[serde(default)]
    aspect_ratio: AspectRatio,
}

/// Settings for cover image generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ImageSettings {
    /// Frame shape of each cover
    #[serde(default)]
    aspect_ratio: AspectRatio,
}

/// Recognized options for one generation request.
///
/// Built from a loose option map by [`GenerationParams::from_options`], which
/// keeps only the keys the asset kind understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationParams {
    /// Narration options
    Audio(VoiceSettings),
    /// Cover image options
    Image(ImageSettings),
    /// Clip options
    Video(VideoSettings),
}

impl GenerationParams {
    /// Default parameters for an asset kind.
    pub fn default_for(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Audio => Self::Audio(VoiceSettings::default()),
            AssetKind::Image => Self::Image(ImageSettings::default()),
            AssetKind::Video => Self::Video(VideoSettings::default()),
        }
    }

    /// Asset kind these parameters apply to.
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Audio(_) => AssetKind::Audio,
            Self::Image(_) => AssetKind::Image,
            Self::Video(_) => AssetKind::Video,
        }
    }

    /// Overlay the recognized keys of an option map onto `base`.
    ///
    /// Settings the map does not name keep their value from `base`, and
    /// unrecognized keys are ignored. Recognized keys with the wrong type or
    /// an out-of-range value are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use storyboard_core::{AspectRatio, GenerationParams, VideoSettings};
    ///
    /// let base = GenerationParams::from(VideoSettings::default().with_aspect_ratio(AspectRatio::Square));
    /// let options = json!({"seed": 42});
    /// let params = GenerationParams::from_options(&base, options.as_object().unwrap()).unwrap();
    /// assert_eq!(params, base);
    ///
    /// let options = json!({"aspect_ratio": "16:9"});
    /// match GenerationParams::from_options(&base, options.as_object().unwrap()).unwrap() {
    ///     GenerationParams::Video(settings) => {
    ///         assert_eq!(*settings.aspect_ratio(), AspectRatio::Landscape)
    ///     }
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn from_options(base: &GenerationParams, options: &Map<String, Value>) -> Result<Self, ValidationError> {
        match base {
            Self::Audio(current) => {
                let mut settings = current.clone();
                if let Some(value) = options.get("voice") {
                    settings.voice = string_option("voice", value)?;
                }
                if let Some(value) = options.get("stability") {
                    settings.stability = number_option("stability", value)?;
                }
                if let Some(value) = options.get("clarity") {
                    settings.clarity = number_option("clarity", value)?;
                }
                settings.validate()?;
                Ok(Self::Audio(settings))
            }
            Self::Image(current) => Ok(Self::Image(ImageSettings {
                aspect_ratio: aspect_option(options, current.aspect_ratio)?,
            })),
            Self::Video(current) => Ok(Self::Video(VideoSettings {
                aspect_ratio: aspect_option(options, current.aspect_ratio)?,
            })),
        }
    }
}

#[track_caller]
fn invalid(name: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::new(ValidationErrorKind::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    })
}

fn unit_range(name: &str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            name,
            format!("must be between 0.0 and 1.0, got {}", value),
        ));
    }
    Ok(())
}

fn string_option(name: &str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(name, "expected a string"))
}

fn number_option(name: &str, value: &Value) -> Result<f64, ValidationError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(name, "expected a number"))
}

fn aspect_option(options: &Map<String, Value>, current: AspectRatio) -> Result<AspectRatio, ValidationError> {
    match options.get("aspect_ratio") {
        Some(value) => string_option("aspect_ratio", value)?
            .parse()
            .map_err(|e: String| invalid("aspect_ratio", e)),
        None => Ok(current),
    }
}
