//! Values published to the renderer.

use crate::actor::{Effects, RotationStyle};
use crate::geometry::Point;
use bitflags::bitflags;

bitflags! {
    /// Sprite properties changed since the last drawn frame.
    ///
    /// These can be combined using bitwise OR.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyFlags: u8 {
        /// Position moved
        const POSITION = 0b0000_0001;
        /// Direction turned
        const DIRECTION = 0b0000_0010;
        /// Size changed
        const SIZE = 0b0000_0100;
        /// Shown or hidden
        const VISIBILITY = 0b0000_1000;
        /// A graphic effect value changed
        const EFFECTS = 0b0001_0000;
        /// Costume switched
        const COSTUME = 0b0010_0000;
        /// Rotation style changed
        const ROTATION_STYLE = 0b0100_0000;
    }
}

impl std::fmt::Debug for DirtyFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Snapshot of everything the renderer needs to draw one sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererProps {
    /// Stage position.
    pub position: Point,
    /// Heading in degrees.
    pub direction: f64,
    /// Size in percent of the costume's natural size.
    pub scale: f64,
    /// How the heading is applied to the costume.
    pub rotation_style: RotationStyle,
    /// Graphic effect values.
    pub effects: Effects,
    /// Index of the current costume.
    pub costume: usize,
    /// Whether the sprite is drawn at all.
    pub visible: bool,
}

/// How a costume image is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostumeKind {
    /// Scalable vector art.
    Vector,
    /// Raster image.
    Bitmap,
}

/// A named costume (or backdrop) image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Costume {
    /// Name scripts refer to it by.
    pub name: String,
    /// Location of the image data.
    pub source: String,
    /// Image encoding.
    pub kind: CostumeKind,
}

impl Costume {
    /// Create a costume.
    pub fn new(name: impl Into<String>, source: impl Into<String>, kind: CostumeKind) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            kind,
        }
    }

    /// The default cat costume every new sprite wears.
    pub fn cat() -> Self {
        Self::new(
            "cat1",
            "https://cdn.assets.scratch.mit.edu/internalapi/asset/b7853f557e4426412e64bb3da6531a99.svg/get/",
            CostumeKind::Vector,
        )
    }
}

/// A stage backdrop.
pub type Backdrop = Costume;

/// A request to play a sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Stereo pan, -100 (left) to 100 (right).
    pub pan: f64,
    /// Pitch shift in semitone tenths.
    pub pitch: f64,
    /// Volume in percent.
    pub volume: f64,
    /// Location of the sound data.
    pub sound: String,
}

impl SoundRequest {
    /// Play `sound` centred, at natural pitch and full volume.
    pub fn new(sound: impl Into<String>) -> Self {
        Self {
            pan: 0.0,
            pitch: 0.0,
            volume: 100.0,
            sound: sound.into(),
        }
    }

    /// Clamp pan to [-100, 100] and volume to [0, 100].
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.pan = self.pan.clamp(-100.0, 100.0);
        self.volume = self.volume.clamp(0.0, 100.0);
        self
    }
}
