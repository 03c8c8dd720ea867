//! Texture slots: a procedural checkerboard and an externally decoded image.

use tracing::info;

pub const CHECKERBOARD_SIZE: u32 = 64;
pub const CHECKERBOARD_CELLS: u32 = 8;
const CHECK_LIGHT: [u8; 4] = [235, 235, 235, 255];
const CHECK_DARK: [u8; 4] = [60, 60, 70, 255];

/// Tightly packed RGBA8 pixels, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

pub fn checkerboard(size: u32, cells: u32) -> TextureImage {
    let cell = (size / cells.max(1)).max(1);
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let light = ((x / cell) + (y / cell)) % 2 == 0;
            rgba.extend_from_slice(if light { &CHECK_LIGHT } else { &CHECK_DARK });
        }
    }
    TextureImage {
        width: size,
        height: size,
        rgba,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureMode {
    #[default]
    Checkerboard,
    Image,
}

impl TextureMode {
    pub const ALL: [Self; 2] = [Self::Checkerboard, Self::Image];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Checkerboard => "Checkerboard",
            Self::Image => "Image",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextureSlots {
    checkerboard: TextureImage,
    image: Option<TextureImage>,
    /// Bumped whenever a slot's contents change.
    revision: u32,
}

impl Default for TextureSlots {
    fn default() -> Self {
        Self {
            checkerboard: checkerboard(CHECKERBOARD_SIZE, CHECKERBOARD_CELLS),
            image: None,
            revision: 0,
        }
    }
}

impl TextureSlots {
    pub fn bind_image(&mut self, image: TextureImage) {
        info!(width = image.width, height = image.height, "image texture bound");
        self.image = Some(image);
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn get(&self, mode: TextureMode) -> Option<&TextureImage> {
        match mode {
            TextureMode::Checkerboard => Some(&self.checkerboard),
            TextureMode::Image => self.image.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = checkerboard(64, 8);
        assert_eq!(tex.rgba.len(), 64 * 64 * 4);
        assert_eq!(tex.pixel(0, 0), Some(CHECK_LIGHT));
        assert_eq!(tex.pixel(8, 0), Some(CHECK_DARK));
        assert_eq!(tex.pixel(8, 8), Some(CHECK_LIGHT));
        assert_eq!(tex.pixel(7, 7), Some(CHECK_LIGHT));
        assert_eq!(tex.pixel(64, 0), None);
    }

    #[test]
    fn image_slot_starts_empty() {
        let slots = TextureSlots::default();
        assert!(slots.get(TextureMode::Checkerboard).is_some());
        assert!(slots.get(TextureMode::Image).is_none());
    }

    #[test]
    fn binding_accepts_arbitrary_sizes() {
        let mut slots = TextureSlots::default();
        let before = slots.revision();
        slots.bind_image(TextureImage {
            width: 3,
            height: 5,
            rgba: vec![255; 3 * 5 * 4],
        });
        let image = slots.get(TextureMode::Image).unwrap();
        assert_eq!((image.width, image.height), (3, 5));
        assert_ne!(slots.revision(), before);
    }
}
