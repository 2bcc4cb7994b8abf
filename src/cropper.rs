use std::cmp;
use std::fmt::Display;

/// Square pixel window `[left, right) x [top, bottom)` inside a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left <= self.right
            && self.top <= self.bottom
            && self.right <= width
            && self.bottom <= height
    }
}

impl Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CropError {
    /// The clamped window is smaller than the requested crop size.
    /// Bounds are kept signed because an offset past the image edge yields `right < left`.
    OutOfBounds {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        crop_size: u32,
        image_width: u32,
        image_height: u32,
    },
}

impl Display for CropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds {
                left,
                top,
                right,
                bottom,
                crop_size,
                image_width,
                image_height,
            } => write!(
                f,
                "Crop window exceeds image bounds. Reduce --x/--y or --crop-size. \
                 (crop size {}, window ({}, {}, {}, {}), image {}x{})",
                crop_size, left, top, right, bottom, image_width, image_height
            ),
        }
    }
}

impl std::error::Error for CropError {}

/// Falls back to the shorter image edge when no crop size was requested.
pub fn resolve_crop_size(width: u32, height: u32, crop_size: Option<u32>) -> u32 {
    crop_size.unwrap_or_else(|| cmp::min(width, height))
}

/// Computes the square crop window for an image of `width` x `height`.
///
/// Offsets are clamped to be non-negative first and the window is validated
/// afterwards, so a negative `x`/`y` behaves like zero while a window reaching
/// past the right or bottom edge is rejected.
pub fn compute_crop_rect(
    width: u32,
    height: u32,
    x: i64,
    y: i64,
    crop_size: Option<u32>,
) -> Result<CropRect, CropError> {
    let crop_size = resolve_crop_size(width, height, crop_size);
    let edge = i64::from(crop_size);

    let left = cmp::max(0, x);
    let top = cmp::max(0, y);
    let right = cmp::min(i64::from(width), left.saturating_add(edge));
    let bottom = cmp::min(i64::from(height), top.saturating_add(edge));

    if right - left < edge || bottom - top < edge {
        return Err(CropError::OutOfBounds {
            left,
            top,
            right,
            bottom,
            crop_size,
            image_width: width,
            image_height: height,
        });
    }

    // 0 <= left <= right <= width here, so every bound fits in u32
    Ok(CropRect {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    })
}
