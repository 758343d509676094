//! Loading and orienting fragment images.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GenericImageView, ImageReader, RgbImage, SubImage};

use crate::error::{BlendError, Result};
use crate::plan::{Flip, Rotation};

use super::weights::Corner;

/// Decode a fragment, resize it (bicubic) and apply flip then rotation.
pub fn load_fragment(
    path: &Path,
    width: u32,
    height: u32,
    flip: Flip,
    rotation: Rotation,
) -> Result<RgbImage> {
    // Format comes from the contents, as in discovery.
    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| BlendError::image(path, e))?
        .decode()
        .map_err(|e| BlendError::image(path, e))?;
    let rgb = decoded.to_rgb8();
    Ok(orient(
        imageops::resize(&rgb, width, height, FilterType::CatmullRom),
        flip,
        rotation,
    ))
}

/// Apply flip then 180 degree rotation.
pub fn orient(mut image: RgbImage, flip: Flip, rotation: Rotation) -> RgbImage {
    if flip.vertical() {
        imageops::flip_vertical_in_place(&mut image);
    }
    if flip.horizontal() {
        imageops::flip_horizontal_in_place(&mut image);
    }
    if rotation == Rotation::Half {
        imageops::rotate180_in_place(&mut image);
    }
    image
}

/// The quadrant of a fragment that lands in a block where the fragment sits
/// at `corner`: the half nearest the shared grid intersection.
pub fn quadrant(fragment: &RgbImage, corner: Corner) -> SubImage<&RgbImage> {
    let (w, h) = fragment.dimensions();
    let (bw, bh) = (w / 2, h / 2);
    let (x, y) = match corner {
        Corner::UpperLeft => (bw, bh),
        Corner::UpperRight => (0, bh),
        Corner::LowerLeft => (bw, 0),
        Corner::LowerRight => (0, 0),
    };
    fragment.view(x, y, bw, bh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    /// 4x4 image where each 2x2 quadrant has its own colour.
    fn quadrants_image() -> RgbImage {
        RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
            (true, true) => Rgb([255, 0, 0]),
            (false, true) => Rgb([0, 255, 0]),
            (true, false) => Rgb([0, 0, 255]),
            (false, false) => Rgb([255, 255, 0]),
        })
    }

    #[test]
    fn test_quadrant_selection() {
        let img = quadrants_image();
        assert_eq!(quadrant(&img, Corner::UpperLeft).get_pixel(0, 0), Rgb([255, 255, 0]));
        assert_eq!(quadrant(&img, Corner::UpperRight).get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(quadrant(&img, Corner::LowerLeft).get_pixel(0, 0), Rgb([0, 255, 0]));
        assert_eq!(quadrant(&img, Corner::LowerRight).get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(quadrant(&img, Corner::UpperLeft).dimensions(), (2, 2));
    }

    #[test]
    fn test_orient_flips() {
        let img = quadrants_image();

        let v = orient(img.clone(), Flip::Vertical, Rotation::None);
        assert_eq!(*v.get_pixel(0, 0), Rgb([0, 0, 255]));

        let h = orient(img.clone(), Flip::Horizontal, Rotation::None);
        assert_eq!(*h.get_pixel(0, 0), Rgb([0, 255, 0]));

        let both = orient(img.clone(), Flip::Both, Rotation::None);
        assert_eq!(*both.get_pixel(0, 0), Rgb([255, 255, 0]));
    }

    #[test]
    fn test_orient_rotation_after_flip() {
        let img = quadrants_image();

        let rot = orient(img.clone(), Flip::None, Rotation::Half);
        assert_eq!(*rot.get_pixel(0, 0), Rgb([255, 255, 0]));

        // Both flips followed by a half turn is the identity.
        let identity = orient(img.clone(), Flip::Both, Rotation::Half);
        assert_eq!(identity, img);
    }

    #[test]
    fn test_load_fragment_resizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frag.png");
        RgbImage::from_pixel(10, 6, Rgb([50, 100, 150])).save(&path).unwrap();

        let img = load_fragment(&path, 8, 8, Flip::None, Rotation::None).unwrap();
        assert_eq!(img.dimensions(), (8, 8));
        let px = img.get_pixel(4, 4);
        for (got, want) in px.0.iter().zip([50u8, 100, 150]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", px);
        }
    }

    #[test]
    fn test_load_fragment_without_extension() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("frag.png");
        RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])).save(&png).unwrap();
        let bare = dir.path().join("frag");
        std::fs::rename(&png, &bare).unwrap();

        let img = load_fragment(&bare, 4, 4, Flip::None, Rotation::None).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
    }

    #[test]
    fn test_load_fragment_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\ngarbage").unwrap();

        let err = load_fragment(&path, 8, 8, Flip::None, Rotation::None).unwrap_err();
        assert!(matches!(err, BlendError::Image { .. }));
    }
}
