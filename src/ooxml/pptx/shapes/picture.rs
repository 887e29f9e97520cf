/// Picture (image) shape implementation.
use crate::ooxml::pptx::media::image_extension;
use crate::ooxml::pptx::shapes::base::Geometry;
use serde::Serialize;

/// A picture extracted from a slide and written to the image store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageShape {
    /// Relative path the markup references (e.g. `images/slide1_img2.png`)
    pub path: String,
    /// Lower-cased file extension, `jpg` for JPEG
    pub extension: String,
    /// Intrinsic size in pixels, when the format could be decoded
    pub pixel_size: Option<(u32, u32)>,
    pub geometry: Geometry,
}

/// File name for an extracted picture.
///
/// `slide_number` is 1-based; `ordinal` is one more than the number of
/// shapes already extracted from the slide.
///
/// # Examples
///
/// ```rust
/// use pptx_reveal::ooxml::pptx::shapes::picture::image_file_name;
///
/// assert_eq!(image_file_name(2, 3, "JPEG"), "slide2_img3.jpg");
/// ```
pub fn image_file_name(slide_number: usize, ordinal: usize, part_ext: &str) -> String {
    format!("slide{}_img{}.{}", slide_number, ordinal, image_extension(part_ext))
}
