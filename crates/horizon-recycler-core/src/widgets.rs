//! Widget payloads carried by views.
//!
//! A [`ViewNode`](crate::ViewNode) holds one of these inside its
//! [`ViewKind`](crate::ViewKind). They are plain state holders: the host
//! toolkit reads them when it draws a row.

use std::fmt;
use std::sync::Arc;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GRAY: Color = Color::from_rgb(128, 128, 128);

    /// Creates an opaque color.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Decoded pixel data.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from RGBA8 pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// A drawable described by name, such as a shape or a nine-patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawable {
    pub name: String,
}

impl Drawable {
    /// Create a drawable reference by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What an [`ImageView`] currently displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    #[default]
    None,
    /// A packaged drawable resource.
    Resource(u32),
    /// Decoded pixels.
    Bitmap(Arc<Bitmap>),
    /// A drawable object.
    Drawable(Arc<Drawable>),
    /// A remote or local address, typically set by an image loader.
    Uri(String),
}

impl ImageSource {
    /// Whether no image is set.
    pub fn is_none(&self) -> bool {
        matches!(self, ImageSource::None)
    }
}

/// A text display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextView {
    text: String,
    text_resource: Option<u32>,
    color: Color,
}

impl TextView {
    /// Creates a text view showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sets literal text, clearing any string resource.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.text_resource = None;
    }

    /// The string resource last assigned, if the text came from one.
    pub fn text_resource(&self) -> Option<u32> {
        self.text_resource
    }

    /// Sets text from a string resource.
    ///
    /// Resources are resolved by the host when drawing, so the literal text
    /// is cleared.
    pub fn set_text_resource(&mut self, resource: u32) {
        self.text.clear();
        self.text_resource = Some(resource);
    }

    /// The text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

/// An image display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageView {
    source: ImageSource,
}

impl ImageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current image source.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Replace the image source.
    pub fn set_source(&mut self, source: ImageSource) {
        self.source = source;
    }

    /// Show an image resource.
    pub fn set_resource(&mut self, resource: u32) {
        self.source = ImageSource::Resource(resource);
    }

    /// Show a decoded bitmap.
    pub fn set_bitmap(&mut self, bitmap: Arc<Bitmap>) {
        self.source = ImageSource::Bitmap(bitmap);
    }

    /// Sets a drawable, or clears the image when `None`.
    pub fn set_drawable(&mut self, drawable: Option<Arc<Drawable>>) {
        self.source = drawable.map_or(ImageSource::None, ImageSource::Drawable);
    }

    /// Show the image at `uri`.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.source = ImageSource::Uri(uri.into());
    }
}

/// A two-state check box with a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckBox {
    text: String,
    checked: bool,
}

impl CheckBox {
    /// Creates an unchecked box labelled `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }

    /// The label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the box is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flips the checked state.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_argb() {
        let color = Color::from_argb(0x80FF_1020);
        assert_eq!(color, Color { r: 0xFF, g: 0x10, b: 0x20, a: 0x80 });
    }

    #[test]
    fn test_text_resource_replaces_literal() {
        let mut text = TextView::new("literal");
        text.set_text_resource(7);
        assert_eq!(text.text(), "");
        assert_eq!(text.text_resource(), Some(7));

        text.set_text("again");
        assert_eq!(text.text_resource(), None);
    }

    #[test]
    fn test_image_drawable_none_clears() {
        let mut image = ImageView::new();
        image.set_resource(3);
        image.set_drawable(None);
        assert!(image.source().is_none());
    }

    #[test]
    fn test_check_box_toggle() {
        let mut check = CheckBox::new("done");
        check.toggle();
        assert!(check.is_checked());
        check.toggle();
        assert!(!check.is_checked());
    }
}
