use thiserror::Error;

/// Why a texture never arrived. Every variant leaves the body on its flat color.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("request cancelled")]
    Cancelled,
}

/// RGBA8 pixels ready for upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Largest edge uploaded to the GPU; bigger maps are downscaled on decode.
pub const MAX_TEXTURE_EDGE: u32 = 2048;

pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, TextureError> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width().max(img.height()) > MAX_TEXTURE_EDGE {
        img = img.resize(
            MAX_TEXTURE_EDGE,
            MAX_TEXTURE_EDGE,
            image::imageops::FilterType::Triangle,
        );
    }
    let img = img.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// Resolution state of one body's texture.
///
/// A slot starts `Pending` and accepts exactly one outcome. `Failed` is final:
/// there is no retry, and the renderer keeps using the fallback color.
#[derive(Debug)]
pub enum TextureSlot<T> {
    Pending,
    Ready(T),
    Failed,
}

impl<T> Default for TextureSlot<T> {
    fn default() -> Self {
        TextureSlot::Pending
    }
}

impl<T> TextureSlot<T> {
    /// Apply a load outcome. Returns `false` if the slot was already settled.
    pub fn resolve<E>(&mut self, outcome: Result<T, E>) -> bool {
        if !matches!(self, TextureSlot::Pending) {
            return false;
        }
        *self = match outcome {
            Ok(tex) => TextureSlot::Ready(tex),
            Err(_) => TextureSlot::Failed,
        };
        true
    }

    pub fn texture(&self) -> Option<&T> {
        match self {
            TextureSlot::Ready(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, TextureSlot::Pending)
    }
}

/// What the renderer should draw a body with this frame.
#[derive(Debug, PartialEq)]
pub enum Surface<'a, T> {
    Textured(&'a T),
    Flat([f32; 3]),
}

#[inline]
pub fn surface_for<'a, T>(slot: &'a TextureSlot<T>, fallback: [f32; 3]) -> Surface<'a, T> {
    match slot.texture() {
        Some(t) => Surface::Textured(t),
        None => Surface::Flat(fallback),
    }
}
