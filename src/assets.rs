//! Owl expression textures
//!
//! The core only ever names textures by path; decoding and caching are the
//! front-end's concern.

use crate::sim::OwlExpression;

pub const LOGO: &str = "assets/logo.png";

const NEUTRAL: &str = "assets/default.png";
const HAPPY: [&str; 4] = [
    "assets/win1.png",
    "assets/win2.png",
    "assets/win3.png",
    "assets/win4.png",
];
const SAD: [&str; 4] = [
    "assets/lose1.png",
    "assets/lose2.png",
    "assets/lose3.png",
    "assets/lose4.png",
];

/// Texture path for an owl expression. Variant indices are 1-based and
/// clamped into range.
pub fn owl_texture(expression: OwlExpression) -> &'static str {
    let pick = |table: [&'static str; 4], n: u8| table[(n.clamp(1, 4) - 1) as usize];
    match expression {
        OwlExpression::Neutral => NEUTRAL,
        OwlExpression::Happy(n) => pick(HAPPY, n),
        OwlExpression::Sad(n) => pick(SAD, n),
    }
}

/// Lazily-created image cache for the canvas front-end
#[cfg(target_arch = "wasm32")]
pub struct TextureStore {
    images: std::collections::HashMap<String, web_sys::HtmlImageElement>,
}

#[cfg(target_arch = "wasm32")]
impl TextureStore {
    pub fn new() -> Self {
        Self {
            images: std::collections::HashMap::new(),
        }
    }

    /// Fetch the image for `path`, kicking off the browser load on first
    /// use. Returns the element even while it is still loading; callers
    /// should check `complete()` before drawing.
    pub fn get(&mut self, path: &str) -> Option<&web_sys::HtmlImageElement> {
        if !self.images.contains_key(path) {
            let image = web_sys::HtmlImageElement::new().ok()?;
            image.set_src(path);
            self.images.insert(path.to_string(), image);
        }
        self.images.get(path)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}
