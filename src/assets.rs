//! Asteroid texture provisioning
//!
//! The simulation never depends on textures. A renderer builds one
//! [`AssetCache`] around its [`TextureSource`] and asks it for a [`Visual`]
//! per asteroid; any failure degrades to a plain circle.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// Asset loading errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// File or variant does not exist
    #[error("Asset missing: {0}")]
    Missing(String),

    /// Asset exists but could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Sprite size bucket for an asteroid radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Search order when a class has no variants of its own
    const FALLBACK_ORDER: [SizeClass; 3] = [SizeClass::Medium, SizeClass::Large, SizeClass::Small];

    pub fn for_radius(radius: f32, min_radius: f32) -> Self {
        if radius <= min_radius * 1.5 {
            SizeClass::Small
        } else if radius <= min_radius * 2.5 {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }
}

/// Opaque handle to a loaded, scaled texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u32,
    /// Pixel size of the longest side after scaling
    pub size: u32,
}

/// What to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// Blit `handle` at `position + offset`
    Texture { handle: TextureHandle, offset: Vec2 },
    /// Primitive fallback
    Circle { radius: f32 },
}

/// Backend that actually decodes and scales images
pub trait TextureSource {
    /// Number of sprite variants available for a size class
    fn variant_count(&self, class: SizeClass) -> usize;

    /// Load `variant` of `class`, scaled so its longest side is `size` pixels
    fn load(&mut self, class: SizeClass, variant: usize, size: u32) -> Result<TextureHandle, AssetError>;
}

/// Memoizing front for a [`TextureSource`]
///
/// Constructed once by the renderer and passed by reference. Failed loads are
/// remembered so each missing asset is reported a single time.
pub struct AssetCache<S: TextureSource> {
    source: S,
    min_radius: f32,
    loaded: HashMap<(SizeClass, usize, u32), TextureHandle>,
    failed: HashSet<(SizeClass, usize, u32)>,
    warned_empty: bool,
}

impl<S: TextureSource> AssetCache<S> {
    pub fn new(source: S, min_radius: f32) -> Self {
        Self {
            source,
            min_radius,
            loaded: HashMap::new(),
            failed: HashSet::new(),
            warned_empty: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of successfully cached textures
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Texture for an asteroid, or a circle if none can be provided
    pub fn asteroid_visual(&mut self, radius: f32, seed: u64) -> Visual {
        let fallback = Visual::Circle { radius };

        let Some(class) = self.class_with_variants(SizeClass::for_radius(radius, self.min_radius))
        else {
            if !self.warned_empty {
                log::warn!("No asteroid sprites available, drawing circles");
                self.warned_empty = true;
            }
            return fallback;
        };

        let variants = self.source.variant_count(class);
        let variant = (seed % variants as u64) as usize;
        let size = ((radius * 2.0).round() as u32).max(2);
        let key = (class, variant, size);

        if let Some(handle) = self.loaded.get(&key) {
            return Visual::Texture {
                handle: *handle,
                offset: Vec2::splat(-radius),
            };
        }
        if self.failed.contains(&key) {
            return fallback;
        }

        match self.source.load(class, variant, size) {
            Ok(handle) => {
                self.loaded.insert(key, handle);
                Visual::Texture {
                    handle,
                    offset: Vec2::splat(-radius),
                }
            }
            Err(e) => {
                log::warn!("Failed to load asteroid sprite {class:?}#{variant} at {size}px: {e}");
                self.failed.insert(key);
                fallback
            }
        }
    }

    fn class_with_variants(&self, preferred: SizeClass) -> Option<SizeClass> {
        if self.source.variant_count(preferred) > 0 {
            return Some(preferred);
        }
        SizeClass::FALLBACK_ORDER
            .into_iter()
            .find(|c| self.source.variant_count(*c) > 0)
    }
}
