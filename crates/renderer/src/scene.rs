//! Adapter seam towards a rendering engine.
//!
//! The layer only produces data. A [`SceneBackend`] turns that data into
//! engine objects: one texture holding the pixels and one material sampling
//! it, drawn on a quad placed with the layer's [`Placement`]. [`GridMesh`]
//! tracks the two handles and releases them exactly once.

use grid_common::{Color, LayerOptions};
use serde::{Deserialize, Serialize};

use crate::colorizer::PixelBuffer;
use crate::error::{RenderError, RenderResult};
use crate::layer::OccupancyGridLayer;
use crate::placement::Placement;

/// Pixel layout of the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    /// 8 bits per channel, RGBA interleaved
    Rgba8,
}

/// Texture sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFilter {
    /// One texel per cell, hard edges
    Nearest,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub filter: TextureFilter,
}

impl TextureDescriptor {
    pub fn for_buffer(pixels: &PixelBuffer) -> Self {
        Self {
            width: pixels.width() as u32,
            height: pixels.height() as u32,
            format: TextureFormat::Rgba8,
            filter: TextureFilter::Nearest,
        }
    }

    /// Expected length of the pixel data in bytes.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub opacity: f32,
    /// Blending is needed whenever `opacity < 1`
    pub transparent: bool,
    pub tint: Color,
    /// The grid is visible from below as well
    pub double_sided: bool,
}

impl MaterialDescriptor {
    pub fn from_options(options: &LayerOptions) -> Self {
        let opacity = options.effective_opacity();
        Self {
            opacity,
            transparent: opacity < 1.0,
            tint: options.color,
            double_sided: true,
        }
    }
}

/// Rendering engine operations needed to show a grid layer.
pub trait SceneBackend {
    type Texture;
    type Material;
    type Error: std::error::Error;

    fn create_texture(&mut self, desc: &TextureDescriptor) -> Result<Self::Texture, Self::Error>;

    /// Replace the full contents of `texture`.
    fn upload_texture(&mut self, texture: &Self::Texture, pixels: &[u8]) -> Result<(), Self::Error>;

    fn create_material(
        &mut self,
        texture: &Self::Texture,
        desc: &MaterialDescriptor,
    ) -> Result<Self::Material, Self::Error>;

    /// Position the quad drawn with `material`.
    fn place_quad(
        &mut self,
        material: &Self::Material,
        placement: &Placement,
    ) -> Result<(), Self::Error>;

    fn release_material(&mut self, material: Self::Material);

    fn release_texture(&mut self, texture: Self::Texture);
}

fn backend_err<E: std::error::Error>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Engine-side handles for one layer.
#[derive(Debug)]
pub struct GridMesh<B: SceneBackend> {
    texture: Option<B::Texture>,
    material: Option<B::Material>,
    revision: u64,
}

impl<B: SceneBackend> GridMesh<B> {
    /// Create texture and material for `layer`, upload its pixels and place the quad.
    ///
    /// The layer's pending update is only consumed once everything succeeded.
    pub fn attach(layer: &mut OccupancyGridLayer, backend: &mut B) -> RenderResult<Self> {
        let texture = backend
            .create_texture(&layer.texture_descriptor())
            .map_err(backend_err)?;

        // A fresh texture has no contents, upload regardless of the flag
        if let Err(e) = backend.upload_texture(&texture, layer.pixels().as_bytes()) {
            backend.release_texture(texture);
            return Err(backend_err(e));
        }

        let material = match backend.create_material(&texture, &layer.material_descriptor()) {
            Ok(material) => material,
            Err(e) => {
                backend.release_texture(texture);
                return Err(backend_err(e));
            }
        };

        let mut mesh = Self {
            texture: Some(texture),
            material: Some(material),
            revision: layer.revision(),
        };
        if let Err(e) = mesh.place(layer.placement(), backend) {
            mesh.dispose(backend);
            return Err(e);
        }
        layer.take_update();
        Ok(mesh)
    }

    /// Push a pending pixel update and the current placement.
    ///
    /// Returns `true` when new pixels were uploaded. A failed upload leaves
    /// the update pending. Does nothing once disposed.
    pub fn sync(&mut self, layer: &mut OccupancyGridLayer, backend: &mut B) -> RenderResult<bool> {
        let Some(texture) = &self.texture else {
            return Ok(false);
        };

        let uploaded = layer.needs_update();
        if uploaded {
            backend
                .upload_texture(texture, layer.pixels().as_bytes())
                .map_err(backend_err)?;
            layer.take_update();
            self.revision = layer.revision();
        }
        self.place(layer.placement(), backend)?;
        Ok(uploaded)
    }

    fn place(&self, placement: &Placement, backend: &mut B) -> RenderResult<()> {
        match &self.material {
            Some(material) => backend.place_quad(material, placement).map_err(backend_err),
            None => Ok(()),
        }
    }

    /// Layer revision last pushed to the backend.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_disposed(&self) -> bool {
        self.texture.is_none() && self.material.is_none()
    }

    /// Release material and texture. Safe to call more than once.
    pub fn dispose(&mut self, backend: &mut B) {
        if let Some(material) = self.material.take() {
            backend.release_material(material);
        }
        if let Some(texture) = self.texture.take() {
            backend.release_texture(texture);
        }
    }
}
