use anyhow::Context;
use log::info;
use sokol::gfx as sg;
use std::collections::HashMap;
use std::path::Path;

/// RGBA8 pixels decoded on the CPU, ready for upload once the GPU is up
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn load_image(path: &Path) -> anyhow::Result<DecodedImage> {
    let img = image::open(path).with_context(|| format!("failed to load image {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    info!("Loaded {} ({}x{})", path.display(), width, height);

    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

pub struct TextureManager {
    textures: HashMap<String, sg::Image>,
    white_texture: sg::Image,
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            white_texture: sg::Image::default(),
        }
    }

    pub fn init(&mut self) {
        let white_pixels = [255u8, 255, 255, 255];
        self.white_texture = make_rgba_image(1, 1, &white_pixels);
    }

    pub fn upload(&mut self, name: &str, image: &DecodedImage) -> sg::Image {
        // Check if already uploaded
        if let Some(&texture) = self.textures.get(name) {
            return texture;
        }

        let texture = make_rgba_image(image.width as i32, image.height as i32, &image.rgba);
        self.textures.insert(name.to_string(), texture);
        texture
    }

    pub fn get_texture(&self, name: &str) -> Option<sg::Image> {
        self.textures.get(name).copied()
    }

    pub fn get_white_texture(&self) -> sg::Image {
        self.white_texture
    }
}

fn make_rgba_image(width: i32, height: i32, pixels: &[u8]) -> sg::Image {
    let mut data = sg::ImageData::new();
    data.subimage[0][0] = sg::Range {
        ptr: pixels.as_ptr() as *const _,
        size: pixels.len(),
    };

    sg::make_image(&sg::ImageDesc {
        width,
        height,
        pixel_format: sg::PixelFormat::Rgba8,
        data,
        ..Default::default()
    })
}
