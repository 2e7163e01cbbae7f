use egui::{Color32, ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;

/// Lazily uploaded texture of an image, re-uploaded when the image evo changes
pub struct TextureCell {
    name: String,
    opts: TextureOptions,
    tex: Option<(u64,TextureHandle)>,
}

impl TextureCell {
    pub fn new(name: impl Into<String>, opts: TextureOptions) -> Self {
        Self {
            name: name.into(),
            opts,
            tex: None,
        }
    }

    /// `None` for empty or oversized images
    pub fn ensure_image(&mut self, image: &RgbaImage, evo: u64, ctx: &Context) -> Option<&TextureHandle> {
        if image.width() == 0 || image.height() == 0 {
            self.tex = None;
            return None;
        }
        let max_side = ctx.input(|i| i.max_texture_side);
        if image.width() as usize > max_side || image.height() as usize > max_side {
            self.tex = None;
            return None;
        }

        match &mut self.tex {
            Some((cur_evo,tex)) => {
                if *cur_evo != evo {
                    tex.set(color_image_of_image(image), self.opts);
                    *cur_evo = evo;
                }
            },
            None => {
                self.tex = Some((evo, ctx.load_texture(&self.name, color_image_of_image(image), self.opts)));
            },
        }

        self.tex.as_ref().map(|(_,t)| t )
    }
}

pub fn color_image_of_image(img: &RgbaImage) -> ColorImage {
    ColorImage {
        size: [img.width() as usize, img.height() as usize],
        pixels: img.pixels().map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3])).collect(),
    }
}

/// Fit `[w,h]` into a `max`-sized square, keeping the aspect ratio
pub fn fit_size([w,h]: [u32;2], max: f32) -> egui::Vec2 {
    if w == 0 || h == 0 {
        return egui::vec2(max, max);
    }
    let scale = max / w.max(h) as f32;
    egui::vec2(w as f32 * scale, h as f32 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect() {
        assert_eq!(fit_size([32,16], 32.), egui::vec2(32., 16.));
        assert_eq!(fit_size([8,16], 32.), egui::vec2(16., 32.));
        assert_eq!(fit_size([0,0], 24.), egui::vec2(24., 24.));
    }

    #[test]
    fn color_image_is_row_major() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        let ci = color_image_of_image(&img);
        assert_eq!(ci.size, [2, 1]);
        assert_eq!(ci.pixels[1], Color32::from_rgb(255, 0, 0));
    }
}
