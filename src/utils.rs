use image::{ imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage };
use imageproc::drawing;

use crate::region::PlateRegion;

/// Scale the image down so its width is at most `max_width`, keeping the aspect ratio.
/// Narrower images are returned as they are.
pub fn resize_to_max_width(img: &DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_width || max_width == 0 {
        return img.clone();
    }
    let scale = max_width as f64 / width as f64;
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    img.resize_exact(max_width, new_height, FilterType::Triangle)
}

/// Draw the rotated plate rectangle on `canvas`.
pub fn draw_plate_outline(canvas: &mut RgbImage, region: &PlateRegion, color: Rgb<u8>) {
    let corners = region.corners();
    for i in 0..4 {
        let start = corners[i];
        let end = corners[(i + 1) % 4];
        drawing::draw_line_segment_mut(
            canvas,
            (start.x as f32, start.y as f32),
            (end.x as f32, end.y as f32),
            color,
        );
    }
}

#[cfg(test)]
mod test {

    use image::{ DynamicImage, GenericImageView, Rgb, RgbImage };

    use super::{ draw_plate_outline, resize_to_max_width };
    use crate::glyph::Point2;
    use crate::region::{ PlateRegion, PlateSize };

    #[test]
    fn resize_keeps_aspect() {
        let img = DynamicImage::new_rgb8(2560, 1440);
        let resized = resize_to_max_width(&img, 1280);
        assert_eq!(resized.dimensions(), (1280, 720));

        let small = DynamicImage::new_rgb8(640, 480);
        assert_eq!(resize_to_max_width(&small, 1280).dimensions(), (640, 480));
    }

    #[test]
    fn outline_is_drawn() {
        let mut canvas = RgbImage::new(100, 100);
        let region = PlateRegion {
            center: Point2 { x: 50.0, y: 50.0 },
            size: PlateSize { width: 40, height: 20 },
            rotation_degrees: 0.0,
            cropped_image: None,
        };
        let red = Rgb([255, 0, 0]);
        draw_plate_outline(&mut canvas, &region, red);
        // top edge at y = 40, from x = 30 to 70
        assert_eq!(*canvas.get_pixel(50, 40), red);
        // inside stays untouched
        assert_eq!(*canvas.get_pixel(50, 50), Rgb([0, 0, 0]));
    }
}
