/// Basic example: Render a synthetic test image in every mode
///
/// This draws a grey background with a bright ring and a dark diagonal, then
/// prints it as plain, dithered, Sobel and contour grids.
use ascii_grid::{Charset, DitherAlgorithm, EdgeMethod, RenderConfig, preprocess, render};
use image::{Rgba, RgbaImage};

fn main() -> Result<(), ascii_grid::RenderError> {
    println!("ASCII Grid - Basic Example");
    println!("==========================\n");

    let width = 320;
    let height = 200;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 70.0;

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if (x as i32 - y as i32 * 8 / 5).abs() < 4 {
            Rgba([20, 20, 20, 255])
        } else if (dist - radius).abs() < 10.0 {
            Rgba([240, 240, 240, 255])
        } else {
            let shade = (60.0 + 120.0 * x as f32 / width as f32) as u8;
            Rgba([shade, shade, shade, 255])
        }
    });

    println!("Created test image: {}x{}\n", width, height);

    let base = RenderConfig {
        ascii_width: 64,
        charset: Charset::Standard,
        noise_seed: Some(1),
        ..Default::default()
    };
    let cells = preprocess::prepare(&img, base.ascii_width, 0.0)?;

    let variants = [
        (
            "plain",
            RenderConfig {
                dithering_enabled: false,
                ..base.clone()
            },
        ),
        (
            "floyd",
            RenderConfig {
                dither_algorithm: DitherAlgorithm::Floyd,
                ..base.clone()
            },
        ),
        (
            "ordered",
            RenderConfig {
                dither_algorithm: DitherAlgorithm::Ordered,
                ..base.clone()
            },
        ),
        (
            "sobel",
            RenderConfig {
                edge_method: EdgeMethod::Sobel,
                edge_threshold: 40,
                ..base.clone()
            },
        ),
        (
            "dog",
            RenderConfig {
                edge_method: EdgeMethod::Dog,
                dog_edge_threshold: 20,
                ..base.clone()
            },
        ),
    ];

    for (name, config) in &variants {
        let grid = render(&cells, config)?;
        println!("--- {} ({}x{}) ---", name, grid.width(), grid.height());
        println!("{}\n", grid);
    }

    Ok(())
}
