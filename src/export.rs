use std::fs::File;
use std::io::{self, BufWriter, Write};

use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::ascii::tile_bg_color;
use crate::house::Layout;

const LAYOUT_FORMAT_VERSION: u32 = 1;

/// JSON wrapper with enough context to regenerate the layout.
#[derive(Serialize, Deserialize)]
struct LayoutFile {
    /// Format version for forward compatibility
    version: u32,
    seed: u64,
    player_spawn: (f32, f32),
    layout: Layout,
}

/// Export a layout as a colored PNG, `scale` pixels per cell.
/// The player spawn cell is drawn white.
pub fn export_layout_png(layout: &Layout, path: &str, scale: u32) -> Result<(), image::ImageError> {
    let scale = scale.max(1);
    let mut img: RgbImage = ImageBuffer::new(layout.width() as u32 * scale, layout.height() as u32 * scale);
    let (px, py) = layout.player_spawn();
    let player = (px as usize, py as usize);

    for (x, y, tile) in layout.grid.iter() {
        let color = if (x, y) == player {
            [255, 255, 255]
        } else {
            let (r, g, b) = tile_bg_color(tile, layout.main_room);
            [r, g, b]
        };
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x as u32 * scale + dx, y as u32 * scale + dy, Rgb(color));
            }
        }
    }

    img.save(path)
}

/// Export a layout, with its seed and player spawn, as pretty JSON.
pub fn export_layout_json(layout: &Layout, seed: u64, path: &str) -> io::Result<()> {
    let file = LayoutFile {
        version: LAYOUT_FORMAT_VERSION,
        seed,
        player_spawn: layout.player_spawn(),
        layout: layout.clone(),
    };

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &file)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e)))?;
    writer.flush()
}

/// Load a layout previously written by `export_layout_json`.
/// Returns the layout and the seed it was generated from.
pub fn load_layout_json(path: &str) -> io::Result<(Layout, u64)> {
    let text = std::fs::read_to_string(path)?;
    let file: LayoutFile = serde_json::from_str(&text).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Deserialization failed: {}", e))
    })?;

    if file.version > LAYOUT_FORMAT_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Layout file version {} is newer than supported version {}",
                file.version, LAYOUT_FORMAT_VERSION
            ),
        ));
    }

    Ok((file.layout, file.seed))
}
