//! ASCII rendering and export module for house layouts
//!
//! Provides functions to render a layout as plain or ANSI-colored text and to
//! export it, with a room table and legend, to a text file.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::connectivity;
use crate::house::types::{RoomId, Tile};
use crate::house::Layout;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// One character per tile kind
    Tiles,
    /// Room floors show their room index (0-9, then a-z)
    RoomIds,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Tiles => "Tiles",
            AsciiMode::RoomIds => "Room IDs",
        }
    }
}

/// Get ASCII character for a tile
pub fn tile_char(tile: &Tile, main_room: RoomId) -> char {
    match tile {
        Tile::Empty => ' ',
        Tile::Room(id) if *id == main_room => ',',
        Tile::Room(_) => '.',
        Tile::Wall => '#',
        Tile::Gap => '_',
        Tile::Door => '+',
        Tile::Spawner => 'S',
    }
}

/// Room index as a single character; '?' past 36 rooms
pub fn room_id_char(id: RoomId) -> char {
    std::char::from_digit(id as u32, 36).unwrap_or('?')
}

/// Render a layout to an ASCII string. The player spawn is marked '@'.
pub fn render_ascii_layout(layout: &Layout, mode: AsciiMode) -> String {
    let width = layout.width();
    let height = layout.height();
    let (px, py) = layout.player_spawn();
    let player = (px as usize, py as usize);
    let mut result = String::with_capacity((width + 1) * height);

    for y in 0..height {
        for x in 0..width {
            let tile = layout.grid.get(x, y);
            let ch = if (x, y) == player {
                '@'
            } else {
                match (mode, tile) {
                    (AsciiMode::RoomIds, Tile::Room(id)) => room_id_char(*id),
                    _ => tile_char(tile, layout.main_room),
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Generate legend for tile characters
pub fn tile_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== LEGEND ===\n");
    legend.push_str("  , main room floor   . side room floor   # wall\n");
    legend.push_str("  _ gap               + door              S spawner\n");
    legend.push_str("  @ player spawn        (blank) empty\n");
    legend
}

/// One line per room: index, rectangle, area, template, reachability.
pub fn room_table(layout: &Layout) -> String {
    let reach = connectivity::analyze(layout);
    let mut table = String::new();
    table.push_str("=== ROOMS ===\n");
    table.push_str("  id  x    y    w    h    area  template              reachable\n");
    for (id, room) in layout.rooms.iter().enumerate() {
        let template = layout
            .template_for_room(id)
            .map(|t| t.name.as_str())
            .unwrap_or("-");
        let marker = if id == layout.main_room { "*" } else { " " };
        table.push_str(&format!(
            "{}{:>3}  {:<4} {:<4} {:<4} {:<4} {:<5} {:<21} {}\n",
            marker,
            id,
            room.x,
            room.y,
            room.width,
            room.height,
            room.area(),
            template,
            if reach.reachable[id] { "yes" } else { "no" }
        ));
    }
    table
}

/// Print ASCII layout to stdout
pub fn print_ascii_layout(layout: &Layout, mode: AsciiMode) {
    print!("{}", render_ascii_layout(layout, mode));
}

/// Export a layout to a text file
pub fn export_layout_file(layout: &Layout, seed: u64, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "=== HOUSE LAYOUT FILE ===")?;
    writeln!(file, "Seed: {}", seed)?;
    writeln!(file, "Size: {}x{}", layout.width(), layout.height())?;
    writeln!(file, "Openings: {}", layout.opening_style)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    write!(file, "{}", room_table(layout))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ({}) ===", AsciiMode::Tiles.name())?;
    write!(file, "{}", render_ascii_layout(layout, AsciiMode::Tiles))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ({}) ===", AsciiMode::RoomIds.name())?;
    write!(file, "{}", render_ascii_layout(layout, AsciiMode::RoomIds))?;
    writeln!(file)?;

    write!(file, "{}", tile_legend())?;
    Ok(())
}

// ============================================================================
// COLORIZED ASCII RENDERING
// ============================================================================

/// Background color for a tile
pub fn tile_bg_color(tile: &Tile, main_room: RoomId) -> (u8, u8, u8) {
    match tile {
        Tile::Empty => (12, 12, 16),
        Tile::Room(id) if *id == main_room => (120, 96, 40),
        Tile::Room(id) => room_color(*id),
        Tile::Wall => (70, 70, 78),
        Tile::Gap => (150, 140, 110),
        Tile::Door => (130, 80, 30),
        Tile::Spawner => (170, 30, 30),
    }
}

/// Muted, stable per-room floor color
pub fn room_color(id: RoomId) -> (u8, u8, u8) {
    const PALETTE: [(u8, u8, u8); 6] = [
        (58, 84, 110),
        (66, 104, 72),
        (98, 70, 104),
        (104, 86, 60),
        (60, 100, 100),
        (92, 62, 62),
    ];
    PALETTE[id % PALETTE.len()]
}

/// Format a single character with ANSI true color (24-bit) - foreground and background
pub fn ansi_colored_char(ch: char, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.0, fg.1, fg.2,
        bg.0, bg.1, bg.2,
        ch
    )
}

/// Render a layout with ANSI background colors per tile
pub fn render_colored_ascii_layout(layout: &Layout, mode: AsciiMode) -> String {
    let plain = render_ascii_layout(layout, mode);
    let mut result = String::with_capacity(plain.len() * 20);

    for (y, line) in plain.lines().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let bg = tile_bg_color(layout.grid.get(x, y), layout.main_room);
            let fg = if ch == '@' { (255, 255, 255) } else { (220, 220, 220) };
            result.push_str(&ansi_colored_char(ch, fg, bg));
        }
        result.push('\n');
    }

    result
}

/// Print colored ASCII layout to stdout
pub fn print_colored_ascii_layout(layout: &Layout, mode: AsciiMode) {
    print!("{}", render_colored_ascii_layout(layout, mode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::house::generate_layout_from_seed;

    #[test]
    fn test_render_dimensions() {
        let layout = generate_layout_from_seed(&LayoutConfig::default(), 5).unwrap();
        let text = render_ascii_layout(&layout, AsciiMode::Tiles);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
        assert_eq!(text.matches('@').count(), 1);
        assert_eq!(text.matches('S').count(), layout.spawners.len());
    }

    #[test]
    fn test_room_ids_mode() {
        assert_eq!(room_id_char(0), '0');
        assert_eq!(room_id_char(11), 'b');
        assert_eq!(room_id_char(40), '?');

        let layout = generate_layout_from_seed(&LayoutConfig::default(), 5).unwrap();
        let text = render_ascii_layout(&layout, AsciiMode::RoomIds);
        assert!(text.contains('0'));
        assert!(!text.contains('.'));
    }

    #[test]
    fn test_room_table_lists_every_room() {
        let layout = generate_layout_from_seed(&LayoutConfig::default(), 6).unwrap();
        let table = room_table(&layout);
        assert_eq!(table.lines().count(), 2 + layout.rooms.len());
        assert_eq!(table.lines().filter(|l| l.starts_with('*')).count(), 1);
    }
}
