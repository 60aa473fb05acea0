//! What the engine needs from, and offers to, the presentation host.
//!
//! The host owns the window, input and sprite decoding. It hands the
//! engine nothing; it only reads snapshots and draws them through a
//! `RenderSurface`. Asset loading is the host's job too, but the
//! aggregate contract (log each failure, keep going, report one flag)
//! lives here so every host behaves the same way.

use crate::state::HotelState;
use std::path::PathBuf;

/// Pixel size of one floor tile.
pub const TILE_SIZE: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BACKGROUND: Color = Color::rgb(0x2c, 0x3e, 0x50);
    pub const PANEL: Color = Color::rgb(0x34, 0x49, 0x5e);
    pub const TEXT: Color = Color::rgb(0xec, 0xf0, 0xf1);
    pub const MONEY: Color = Color::rgb(0x2e, 0xcc, 0x71);
    pub const GUESTS: Color = Color::rgb(0x34, 0x98, 0xdb);
    pub const SATISFACTION: Color = Color::rgb(0xf3, 0x9c, 0x12);
    pub const DAY: Color = Color::rgb(0x9b, 0x59, 0xb6);
    pub const VACANT: Color = Color::rgb(0x2e, 0xcc, 0x71);
    pub const OCCUPIED: Color = Color::rgb(0xe7, 0x4c, 0x3c);
    pub const GUEST: Color = Color::rgb(0xf3, 0x9c, 0x12);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

/// Drawing primitives the host provides.
pub trait RenderSurface {
    fn fill(&mut self, color: Color);
    /// `outline` is `(color, width)`; `None` draws only the fill.
    fn draw_rect(&mut self, rect: Rect, fill: Color, outline: Option<(Color, f32)>);
    fn draw_text(&mut self, text: &str, style: TextStyle);
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
}

/// Info panel: money, occupancy, satisfaction, day.
pub fn draw_info_panel(surface: &mut dyn RenderSurface, state: &HotelState, origin: (f32, f32)) {
    let (px, py) = origin;
    let panel = Rect { x: px, y: py, width: 250.0, height: 200.0 };
    surface.draw_rect(panel, Color::PANEL, Some((Color::BACKGROUND, 2.0)));
    surface.draw_text(
        &state.hotel_name,
        TextStyle { x: px + 125.0, y: py + 20.0, size: 16.0, color: Color::TEXT, align: Align::Center },
    );

    let lines = [
        (format!("Money: ${}", state.money), Color::MONEY),
        (format!("Guests: {}/{}", state.guest_count, state.max_guests), Color::GUESTS),
        (format!("Satisfaction: {}%", state.satisfaction), Color::SATISFACTION),
        (format!("Day: {}", state.day), Color::DAY),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        surface.draw_text(
            text,
            TextStyle {
                x: px + 10.0,
                y: py + 50.0 + 20.0 * i as f32,
                size: 14.0,
                color: *color,
                align: Align::Left,
            },
        );
    }
}

/// Rooms (green vacant, red occupied) and guests as dots.
pub fn draw_floor_plan(surface: &mut dyn RenderSurface, state: &HotelState) {
    for room in &state.rooms {
        let rect = Rect {
            x: room.x as f32 * TILE_SIZE,
            y: room.y as f32 * TILE_SIZE,
            width: room.width as f32 * TILE_SIZE,
            height: room.height as f32 * TILE_SIZE,
        };
        let fill = if room.occupied { Color::OCCUPIED } else { Color::VACANT };
        surface.draw_rect(rect, fill, Some((Color::BACKGROUND, 2.0)));
        surface.draw_text(
            &format!("Room {}", room.id),
            TextStyle {
                x: rect.x + rect.width / 2.0,
                y: rect.y + rect.height / 2.0,
                size: 12.0,
                color: Color::TEXT,
                align: Align::Center,
            },
        );
    }
    for guest in &state.guests {
        surface.draw_circle(
            guest.x as f32 * TILE_SIZE,
            guest.y as f32 * TILE_SIZE,
            8.0,
            Color::GUEST,
        );
    }
}

// ── Assets ─────────────────────────────────────────────────────────

/// Sprite sheets the game draws with: (name, path relative to the asset root).
pub const DEFAULT_ASSET_MANIFEST: &[(&str, &str)] = &[
    ("interiors_32x32", "1_Interiors/32x32/Interiors_32x32.png"),
    ("room_builder_32x32", "1_Interiors/32x32/Room_Builder_32x32.png"),
    ("bodies_32x32", "2_Characters/Character_Generator/Bodies/Bodies_32x32.png"),
    ("door_32x32", "3_Animated_objects/32x32/spritesheets/animated_door_1_32x32.png"),
    ("ui_32x32", "4_User_Interface_Elements/UI_32x32.png"),
    ("emotes_32x32", "4_User_Interface_Elements/UI_thinking_emotes_animation_32x32.png"),
];

/// Resolves one named resource.
pub trait AssetLoader {
    fn load(&mut self, name: &str, path: &str) -> anyhow::Result<()>;
}

/// Load every manifest entry. Failures are logged and skipped; the result
/// is true only if all of them loaded.
pub fn load_assets(loader: &mut dyn AssetLoader, manifest: &[(&str, &str)]) -> bool {
    let mut failed = 0usize;
    for (name, path) in manifest {
        if let Err(e) = loader.load(name, path) {
            log::warn!("Asset '{name}' failed to load from {path}: {e}");
            failed += 1;
        }
    }
    if failed == 0 {
        log::info!("Loaded {} assets", manifest.len());
    } else {
        log::warn!("{failed} of {} assets failed to load", manifest.len());
    }
    failed == 0
}

/// Checks that each asset exists as a file under `root`.
pub struct FsAssetLoader {
    pub root: PathBuf,
    pub loaded: Vec<String>,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), loaded: Vec::new() }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&mut self, name: &str, path: &str) -> anyhow::Result<()> {
        let full = self.root.join(path);
        let meta = std::fs::metadata(&full)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", full.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a file", full.display());
        }
        self.loaded.push(name.to_string());
        Ok(())
    }
}
