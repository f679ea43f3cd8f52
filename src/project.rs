//! Project JSON files.
//!
//! Every editor saves a flat JSON document. The `type` field tells them
//! apart; sprite (UDG) files predate it and may leave it out.
//!
//! ```json
//! {"version":1,"charsWidth":2,"charsHeight":1,"pixels":[[...]],"attributes":[[{"ink":7,"paper":0,"bright":true}, ...]]}
//! {"version":1,"type":"tile","tileSize":16,"pixels":[...],"attributes":[...]}
//! {"version":1,"type":"scene","charsWidth":32,"charsHeight":24,"pixels":[...],"attributes":[...]}
//! {"version":1,"type":"level","tileSize":8,"tileLibrary":[...],"screens":[...],"currentScreenIndex":0}
//! {"version":1,"type":"spriteSheet","charsWidth":2,"charsHeight":2,"frames":[{"pixels":[...],"attributes":[...]}],"fps":8}
//! ```
//!
//! Stored grids are never trusted: they are clipped or padded to the size
//! the document declares, and out-of-range colours are clamped. Loading a
//! file of the wrong type is an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::attribute::Attribute;
use crate::canvas::{CanvasError, Scene, SpriteSheet, TileCanvas, UdgCanvas, DEFAULT_FPS};
use crate::export::{self, AsmDocument, AsmOptions, Exporter};
use crate::grid::Canvas;
use crate::level::{Level, ScreenData, TileData};
use crate::size_class::{TileSize, SCREEN_CHARS_HEIGHT, SCREEN_CHARS_WIDTH};

/// Version written into saved files.
pub const PROJECT_VERSION: u32 = 1;

/// Error type for loading and saving projects
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectError {
    /// File I/O error
    #[error("failed to read project: {0}")]
    Io(#[from] std::io::Error),
    /// Not valid JSON, or required fields missing
    #[error("malformed project file: {0}")]
    Json(#[from] serde_json::Error),
    /// File belongs to a different editor
    #[error("expected a {expected} project, found a {found} project")]
    WrongType { expected: ProjectKind, found: String },
    /// Unrecognised `type` field
    #[error("unknown project type '{0}'")]
    UnknownType(String),
    /// Tile file does not match the level's tile size
    #[error("tile size mismatch: level uses {expected} tiles, file has {found}")]
    TileSizeMismatch { expected: TileSize, found: TileSize },
    /// Declared canvas size is unusable
    #[error("invalid canvas: {0}")]
    Canvas(#[from] CanvasError),
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// The editor a project file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Sprite,
    Tile,
    Scene,
    Level,
    SpriteSheet,
}

impl ProjectKind {
    /// Value of the `type` field.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ProjectKind::Sprite => "sprite",
            ProjectKind::Tile => "tile",
            ProjectKind::Scene => "scene",
            ProjectKind::Level => "level",
            ProjectKind::SpriteSheet => "spriteSheet",
        }
    }

    pub fn from_type_tag(tag: Option<&str>) -> Result<Self> {
        match tag {
            None | Some("sprite") => Ok(ProjectKind::Sprite),
            Some("tile") => Ok(ProjectKind::Tile),
            Some("scene") => Ok(ProjectKind::Scene),
            Some("level") => Ok(ProjectKind::Level),
            Some("spriteSheet") => Ok(ProjectKind::SpriteSheet),
            Some(other) => Err(ProjectError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

fn default_version() -> u32 {
    PROJECT_VERSION
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_screen_width() -> usize {
    SCREEN_CHARS_WIDTH
}

fn default_screen_height() -> usize {
    SCREEN_CHARS_HEIGHT
}

/// Only the `type` field, for detecting the project kind.
#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Sprite/UDG file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub chars_width: usize,
    pub chars_height: usize,
    #[serde(default)]
    pub pixels: Vec<Vec<bool>>,
    #[serde(default)]
    pub attributes: Vec<Vec<Attribute>>,
}

/// Standalone tile file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub tile_size: TileSize,
    #[serde(default)]
    pub pixels: Vec<Vec<bool>>,
    #[serde(default)]
    pub attributes: Vec<Vec<Attribute>>,
}

/// Full screen file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default = "default_screen_width")]
    pub chars_width: usize,
    #[serde(default = "default_screen_height")]
    pub chars_height: usize,
    #[serde(default)]
    pub pixels: Vec<Vec<bool>>,
    #[serde(default)]
    pub attributes: Vec<Vec<Attribute>>,
}

/// Tile library entry inside a level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pixels: Vec<Vec<bool>>,
    #[serde(default)]
    pub attributes: Vec<Vec<Attribute>>,
}

/// Screen entry inside a level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub map: Vec<Vec<Option<usize>>>,
}

/// Level file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub tile_size: TileSize,
    #[serde(default)]
    pub tile_library: Vec<TileRecord>,
    #[serde(default)]
    pub screens: Vec<ScreenRecord>,
    #[serde(default)]
    pub current_screen_index: usize,
}

/// One frame inside a sprite sheet file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default)]
    pub pixels: Vec<Vec<bool>>,
    #[serde(default)]
    pub attributes: Vec<Vec<Attribute>>,
}

/// Animated sprite file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteSheetFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub chars_width: usize,
    pub chars_height: usize,
    #[serde(default)]
    pub frames: Vec<FrameRecord>,
    #[serde(default = "default_fps")]
    pub fps: u32,
}

/// Read the `type` field of a project file.
pub fn detect_kind(json: &str) -> Result<ProjectKind> {
    let probe: TypeProbe = serde_json::from_str(json)?;
    ProjectKind::from_type_tag(probe.kind.as_deref())
}

fn expect_kind(json: &str, expected: ProjectKind) -> Result<()> {
    let found = detect_kind(json)?;
    if found != expected {
        return Err(ProjectError::WrongType { expected, found: found.type_tag().to_string() });
    }
    Ok(())
}

fn canvas_from_rows(
    what: &str,
    pixels: &[Vec<bool>],
    attributes: &[Vec<Attribute>],
    chars_width: usize,
    chars_height: usize,
) -> Canvas {
    let (canvas, repaired) = Canvas::from_parts(pixels, attributes, chars_width, chars_height);
    if repaired {
        log::warn!("{}: stored grids repaired to {}x{} characters", what, chars_width, chars_height);
    }
    canvas
}

fn canvas_rows(canvas: &Canvas) -> (Vec<Vec<bool>>, Vec<Vec<Attribute>>) {
    (canvas.pixels.rows().to_vec(), canvas.attributes.rows().to_vec())
}

/// Load a sprite (UDG) project.
pub fn load_sprite(json: &str) -> Result<UdgCanvas> {
    expect_kind(json, ProjectKind::Sprite)?;
    let file: SpriteFile = serde_json::from_str(json)?;
    UdgCanvas::new(file.chars_width, file.chars_height)?;
    let canvas = canvas_from_rows("sprite", &file.pixels, &file.attributes, file.chars_width, file.chars_height);
    Ok(UdgCanvas::from_canvas(canvas)?)
}

/// Load a standalone tile project.
pub fn load_tile(json: &str) -> Result<TileCanvas> {
    expect_kind(json, ProjectKind::Tile)?;
    let file: TileFile = serde_json::from_str(json)?;
    let chars = file.tile_size.chars();
    let canvas = canvas_from_rows("tile", &file.pixels, &file.attributes, chars, chars);
    Ok(TileCanvas::from_canvas(file.tile_size, canvas))
}

/// Load a full screen project. The declared size is ignored, scenes are
/// always 32x24.
pub fn load_scene(json: &str) -> Result<Scene> {
    expect_kind(json, ProjectKind::Scene)?;
    let file: SceneFile = serde_json::from_str(json)?;
    if (file.chars_width, file.chars_height) != (SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT) {
        log::warn!("scene declared {}x{} characters, using 32x24", file.chars_width, file.chars_height);
    }
    let canvas =
        canvas_from_rows("scene", &file.pixels, &file.attributes, SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT);
    Ok(Scene::from_canvas(canvas))
}

/// Load a level project.
pub fn load_level(json: &str) -> Result<Level> {
    expect_kind(json, ProjectKind::Level)?;
    let file: LevelFile = serde_json::from_str(json)?;
    let size = file.tile_size;
    let chars = size.chars();

    let tiles = file
        .tile_library
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let id = if t.id.is_empty() { format!("tile-{}", i + 1) } else { t.id };
            let canvas = canvas_from_rows(&format!("tile '{}'", t.name), &t.pixels, &t.attributes, chars, chars);
            TileData { id, name: t.name, canvas }
        })
        .collect();

    let screens = file
        .screens
        .into_iter()
        .map(|s| ScreenData::from_map(s.name, &s.map, size.level_cols(), size.level_rows()))
        .collect();

    Ok(Level::from_parts(size, tiles, screens, file.current_screen_index))
}

/// Load an animated sprite project.
pub fn load_sprite_sheet(json: &str) -> Result<SpriteSheet> {
    expect_kind(json, ProjectKind::SpriteSheet)?;
    let file: SpriteSheetFile = serde_json::from_str(json)?;
    SpriteSheet::new(file.chars_width, file.chars_height)?;
    let frames = file
        .frames
        .iter()
        .enumerate()
        .map(|(i, f)| {
            canvas_from_rows(&format!("frame {}", i), &f.pixels, &f.attributes, file.chars_width, file.chars_height)
        })
        .collect();
    Ok(SpriteSheet::from_frames(file.chars_width, file.chars_height, frames, file.fps)?)
}

/// Load a tile file into a level's library.
///
/// Rejects non-tile files and tiles of a different size; the level is left
/// unchanged on error.
pub fn import_tile(level: &mut Level, json: &str, name: &str) -> Result<usize> {
    let tile = load_tile(json)?;
    let expected = level.tile_size();
    level
        .import_tile(name, tile.size(), tile.canvas().clone())
        .map_err(|_| ProjectError::TileSizeMismatch { expected, found: tile.size() })
}

/// A loaded project of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Project {
    Sprite(UdgCanvas),
    Tile(TileCanvas),
    Scene(Scene),
    Level(Level),
    SpriteSheet(SpriteSheet),
}

impl Project {
    /// Detect the kind from the `type` field and load accordingly.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(match detect_kind(json)? {
            ProjectKind::Sprite => Project::Sprite(load_sprite(json)?),
            ProjectKind::Tile => Project::Tile(load_tile(json)?),
            ProjectKind::Scene => Project::Scene(load_scene(json)?),
            ProjectKind::Level => Project::Level(load_level(json)?),
            ProjectKind::SpriteSheet => Project::SpriteSheet(load_sprite_sheet(json)?),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn kind(&self) -> ProjectKind {
        match self {
            Project::Sprite(_) => ProjectKind::Sprite,
            Project::Tile(_) => ProjectKind::Tile,
            Project::Scene(_) => ProjectKind::Scene,
            Project::Level(_) => ProjectKind::Level,
            Project::SpriteSheet(_) => ProjectKind::SpriteSheet,
        }
    }

    /// Serialize in the layout the loaders read.
    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Project::Sprite(udg) => {
                let (pixels, attributes) = canvas_rows(udg.canvas());
                serde_json::to_string(&SpriteFile {
                    version: PROJECT_VERSION,
                    kind: None,
                    chars_width: udg.chars_width(),
                    chars_height: udg.chars_height(),
                    pixels,
                    attributes,
                })?
            }
            Project::Tile(tile) => {
                let (pixels, attributes) = canvas_rows(tile.canvas());
                serde_json::to_string(&TileFile {
                    version: PROJECT_VERSION,
                    kind: Some(ProjectKind::Tile.type_tag().to_string()),
                    tile_size: tile.size(),
                    pixels,
                    attributes,
                })?
            }
            Project::Scene(scene) => {
                let (pixels, attributes) = canvas_rows(scene.canvas());
                serde_json::to_string(&SceneFile {
                    version: PROJECT_VERSION,
                    kind: Some(ProjectKind::Scene.type_tag().to_string()),
                    chars_width: SCREEN_CHARS_WIDTH,
                    chars_height: SCREEN_CHARS_HEIGHT,
                    pixels,
                    attributes,
                })?
            }
            Project::Level(level) => serde_json::to_string(&LevelFile {
                version: PROJECT_VERSION,
                kind: Some(ProjectKind::Level.type_tag().to_string()),
                tile_size: level.tile_size(),
                tile_library: level
                    .tiles()
                    .iter()
                    .map(|t| {
                        let (pixels, attributes) = canvas_rows(&t.canvas);
                        TileRecord { id: t.id.clone(), name: t.name.clone(), pixels, attributes }
                    })
                    .collect(),
                screens: level
                    .screens()
                    .iter()
                    .map(|s| ScreenRecord { name: s.name.clone(), map: s.map().to_vec() })
                    .collect(),
                current_screen_index: level.current_screen,
            })?,
            Project::SpriteSheet(sheet) => serde_json::to_string(&SpriteSheetFile {
                version: PROJECT_VERSION,
                kind: Some(ProjectKind::SpriteSheet.type_tag().to_string()),
                chars_width: sheet.chars_width(),
                chars_height: sheet.chars_height(),
                frames: sheet
                    .frames()
                    .iter()
                    .map(|f| {
                        let (pixels, attributes) = canvas_rows(f);
                        FrameRecord { pixels, attributes }
                    })
                    .collect(),
                fps: sheet.fps,
            })?,
        };
        Ok(json)
    }

    /// The canvas a preview should show. Levels show the given screen.
    pub fn preview_canvas(&self, screen: usize) -> Option<Canvas> {
        match self {
            Project::Sprite(udg) => Some(udg.canvas().clone()),
            Project::Tile(tile) => Some(tile.canvas().clone()),
            Project::Scene(scene) => Some(scene.canvas().clone()),
            Project::Level(level) => level.compose_screen(screen).ok(),
            Project::SpriteSheet(sheet) => sheet.frames().first().cloned(),
        }
    }
}

impl Exporter for Project {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> export::Result<AsmDocument> {
        match self {
            Project::Sprite(p) => p.to_asm(name, options),
            Project::Tile(p) => p.to_asm(name, options),
            Project::Scene(p) => p.to_asm(name, options),
            Project::Level(p) => p.to_asm(name, options),
            Project::SpriteSheet(p) => p.to_asm(name, options),
        }
    }

    fn format_name(&self) -> &'static str {
        match self {
            Project::Sprite(p) => p.format_name(),
            Project::Tile(p) => p.format_name(),
            Project::Scene(p) => p.format_name(),
            Project::Level(p) => p.format_name(),
            Project::SpriteSheet(p) => p.format_name(),
        }
    }
}
