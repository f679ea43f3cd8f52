//! Editor documents: UDG canvases, tiles, scenes and animated sprites.
//!
//! Each document owns its grids outright. Callers mutate them through
//! `&mut` access and the [`crate::paint`] functions.

use thiserror::Error;

use crate::grid::Canvas;
use crate::size_class::{TileSize, SCREEN_CHARS_HEIGHT, SCREEN_CHARS_WIDTH, UDG_MAX_CHARS};

/// Error type for canvas and frame operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// Width or height of zero
    #[error("canvas must be at least 1x1 characters, got {width}x{height}")]
    Empty { width: usize, height: usize },
    /// Over the UDG character budget
    #[error("{width}x{height} is {count} characters, the limit is {limit}")]
    TooManyChars { width: usize, height: usize, count: usize, limit: usize },
    /// Wider or taller than a sprite sheet may be
    #[error("{width}x{height} characters is larger than the {max_width}x{max_height} limit")]
    TooLarge { width: usize, height: usize, max_width: usize, max_height: usize },
    /// Frame index past the end
    #[error("frame {index} does not exist ({count} frames)")]
    NoSuchFrame { index: usize, count: usize },
    /// Removing the only frame
    #[error("cannot remove the last frame")]
    LastFrame,
}

fn check_udg_size(width: usize, height: usize) -> Result<(), CanvasError> {
    if width == 0 || height == 0 {
        return Err(CanvasError::Empty { width, height });
    }
    match width.checked_mul(height) {
        Some(count) if count <= UDG_MAX_CHARS => Ok(()),
        count => Err(CanvasError::TooManyChars {
            width,
            height,
            count: count.unwrap_or(usize::MAX),
            limit: UDG_MAX_CHARS,
        }),
    }
}

/// Largest sprite sheet frame, in characters: one full screen.
pub const SHEET_MAX_CHARS_WIDTH: usize = SCREEN_CHARS_WIDTH;
pub const SHEET_MAX_CHARS_HEIGHT: usize = SCREEN_CHARS_HEIGHT;

fn check_sheet_size(width: usize, height: usize) -> Result<(), CanvasError> {
    if width == 0 || height == 0 {
        return Err(CanvasError::Empty { width, height });
    }
    if width > SHEET_MAX_CHARS_WIDTH || height > SHEET_MAX_CHARS_HEIGHT {
        return Err(CanvasError::TooLarge {
            width,
            height,
            max_width: SHEET_MAX_CHARS_WIDTH,
            max_height: SHEET_MAX_CHARS_HEIGHT,
        });
    }
    Ok(())
}

/// Variable-size sprite canvas for UDG graphics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdgCanvas {
    canvas: Canvas,
}

impl UdgCanvas {
    /// A blank canvas. Fails for zero sizes or more than 21 characters.
    pub fn new(chars_width: usize, chars_height: usize) -> Result<Self, CanvasError> {
        check_udg_size(chars_width, chars_height)?;
        Ok(Self { canvas: Canvas::new(chars_width, chars_height) })
    }

    /// Wrap an existing canvas, checking the size rules.
    pub fn from_canvas(canvas: Canvas) -> Result<Self, CanvasError> {
        check_udg_size(canvas.chars_width(), canvas.chars_height())?;
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn chars_width(&self) -> usize {
        self.canvas.chars_width()
    }

    pub fn chars_height(&self) -> usize {
        self.canvas.chars_height()
    }

    /// Change the size, keeping the overlapping top-left region.
    ///
    /// An invalid size is rejected and the canvas is left as it was.
    pub fn resize(&mut self, chars_width: usize, chars_height: usize) -> Result<(), CanvasError> {
        check_udg_size(chars_width, chars_height)?;
        self.canvas = self.canvas.resized(chars_width, chars_height);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.canvas = Canvas::new(self.chars_width(), self.chars_height());
    }
}

/// A single tile being edited on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCanvas {
    size: TileSize,
    canvas: Canvas,
}

impl TileCanvas {
    pub fn new(size: TileSize) -> Self {
        Self { size, canvas: Canvas::new(size.chars(), size.chars()) }
    }

    /// Wrap a canvas, clipping or padding it to the tile size.
    pub fn from_canvas(size: TileSize, canvas: Canvas) -> Self {
        let canvas = if canvas.chars_width() == size.chars() && canvas.chars_height() == size.chars() {
            canvas
        } else {
            canvas.resized(size.chars(), size.chars())
        };
        Self { size, canvas }
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Switch to a different tile size. The drawing is discarded.
    pub fn set_size(&mut self, size: TileSize) {
        *self = Self::new(size);
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.size);
    }
}

/// A full 32x24 character screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    canvas: Canvas,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self { canvas: Canvas::new(SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT) }
    }

    /// Wrap a canvas, clipping or padding it to screen size.
    pub fn from_canvas(canvas: Canvas) -> Self {
        Self { canvas: canvas.resized(SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT) }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn clear(&mut self) {
        self.canvas = Canvas::new(SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT);
    }
}

/// Default playback rate for new sprite sheets.
pub const DEFAULT_FPS: u32 = 8;

/// An animated sprite: equally sized frames, always at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    chars_width: usize,
    chars_height: usize,
    frames: Vec<Canvas>,
    pub fps: u32,
}

impl SpriteSheet {
    /// One blank frame. Frames are at most 32x24 characters.
    pub fn new(chars_width: usize, chars_height: usize) -> Result<Self, CanvasError> {
        check_sheet_size(chars_width, chars_height)?;
        Ok(Self {
            chars_width,
            chars_height,
            frames: vec![Canvas::new(chars_width, chars_height)],
            fps: DEFAULT_FPS,
        })
    }

    /// Build from loaded frames, resizing each to the sheet size. An empty
    /// list gets one blank frame.
    pub fn from_frames(
        chars_width: usize,
        chars_height: usize,
        frames: Vec<Canvas>,
        fps: u32,
    ) -> Result<Self, CanvasError> {
        let mut sheet = Self::new(chars_width, chars_height)?;
        if !frames.is_empty() {
            sheet.frames = frames
                .into_iter()
                .map(|f| {
                    if f.chars_width() == chars_width && f.chars_height() == chars_height {
                        f
                    } else {
                        f.resized(chars_width, chars_height)
                    }
                })
                .collect();
        }
        sheet.fps = fps;
        Ok(sheet)
    }

    pub fn chars_width(&self) -> usize {
        self.chars_width
    }

    pub fn chars_height(&self) -> usize {
        self.chars_height
    }

    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&Canvas, CanvasError> {
        let count = self.frames.len();
        self.frames.get(index).ok_or(CanvasError::NoSuchFrame { index, count })
    }

    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Canvas, CanvasError> {
        let count = self.frames.len();
        self.frames.get_mut(index).ok_or(CanvasError::NoSuchFrame { index, count })
    }

    /// Append a blank frame and return its index.
    pub fn add_frame(&mut self) -> usize {
        self.frames.push(Canvas::new(self.chars_width, self.chars_height));
        self.frames.len() - 1
    }

    /// Insert a copy of frame `index` right after it and return the copy's index.
    pub fn duplicate_frame(&mut self, index: usize) -> Result<usize, CanvasError> {
        let copy = self.frame(index)?.clone();
        self.frames.insert(index + 1, copy);
        Ok(index + 1)
    }

    pub fn remove_frame(&mut self, index: usize) -> Result<Canvas, CanvasError> {
        self.frame(index)?;
        if self.frames.len() == 1 {
            return Err(CanvasError::LastFrame);
        }
        Ok(self.frames.remove(index))
    }

    /// Move a frame to a new position, shifting the frames in between.
    pub fn move_frame(&mut self, from: usize, to: usize) -> Result<(), CanvasError> {
        self.frame(from)?;
        self.frame(to)?;
        let frame = self.frames.remove(from);
        self.frames.insert(to, frame);
        Ok(())
    }
}
