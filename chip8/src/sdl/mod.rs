use std::error::Error;

use log::debug;
use octet_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use octet_core::FrameBuffer;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::frontend::{Frontend, Input};

mod keymap;

use keymap::keymap;

const SCALE: usize = 10;

/// # SDL
/// A window showing the 64x32 display scaled up, with keyboard input.
///
/// The on/off state of each pixel is rendered as white/black through an RGB24 streaming
/// texture. The window only gets a call to `render` when the frame changes.
pub struct Sdl {
    _context: sdl2::Sdl,
    canvas: sdl2::render::WindowCanvas,
    events: sdl2::EventPump,
}

impl Sdl {
    /// Creates a window bound to a new sdl2 context
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let context = sdl2::init()?;
        let video_subsystem = context.video()?;
        let window = video_subsystem
            .window(
                "octet",
                (DISPLAY_WIDTH * SCALE) as u32,
                (DISPLAY_HEIGHT * SCALE) as u32,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        let events = context.event_pump()?;

        Ok(Sdl {
            _context: context,
            canvas,
            events,
        })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Mapping lit pixels to 255 intensity and unlit ones to 0
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|lit| std::iter::repeat(if *lit { 255 } else { 0 }).take(3))
            .collect()
    }
}

impl Frontend for Sdl {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Sdl::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            buffer[..pixels.len()].copy_from_slice(&pixels);
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    // TODO play a tone through sdl2::audio instead of only logging
    fn beep(&mut self) {
        debug!("beep");
    }

    fn poll(&mut self) -> Vec<Input> {
        self.events
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(Input::Quit),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => keymap(key).map(Input::KeyDown),
                Event::KeyUp {
                    keycode: Some(key), ..
                } => keymap(key).map(Input::KeyUp),
                _ => None,
            })
            .collect()
    }
}
