use std::error::Error;
use std::fs;

use clap::Parser;
use env_logger::Env;
use log::error;
use octet_core::{Chip8, Event};

use crate::cli::Args;
use crate::frontend::Frontend;
use crate::terminal::Terminal;

mod cli;
mod frontend;
mod run;
mod scheduler;
#[cfg(feature = "sdl")]
mod sdl;
mod terminal;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = try_main(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn try_main(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new(args.config());

    // Load ROM
    let event = match fs::read(&args.rom) {
        Ok(program) => Event::ProgramLoaded(program),
        Err(e) => Event::ProgramLoadFailed(format!("{}: {}", args.rom.display(), e)),
    };
    let effects = chip8.handle(event)?;

    let mut frontend = frontend(args)?;
    run::run(&mut chip8, frontend.as_mut(), effects, &args.run_options())
}

#[cfg(feature = "sdl")]
fn frontend(args: &Args) -> Result<Box<dyn Frontend>, Box<dyn Error>> {
    if args.sdl {
        Ok(Box::new(sdl::Sdl::new()?))
    } else {
        Ok(Box::new(Terminal::new()))
    }
}

#[cfg(not(feature = "sdl"))]
fn frontend(_args: &Args) -> Result<Box<dyn Frontend>, Box<dyn Error>> {
    Ok(Box::new(Terminal::new()))
}
