use std::env;
use std::sync::Arc;
use std::sync::mpsc;

use log::info;

use crate::audio::RodioTransport;
use crate::events::ControlEvent;
use crate::library::Catalog;
use crate::notify::ConsoleNotifier;
use crate::player::Player;

mod event_loop;
mod input;
mod settings;

pub use event_loop::{ControlLoop, Flow};


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();

    let mut print_config = false;
    for arg in env::args().skip(1) {
        if arg == "--print-config" {
            print_config = true;
        } else {
            settings.library.root = arg;
        }
    }

    if print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let catalog = Catalog::new(&settings.library.root, settings.library.clone());
    info!("music folder: {}", catalog.root().display());

    let (inbox_tx, inbox_rx) = mpsc::channel::<ControlEvent>();
    let transport = RodioTransport::new(settings.audio.clone());
    let player = Player::new(catalog, transport, inbox_tx.clone(), &settings.playback);
    let notifier = Arc::new(ConsoleNotifier::new());

    let _input = input::spawn_input_thread(inbox_tx)?;

    let mut control = ControlLoop::new(player, Arc::clone(&notifier), &settings);
    println!("tuneloop ready. Type help for commands.");
    control.run(&inbox_rx);

    control.player().transport().shutdown();
    Ok(())
}
