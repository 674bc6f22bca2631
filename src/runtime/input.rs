use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::events::ControlEvent;

/// Forward stdin lines into the control loop's inbox. End of input becomes
/// `Shutdown`.
pub fn spawn_input_thread(inbox: Sender<ControlEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if inbox.send(ControlEvent::Input(line)).is_err() {
                            debug!("control loop gone, input thread exiting");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("reading console input failed: {e}");
                        break;
                    }
                }
            }
            let _ = inbox.send(ControlEvent::Shutdown);
        })
}
