//! Live MIDI input: picks a port, parses note messages in the midir callback
//! and forwards them to the render thread over a channel.

use anyhow::{anyhow, Result};
use keyfall_core::NoteMessage;
use midir::{Ignore, MidiInput, MidiInputConnection};
use std::sync::mpsc::{channel, Receiver};

/// An open MIDI connection. The connection closes when this is dropped.
pub struct MidiHandle {
    pub rx: Receiver<NoteMessage>,
    _conn: MidiInputConnection<()>,
}

/// Connect to a MIDI input port. With `preferred` set, the first port whose
/// name contains it wins; otherwise the first available port is used.
pub fn connect(preferred: Option<&str>) -> Result<MidiHandle> {
    let mut midi_in = MidiInput::new("keyfall")?;
    midi_in.ignore(Ignore::All);

    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err(anyhow!("no MIDI input ports available"));
    }
    let port = match preferred {
        Some(name) => ports
            .iter()
            .find(|p| midi_in.port_name(p).is_ok_and(|n| n.contains(name)))
            .ok_or_else(|| anyhow!("no MIDI port matching {name:?}"))?,
        None => &ports[0],
    };
    let name = midi_in.port_name(port)?;

    let (tx, rx) = channel();
    let conn = midi_in
        .connect(
            port,
            "keyfall-input",
            move |_stamp, msg, _| {
                if let Some(ev) = NoteMessage::parse(msg) {
                    tx.send(ev).ok();
                }
            },
            (),
        )
        .map_err(|e| anyhow!("connect {name}: {e}"))?;

    log::info!("listening on MIDI port {name}");
    Ok(MidiHandle { rx, _conn: conn })
}
