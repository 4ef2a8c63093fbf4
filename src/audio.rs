use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;
use tracing::warn;

use crate::world::WorldEvent;

/// A synthesized sound effect: a short sine blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blip {
    pub frequency: f32,
    pub duration_ms: u64,
    pub volume: f32,
}

/// The blip for a world event, if it makes a sound
pub fn blip_for(event: &WorldEvent) -> Option<Blip> {
    let blip = match event {
        WorldEvent::PlayerFired => Blip {
            frequency: 880.0,
            duration_ms: 40,
            volume: 0.05,
        },
        WorldEvent::EnemyFired => Blip {
            frequency: 330.0,
            duration_ms: 40,
            volume: 0.01,
        },
        WorldEvent::EnemyDestroyed { .. } => Blip {
            frequency: 120.0,
            duration_ms: 90,
            volume: 0.08,
        },
        WorldEvent::ShipHit { .. } => Blip {
            frequency: 70.0,
            duration_ms: 250,
            volume: 0.12,
        },
        WorldEvent::GameOver(_) => Blip {
            frequency: 55.0,
            duration_ms: 600,
            volume: 0.12,
        },
        WorldEvent::RowSpawned => return None,
    };
    Some(blip)
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl AudioManager {
    /// Opens the default output device
    pub fn new() -> color_eyre::Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Opens the default output device, or returns None and keeps the game silent
    pub fn try_open() -> Option<Self> {
        match Self::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!(%err, "failed to initialize audio, continuing without sound");
                None
            }
        }
    }

    pub fn play(&self, blip: Blip) {
        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(blip.volume);
            sink.append(
                SineWave::new(blip.frequency).take_duration(Duration::from_millis(blip.duration_ms)),
            );
            sink.detach();
        }
    }

    pub fn play_events(&self, events: &[WorldEvent]) {
        for event in events {
            if let Some(blip) = blip_for(event) {
                self.play(blip);
            }
        }
    }
}
