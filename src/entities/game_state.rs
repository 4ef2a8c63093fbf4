#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// The front enemy row reached the ship's line
    Overrun,
    /// An enemy shot landed with no lives to spare
    ShipDestroyed,
}

impl GameOver {
    pub fn get_message(&self) -> &'static str {
        match self {
            GameOver::Overrun => "The invaders broke through your line",
            GameOver::ShipDestroyed => "Your last ship was shot down",
        }
    }
}
