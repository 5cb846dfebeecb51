//! Score/lives display and the game-over panel

/// Push-based display of run statistics
pub trait Hud {
    /// Score or lives changed
    fn set_stats(&mut self, score: u64, lives: i32);
    /// The run ended with this score
    fn show_game_over(&mut self, final_score: u64);
    /// A new run started
    fn hide_game_over(&mut self);
}

/// Writes HUD changes to the log (native builds)
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn set_stats(&mut self, score: u64, lives: i32) {
        log::info!("Score: {}  Lives: {}", score, lives);
    }

    fn show_game_over(&mut self, final_score: u64) {
        log::info!("GAME OVER - final score {}", final_score);
    }

    fn hide_game_over(&mut self) {
        log::info!("New run");
    }
}
