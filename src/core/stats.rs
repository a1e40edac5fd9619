use crate::env::WalkEvent;

const RECENT_WINDOW: usize = 200;

/// Running tally of finished episodes.
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    pub episodes: u32,
    pub completions: u32,
    pub collisions: u32,
    pub stops: u32,
    pub truncations: u32,
    pub total_steps: u64,
    pub longest_episode: u32,
    pub recent: Vec<bool>,
    pub first_completion_at: Option<u32>,
}

impl EpisodeStats {
    pub fn new() -> Self {
        Self {
            episodes: 0,
            completions: 0,
            collisions: 0,
            stops: 0,
            truncations: 0,
            total_steps: 0,
            longest_episode: 0,
            recent: Vec::with_capacity(RECENT_WINDOW),
            first_completion_at: None,
        }
    }

    /// Records an episode that ended with `event` after `steps` moves.
    ///
    /// Non-terminal events (`Moved`, `Ignored`) are not episode endings and
    /// are ignored.
    pub fn record_episode(&mut self, event: WalkEvent, steps: u32) {
        match event {
            WalkEvent::Completed => self.completions += 1,
            WalkEvent::Collided => self.collisions += 1,
            WalkEvent::Stopped => self.stops += 1,
            WalkEvent::Truncated => self.truncations += 1,
            WalkEvent::Moved | WalkEvent::Ignored => return,
        }

        self.episodes += 1;
        self.total_steps += steps as u64;
        self.longest_episode = self.longest_episode.max(steps);

        let completed = event == WalkEvent::Completed;
        if completed && self.first_completion_at.is_none() {
            self.first_completion_at = Some(self.episodes);
        }

        self.recent.push(completed);
        if self.recent.len() > RECENT_WINDOW {
            self.recent.remove(0);
        }
    }

    pub fn completion_rate(&self) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.completions as f32 / self.episodes as f32
        }
    }

    pub fn mean_length(&self) -> f32 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f32 / self.episodes as f32
        }
    }

    pub fn recent_rate(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let done = self.recent.iter().filter(|&&x| x).count();
        done as f32 / self.recent.len() as f32
    }

    pub fn last_100_rate(&self) -> f32 {
        let start = self.recent.len().saturating_sub(100);
        let slice = &self.recent[start..];
        if slice.is_empty() {
            return 0.0;
        }
        let done = slice.iter().filter(|&&x| x).count();
        done as f32 / slice.len() as f32
    }
}

impl Default for EpisodeStats {
    fn default() -> Self {
        Self::new()
    }
}
