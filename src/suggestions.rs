use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

pub const SUGGESTION_POOL: [&str; 20] = [
    "sunset", "mountains", "forest", "cityscape", "abstract",
    "vintage", "futuristic", "space", "cyberpunk", "waterfall",
    "beach", "night sky", "aurora", "rainforest", "desert",
    "ocean", "galaxy", "minimal", "vibrant", "surreal",
];

pub const VISIBLE_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: usize,
    pub text: String,
}

/// Prompt keywords floating above the input. Popping a visible one hands
/// its text to the prompt and promotes the next standby keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBoard {
    visible: Vec<Suggestion>,
    standby: VecDeque<Suggestion>,
}

impl SuggestionBoard {
    pub fn shuffled() -> Self {
        Self::shuffled_with(&mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool = SUGGESTION_POOL.to_vec();
        pool.shuffle(rng);
        Self::from_texts(pool)
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all: VecDeque<Suggestion> = texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Suggestion {
                id,
                text: text.into(),
            })
            .collect();
        let split = all.len().min(VISIBLE_SUGGESTIONS);
        let visible = all.drain(..split).collect();
        Self {
            visible,
            standby: all,
        }
    }

    pub fn visible(&self) -> &[Suggestion] {
        &self.visible
    }

    pub fn standby_len(&self) -> usize {
        self.standby.len()
    }

    /// Removes a visible suggestion and returns its text. Unknown ids leave
    /// the board unchanged.
    pub fn pop(&mut self, id: usize) -> Option<String> {
        let index = self.visible.iter().position(|s| s.id == id)?;
        let popped = self.visible.remove(index);
        if let Some(next) = self.standby.pop_front() {
            self.visible.push(next);
        }
        Some(popped.text)
    }
}
