//! In-place Fisher-Yates shuffling and random picks for slices.

use fastrand::Rng;

pub trait ShuffleExt {
    type Item;

    /// Shuffle with a fresh random generator.
    fn shuffle(&mut self);

    /// Shuffle with the given generator. Same seed, same order.
    fn shuffle_with(&mut self, rng: &mut Rng);

    /// A random element, or `None` when empty.
    fn choose(&self) -> Option<&Self::Item>;

    fn choose_with(&self, rng: &mut Rng) -> Option<&Self::Item>;

    /// A random element cloned out; the default value when empty.
    /// A single element is returned without touching the generator.
    fn choose_or_default(&self) -> Self::Item
    where
        Self::Item: Clone + Default;
}

impl<T> ShuffleExt for [T] {
    type Item = T;

    fn shuffle(&mut self) {
        self.shuffle_with(&mut Rng::new());
    }

    fn shuffle_with(&mut self, rng: &mut Rng) {
        for i in (1..self.len()).rev() {
            let j = rng.usize(..=i);
            self.swap(i, j);
        }
    }

    fn choose(&self) -> Option<&T> {
        self.choose_with(&mut Rng::new())
    }

    fn choose_with(&self, rng: &mut Rng) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.get(rng.usize(..self.len()))
    }

    fn choose_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        match self {
            [] => T::default(),
            [only] => only.clone(),
            _ => self.choose().cloned().unwrap_or_default(),
        }
    }
}
