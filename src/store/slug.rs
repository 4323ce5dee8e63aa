//! Slug Generator Module
//!
//! Produces random identifiers for anonymously submitted buckets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// == Slug Generator ==
/// Draws fixed-length slugs uniformly from a charset.
#[derive(Debug)]
pub struct SlugGenerator {
    charset: Vec<char>,
    slug_size: usize,
    rng: StdRng,
}

impl SlugGenerator {
    // == Constructor ==
    /// Creates a generator. With `seed` set, the slug sequence is reproducible.
    ///
    /// # Panics
    /// Panics if `charset` is empty; configuration validation rejects that.
    pub fn new(charset: Vec<char>, slug_size: usize, seed: Option<u64>) -> Self {
        assert!(!charset.is_empty(), "slug charset must not be empty");
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            charset,
            slug_size,
            rng,
        }
    }

    // == Generate ==
    /// Returns a slug for which `is_taken` is false, redrawing the whole slug
    /// on every collision.
    pub fn generate<F>(&mut self, is_taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let slug = self.draw();
            if !is_taken(&slug) {
                return slug;
            }
        }
    }

    fn draw(&mut self) -> String {
        (0..self.slug_size)
            .map(|_| self.charset[self.rng.gen_range(0..self.charset.len())])
            .collect()
    }
}
