use std::collections::HashSet;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use crate::errors::GenerationError;

/// Thin adapter over `fake` for the text columns of the dataset.
pub struct FakeAdapter;

impl FakeAdapter {
    pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        Name().fake_with_rng(rng)
    }

    pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
        PhoneNumber().fake_with_rng(rng)
    }

    /// Two capitalized words, e.g. `Velit Quia`.
    pub fn product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        let first: String = Word().fake_with_rng(rng);
        let second: String = Word().fake_with_rng(rng);
        format!("{} {}", capitalize(&first), capitalize(&second))
    }
}

/// Hands out emails that were never handed out before.
#[derive(Debug)]
pub struct UniqueEmails {
    seen: HashSet<String>,
    max_attempts: u32,
}

impl UniqueEmails {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            seen: HashSet::new(),
            max_attempts,
        }
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, GenerationError> {
        for _ in 0..self.max_attempts {
            let email: String = SafeEmail().fake_with_rng(rng);
            if self.seen.insert(email.clone()) {
                return Ok(email);
            }
        }
        Err(GenerationError::UniqueExhausted {
            column: "email",
            attempts: self.max_attempts,
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
