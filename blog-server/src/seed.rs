//! Randomized baseline posts for local runs and tests.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John",
    "Ken", "Leslie", "Margaret", "Niklaus", "Radia", "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Hoare", "Hopper", "Kernighan", "Knuth", "Lamport", "Liskov", "Lovelace", "McCarthy",
    "Perlman", "Ritchie", "Shannon", "Thompson", "Turing", "Wirth",
];

const WORDS: &[&str] = &[
    "async", "borrow", "cache", "compiler", "daemon", "kernel", "lattice", "latency", "lifetime",
    "module", "network", "parser", "pointer", "protocol", "queue", "runtime", "schema", "signal",
    "socket", "stack", "thread", "token", "vector", "window",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn words<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> Vec<&'static str> {
    let n = rng.random_range(min..=max);
    (0..n).map(|_| pick(rng, WORDS)).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}.", capitalize(&words(rng, 5, 12).join(" ")))
}

/// Builds a post with a random author, title, body and a `created` within the past year.
pub fn fake_post<R: Rng + ?Sized>(rng: &mut R) -> Post {
    let title = words(rng, 2, 6)
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    let paragraphs = rng.random_range(1..=3);
    let content = (0..paragraphs)
        .map(|_| {
            let sentences = rng.random_range(2..=5);
            (0..sentences)
                .map(|_| sentence(rng))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Post {
        id: Uuid::new_v4(),
        author: Author::new(pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)),
        title,
        content,
        created: Utc::now() - Duration::minutes(rng.random_range(0..60 * 24 * 365)),
    }
}

pub async fn seed_posts(repo: &dyn PostRepository, count: usize) -> Result<usize, DomainError> {
    let posts = {
        let mut rng = rand::rng();
        (0..count).map(|_| fake_post(&mut rng)).collect()
    };
    repo.insert_many(posts).await
}
