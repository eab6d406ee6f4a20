use rand::RngCore;
use rand_distr::{Distribution, Poisson, Zipf};

/// Name of the word with a given index
pub fn word_name(word_ix: u64) -> String {
    format!("w{}", word_ix)
}

/// Creates a random document
///
/// Words are drawn (with replacement) following a Zipf law, so that some
/// words appear several times in the same document.
pub fn create_document(
    lambda_words: f32,
    max_words: usize,
    vocabulary_size: usize,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let poi = Poisson::new(lambda_words).unwrap();
    let num_words = (1 + poi.sample(rng) as usize).min(max_words);

    let zipf = Zipf::new(vocabulary_size as u64, 1.1).unwrap();
    (0..num_words)
        .map(|_| word_name(zipf.sample(rng) as u64 - 1))
        .collect()
}
