use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordnet_db::{LoadMode, WordNet};
use wordnet_types::{HYPERNYM, HYPONYM, Pos};

fn main() -> Result<()> {
    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wordnet-db --example stats -- <path-to-wordnet-dir>")?;

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    let mut word_count = 0usize;
    let mut hypernym_links = 0usize;
    let mut hyponym_links = 0usize;
    let mut gloss_example_count = 0usize;
    let mut missing_definitions = 0usize;

    for syn in wn.iter_synsets() {
        word_count += syn.words.len();
        hypernym_links += syn.targets(HYPERNYM).count();
        hyponym_links += syn.targets(HYPONYM).count();
        gloss_example_count += syn.gloss.examples.len();
        if syn.gloss.definition.is_empty() {
            missing_definitions += 1;
        }
    }

    println!("Dictionary: {}", dict_dir.display());
    println!("Lemma keys   : {}", wn.lemma_count());
    println!("Synsets      : {}", wn.synset_count());
    println!("Words in synsets: {}", word_count);
    println!("Hypernym links: {}", hypernym_links);
    println!("Hyponym links : {}", hyponym_links);
    println!("Gloss examples: {}", gloss_example_count);
    println!("Synsets without definition: {}", missing_definitions);

    for (pos, lemma) in [(Pos::Noun, "cloud"), (Pos::Verb, "forget")] {
        let names: Vec<String> = wn
            .synsets_for_lemma(pos, lemma)
            .iter()
            .filter_map(|id| wn.synset_name(*id))
            .collect();
        println!("Senses of '{}' ({}): {:?}", lemma, pos, names);
    }

    Ok(())
}
