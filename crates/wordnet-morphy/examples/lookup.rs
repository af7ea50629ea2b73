use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;
use wordnet_types::Pos;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(
        "usage: cargo run -p wordnet-morphy --example lookup -- <dict-dir> [--demo | <word>]",
    )?;
    let next = args.next();
    let mode = args.next();
    if mode.is_some() {
        bail!("too many arguments");
    }

    let demo_words: Vec<String> = if let Some(arg) = next {
        if arg == "--demo" {
            vec![
                "running".into(),
                "geese".into(),
                "clouds".into(),
                "forgot".into(),
                "gladder".into(),
            ]
        } else {
            vec![arg]
        }
    } else {
        bail!(
            "usage: cargo run -p wordnet-morphy --example lookup -- <dict-dir> [--demo | <word>]"
        );
    };

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;
    let morph = Morphy::load(&dict_dir)
        .with_context(|| format!("loading exceptions from {}", dict_dir.display()))?;

    println!("Dictionary: {}", dict_dir.display());

    for word in demo_words {
        println!("\nSurface: {}", word);
        for pos in [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv] {
            let forms = morph.base_forms(pos, &word, |p, lemma| wn.lemma_exists(p, lemma));
            if forms.is_empty() {
                continue;
            }
            println!("  {}:", pos);
            for form in forms {
                let senses: Vec<String> = wn
                    .synsets_for_lemma(pos, &form.lemma)
                    .iter()
                    .filter_map(|id| wn.synset_name(*id))
                    .collect();
                println!("    {:<10} [{:?}] {}", form.lemma, form.source, senses.join(", "));
            }
        }
    }

    Ok(())
}
