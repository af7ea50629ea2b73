use std::path::PathBuf;

use wordnet_db::WordNet;
use wordnet_morphy::{FormSource, Morphy};
use wordnet_types::Pos;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("wordnet-db")
        .join("tests")
        .join("fixtures")
        .join("wn")
}

#[test]
fn reads_exception_files_from_the_dictionary() {
    let dir = fixture_dir();
    let wn = WordNet::load(&dir).expect("load wordnet");
    let morph = Morphy::load(&dir).expect("load exceptions");
    let exists = |pos, lemma: &str| wn.lemma_exists(pos, lemma);

    let geese = morph.base_forms(Pos::Noun, "geese", exists);
    assert_eq!(geese.len(), 1);
    assert_eq!(geese[0].lemma, "goose");
    assert_eq!(geese[0].source, FormSource::Exception);

    let ran = morph.base_forms(Pos::Verb, "ran", exists);
    assert_eq!(ran[0].lemma, "run");

    let weeks = morph.base_forms(Pos::Noun, "weeks", exists);
    assert_eq!(weeks[0].lemma, "week");
    assert!(matches!(weeks[0].source, FormSource::Rule { .. }));

    assert!(morph.base_forms(Pos::Adv, "cloud", exists).is_empty());
}
