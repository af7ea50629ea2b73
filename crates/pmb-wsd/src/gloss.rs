use crate::inventory::{Relation, Sense, SenseInventory};

/// Which neighbouring senses contribute their glosses to a context string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextOptions {
    pub hyponyms: bool,
    pub hypernyms: bool,
    /// Other hyponyms of the sense's hypernyms.
    pub siblings: bool,
}

/// Join the gloss of `sense`, and of the neighbours selected by `options`,
/// into one sentence-like string.
///
/// Each definition and example is a fragment; fragments are joined with
/// `". "` and closed with a final `"."`. A sense without any gloss text and
/// without contributing neighbours yields an empty string.
pub fn gloss_context<I>(inventory: &I, sense: &Sense, options: ContextOptions) -> String
where
    I: SenseInventory + ?Sized,
{
    let mut fragments = Vec::new();
    push_gloss(&mut fragments, sense);

    if options.hyponyms {
        for hyponym in inventory.related(sense, Relation::Narrower) {
            push_gloss(&mut fragments, &hyponym);
        }
    }
    if options.hypernyms {
        for hypernym in inventory.related(sense, Relation::Broader) {
            push_gloss(&mut fragments, &hypernym);
        }
    }
    if options.siblings {
        for hypernym in inventory.related(sense, Relation::Broader) {
            for sibling in inventory.related(&hypernym, Relation::Narrower) {
                if sibling.name != sense.name {
                    push_gloss(&mut fragments, &sibling);
                }
            }
        }
    }

    if fragments.is_empty() {
        String::new()
    } else {
        format!("{}.", fragments.join(". "))
    }
}

fn push_gloss(fragments: &mut Vec<String>, sense: &Sense) {
    let (definition, examples) = sense.gloss_text();
    fragments.extend(definition.map(str::to_string));
    fragments.extend(examples.iter().cloned());
}
