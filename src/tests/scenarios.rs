use crate::{render_digest, KeepSet, Selector, TaggedText};

fn cat_sleeps() -> TaggedText {
    TaggedText::from_pairs(&[&[("The", "DT"), ("cat", "NN"), ("sleeps", "VBZ")]])
}

#[test]
fn nouns_and_verbs_survive() {
    let filtered = Selector::default().select(&cat_sleeps(), &KeepSet::from_labels(["NN", "VBZ"]));
    assert_eq!(filtered.sentences, vec![vec![".", "cat", "sleeps"]]);
    assert_eq!(render_digest(&filtered), ". cat sleeps");
}

#[test]
fn empty_text_gives_empty_digest() {
    for keep in [KeepSet::empty(), KeepSet::essentials(), KeepSet::proper_nouns()] {
        let filtered = Selector::default().select(&TaggedText::default(), &keep);
        assert!(filtered.sentences.is_empty());
        assert_eq!(render_digest(&filtered), "");
    }
}

#[test]
fn empty_keep_set_blanks_every_token() {
    let filtered = Selector::default().select(&cat_sleeps(), &KeepSet::empty());
    assert_eq!(filtered.sentences, vec![vec![".", ".", "."]]);
}

#[test]
fn proper_noun_digest() {
    let tagged = TaggedText::from_pairs(&[
        &[("Mr.", "NNP"), ("Speaker", "NNP"), (",", ","), ("we", "PRP"), ("meet", "VBP")],
        &[("Congress", "NNP"), ("will", "MD"), ("act", "VB"), (".", ".")],
    ]);
    let filtered = Selector::default().select(&tagged, &KeepSet::proper_nouns());
    assert_eq!(render_digest(&filtered), "Mr. Speaker . . .\nCongress . . .");
}
