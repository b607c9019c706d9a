use crate::extras::EmphasisExtras;
use crate::parser::parse;
use crate::syntax::{SyntaxKind, SyntaxNode};

fn find_first(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.descendants().find(|n| n.kind() == kind)
}

fn span_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.descendants()
        .map(|n| n.kind())
        .filter(|k| k.is_span())
        .collect()
}

fn format_tree(node: &SyntaxNode, indent: usize) -> String {
    let mut result = String::new();
    let prefix = "  ".repeat(indent);
    result.push_str(&format!("{prefix}{:?}\n", node.kind()));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => result.push_str(&format_tree(&n, indent + 1)),
            rowan::NodeOrToken::Token(t) => {
                result.push_str(&format!("{prefix}  {:?} {:?}\n", t.kind(), t.text()));
            }
        }
    }
    result
}

#[test]
fn roundtrip_preserves_text() {
    let inputs = [
        "plain text\n",
        "*em* and **strong**",
        "~~a^b^c~~",
        "***x***",
        "*a** trailing",
        "==marked== and ~~not closed",
        r"\*escaped\* ~sub~",
        "",
    ];
    for input in inputs {
        let tree = parse(input, EmphasisExtras::DEFAULT);
        assert_eq!(tree.text().to_string(), input, "Roundtrip failed for: {input:?}");
    }
}

#[test]
fn nested_spans_become_nested_nodes() {
    let tree = parse("~~a^b^c~~", EmphasisExtras::DEFAULT);
    let expected = "\
ROOT
  Strikeout
    DelimiterMarker \"~~\"
    TEXT \"a\"
    Superscript
      DelimiterMarker \"^\"
      TEXT \"b\"
      DelimiterMarker \"^\"
    TEXT \"c\"
    DelimiterMarker \"~~\"
";
    similar_asserts::assert_eq!(format_tree(&tree, 0), expected);
}

#[test]
fn partially_consumed_run_is_split() {
    let tree = parse("*a**", EmphasisExtras::DEFAULT);
    let expected = "\
ROOT
  Emphasis
    DelimiterMarker \"*\"
    TEXT \"a\"
    DelimiterMarker \"*\"
  DelimiterRun \"*\"
";
    similar_asserts::assert_eq!(format_tree(&tree, 0), expected);
}

#[test]
fn triple_star_is_emphasis_around_strong() {
    let tree = parse("***x***", EmphasisExtras::DEFAULT);
    assert_eq!(span_kinds(&tree), vec![SyntaxKind::Emphasis, SyntaxKind::Strong]);
    let strong = find_first(&tree, SyntaxKind::Strong).unwrap();
    assert_eq!(strong.text().to_string(), "**x**");
}

#[test]
fn disabled_extras_leave_plain_tokens() {
    let tree = parse("++ins++ ==mark==", EmphasisExtras::empty());
    assert!(span_kinds(&tree).is_empty());
    let runs = tree
        .children_with_tokens()
        .filter(|el| el.kind() == SyntaxKind::DelimiterRun)
        .count();
    assert_eq!(runs, 4);
}

#[test]
fn escapes_are_kept_as_tokens() {
    let tree = parse(r"\*not em\*", EmphasisExtras::DEFAULT);
    assert!(span_kinds(&tree).is_empty());
    let escapes = tree
        .children_with_tokens()
        .filter(|el| el.kind() == SyntaxKind::Escape)
        .count();
    assert_eq!(escapes, 2);
}
