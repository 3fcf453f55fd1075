use oxitex_math::ast::{BinOp, MathExpr};
use oxitex_math::{parse, tokenize, InfixOp, MathKind, MathToken};

#[test]
fn test_equation_token_stream() {
    let tokens = tokenize("\\gamma = 2+2").unwrap();
    let kinds: Vec<MathToken> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MathToken::Command,
            MathToken::Whitespace,
            MathToken::Eq,
            MathToken::Whitespace,
            MathToken::Number,
            MathToken::Plus,
            MathToken::Number,
        ]
    );
    assert_eq!(tokens[0].name(), Some("gamma"));

    let rebuilt: String = tokens.iter().map(|token| token.text).collect();
    assert_eq!(rebuilt, "\\gamma = 2+2");
}

#[test]
fn test_set_operators_nest_by_binding_power() {
    // \cap (80, 81) binds tighter than \cup (78, 79), so it grabs b and c
    // before the union wraps the result.
    let root = parse("a \\cup b \\cap c").unwrap();
    let union = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
    assert_eq!(union.op(), InfixOp::Union);
    assert_eq!(union.lhs().unwrap().as_symbol().unwrap().name(), 'a');

    let intersection = union.rhs().unwrap();
    let intersection = intersection.as_bin_op().unwrap();
    assert_eq!(intersection.op(), InfixOp::Intersection);
    assert_eq!(intersection.lhs().unwrap().as_symbol().unwrap().name(), 'b');
    assert_eq!(intersection.rhs().unwrap().as_symbol().unwrap().name(), 'c');
}

#[test]
fn test_grouped_expression_shape() {
    // 2 + (2^e * 4) => BinOp(2, +, Grouping(BinOp(BinOp(2, ^, e), *, 4)))
    let root = parse("2 + (2^e * 4)").unwrap();
    let sum = root.children[0].as_node().unwrap();
    assert_eq!(sum.kind, MathKind::BinOp);

    let sum_view = BinOp::cast(sum).unwrap();
    assert_eq!(sum_view.op(), InfixOp::Plus);
    assert_eq!(sum_view.lhs().unwrap().as_literal().unwrap().value(), Some(2));

    let grouping = sum.children[2].as_node().unwrap();
    assert_eq!(grouping.kind, MathKind::Grouping);

    let product = BinOp::cast(grouping.children[0].as_node().unwrap()).unwrap();
    assert_eq!(product.op(), InfixOp::Times);
    let power = product.lhs().unwrap();
    let power = power.as_bin_op().unwrap();
    assert_eq!(power.op(), InfixOp::Superscript);
    assert_eq!(power.lhs().unwrap().as_literal().unwrap().value(), Some(2));
    assert_eq!(power.rhs().unwrap().as_symbol().unwrap().name(), 'e');
    assert_eq!(product.rhs().unwrap().as_literal().unwrap().value(), Some(4));
}

#[test]
fn test_membership_operator() {
    let root = parse("x \\in S").unwrap();
    let binop = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
    assert_eq!(binop.op(), InfixOp::In);
}

#[test]
fn test_inequalities_share_binding_power() {
    let root = parse("a < b").unwrap();
    let binop = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
    assert_eq!(binop.op(), InfixOp::Le);
    assert_eq!(InfixOp::Le.binding_power(), InfixOp::Ge.binding_power());
    assert_eq!(InfixOp::In.binding_power(), InfixOp::Le.binding_power());
}

#[test]
fn test_grouping_is_not_an_operand_view() {
    // Coercion only covers literals, symbols, and binary operations; a
    // grouped operand is reachable through the green tree instead.
    let root = parse("2 + (3)").unwrap();
    let sum = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
    assert!(sum.rhs().is_none());
    let grouping = sum.syntax().children[2].as_node().unwrap();
    assert_eq!(grouping.kind, MathKind::Grouping);
    assert!(MathExpr::cast(&grouping.children[0]).is_some());
}

#[test]
fn test_deep_nesting() {
    let root = parse("{[(1+2)]}").unwrap();
    let mut node = root.children[0].as_node().unwrap();
    for _ in 0..3 {
        assert_eq!(node.kind, MathKind::Grouping);
        node = node.children[0].as_node().unwrap();
    }
    assert_eq!(node.kind, MathKind::BinOp);
}

#[test]
fn test_whitespace_insensitive() {
    let spaced = parse("1 + 2 * 3").unwrap();
    let dense = parse("1+2*3").unwrap();
    assert_eq!(spaced.text(), dense.text());
}

#[test]
fn test_row_separator_is_filtered() {
    // `//` lexes as a line break and is filtered as trivia, so it neither
    // terminates the expression nor reaches the tree.
    let root = parse("a + // b").unwrap();
    let binop = BinOp::cast(root.children[0].as_node().unwrap()).unwrap();
    assert_eq!(binop.op(), InfixOp::Plus);
    assert_eq!(binop.rhs().unwrap().as_symbol().unwrap().name(), 'b');
}
