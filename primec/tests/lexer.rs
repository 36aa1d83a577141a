use primec::grammer::lexer::Lexer;
use primec::grammer::token::{Pos, Tier, TokenKind};

fn case(code: &str, expects: Vec<TokenKind>) {
    let tokens = Lexer::new(code).parse();

    println!(" {code}");
    for token in &tokens {
        print!("\r\x1b[{}C^", token.pos.offset + 1);
    }
    println!();
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} {:?}", idx, token.kind, token.spelling);
    }

    assert_eq!(tokens.len(), expects.len());
    for (idx, expect) in expects.iter().enumerate() {
        assert_eq!(tokens[idx].kind, *expect);
    }
}

#[test]
fn tests() {
    use TokenKind::*;
    case(
        "func main() { int x := 5; return; } // sample comment",
        vec![
            KwFunc, KwMain, LParen, RParen, LCurly, KwInt, Ident, ColonEqual, Number, Semicolon,
            KwReturn, Semicolon, RCurly, Comment, Eof,
        ],
    );
    case(
        "a+=b*c%d-e/f",
        vec![
            Ident, PlusEqual, Ident, Star, Ident, Percent, Ident, Minus, Ident, Slash, Ident, Eof,
        ],
    );
    case(
        "if a<=b&&c!=d||e>f { }",
        vec![
            KwIf, Ident, LAngleEqual, Ident, AmpAmp, Ident, ExclEqual, Ident, PipePipe, Ident,
            RAngle, Ident, LCurly, RCurly, Eof,
        ],
    );
    case("", vec![Eof]);
    case("  \n\t ", vec![Eof]);
}

#[test]
fn spelling_and_position() {
    let tokens = Lexer::new("func f(int a)\n  -> int {\n}").parse();
    let arrow = &tokens[6];
    assert_eq!(arrow.kind, TokenKind::Arrow);
    assert_eq!(arrow.spelling, "->");
    assert_eq!(
        arrow.pos,
        Pos {
            offset: 16,
            row: 1,
            col: 2
        }
    );
    assert_eq!(arrow.pos.to_string(), "2:3");
    assert_eq!(tokens[4].spelling, "a");
    assert_eq!(tokens[1].pos.col, 5);
}

#[test]
fn columns_count_characters() {
    let tokens = Lexer::new("é x\n  ü := 1").parse();
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(
        tokens[1].pos,
        Pos {
            offset: 3,
            row: 0,
            col: 2
        }
    );
    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[3].kind, TokenKind::ColonEqual);
    assert_eq!((tokens[3].pos.row, tokens[3].pos.col), (1, 4));
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn iterator_ends_after_eof() {
    let kinds: Vec<_> = Lexer::new("a b").map(|token| token.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn comment_runs_to_end_of_line() {
    let tokens = Lexer::new("a // b c\nd").parse();
    assert_eq!(tokens[1].kind, TokenKind::Comment);
    assert_eq!(tokens[1].spelling, "// b c");
    assert_eq!(tokens[2].kind, TokenKind::Ident);
    assert_eq!(tokens[2].spelling, "d");
    assert_eq!(tokens[2].pos.row, 1);
}

#[test]
fn operator_tiers() {
    use TokenKind::*;
    assert_eq!(ColonEqual.tier(), Some(Tier::Assign));
    assert_eq!(PercentEqual.tier(), Some(Tier::Assign));
    assert_eq!(AmpAmp.tier(), Some(Tier::L1));
    assert_eq!(PipePipe.tier(), Some(Tier::L1));
    assert_eq!(LAngle.tier(), Some(Tier::L2));
    assert_eq!(ExclEqual.tier(), Some(Tier::L2));
    assert_eq!(Minus.tier(), Some(Tier::L3));
    assert_eq!(Percent.tier(), Some(Tier::L4));
    assert_eq!(Arrow.tier(), None);
    assert_eq!(Ident.tier(), None);
}
