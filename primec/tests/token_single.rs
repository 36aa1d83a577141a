use primec::grammer::token::{TokenKind, TokenKind::*};

fn assert(code: &str, expect: TokenKind) {
    use primec::grammer::lexer::Lexer;
    let tokens = Lexer::new(code).parse();
    assert_eq!(tokens[0].kind, expect);
    assert_eq!(tokens[0].spelling, code.trim());
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, $expect);
        }
    };
}

// ---- Double-char operators ----
case!(equal_equal, "==", EqualEqual);
case!(excl_equal, "!=", ExclEqual);
case!(langle_equal, "<=", LAngleEqual);
case!(rangle_equal, ">=", RAngleEqual);
case!(colon_equal, ":=", ColonEqual);
case!(arrow, "->", Arrow);
case!(amp_amp, "&&", AmpAmp);
case!(pipe_pipe, "||", PipePipe);
case!(plus_equal, "+=", PlusEqual);
case!(minus_equal, "-=", MinusEqual);
case!(star_equal, "*=", StarEqual);
case!(slash_equal, "/=", SlashEqual);
case!(percent_equal, "%=", PercentEqual);

// ---- Single-char operators ----
case!(plus, "+", Plus);
case!(minus, "-", Minus);
case!(star, "*", Star);
case!(slash, "/", Slash);
case!(percent, "%", Percent);
case!(langle, "<", LAngle);
case!(rangle, ">", RAngle);
case!(semicolon, ";", Semicolon);
case!(comma, ",", Comma);
case!(lparen, "(", LParen);
case!(rparen, ")", RParen);
case!(lbracket, "[", LBracket);
case!(rbracket, "]", RBracket);
case!(lcurly, "{", LCurly);
case!(rcurly, "}", RCurly);

// ---- Keywords ----
case!(kw_int, "int", KwInt);
case!(kw_bool, "bool", KwBool);
case!(kw_char, "char", KwChar);
case!(kw_array, "array", KwArray);
case!(kw_func, "func", KwFunc);
case!(kw_return, "return", KwReturn);
case!(kw_if, "if", KwIf);
case!(kw_else, "else", KwElse);
case!(kw_for, "for", KwFor);
case!(kw_main, "main", KwMain);

// ---- Literals and names ----
case!(ident, "counter", Ident);
case!(ident_underscore, "_tmp1", Ident);
case!(ident_keyword_prefix, "integer", Ident);
case!(number, "12345", Number);
case!(number_zero, "0", Number);

// ---- Special ----
case!(comment, "// note", Comment);
case!(error_bang, "!", Error);
case!(error_equal, "=", Error);
case!(error_colon, ":", Error);
case!(error_hash, "#", Error);
