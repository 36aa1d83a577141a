use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            spelling: spelling.into(),
            pos,
        }
    }

    /// Spelling as shown in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", self.spelling),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Double character tokens
    EqualEqual,   // '=='
    ExclEqual,    // '!='
    LAngleEqual,  // '<='
    RAngleEqual,  // '>='
    ColonEqual,   // ':='
    Arrow,        // '->'
    AmpAmp,       // '&&'
    PipePipe,     // '||'
    PlusEqual,    // '+='
    MinusEqual,   // '-='
    StarEqual,    // '*='
    SlashEqual,   // '/='
    PercentEqual, // '%='

    // Single character tokens
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    Percent,   // '%'
    LAngle,    // '<'
    RAngle,    // '>'
    Semicolon, // ';'
    Comma,     // ','
    LParen,    // '('
    RParen,    // ')'
    LBracket,  // '['
    RBracket,  // ']'
    LCurly,    // '{'
    RCurly,    // '}'

    // Keywords
    KwInt,    // "int"
    KwBool,   // "bool"
    KwChar,   // "char"
    KwArray,  // "array"
    KwFunc,   // "func"
    KwReturn, // "return"
    KwIf,     // "if"
    KwElse,   // "else"
    KwFor,    // "for"
    KwMain,   // "main"

    Ident,
    Number,

    // Special
    Comment,
    Error,
    Eof,
}

/// Operator precedence tiers, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Assign,
    L1,
    L2,
    L3,
    L4,
}

impl TokenKind {
    pub fn tier(&self) -> Option<Tier> {
        use TokenKind::*;
        match self {
            ColonEqual | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual => {
                Some(Tier::Assign)
            }
            AmpAmp | PipePipe => Some(Tier::L1),
            EqualEqual | ExclEqual | LAngle | LAngleEqual | RAngle | RAngleEqual => Some(Tier::L2),
            Plus | Minus => Some(Tier::L3),
            Star | Slash | Percent => Some(Tier::L4),
            _ => None,
        }
    }

    /// Fixed spelling, for kinds that have one.
    pub fn spelling(&self) -> Option<&'static str> {
        use TokenKind::*;
        let spelling = match self {
            EqualEqual => "==",
            ExclEqual => "!=",
            LAngleEqual => "<=",
            RAngleEqual => ">=",
            ColonEqual => ":=",
            Arrow => "->",
            AmpAmp => "&&",
            PipePipe => "||",
            PlusEqual => "+=",
            MinusEqual => "-=",
            StarEqual => "*=",
            SlashEqual => "/=",
            PercentEqual => "%=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            LAngle => "<",
            RAngle => ">",
            Semicolon => ";",
            Comma => ",",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LCurly => "{",
            RCurly => "}",
            KwInt => "int",
            KwBool => "bool",
            KwChar => "char",
            KwArray => "array",
            KwFunc => "func",
            KwReturn => "return",
            KwIf => "if",
            KwElse => "else",
            KwFor => "for",
            KwMain => "main",
            Ident | Number | Comment | Error | Eof => return None,
        };
        Some(spelling)
    }

    /// What a token of this kind is called in diagnostics.
    pub fn describe(&self) -> String {
        if let Some(spelling) = self.spelling() {
            return format!("'{}'", spelling);
        }
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Number => "integer literal",
            TokenKind::Comment => "comment",
            TokenKind::Error => "invalid character",
            _ => "end of file",
        }
        .to_string()
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt | TokenKind::KwBool | TokenKind::KwChar | TokenKind::KwArray
        )
    }
}

pub fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    use TokenKind::*;
    match (ch0, ch1) {
        ('=', '=') => Some(EqualEqual),
        ('!', '=') => Some(ExclEqual),
        ('<', '=') => Some(LAngleEqual),
        ('>', '=') => Some(RAngleEqual),
        (':', '=') => Some(ColonEqual),
        ('-', '>') => Some(Arrow),
        ('&', '&') => Some(AmpAmp),
        ('|', '|') => Some(PipePipe),
        ('+', '=') => Some(PlusEqual),
        ('-', '=') => Some(MinusEqual),
        ('*', '=') => Some(StarEqual),
        ('/', '=') => Some(SlashEqual),
        ('%', '=') => Some(PercentEqual),
        _ => None,
    }
}

pub fn single_char_token(ch: char) -> Option<TokenKind> {
    use TokenKind::*;
    match ch {
        '+' => Some(Plus),
        '-' => Some(Minus),
        '*' => Some(Star),
        '/' => Some(Slash),
        '%' => Some(Percent),
        '<' => Some(LAngle),
        '>' => Some(RAngle),
        ';' => Some(Semicolon),
        ',' => Some(Comma),
        '(' => Some(LParen),
        ')' => Some(RParen),
        '[' => Some(LBracket),
        ']' => Some(RBracket),
        '{' => Some(LCurly),
        '}' => Some(RCurly),
        _ => None,
    }
}

pub fn keyword(s: &str) -> Option<TokenKind> {
    use TokenKind::*;
    match s {
        "int" => Some(KwInt),
        "bool" => Some(KwBool),
        "char" => Some(KwChar),
        "array" => Some(KwArray),
        "func" => Some(KwFunc),
        "return" => Some(KwReturn),
        "if" => Some(KwIf),
        "else" => Some(KwElse),
        "for" => Some(KwFor),
        "main" => Some(KwMain),
        _ => None,
    }
}

/// Source position: byte offset plus 0-based row and column (in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}
