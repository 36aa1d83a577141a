use crate::grammer::token::Pos;
use color_print::cprintln;

#[derive(Debug)]
pub struct Msg<'a> {
    kind: MsgKind,
    msg: String,
    at: Option<Source<'a>>,
}

#[derive(Debug)]
enum MsgKind {
    Error,
    Warn,
    Note,
}

#[derive(Debug)]
struct Source<'a> {
    file: &'a str,
    code: &'a str,
    pos: Pos,
}

impl<'a> Msg<'a> {
    pub fn error(msg: String) -> Self {
        Msg {
            kind: MsgKind::Error,
            msg,
            at: None,
        }
    }
    pub fn warn(msg: String) -> Self {
        Msg {
            kind: MsgKind::Warn,
            msg,
            at: None,
        }
    }
    pub fn note(msg: String) -> Self {
        Msg {
            kind: MsgKind::Note,
            msg,
            at: None,
        }
    }

    /// Attach the source line at `pos`.
    pub fn at(self, file: &'a str, code: &'a str, pos: Pos) -> Self {
        Msg {
            at: Some(Source { file, code, pos }),
            ..self
        }
    }
}

impl Msg<'_> {
    pub fn print(&self) {
        match self.kind {
            MsgKind::Error => cprintln!("<red,bold>error</>: {}", self.msg),
            MsgKind::Warn => cprintln!("<yellow,bold>warn</>: {}", self.msg),
            MsgKind::Note => cprintln!("<green,bold>note</>: {}", self.msg),
        }
        if let Some(Source { file, code, pos }) = &self.at {
            let line = code.lines().nth(pos.row).unwrap_or_default();
            cprintln!("     <blue>--></> <underline>{}:{}</>", file, pos);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", pos.row + 1, line);
            cprintln!("      <blue>|</> {}<red,bold>^</>", " ".repeat(pos.col));
        }
    }
}

pub fn dump(msgs: &[Msg]) {
    for msg in msgs {
        msg.print();
    }
}
