//! RcDoc-based pretty-printer with termcolor annotations for [`Expression`].
//!
//! Role
//! - Convert an expression into an annotated document. The document never contains line
//!   breaks, so the plain rendering is the canonical single-line `Display` form.
//! - Provide colored output for terminals (TTY-aware, `color` feature) and plain strings for
//!   logs and tests.
//!
//! Layout rules
//! - Combinators join their children with ` && ` / ` || `; an `Or` inside an `And` (and vice
//!   versa) is parenthesized.
//! - A selector prints its addressing datum followed by its child: directly for symbol-led
//!   literals (`age>=18`), after a dot for word-led literals and negations
//!   (`name.startsWith("Tho")`), inside braces otherwise (`prop{>10 && <20}`).

use std::fmt;

use pretty::{FmtWrite, RcDoc};

use crate::{
    expr::{ExprView, Expression, literal::Literal, selector::Selector, variant::ExprType},
    value::Value,
};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, dots, braces
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // all, count, not, true, false, startsWith, ...
    Operator, // ==, ===, >, &&, ||
    Ident,    // keys, properties, methods, class names
    Literal,  // operand values
}

#[cfg(feature = "color")]
impl Style {
    fn to_color_spec(self) -> termcolor::ColorSpec {
        use termcolor::{Color, ColorSpec};

        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Literal => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

type Doc = RcDoc<'static, Style>;

fn styled(style: Style, s: impl Into<String>) -> Doc {
    RcDoc::text(s.into()).annotate(style)
}

fn punct(s: &'static str) -> Doc {
    styled(Style::Punct, s)
}

fn kw(s: &'static str) -> Doc {
    styled(Style::Keyword, s)
}

fn op(s: &'static str) -> Doc {
    styled(Style::Operator, s)
}

fn ident(s: impl Into<String>) -> Doc {
    styled(Style::Ident, s)
}

fn value(v: &Value) -> Doc {
    styled(Style::Literal, v.to_string())
}

fn quoted(s: &str) -> Doc {
    styled(Style::Literal, format!("\"{s}\""))
}

#[inline]
fn lparen(depth: u8) -> Doc {
    RcDoc::text("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> Doc {
    RcDoc::text(")").annotate(Style::Paren(depth))
}

/// `head(args...)`
fn call(head: Doc, args: impl IntoIterator<Item = Doc>, depth: u8) -> Doc {
    head.append(lparen(depth))
        .append(RcDoc::intersperse(args, punct(", ")))
        .append(rparen(depth))
}

fn literal_doc(literal: &Literal, depth: u8) -> Doc {
    match literal {
        Literal::Equals(v) => op("==").append(value(v)),
        Literal::NotEquals(v) => op("!=").append(value(v)),
        Literal::Same(v) => op("===").append(value(v)),
        Literal::NotSame(v) => op("!==").append(value(v)),
        Literal::GreaterThan(v) => op(">").append(value(v)),
        Literal::GreaterThanEqual(v) => op(">=").append(value(v)),
        Literal::LessThan(v) => op("<").append(value(v)),
        Literal::LessThanEqual(v) => op("<=").append(value(v)),
        Literal::In { values, .. } => call(kw("in"), values.iter().map(value), depth),
        Literal::IsEmpty => call(kw("empty"), [RcDoc::nil()], depth),
        Literal::NotEmpty => call(kw("notEmpty"), [RcDoc::nil()], depth),
        Literal::IsInstanceOf(class) => call(kw("instanceOf"), [ident(class.as_str())], depth),
        Literal::Matches(pattern) => call(kw("matches"), [quoted(pattern.as_str())], depth),
        Literal::StartsWith(s) => call(kw("startsWith"), [quoted(s)], depth),
        Literal::EndsWith(s) => call(kw("endsWith"), [quoted(s)], depth),
        Literal::Contains(s) => call(kw("contains"), [quoted(s)], depth),
        Literal::KeyExists(key) => call(kw("keyExists"), [value(&key.to_value())], depth),
        Literal::KeyNotExists(key) => call(kw("keyNotExists"), [value(&key.to_value())], depth),
    }
}

/// Whether the rendering of a node of this type starts with a letter.
fn starts_with_word(ty: ExprType) -> bool {
    use ExprType::*;

    matches!(
        ty,
        In | IsEmpty
            | NotEmpty
            | IsInstanceOf
            | Matches
            | StartsWith
            | EndsWith
            | Contains
            | KeyExists
            | KeyNotExists
            | Not
    )
}

/// Child of a `Key`/`Property`/`Method` selector.
fn addressed_child_doc(inner: &Expression, depth: u8) -> Doc {
    let ty = inner.type_();
    if ty.is_literal() || ty == ExprType::Not {
        let doc = to_doc_with_depth(inner, None, depth);
        if starts_with_word(ty) {
            punct(".").append(doc)
        } else {
            doc
        }
    } else {
        punct("{")
            .append(to_doc_with_depth(inner, None, depth))
            .append(punct("}"))
    }
}

fn selector_doc(selector: &Selector, depth: u8) -> Doc {
    let child = || to_doc_with_depth(selector.inner(), None, depth.wrapping_add(1));
    let count = |n: usize| styled(Style::Literal, n.to_string());

    match selector {
        Selector::Key { key, inner } => {
            ident(key.to_string()).append(addressed_child_doc(inner, depth))
        }
        Selector::Property { name, inner } => {
            ident(name.as_str()).append(addressed_child_doc(inner, depth))
        }
        Selector::Method { name, args, inner } => {
            call(ident(name.as_str()), args.iter().map(value), depth)
                .append(addressed_child_doc(inner, depth))
        }
        Selector::Count(_) => call(kw("count"), [child()], depth),
        Selector::All(_) => call(kw("all"), [child()], depth),
        Selector::AtLeast { count: n, .. } => call(kw("atLeast"), [count(*n), child()], depth),
        Selector::AtMost { count: n, .. } => call(kw("atMost"), [count(*n), child()], depth),
        Selector::Exactly { count: n, .. } => call(kw("exactly"), [count(*n), child()], depth),
    }
}

/// Join the children of a combinator, parenthesizing the opposite combinator.
fn junction_doc(children: &[Expression], parent: ExprType, sep: &'static str, depth: u8) -> Doc {
    RcDoc::intersperse(
        children
            .iter()
            .map(|child| to_doc_with_depth(child, Some(parent), depth)),
        RcDoc::space().append(op(sep)).append(RcDoc::space()),
    )
}

#[inline]
fn requires_parens(current: ExprType, parent: Option<ExprType>) -> bool {
    matches!(
        (parent, current),
        (Some(ExprType::And), ExprType::Or) | (Some(ExprType::Or), ExprType::And)
    )
}

/// Depth-aware builder that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Expression, parent: Option<ExprType>, depth: u8) -> Doc {
    if requires_parens(e.type_(), parent) {
        return lparen(depth)
            .append(to_doc_with_depth(e, None, depth.wrapping_add(1)))
            .append(rparen(depth));
    }

    match e.view() {
        ExprView::Literal(literal) => literal_doc(literal, depth),
        ExprView::Selector(selector) => selector_doc(selector, depth),
        ExprView::Not(inner) => call(
            kw("not"),
            [to_doc_with_depth(inner, None, depth.wrapping_add(1))],
            depth,
        ),
        ExprView::And(children) => junction_doc(children, ExprType::And, "&&", depth),
        ExprView::Or(children) => junction_doc(children, ExprType::Or, "||", depth),
        ExprView::True => kw("true"),
        ExprView::False => kw("false"),
    }
}

#[cfg(feature = "color")]
mod color {
    use std::io::{self, Write};

    use pretty::{RcDoc, RenderAnnotated};
    use termcolor::{ColorChoice, StandardStream, WriteColor};

    use super::Style;

    // A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
    struct ColorWriter<'w, W: WriteColor + Write> {
        out: &'w mut W,
    }

    impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
        fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
            self.out.set_color(&ann.to_color_spec())
        }
        fn pop_annotation(&mut self) -> io::Result<()> {
            self.out.reset()
        }
    }

    impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
        type Error = io::Error;
        fn write_str(&mut self, s: &str) -> io::Result<usize> {
            self.out.write_all(s.as_bytes())?;
            Ok(s.len())
        }
        fn write_str_all(&mut self, s: &str) -> io::Result<()> {
            self.out.write_all(s.as_bytes())
        }
        fn fail_doc(&self) -> Self::Error {
            io::Error::other("render failed")
        }
    }

    /// Render a document to a `termcolor::WriteColor` with width-aware layout.
    pub(super) fn render_to<W: WriteColor + Write>(
        doc: &RcDoc<'_, Style>,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let mut cw = ColorWriter { out };
        doc.render_raw(width, &mut cw)
    }

    /// Print to stdout with colors if supported, followed by a newline.
    pub(super) fn print_colored(doc: &RcDoc<'_, Style>, width: usize) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        render_to(doc, width, &mut stdout)?;
        writeln!(stdout)
    }

    /// Width of the terminal, or 80 if it cannot be determined.
    pub(super) fn terminal_width() -> usize {
        term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
    }
}

/// Pretty-printing conveniences for [`Expression`].
pub trait PrettyExpr {
    /// Build an RcDoc representation of this expression with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render this expression with colors to any termcolor writer at the given width.
    #[cfg(feature = "color")]
    fn pretty_render_to<W: termcolor::WriteColor + std::io::Write>(
        &self,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()>;

    /// Print this expression to stdout with colors (TTY-aware), at auto-detected width.
    #[cfg(feature = "color")]
    fn pretty_print(&self) -> std::io::Result<()>;

    /// Format this expression into a plain string (no colors).
    fn pretty_string(&self) -> String;
}

impl PrettyExpr for Expression {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, None, 0)
    }

    #[cfg(feature = "color")]
    #[inline]
    fn pretty_render_to<W: termcolor::WriteColor + std::io::Write>(
        &self,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        color::render_to(&self.pretty_doc(), width, out)
    }

    #[cfg(feature = "color")]
    #[inline]
    fn pretty_print(&self) -> std::io::Result<()> {
        color::print_colored(&self.pretty_doc(), color::terminal_width())
    }

    #[inline]
    fn pretty_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        literal_doc(self, 0).render_raw(80, &mut w)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        selector_doc(self, 0).render_raw(80, &mut w)
    }
}
