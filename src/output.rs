//! Build-log output.
//!
//! Every human-facing line goes to stderr so an invoking orchestrator keeps
//! stdout for its own plumbing. Color is applied only when stderr is a
//! terminal. Probe lines print in two halves, `checking("Checking ... ")`
//! then `probe_result(ok)`, so the `yes`/`no` verdict lands on the same line
//! once the probe has run.
//!
//! The `*_to_with_tty` variants take an explicit writer and tty flag so tests
//! can capture unstyled text; the plain-named wrappers bind them to stderr.

use console::{Color, Term, style};
use std::io::{self, Write};

fn stderr_is_tty() -> bool {
    Term::stderr().is_term()
}

/// `word`, bold in `color` when styling is on.
fn painted(word: &str, color: Color, is_tty: bool) -> String {
    if is_tty {
        style(word).bold().fg(color).to_string()
    } else {
        word.to_string()
    }
}

/// A `Label message` line opening a unit of work.
pub fn action_to_with_tty(w: &mut dyn Write, label: &str, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{} {msg}", painted(label, Color::Cyan, is_tty));
}

/// A `Label message` line closing a unit of work.
pub fn success_to_with_tty(w: &mut dyn Write, label: &str, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{} {msg}", painted(label, Color::Green, is_tty));
}

/// A `Note message` warning line.
pub fn note_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{} {msg}", painted("Note", Color::Yellow, is_tty));
}

/// An indented, dimmed detail line under the current action.
pub fn detail_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    if is_tty {
        let _ = writeln!(w, "{}", style(format!("  {msg}")).dim());
    } else {
        let _ = writeln!(w, "  {msg}");
    }
}

/// The first half of a probe line. No trailing newline; flushed so the
/// message is visible while the probe runs.
pub fn checking_to(w: &mut dyn Write, msg: &str) {
    let _ = write!(w, "{msg}");
    let _ = w.flush();
}

/// The second half of a probe line: the `yes`/`no` verdict.
pub fn probe_result_to_with_tty(w: &mut dyn Write, ok: bool, is_tty: bool) {
    let verdict = if ok {
        painted("yes", Color::Green, is_tty)
    } else {
        painted("no", Color::Red, is_tty)
    };
    let _ = writeln!(w, "{verdict}");
}

pub fn action(label: &str, msg: &str) {
    action_to_with_tty(&mut io::stderr(), label, msg, stderr_is_tty());
}

pub fn success(label: &str, msg: &str) {
    success_to_with_tty(&mut io::stderr(), label, msg, stderr_is_tty());
}

pub fn note(msg: &str) {
    note_to_with_tty(&mut io::stderr(), msg, stderr_is_tty());
}

pub fn detail(msg: &str) {
    detail_to_with_tty(&mut io::stderr(), msg, stderr_is_tty());
}

pub fn checking(msg: &str) {
    checking_to(&mut io::stderr(), msg);
}

pub fn probe_result(ok: bool) {
    probe_result_to_with_tty(&mut io::stderr(), ok, stderr_is_tty());
}
