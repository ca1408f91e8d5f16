use std::io::{self, BufRead, Write};

use services::{QuizSession, SessionView};

use crate::render::Prompt;

enum Step<A> {
    Answer(A),
    Advance,
    Restart,
    Quit,
    Retry,
}

/// Read one trimmed line; `None` on end of input.
fn read_line(input: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn write_header<C: Prompt>(out: &mut dyn Write, view: &SessionView<'_, C>) -> io::Result<()> {
    let progress = view.progress;
    writeln!(out)?;
    writeln!(
        out,
        "== {} | case {} of {} | {} remaining ==",
        view.topic.title(),
        view.number,
        progress.total,
        progress.remaining
    )
}

/// Drive one playground from line-based input until the player quits or the
/// input ends. Progress is saved by the session on every step.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `out`.
pub fn play<C: Prompt>(
    session: &mut QuizSession<C>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> io::Result<()> {
    if !session.is_persistent() {
        writeln!(out, "(progress is kept for this run only)")?;
    }

    loop {
        let step = {
            let view = session.view();
            match view.case {
                None => {
                    writeln!(out)?;
                    writeln!(
                        out,
                        "You have seen all {} cases in {}.",
                        view.progress.total,
                        view.topic.title()
                    )?;
                    write!(out, "[r]estart or [q]uit: ")?;
                    out.flush()?;
                    match read_line(input)?.as_deref() {
                        None | Some("q") => Step::Quit,
                        Some("r") => Step::Restart,
                        Some(_) => Step::Retry,
                    }
                }
                Some(case) if !view.revealed => {
                    write_header(out, &view)?;
                    case.render_case(out)?;
                    write!(out, "Your answer ({}), r to restart, q to quit: ", case.answer_hint())?;
                    out.flush()?;
                    match read_line(input)?.as_deref() {
                        None | Some("q") => Step::Quit,
                        Some("r") => Step::Restart,
                        Some(raw) => match case.parse_answer(raw) {
                            Some(answer) => Step::Answer(answer),
                            None => {
                                writeln!(out, "Not one of the choices: {raw}")?;
                                Step::Retry
                            }
                        },
                    }
                }
                Some(case) => {
                    writeln!(out)?;
                    case.render_reveal(view.selected, view.verdict, out)?;
                    writeln!(out)?;
                    write!(out, "[n]ext, [r]estart or [q]uit: ")?;
                    out.flush()?;
                    match read_line(input)?.as_deref() {
                        None | Some("q") => Step::Quit,
                        Some("r") => Step::Restart,
                        Some("" | "n") => Step::Advance,
                        Some(_) => Step::Retry,
                    }
                }
            }
        };

        match step {
            Step::Answer(answer) => {
                session.reveal(answer);
            }
            Step::Advance => {
                session.advance();
            }
            Step::Restart => {
                session.restart();
                writeln!(out, "Restarted with a fresh shuffle.")?;
            }
            Step::Quit => return Ok(()),
            Step::Retry => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use playground_core::{Case, Catalog};
    use services::Playgrounds;
    use storage::{InMemoryStore, KeyValueStore, UnavailableStore};

    use super::*;

    fn playgrounds(store: Arc<dyn KeyValueStore>) -> Playgrounds {
        Playgrounds::open_seeded(Catalog::builtin().unwrap(), store, 11)
    }

    fn run<C: Prompt>(session: &mut QuizSession<C>, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        play(session, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn answering_reveals_and_next_advances() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut all = playgrounds(store);
        let session = all.bug_spotting_mut();
        let first = session.current().case().map(|c| c.id().clone()).unwrap();
        let answer = session
            .current()
            .case()
            .map(|c| c.correct_answer.clone())
            .unwrap();

        let text = run(session, &format!("{answer}\nn\nq\n"));

        assert!(text.contains("case 1 of 10"));
        assert!(text.contains("Correct!"));
        assert!(text.contains("case 2 of 10"));
        // The second case is on screen but not yet answered.
        assert_eq!(session.shown_count(), 1);
        assert_ne!(session.current().case().map(|c| c.id().clone()), Some(first));
    }

    #[test]
    fn bad_answer_is_asked_again() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut all = playgrounds(store);
        let session = all.api_decoder_mut();

        let text = run(session, "perhaps\n");

        assert!(text.contains("Not one of the choices: perhaps"));
        assert!(!session.is_revealed());
        assert_eq!(session.shown_count(), 0);
    }

    #[test]
    fn full_cycle_reaches_completion_and_restarts() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut all = playgrounds(store);
        let session = all.bug_report_mut();

        // Enter reveals, then Enter advances, ten times over.
        let mut script = "\n\n".repeat(10);
        script.push_str("r\nq\n");
        let text = run(session, &script);

        assert!(text.contains("You have seen all 10 cases in Write the Better Bug"));
        assert!(text.contains("Restarted with a fresh shuffle."));
        assert_eq!(session.shown_count(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn end_of_input_quits() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let mut all = playgrounds(store);
        let text = run(all.prediction_mut(), "");
        assert!(text.contains("case 1 of 10"));
    }

    #[test]
    fn memory_only_sessions_say_so() {
        let mut all = playgrounds(Arc::new(UnavailableStore));
        let text = run(all.prediction_mut(), "q\n");
        assert!(text.starts_with("(progress is kept for this run only)"));
    }
}
