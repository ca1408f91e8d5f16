use std::io::{self, Write};

use playground_core::model::{
    ApiCase, ApiResponse, ApiVerdict, BugReportCase, BugSpottingCase, PredictionCase,
};
use playground_core::{Case, Verdict};

/// Terminal presentation of one kind of case.
pub trait Prompt: Case {
    /// Draw the case before an answer is given.
    fn render_case(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Short hint of what the player may type.
    fn answer_hint(&self) -> String;

    /// Map a line of input to an answer, `None` if it names no choice.
    fn parse_answer(&self, input: &str) -> Option<Self::Answer>;

    /// Draw the explanation after reveal.
    fn render_reveal(
        &self,
        selected: Option<&Self::Answer>,
        verdict: Option<Verdict>,
        out: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Resolve `input` against option ids, accepting either the id itself
/// (case-insensitive) or its 1-based number.
fn pick<'a>(input: &str, ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let ids: Vec<&str> = ids.into_iter().collect();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| ids.get(i).copied());
    }
    ids.into_iter().find(|id| id.eq_ignore_ascii_case(input))
}

fn write_verdict(out: &mut dyn Write, verdict: Option<Verdict>) -> io::Result<()> {
    match verdict {
        Some(Verdict::Correct) => writeln!(out, "Correct!"),
        Some(Verdict::Incorrect) => writeln!(out, "Not quite."),
        None => Ok(()),
    }
}

fn status_class(response: &ApiResponse) -> &'static str {
    if response.is_success() {
        "success"
    } else if response.is_client_error() {
        "client error"
    } else if response.status >= 500 {
        "server error"
    } else {
        "other"
    }
}

fn write_response(out: &mut dyn Write, label: &str, response: &ApiResponse) -> io::Result<()> {
    writeln!(
        out,
        "{label}: {} {} ({})",
        response.status,
        response.status_text,
        status_class(response)
    )?;
    for line in response.body.lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

impl Prompt for BugSpottingCase {
    fn render_case(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out)?;
        for line in &self.screen {
            writeln!(out, "  | {line}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.question)?;
        for option in &self.options {
            match &option.icon {
                Some(icon) => writeln!(out, "  {}) {icon} {}", option.id, option.label)?,
                None => writeln!(out, "  {}) {}", option.id, option.label)?,
            }
        }
        Ok(())
    }

    fn answer_hint(&self) -> String {
        self.options
            .iter()
            .map(|option| option.id.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn parse_answer(&self, input: &str) -> Option<String> {
        pick(input, self.options.iter().map(|option| option.id.as_str())).map(str::to_owned)
    }

    fn render_reveal(
        &self,
        selected: Option<&String>,
        verdict: Option<Verdict>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        write_verdict(out, verdict)?;
        if verdict == Some(Verdict::Incorrect) {
            if let Some(chosen) = selected.and_then(|id| self.option(id)) {
                writeln!(out, "You picked: {}", chosen.label)?;
            }
            if let Some(correct) = self.correct_option() {
                writeln!(out, "Answer: {}", correct.label)?;
            }
        }
        let explanation = &self.explanation;
        writeln!(out)?;
        writeln!(out, "{}", explanation.summary)?;
        writeln!(out, "{}", explanation.details)?;
        writeln!(
            out,
            "Severity: {}  Priority: {}",
            explanation.severity, explanation.priority
        )?;
        writeln!(out, "Why it matters: {}", explanation.why_it_matters)?;
        writeln!(
            out,
            "Bug type: {}  Skills: {}",
            self.meta.bug_type,
            self.meta.skills.join(", ")
        )
    }
}

impl Prompt for PredictionCase {
    fn render_case(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out)?;
        writeln!(out, "{}", self.scenario)?;
        writeln!(out)?;
        writeln!(out, "What happens next?")?;
        for (i, option) in self.options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, option.label)?;
        }
        Ok(())
    }

    fn answer_hint(&self) -> String {
        format!("1-{}", self.options.len())
    }

    fn parse_answer(&self, input: &str) -> Option<String> {
        pick(input, self.options.iter().map(|option| option.id.as_str())).map(str::to_owned)
    }

    fn render_reveal(
        &self,
        _selected: Option<&String>,
        verdict: Option<Verdict>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        write_verdict(out, verdict)?;
        for option in self.options.iter().filter(|option| option.is_correct) {
            writeln!(out, "Answer: {}", option.label)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.explanation)?;
        writeln!(out, "Impact: {}", self.impact)?;
        writeln!(out, "Best practice:")?;
        for item in &self.best_practice {
            writeln!(out, "  - {item}")?;
        }
        writeln!(out, "Takeaway: {}", self.teaching_highlight)
    }
}

impl Prompt for ApiCase {
    fn render_case(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out)?;
        writeln!(out, "Request: {} {}", self.request.method, self.request.endpoint)?;
        for line in self.request.body.lines() {
            writeln!(out, "    {line}")?;
        }
        write_response(out, "Response", &self.response)?;
        writeln!(out)?;
        writeln!(out, "{}", self.question)?;
        for (i, verdict) in ApiVerdict::ALL.iter().enumerate() {
            writeln!(out, "  {}) {verdict}", i + 1)?;
        }
        Ok(())
    }

    fn answer_hint(&self) -> String {
        ApiVerdict::ALL.map(ApiVerdict::as_str).join("/")
    }

    fn parse_answer(&self, input: &str) -> Option<ApiVerdict> {
        pick(input, ApiVerdict::ALL.map(ApiVerdict::as_str)).and_then(|raw| raw.parse().ok())
    }

    fn render_reveal(
        &self,
        _selected: Option<&ApiVerdict>,
        verdict: Option<Verdict>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        write_verdict(out, verdict)?;
        writeln!(out, "The response is {}.", self.correct_answer)?;
        writeln!(out)?;
        writeln!(out, "{}", self.explanation)?;
        write_response(out, "Correct behavior", &self.correct_behavior)?;
        writeln!(out, "Note: {}", self.teaching_note)
    }
}

impl Prompt for BugReportCase {
    fn render_case(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.title)?;
        writeln!(out)?;
        writeln!(out, "Bad report: \"{}\"", self.bad_report)?;
        writeln!(out)?;
        writeln!(out, "How would you rewrite it? Think it over, then press Enter.")
    }

    fn answer_hint(&self) -> String {
        "Enter".to_owned()
    }

    fn parse_answer(&self, _input: &str) -> Option<()> {
        Some(())
    }

    fn render_reveal(
        &self,
        _selected: Option<&()>,
        _verdict: Option<Verdict>,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let report = &self.improved_report;
        let teaching = &self.teaching_explanation;
        writeln!(out, "Improved report")?;
        writeln!(out, "Title: {}", report.title)?;
        writeln!(out, "  ({})", teaching.title)?;
        writeln!(out, "Steps:")?;
        for (i, step) in report.steps.iter().enumerate() {
            writeln!(out, "  {}. {step}", i + 1)?;
        }
        writeln!(out, "  ({})", teaching.steps)?;
        writeln!(out, "Expected: {}", report.expected)?;
        writeln!(out, "Actual: {}", report.actual)?;
        writeln!(out, "Impact: {}", report.impact)?;
        writeln!(out, "  ({})", teaching.impact)
    }
}
