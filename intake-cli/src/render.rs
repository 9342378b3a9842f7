//! Plain-text rendering of the intake screen.

use intake_core::{DisplayState, Issuer, LOADING_MESSAGE, Panel, ParseResult};

pub const TITLE: &str = "Credit Card Statement Parser";
pub const TAGLINE: &str = "Extract key information from credit card statements instantly";
pub const FOOTER_HINT: &str =
    "Upload a credit card statement PDF to extract key information automatically";
pub const FOOTER_PRIVACY: &str = "Your data is processed locally and never sent to external servers";

pub fn render_header() -> String {
    format!("# {TITLE}\n{TAGLINE}\n")
}

pub fn render_issuers(issuers: &[Issuer]) -> String {
    let names: Vec<_> = issuers.iter().map(Issuer::label).collect();
    format!("Supported Card Issuers: {}\n", names.join(", "))
}

pub fn render_footer() -> String {
    format!("{FOOTER_HINT}\n{FOOTER_PRIVACY}\n")
}

pub fn render_result(result: &ParseResult) -> String {
    let mut out = format!(
        "## {}\n{}\n\nExtracted Data Points\n",
        result.issuer,
        result.subheading()
    );
    for point in result.data_points() {
        out.push_str(&format!("- {}: {}\n", point.label(), point.value));
    }
    out
}

/// Upload prompt followed by whichever panel is visible.
pub fn render_display(display: &DisplayState) -> String {
    let mut out = format!(
        "[ {} ]\n  {}\n",
        display.upload_prompt.title, display.upload_prompt.hint
    );

    match &display.panel {
        Panel::Empty => {}
        Panel::Error(msg) => out.push_str(&format!("\nError: {msg}\n")),
        Panel::Loading => out.push_str(&format!("\n{LOADING_MESSAGE}\n")),
        Panel::Result(result) => {
            out.push('\n');
            out.push_str(&render_result(result));
        }
    }
    out
}
