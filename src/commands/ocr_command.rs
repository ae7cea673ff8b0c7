use crate::pipeline::{run_with_reporter, PipelineOptions, PipelineResult};
use crate::reporter::AppReporter;
use crate::AppResult;
use console::{Style, Term};
use indicatif::*;
use rvstruct::ValueStruct;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;

pub async fn command_ocr(
    term: &Term,
    input: &Path,
    output: &Path,
    options: PipelineOptions,
) -> AppResult<PipelineResult> {
    let bold_style = Style::new().bold();
    term.write_line(
        format!(
            "Recognizing {} to {}.\nPlugin: {}. Language: {}.",
            bold_style.clone().white().apply_to(input.display()),
            bold_style.clone().yellow().apply_to(output.display()),
            bold_style.clone().green().apply_to(options.plugin_name()?.value()),
            bold_style.apply_to(options.language().value()),
        )
        .as_str(),
    )?;
    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} pages ({eta})",
        )?
        .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("◉>◯"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    let app_reporter = AppReporter::from(&bar);

    let result = run_with_reporter(input, output, options, &app_reporter, &bar).await;
    bar.finish_and_clear();
    result
}
