use clap::Parser;
use console::{Style, Term};

use std::error::Error;

use ocrpipe::args::*;
use ocrpipe::commands::*;
use ocrpipe::errors::AppError;
use ocrpipe::pipeline::PipelineOptions;
use ocrpipe::plugins::PluginOptions;
use ocrpipe::AppResult;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ocrpipe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let term = Term::stdout();
    let bold_style = Style::new().bold();

    term.write_line(
        format!(
            "{} v{}",
            bold_style.clone().green().apply_to("ocrpipe"),
            bold_style.apply_to(env!("CARGO_PKG_VERSION"))
        )
        .as_str(),
    )?;

    let cli = CliArgs::parse();
    if let Err(err) = handle_args(cli, &term).await {
        term.write_line(
            format!(
                "{}: {}\nDetails: {:?}",
                bold_style.clone().red().apply_to("Error"),
                err,
                err.source()
            )
            .as_str(),
        )?;
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_args(cli: CliArgs, term: &Term) -> AppResult<()> {
    let bold_style = Style::new().bold();

    match cli.command {
        Some(CliCommand::Plugins { plugin_args }) => {
            let plugin_options: PluginOptions = plugin_args.try_into()?;
            command_plugins(term, plugin_options).await?;
        }
        None => {
            let ocr_args = cli.ocr_args;
            let (input, output) = match (ocr_args.input.clone(), ocr_args.output.clone()) {
                (Some(input), Some(output)) => (input, output),
                _ => {
                    return Err(AppError::PluginConfigError {
                        message: "Input and output files are required".to_string(),
                    })
                }
            };
            let options: PipelineOptions = ocr_args.try_into()?;
            let ocr_result = command_ocr(term, &input, &output, options).await?;
            term.write_line(
                format!(
                    "{} -> {}\n{} pages recognized.\n{} pages failed.",
                    input.display(),
                    output.display(),
                    bold_style
                        .clone()
                        .green()
                        .apply_to(ocr_result.pages_recognized()),
                    Style::new().yellow().apply_to(ocr_result.pages_failed()),
                )
                .as_str(),
            )?;
        }
    }

    Ok(())
}
