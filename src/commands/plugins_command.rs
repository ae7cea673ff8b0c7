use crate::common_types::PluginName;
use crate::plugins::{OcrPlugin, PluginOptions, PluginRegistry};
use crate::reporter::AppReporter;
use crate::AppResult;
use console::{pad_str, Alignment, Style, Term};
use rvstruct::ValueStruct;

pub async fn command_plugins(term: &Term, plugin_options: PluginOptions) -> AppResult<()> {
    let bold_style = Style::new().bold();
    let highlighted = bold_style.clone().white();
    let dimmed_style = Style::new().dim();
    let registry = PluginRegistry::default();
    let app_reporter = AppReporter::from(term);

    term.write_line(
        format!(
            "\n  {} {} {}",
            dimmed_style.apply_to(pad_str("Plugin", 16, Alignment::Left, None)),
            dimmed_style.apply_to(pad_str("Jobs", 6, Alignment::Left, None)),
            dimmed_style.apply_to("Languages")
        )
        .as_str(),
    )?;
    for descriptor in registry.descriptors() {
        let plugin_name = PluginName::from(descriptor.name.to_string());
        let (jobs, languages) = match registry
            .open(&plugin_name, &plugin_options, &app_reporter)
            .await
        {
            Ok(plugin) => {
                let jobs = plugin.report_concurrency_limit().to_string();
                let languages = plugin
                    .languages()
                    .iter()
                    .map(|language| language.value().as_str())
                    .collect::<Vec<&str>>()
                    .join(", ");
                plugin.close().await?;
                (jobs, languages)
            }
            Err(err) => {
                tracing::debug!(plugin = descriptor.name, "Plugin is not available: {}", err);
                (
                    "-".to_string(),
                    Style::new().yellow().apply_to(err).to_string(),
                )
            }
        };
        term.write_line(
            format!(
                "- {} {} {}\n  {}",
                highlighted.apply_to(pad_str(descriptor.name, 16, Alignment::Left, None)),
                pad_str(&jobs, 6, Alignment::Left, None),
                languages,
                dimmed_style.apply_to(descriptor.description)
            )
            .as_str(),
        )?;
    }
    Ok(())
}
