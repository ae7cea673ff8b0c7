use crate::common_types::PluginName;
use crate::errors::AppError;
use crate::plugins::paddleocr::PaddleOcrPlugin;
use crate::plugins::{PluginOptions, Plugins};
use crate::reporter::AppReporter;
use crate::AppResult;
use rvstruct::ValueStruct;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

/// OCR plugins compiled into this binary, looked up by name.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    descriptors: Vec<PluginDescriptor>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        #[allow(unused_mut)]
        let mut descriptors = vec![PluginDescriptor {
            name: crate::plugins::paddleocr::PLUGIN_NAME,
            description: "PaddleOCR serving endpoints, one per language model",
        }];
        #[cfg(feature = "ocr")]
        descriptors.push(PluginDescriptor {
            name: crate::plugins::ocrs_engine::PLUGIN_NAME,
            description: "In-process ocrs engine (Latin script)",
        });
        Self { descriptors }
    }
}

impl PluginRegistry {
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.descriptors
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.name).collect()
    }

    fn unknown_plugin(&self, plugin_name: &PluginName) -> AppError {
        AppError::UnknownPlugin {
            plugin_name: plugin_name.value().clone(),
            available: self.names().join(", "),
        }
    }

    pub fn describe(&self, plugin_name: &PluginName) -> Option<&PluginDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name == plugin_name.value().as_str())
    }

    /// Creates the plugin session. The caller owns it and must `close` it.
    pub async fn open<'a>(
        &self,
        plugin_name: &PluginName,
        options: &PluginOptions,
        reporter: &'a AppReporter<'a>,
    ) -> AppResult<Plugins<'a>> {
        let descriptor = self
            .describe(plugin_name)
            .ok_or_else(|| self.unknown_plugin(plugin_name))?;
        tracing::debug!(plugin = descriptor.name, "Opening OCR plugin");
        match descriptor.name {
            crate::plugins::paddleocr::PLUGIN_NAME => Ok(Plugins::PaddleOcr(
                PaddleOcrPlugin::new(options.paddleocr.clone(), reporter).await?,
            )),
            #[cfg(feature = "ocr")]
            crate::plugins::ocrs_engine::PLUGIN_NAME => Ok(Plugins::Ocrs(
                crate::plugins::ocrs_engine::OcrsPlugin::new(options.ocrs.clone(), reporter)
                    .await?,
            )),
            _ => Err(self.unknown_plugin(plugin_name)),
        }
    }
}
