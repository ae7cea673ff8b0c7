use crate::AppResult;
use console::Term;
use indicatif::ProgressBar;

/// Routes user-facing progress lines to the terminal or above a progress bar.
/// Every line is also emitted as a tracing event, so silent runs still leave a
/// trail in the logs.
#[derive(Debug, Clone)]
pub struct AppReporter<'a> {
    inner: AppReporterInner<'a>,
}

impl<'a> AppReporter<'a> {
    pub fn silent() -> AppReporter<'static> {
        AppReporter {
            inner: AppReporterInner::Silent,
        }
    }

    pub fn report<S>(&self, message: S) -> AppResult<()>
    where
        S: AsRef<str>,
    {
        tracing::debug!(target: "ocrpipe::report", "{}", message.as_ref());
        match &self.inner {
            AppReporterInner::Term(term) => Ok(term.write_line(message.as_ref())?),
            AppReporterInner::ProgressBar(progress_bar) => {
                progress_bar.println(message.as_ref());
                Ok(())
            }
            AppReporterInner::Silent => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
enum AppReporterInner<'a> {
    Term(&'a Term),
    ProgressBar(&'a ProgressBar),
    Silent,
}

impl<'a> From<&'a Term> for AppReporter<'a> {
    fn from(term: &'a Term) -> Self {
        AppReporter {
            inner: AppReporterInner::Term(term),
        }
    }
}

impl<'a> From<&'a ProgressBar> for AppReporter<'a> {
    fn from(progress_bar: &'a ProgressBar) -> Self {
        AppReporter {
            inner: AppReporterInner::ProgressBar(progress_bar),
        }
    }
}
