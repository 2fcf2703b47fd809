use clap::ValueEnum;
use tidyname_core::Capitalization;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for tidyname_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CapitalizationArg {
    /// Leave letter case alone
    None,
    /// Capitalize The First Letter Of Each Word
    Title,
    /// Capitalize only the first letter
    Sentence,
    /// UPPERCASE the whole name
    Upper,
    /// lowercase the whole name
    Lower,
}

impl From<CapitalizationArg> for Capitalization {
    fn from(arg: CapitalizationArg) -> Self {
        match arg {
            CapitalizationArg::None => Self::None,
            CapitalizationArg::Title => Self::Title,
            CapitalizationArg::Sentence => Self::Sentence,
            CapitalizationArg::Upper => Self::Upper,
            CapitalizationArg::Lower => Self::Lower,
        }
    }
}
