use clap::ValueEnum;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// File types the export endpoint can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xml,
    Xls,
}

/// How the response body lands on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Text,
    Binary,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }

    pub fn write_mode(self) -> WriteMode {
        match self {
            ExportFormat::Csv | ExportFormat::Xml => WriteMode::Text,
            ExportFormat::Xls => WriteMode::Binary,
        }
    }

    pub fn all() -> Vec<ExportFormat> {
        ExportFormat::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_should_match_extensions() {
        for format in ExportFormat::all() {
            assert_eq!(
                ExportFormat::from_str(format.extension(), false).unwrap(),
                format
            );
        }
        assert!(ExportFormat::from_str("pdf", false).is_err());
    }

    #[test]
    fn write_mode_should_follow_format() {
        assert_eq!(ExportFormat::Csv.write_mode(), WriteMode::Text);
        assert_eq!(ExportFormat::Xml.write_mode(), WriteMode::Text);
        assert_eq!(ExportFormat::Xls.write_mode(), WriteMode::Binary);
        assert_eq!(ExportFormat::Xls.to_string(), "xls");
        assert_eq!(
            ExportFormat::all(),
            vec![ExportFormat::Csv, ExportFormat::Xml, ExportFormat::Xls]
        );
    }
}
